//! Configuration for isomorphism, subgraph and overlap queries.
//!
//! Three knobs parameterize a query:
//! - match_bonds: whether bond order and aromaticity must agree for two bonds
//!   to be compatible, or whether any bond matches any bond.
//! - timeout: an optional wall-clock budget per query. When it runs out the
//!   search stops and returns what it has found so far.
//! - max_iterations: an optional cap on the number of extension steps of the
//!   resolution-graph search.
//!
//! Quick examples
//!
//! Strict bond matching, no limits (default):
//! ```
//! use bondmatch_common::Config;
//! let cfg = Config::default();
//! assert!(cfg.match_bonds);
//! ```
//!
//! Topology-only matching with a one second budget:
//! ```
//! use std::time::Duration;
//! use bondmatch_common::Config;
//! let cfg = Config::builder()
//!     .match_bonds(false)
//!     .timeout(Duration::from_secs(1))
//!     .build();
//! assert_eq!(cfg.timeout, Some(Duration::from_secs(1)));
//! ```

use std::time::Duration;

/// Global query configuration.
///
/// - match_bonds:
///     - true  => two bonds are compatible only if their orders and
///       aromaticity agree (two aromatic bonds always agree).
///     - false => every bond is compatible with every bond; only atom labels
///       and topology are compared.
/// - timeout:
///     - None => the search runs to completion.
///     - Some(d) => each public query gets `d` of wall-clock time.
/// - max_iterations:
///     - None => unbounded.
///     - Some(n) => the search prunes every branch once `n` extension steps
///       have been taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Whether bond order and aromaticity must agree.
    pub match_bonds: bool,
    /// Per-query wall-clock budget.
    pub timeout: Option<Duration>,
    /// Cap on resolution-graph extension steps.
    pub max_iterations: Option<usize>,
}

impl Config {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(
        match_bonds: bool,
        timeout: Option<Duration>,
        max_iterations: Option<usize>,
    ) -> Self {
        Self {
            match_bonds,
            timeout,
            max_iterations,
        }
    }

    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Convenience: strict bond matching, no limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(true, None, None)
    }

    /// Convenience: topology-only matching, no limits.
    #[must_use]
    pub const fn topology_only() -> Self {
        Self::new(false, None, None)
    }
}

impl Default for Config {
    /// Strict bond matching with neither a timeout nor an iteration cap.
    fn default() -> Self {
        Self::strict()
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set whether bond order and aromaticity must agree.
    #[must_use]
    pub const fn match_bonds(mut self, match_bonds: bool) -> Self {
        self.config.match_bonds = match_bonds;
        self
    }

    /// Give every query a wall-clock budget.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Remove any wall-clock budget.
    #[must_use]
    pub const fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Cap the number of extension steps per search.
    #[must_use]
    pub const fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = Some(max_iterations);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
