//! Query-scoped time budget.

use std::cell::Cell;
use std::time::{Duration, Instant};

use contracts::*;

/// Wall-clock budget for one query.
///
/// The budget is created when a query starts and consulted from deep inside
/// the search, so [`TimeBudget::exhausted`] is a clock read and a compare.
/// Once the limit has been crossed the budget stays exhausted.
#[derive(Debug)]
pub struct TimeBudget {
    started: Instant,
    limit: Option<Duration>,
    expired: Cell<bool>,
}

impl TimeBudget {
    /// Starts a budget of `limit`; `None` never runs out.
    #[must_use]
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
            expired: Cell::new(false),
        }
    }

    /// A budget that never runs out.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::start(None)
    }

    /// The configured limit.
    #[must_use]
    pub const fn limit(&self) -> Option<Duration> {
        self.limit
    }

    /// Time since the budget was started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Checks the clock and reports whether the budget is used up.
    #[debug_ensures(ret == self.is_expired())]
    pub fn exhausted(&self) -> bool {
        if self.expired.get() {
            return true;
        }
        let Some(limit) = self.limit else {
            return false;
        };
        if self.started.elapsed() >= limit {
            self.expired.set(true);
        }
        self.expired.get()
    }

    /// Whether an earlier check found the budget used up. Does not read the
    /// clock.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_expires() {
        let budget = TimeBudget::unlimited();
        assert!(!budget.exhausted());
        assert!(!budget.is_expired());
        assert_eq!(budget.limit(), None);
    }

    #[test]
    fn zero_budget_expires_on_first_check() {
        let budget = TimeBudget::start(Some(Duration::ZERO));
        assert!(!budget.is_expired());
        assert!(budget.exhausted());
        assert!(budget.is_expired());
    }

    #[test]
    fn generous_budget_does_not_expire() {
        let budget = TimeBudget::start(Some(Duration::from_secs(3600)));
        assert!(!budget.exhausted());
        assert!(budget.elapsed() < Duration::from_secs(3600));
    }
}
