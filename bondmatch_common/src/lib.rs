//! Common graph model and shared types for the bondmatch workspace.
//!
//! This crate provides the molecule container the matching core works on,
//! the query predicates and default matchers, the query configuration, and
//! molecule fixtures used across the workspace's tests.

mod config;
mod error;
pub mod fixtures;
mod matcher;
mod molecule;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::matcher::*;
pub use crate::molecule::*;
