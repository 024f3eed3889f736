//! team-token-prune - list and prune Terraform Enterprise team tokens.
//!
//! Walks every team token in an organization, marks the ones that are
//! expired or stale, and deletes them after confirmation.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod prune;
pub mod tfe;

#[cfg(test)]
pub mod test_utils;

pub use error::{PruneError, Result};
