//! Terraform Enterprise API access.
//!
//! [`TeamTokenApi`] is the narrow capability the pruner needs; [`TfeClient`]
//! implements it over the JSON:API HTTP interface.

pub mod client;
pub mod types;

pub use client::TfeClient;
pub use types::{Pagination, Team, TeamToken, TeamTokenListOptions, TeamTokenPage};

use crate::error::Result;

/// Operations the pruner performs against the API.
pub trait TeamTokenApi {
    /// Fetch one page of team tokens for `organization`.
    fn list_team_tokens(
        &self,
        organization: &str,
        options: &TeamTokenListOptions,
    ) -> Result<TeamTokenPage>;

    /// Read a team by id.
    fn read_team(&self, team_id: &str) -> Result<Team>;

    /// Delete a team token by id.
    fn delete_team_token(&self, token_id: &str) -> Result<()>;
}
