use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{PruneError, Result};
use crate::tfe::{Pagination, Team, TeamToken, TeamTokenApi, TeamTokenListOptions, TeamTokenPage};

/// Fixed instant used as "now" across unit tests.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// Builder for team tokens relative to [`fixed_now`].
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    token: TeamToken,
}

impl TokenBuilder {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            token: TeamToken {
                id: id.to_string(),
                description: None,
                team_id: "team-1".to_string(),
                created_at: Some(fixed_now()),
                last_used_at: Some(fixed_now()),
                expired_at: None,
            },
        }
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.token.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn team(mut self, team_id: &str) -> Self {
        self.token.team_id = team_id.to_string();
        self
    }

    #[must_use]
    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.token.created_at = Some(fixed_now() - TimeDelta::days(days));
        self
    }

    #[must_use]
    pub fn last_used_days_ago(mut self, days: i64) -> Self {
        self.token.last_used_at = Some(fixed_now() - TimeDelta::days(days));
        self
    }

    #[must_use]
    pub fn never_used(mut self) -> Self {
        self.token.last_used_at = None;
        self
    }

    #[must_use]
    pub fn expired_days_ago(mut self, days: i64) -> Self {
        self.token.expired_at = Some(fixed_now() - TimeDelta::days(days));
        self
    }

    #[must_use]
    pub fn build(self) -> TeamToken {
        self.token
    }
}

/// In-memory [`TeamTokenApi`] that records every call.
#[derive(Debug, Default)]
pub struct FakeApi {
    pages: Vec<Vec<TeamToken>>,
    teams: HashMap<String, String>,
    failing_deletes: HashSet<String>,
    failing_page: Option<u32>,
    list_calls: RefCell<Vec<TeamTokenListOptions>>,
    team_reads: RefCell<Vec<String>>,
    deletes: RefCell<Vec<String>>,
}

impl FakeApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page of tokens; pages are served in insertion order.
    #[must_use]
    pub fn with_page(mut self, tokens: Vec<TeamToken>) -> Self {
        self.pages.push(tokens);
        self
    }

    #[must_use]
    pub fn with_team(mut self, id: &str, name: &str) -> Self {
        self.teams.insert(id.to_string(), name.to_string());
        self
    }

    #[must_use]
    pub fn failing_delete(mut self, token_id: &str) -> Self {
        self.failing_deletes.insert(token_id.to_string());
        self
    }

    #[must_use]
    pub fn failing_page(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub fn list_calls(&self) -> Vec<TeamTokenListOptions> {
        self.list_calls.borrow().clone()
    }

    pub fn team_reads(&self) -> Vec<String> {
        self.team_reads.borrow().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.borrow().clone()
    }
}

impl TeamTokenApi for FakeApi {
    fn list_team_tokens(
        &self,
        _organization: &str,
        options: &TeamTokenListOptions,
    ) -> Result<TeamTokenPage> {
        self.list_calls.borrow_mut().push(options.clone());
        let page = options.page_number.unwrap_or(1);
        if self.failing_page == Some(page) {
            return Err(PruneError::Api {
                status: 500,
                message: "internal server error".to_string(),
            });
        }
        let total_pages = u32::try_from(self.pages.len()).unwrap_or(u32::MAX).max(1);
        let items = self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default();
        Ok(TeamTokenPage {
            items,
            pagination: Pagination {
                current_page: page,
                prev_page: page.checked_sub(1).filter(|p| *p > 0),
                next_page: (page < total_pages).then_some(page + 1),
                total_pages,
                total_count: self.pages.iter().map(|p| p.len() as u64).sum(),
            },
        })
    }

    fn read_team(&self, team_id: &str) -> Result<Team> {
        self.team_reads.borrow_mut().push(team_id.to_string());
        self.teams
            .get(team_id)
            .map(|name| Team {
                id: team_id.to_string(),
                name: name.clone(),
            })
            .ok_or_else(|| PruneError::Api {
                status: 404,
                message: "not found".to_string(),
            })
    }

    fn delete_team_token(&self, token_id: &str) -> Result<()> {
        self.deletes.borrow_mut().push(token_id.to_string());
        if self.failing_deletes.contains(token_id) {
            return Err(PruneError::Api {
                status: 500,
                message: "internal server error".to_string(),
            });
        }
        Ok(())
    }
}
