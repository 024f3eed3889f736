//! Team token pruning: enumerate, classify, report, confirm, delete.

pub mod classify;
pub mod confirm;
pub mod criteria;
pub mod delete;
pub mod enumerate;
pub mod teams;

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

pub use classify::{DeletionReason, classify};
pub use confirm::{confirm, is_affirmative};
pub use criteria::{DeletionCriteria, Threshold};
pub use delete::{DeletionReport, delete_tokens};
pub use enumerate::list_all_team_tokens;
pub use teams::TeamNameCache;

use crate::error::Result;
use crate::tfe::{TeamToken, TeamTokenApi};

/// How a run ended. Every variant is a successful exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--delete` was not given.
    DryRun { marked: usize },
    /// `--delete` was given but nothing matched.
    NothingToDelete,
    /// The confirmation prompt was declined.
    Aborted { marked: usize },
    Deleted(DeletionReport),
}

/// One pruning run against an organization.
pub struct Pruner<'a, A: TeamTokenApi + ?Sized> {
    api: &'a A,
    organization: String,
    criteria: DeletionCriteria,
    delete: bool,
    now: Option<DateTime<Utc>>,
    teams: TeamNameCache,
}

impl<'a, A: TeamTokenApi + ?Sized> Pruner<'a, A> {
    pub fn new(api: &'a A, organization: impl Into<String>, criteria: DeletionCriteria) -> Self {
        Self {
            api,
            organization: organization.into(),
            criteria,
            delete: false,
            now: None,
            teams: TeamNameCache::new(),
        }
    }

    /// Actually delete after confirmation instead of only reporting.
    #[must_use]
    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    /// Pin the instant used for age comparisons.
    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Run the whole flow, reading the confirmation from `input` and
    /// writing the report to `output`.
    pub fn run<R: BufRead, W: Write>(mut self, input: &mut R, output: &mut W) -> Result<Outcome> {
        self.criteria.warn_on_negative_thresholds();

        let tokens = list_all_team_tokens(
            self.api,
            &self.organization,
            self.criteria.team_query(),
        )?;
        info!(
            organization = %self.organization,
            count = tokens.len(),
            "listed team tokens"
        );

        let marked = self.mark(tokens, output)?;
        writeln!(output, "\n{} tokens marked for deletion.", marked.len())?;

        if !self.delete {
            writeln!(
                output,
                "Use the --delete flag to delete the tokens that fit the specified criteria."
            )?;
            return Ok(Outcome::DryRun {
                marked: marked.len(),
            });
        }
        if marked.is_empty() {
            return Ok(Outcome::NothingToDelete);
        }

        if !confirm(input, output)? {
            writeln!(output, "Aborting deletion.")?;
            return Ok(Outcome::Aborted {
                marked: marked.len(),
            });
        }

        let report = delete_tokens(self.api, &marked, output)?;
        info!(
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "team token deletion finished"
        );
        Ok(Outcome::Deleted(report))
    }

    /// Classify every token, printing one line per token marked, and
    /// return the marked tokens in listing order.
    pub fn mark<W: Write>(&mut self, tokens: Vec<TeamToken>, output: &mut W) -> Result<Vec<TeamToken>> {
        let now = self.now.unwrap_or_else(Utc::now);
        let mut marked = Vec::new();

        for token in tokens {
            let team = self.teams.resolve(self.api, &token.team_id).to_string();
            let Some(reason) = classify(&token, &self.criteria, now) else {
                trace!(token_id = %token.id, "keeping token");
                continue;
            };
            writeln!(
                output,
                "Marking token for deletion because {}: '{}' in team '{team}' {} ",
                reason.because(),
                token.label(),
                reason.evidence()
            )?;
            marked.push(token);
        }

        debug!(teams = self.teams.len(), "resolved team names");
        Ok(marked)
    }
}
