use std::io::Write;

use tracing::warn;

use crate::error::Result;
use crate::tfe::{TeamToken, TeamTokenApi};

/// Outcome of the deletion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
    /// Token id and error message for each failed delete.
    pub failed: Vec<(String, String)>,
}

impl DeletionReport {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }
}

/// Delete each token in order. A failed delete is reported and skipped.
///
/// Only a failure to write to `output` is returned as an error.
pub fn delete_tokens<A: TeamTokenApi + ?Sized, W: Write>(
    api: &A,
    tokens: &[TeamToken],
    output: &mut W,
) -> Result<DeletionReport> {
    let mut report = DeletionReport::default();

    for token in tokens {
        match token.description() {
            Some(description) => writeln!(output, "Deleting token: {} ({description})", token.id)?,
            None => writeln!(output, "Deleting token: {}", token.id)?,
        }

        if let Err(err) = api.delete_team_token(&token.id) {
            warn!(token_id = %token.id, error = %err, "team token delete failed");
            writeln!(output, "Error deleting token {}: {err}", token.id)?;
            report.failed.push((token.id.clone(), err.to_string()));
            continue;
        }
        report.deleted.push(token.id.clone());
    }

    writeln!(output, "Team tokens deleted.")?;
    Ok(report)
}
