use std::collections::HashMap;

use tracing::debug;

use crate::tfe::TeamTokenApi;

/// Team id to display name, filled lazily for one run.
///
/// Names only decorate console output. A failed lookup caches the id itself
/// so the team is not requested again.
#[derive(Debug, Default)]
pub struct TeamNameCache {
    names: HashMap<String, String>,
}

impl TeamNameCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<A: TeamTokenApi + ?Sized>(&mut self, api: &A, team_id: &str) -> &str {
        self.names
            .entry(team_id.to_string())
            .or_insert_with(|| lookup_name(api, team_id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn lookup_name<A: TeamTokenApi + ?Sized>(api: &A, team_id: &str) -> String {
    match api.read_team(team_id) {
        Ok(team) => team.name,
        Err(err) => {
            if err.is_not_found() {
                debug!(team_id, "team not found; using id as name");
            } else {
                debug!(team_id, error = %err, "team lookup failed; using id as name");
            }
            team_id.to_string()
        }
    }
}
