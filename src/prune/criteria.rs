//! Deletion criteria resolved from the command line.

use chrono::TimeDelta;
use tracing::warn;

/// Which tokens a run should mark for deletion.
///
/// Day thresholds of zero or less disable their rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionCriteria {
    pub expired: bool,
    pub last_used_days_ago: i64,
    pub created_at_days_ago: i64,
    /// Team name passed to the server as a list query.
    pub team: Option<String>,
}

impl Default for DeletionCriteria {
    fn default() -> Self {
        Self {
            expired: true,
            last_used_days_ago: 30,
            created_at_days_ago: 0,
            team: None,
        }
    }
}

impl DeletionCriteria {
    /// Maximum idle time before a token counts as stale, if enabled.
    #[must_use]
    pub fn last_used_threshold(&self) -> Option<Threshold> {
        Threshold::from_days(self.last_used_days_ago)
    }

    /// Maximum age before a token counts as stale, if enabled.
    #[must_use]
    pub fn created_at_threshold(&self) -> Option<Threshold> {
        Threshold::from_days(self.created_at_days_ago)
    }

    /// The team query, ignoring an empty name.
    #[must_use]
    pub fn team_query(&self) -> Option<&str> {
        self.team.as_deref().filter(|team| !team.is_empty())
    }

    /// Log negative thresholds, which are accepted but act as "disabled".
    pub fn warn_on_negative_thresholds(&self) {
        if self.last_used_days_ago < 0 {
            warn!(
                value = self.last_used_days_ago,
                "--last-used-days-ago is negative; last-used rule disabled"
            );
        }
        if self.created_at_days_ago < 0 {
            warn!(
                value = self.created_at_days_ago,
                "--created-at-days-ago is negative; created-at rule disabled"
            );
        }
    }
}

/// An enabled age threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    After(TimeDelta),
    /// Too many days to represent; no timestamp can be that old.
    Unreachable,
}

impl Threshold {
    fn from_days(days: i64) -> Option<Self> {
        if days <= 0 {
            return None;
        }
        Some(TimeDelta::try_days(days).map_or(Self::Unreachable, Self::After))
    }

    /// True when `elapsed` strictly exceeds the threshold.
    #[must_use]
    pub fn exceeded_by(&self, elapsed: TimeDelta) -> bool {
        match self {
            Self::After(limit) => elapsed > *limit,
            Self::Unreachable => false,
        }
    }
}
