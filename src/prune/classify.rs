//! Delete/keep decision for a single token.

use std::fmt;

use chrono::{DateTime, Utc};

use super::criteria::{DeletionCriteria, Threshold};
use crate::tfe::TeamToken;

/// Why a token was marked for deletion. Rules are checked in declaration
/// order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionReason {
    Expired { expired_at: DateTime<Utc> },
    LastUsed { last_used_at: Option<DateTime<Utc>> },
    CreatedAt { created_at: Option<DateTime<Utc>> },
}

impl DeletionReason {
    #[must_use]
    pub const fn because(&self) -> &'static str {
        match self {
            Self::Expired { .. } => "expired",
            Self::LastUsed { .. } => "last used too long ago",
            Self::CreatedAt { .. } => "created too long ago",
        }
    }

    /// The `field=value` fragment naming the matched timestamp.
    #[must_use]
    pub fn evidence(&self) -> String {
        match self {
            Self::Expired { expired_at } => format!("expired_at={expired_at}"),
            Self::LastUsed { last_used_at } => {
                format!("last_used_at={}", DisplayTime(*last_used_at))
            }
            Self::CreatedAt { created_at } => format!("created_at={}", DisplayTime(*created_at)),
        }
    }
}

struct DisplayTime(Option<DateTime<Utc>>);

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(at) => write!(f, "{at}"),
            None => f.write_str("never"),
        }
    }
}

/// Decide whether `token` should be deleted at instant `now`.
///
/// Unset last-used and created-at timestamps count as infinitely old.
#[must_use]
pub fn classify(
    token: &TeamToken,
    criteria: &DeletionCriteria,
    now: DateTime<Utc>,
) -> Option<DeletionReason> {
    if criteria.expired {
        if let Some(expired_at) = token.expired_at {
            if expired_at < now {
                return Some(DeletionReason::Expired { expired_at });
            }
        }
    }

    if let Some(threshold) = criteria.last_used_threshold() {
        if older_than(token.last_used_at, threshold, now) {
            return Some(DeletionReason::LastUsed {
                last_used_at: token.last_used_at,
            });
        }
    }

    if let Some(threshold) = criteria.created_at_threshold() {
        if older_than(token.created_at, threshold, now) {
            return Some(DeletionReason::CreatedAt {
                created_at: token.created_at,
            });
        }
    }

    None
}

fn older_than(at: Option<DateTime<Utc>>, threshold: Threshold, now: DateTime<Utc>) -> bool {
    match at {
        Some(at) => threshold.exceeded_by(now.signed_duration_since(at)),
        None => !matches!(threshold, Threshold::Unreachable),
    }
}
