//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::prune::DeletionCriteria;

#[derive(Parser, Debug)]
#[command(name = "team-token-prune", version, about, long_about = None)]
#[command(
    after_help = "Environment:\n  TFE_ORGANIZATION  organization to prune (required)\n  TFE_TOKEN         API token\n  TFE_ADDRESS       Terraform Enterprise address (default https://app.terraform.io)"
)]
pub struct Cli {
    /// Deletes the team tokens that fit the provided criteria for deletion
    #[arg(long)]
    pub delete: bool,

    /// The team name to delete tokens for; all teams when omitted
    #[arg(long, default_value = "")]
    pub team: String,

    /// Marks expired tokens for deletion, regardless of created_at or last_used_at
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub expired: bool,

    /// Days since a token was last used before it is deleted (0 disables)
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    pub last_used_days_ago: i64,

    /// Days since a token was created before it is deleted (0 disables)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub created_at_days_ago: i64,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase diagnostic verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress diagnostics on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Deletion criteria selected by the flags.
    #[must_use]
    pub fn criteria(&self) -> DeletionCriteria {
        DeletionCriteria {
            expired: self.expired,
            last_used_days_ago: self.last_used_days_ago,
            created_at_days_ago: self.created_at_days_ago,
            team: Some(self.team.clone()).filter(|team| !team.is_empty()),
        }
    }
}
