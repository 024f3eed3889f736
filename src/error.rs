//! Error types for team-token-prune.

use thiserror::Error;

/// Errors surfaced by the pruner.
///
/// Every variant is fatal to the run; per-token deletion failures are
/// reported inline and never reach `main` as a `PruneError`.
#[derive(Error, Debug)]
pub enum PruneError {
    #[error("{0}")]
    Config(String),

    #[error("{0} environment variable is not set.")]
    MissingEnv(&'static str),

    #[error("error initializing TFE client: {0}")]
    ClientInit(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("error listing team tokens for organization {organization}: {source}")]
    ListTokens {
        organization: String,
        #[source]
        source: Box<PruneError>,
    },

    #[error("Error reading input: {0}")]
    Input(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PruneError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// True when the error came back from the API with a 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, PruneError>;
