use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::prune::DeletionCriteria;
use crate::tfe::TfeClient;

/// Everything a run needs, resolved from flags, config file and environment.
#[derive(Debug)]
pub struct AppContext {
    pub client: TfeClient,
    pub organization: String,
    pub criteria: DeletionCriteria,
    pub delete: bool,
}

impl AppContext {
    /// The client is built before the organization is checked, so a missing
    /// token is reported even when `TFE_ORGANIZATION` is also unset.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let client = TfeClient::from_config(&config.api)?;
        let organization = config.require_organization()?.to_string();

        Ok(Self {
            client,
            organization,
            criteria: cli.criteria(),
            delete: cli.delete,
        })
    }
}
