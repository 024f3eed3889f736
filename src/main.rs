//! team-token-prune CLI

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use team_token_prune::Result;
use team_token_prune::app::AppContext;
use team_token_prune::cli::Cli;
use team_token_prune::prune::{Outcome, Pruner};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(outcome) => {
            debug!(?outcome, "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let ctx = AppContext::from_cli(cli)?;
    debug!(
        address = %ctx.client.base_url(),
        organization = %ctx.organization,
        "initialized TFE client"
    );

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Pruner::new(&ctx.client, ctx.organization.as_str(), ctx.criteria.clone())
        .with_delete(ctx.delete)
        .run(&mut input, &mut output)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn",
        1 => "warn,team_token_prune=info",
        2 => "info,team_token_prune=debug",
        3 => "debug,team_token_prune=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
