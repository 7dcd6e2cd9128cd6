//! rtscope CLI - read-only views over an artifact-repository platform.
//!
//! Every subcommand prints its view as pretty JSON on stdout. Logs and
//! errors go to stderr.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod output;

use clap::Parser;
use commands::{Cli, Commands};
use rtscope_client::RepositoryManagementClient;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = EnvFilter::builder()
        .with_default_directive(log_level(cli.verbose, cli.quiet).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            output::error(&format!("failed to create runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_command(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

const fn log_level(verbose: u8, quiet: bool) -> Level {
    match verbose {
        0 if quiet => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

async fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.connection.client_config();
    let client = RepositoryManagementClient::new(&config)?;

    match &cli.command {
        Commands::Projects(args) => commands::projects::run_list(&client, args).await,
        Commands::Project(args) => commands::projects::run_show(&client, args).await,
        Commands::Users => commands::identities::run_users(&client).await,
        Commands::Groups => commands::identities::run_groups(&client).await,
        Commands::ServiceAccounts => commands::identities::run_service_accounts(&client).await,
        Commands::Tokens => commands::identities::run_tokens(&client).await,
        Commands::Repositories(args) => commands::repositories::run(&client, args).await,
        Commands::Watches(args) => commands::watches::run(&client, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_level(0, false), Level::WARN);
        assert_eq!(log_level(0, true), Level::ERROR);
        assert_eq!(log_level(1, false), Level::INFO);
        assert_eq!(log_level(2, false), Level::DEBUG);
        assert_eq!(log_level(5, false), Level::TRACE);
    }
}
