//! CLI commands for rtscope.

pub mod identities;
pub mod projects;
pub mod repositories;
pub mod watches;

use clap::{ArgAction, Args, Parser, Subcommand};
use rtscope_client::{ClientConfig, DEFAULT_CONCURRENT_WORKERS};

/// rtscope - read-only views over an artifact-repository platform
#[derive(Parser, Debug)]
#[command(name = "rtscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Platform connection settings.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Platform base URL
    #[arg(long, env = "RTSCOPE_URL")]
    pub url: String,

    /// Access token
    #[arg(long, env = "RTSCOPE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Skip TLS certificate verification
    #[arg(long, env = "RTSCOPE_INSECURE")]
    pub insecure: bool,

    /// Maximum concurrent detail requests
    #[arg(long, env = "RTSCOPE_WORKERS", default_value_t = DEFAULT_CONCURRENT_WORKERS)]
    pub workers: usize,
}

impl ConnectionArgs {
    /// Client configuration for these settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.url.as_str(), self.token.as_str())
            .with_ssl_verify(!self.insecure)
            .with_concurrent_workers(self.workers)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all projects
    Projects(projects::ProjectsArgs),

    /// Show one project
    Project(projects::ProjectArgs),

    /// List all users
    Users,

    /// List all groups
    Groups,

    /// List groups that are service accounts
    #[command(name = "service-accounts")]
    ServiceAccounts,

    /// List access tokens
    Tokens,

    /// List repositories
    #[command(alias = "repos")]
    Repositories(repositories::RepositoriesArgs),

    /// List security watches
    Watches(watches::WatchesArgs),
}
