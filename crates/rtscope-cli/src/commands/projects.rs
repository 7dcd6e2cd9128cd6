//! Project views.

use crate::output::print_json;
use anyhow::Result;
use clap::Args;
use rtscope_client::RepositoryManagementClient;
use tracing::info;

/// Arguments for the projects command.
#[derive(Args, Debug, Clone)]
pub struct ProjectsArgs {
    /// Attach roles, groups, users, repositories and watches to every project
    #[arg(long)]
    pub full: bool,
}

/// Arguments for the project command.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project key
    pub key: String,

    /// Attach roles, groups, users, repositories and watches
    #[arg(long)]
    pub full: bool,
}

/// Run the projects command.
pub async fn run_list(client: &RepositoryManagementClient, args: &ProjectsArgs) -> Result<()> {
    if args.full {
        info!("assembling all project views");
        print_json(&client.projects_full().await?)
    } else {
        print_json(client.projects().await?)
    }
}

/// Run the project command.
pub async fn run_show(client: &RepositoryManagementClient, args: &ProjectArgs) -> Result<()> {
    if args.full {
        print_json(&client.project_info_full(&args.key).await?)
    } else {
        print_json(client.project_info(&args.key).await?)
    }
}
