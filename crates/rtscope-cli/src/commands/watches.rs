//! Security watch listing.

use crate::output::print_json;
use anyhow::Result;
use clap::Args;
use rtscope_client::RepositoryManagementClient;

/// Arguments for the watches command.
#[derive(Args, Debug, Clone)]
pub struct WatchesArgs {
    /// Only watches scoped to this project
    #[arg(long, value_name = "KEY")]
    pub project: Option<String>,
}

/// Run the watches command.
pub async fn run(client: &RepositoryManagementClient, args: &WatchesArgs) -> Result<()> {
    match &args.project {
        Some(project) => print_json(&client.project_watches(project).await?),
        None => {
            let scan = client.security_scan_client();
            print_json(scan.watches().await?)
        }
    }
}
