//! Repository listing.

use crate::output::print_json;
use anyhow::Result;
use clap::Args;
use rtscope_client::{Repository, RepositoryManagementClient};

/// Arguments for the repositories command.
#[derive(Args, Debug, Clone)]
pub struct RepositoriesArgs {
    /// Only repositories of this package type (npm, maven, docker, ...)
    #[arg(long, value_name = "TYPE")]
    pub package_type: Option<String>,

    /// Only repositories assigned to this project
    #[arg(long, value_name = "KEY")]
    pub project: Option<String>,
}

/// Run the repositories command.
pub async fn run(client: &RepositoryManagementClient, args: &RepositoriesArgs) -> Result<()> {
    let repositories = match (&args.package_type, &args.project) {
        (Some(package_type), project) => {
            let mut repositories = client.repositories_by_package_type(package_type).await?;
            if let Some(project) = project {
                retain_project(&mut repositories, project);
            }
            repositories
        }
        (None, Some(project)) => client.project_repositories(project).await?,
        (None, None) => client.repositories().await?.to_vec(),
    };
    print_json(&repositories)
}

fn retain_project(repositories: &mut Vec<Repository>, project: &str) {
    repositories.retain(|repo| repo.project_key.as_deref() == Some(project));
}
