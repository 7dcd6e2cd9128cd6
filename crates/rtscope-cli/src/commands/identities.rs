//! User, group and token listings.

use crate::output::print_json;
use anyhow::Result;
use rtscope_client::RepositoryManagementClient;

/// Run the users command.
pub async fn run_users(client: &RepositoryManagementClient) -> Result<()> {
    print_json(client.users().await?)
}

/// Run the groups command.
pub async fn run_groups(client: &RepositoryManagementClient) -> Result<()> {
    print_json(client.groups().await?)
}

/// Run the service-accounts command.
pub async fn run_service_accounts(client: &RepositoryManagementClient) -> Result<()> {
    print_json(&client.service_accounts().await?)
}

/// Run the tokens command.
pub async fn run_tokens(client: &RepositoryManagementClient) -> Result<()> {
    print_json(client.tokens().await?)
}
