//! Repository-management platform client.
//!
//! [`RepositoryManagementClient`] exposes the platform's projects, users,
//! groups, repositories and tokens as lazily populated aggregates, plus
//! project views joined from those aggregates.
//!
//! # Caching
//!
//! Each aggregate is fetched on first access and kept for the lifetime of
//! the client. Concurrent first accesses share one fetch sequence. A failed
//! fetch caches nothing, so the next access starts over. Joined project
//! views are rebuilt on every call from the cached aggregates.

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::fetcher::BoundedFetcher;
use crate::join;
use crate::scan::{SecurityScanClient, Watch};
use crate::types::{
    FullProject, Group, GroupList, MemberList, Project, ProjectGroup, ProjectMember, ProjectUser,
    Repository, RepositoryListEntry, Role, Token, TokenList, User, UserList,
};
use rtscope_core::{Error, PackageType, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use url::Url;

const PROJECTS: &[&str] = &["access", "api", "v1", "projects"];
const USERS: &[&str] = &["access", "api", "v2", "users"];
const GROUPS: &[&str] = &["access", "api", "v2", "groups"];
const TOKENS: &[&str] = &["access", "api", "v1", "tokens"];
const REPOSITORIES: &[&str] = &["artifactory", "api", "repositories"];

/// Detail fetch run by one fan-out task on its own client handle.
async fn fetch_detail<T: DeserializeOwned>(http: HttpClient, url: Url) -> Result<T> {
    http.get_json(&url).await
}

/// Client for the artifact-repository management platform.
#[derive(Debug)]
pub struct RepositoryManagementClient {
    http: HttpClient,
    fetcher: BoundedFetcher,
    projects: OnceCell<BTreeMap<String, Project>>,
    users: OnceCell<BTreeMap<String, User>>,
    groups: OnceCell<BTreeMap<String, Group>>,
    repositories: OnceCell<Vec<Repository>>,
    tokens: OnceCell<Vec<Token>>,
}

impl RepositoryManagementClient {
    /// Create a client for the configured platform.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = HttpClient::new(config)?;
        Ok(Self::with_http(http, config.concurrent_workers))
    }

    /// Create a client on an existing HTTP handle.
    #[must_use]
    pub fn with_http(http: HttpClient, concurrent_workers: usize) -> Self {
        Self {
            http,
            fetcher: BoundedFetcher::new(concurrent_workers),
            projects: OnceCell::new(),
            users: OnceCell::new(),
            groups: OnceCell::new(),
            repositories: OnceCell::new(),
            tokens: OnceCell::new(),
        }
    }

    /// Underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fan-out concurrency ceiling.
    #[must_use]
    pub const fn concurrent_workers(&self) -> usize {
        self.fetcher.concurrency()
    }

    /// Scan-subsystem client using this client's credentials.
    #[must_use]
    pub fn security_scan_client(&self) -> SecurityScanClient {
        SecurityScanClient::with_http(self.http.clone())
    }

    fn url(&self, base: &[&str], tail: &[&str]) -> Url {
        self.http.endpoint(&[base, tail].concat())
    }

    // ------------------------------------------------------------------
    // Aggregates
    // ------------------------------------------------------------------

    /// All projects keyed by project key.
    ///
    /// # Errors
    /// Returns error if the listing call fails.
    pub async fn projects(&self) -> Result<&BTreeMap<String, Project>> {
        self.projects
            .get_or_try_init(|| async {
                let projects: Vec<Project> =
                    self.http.get_json(&self.http.endpoint(PROJECTS)).await?;
                info!(projects = projects.len(), "loaded projects");
                Ok(projects
                    .into_iter()
                    .map(|project| (project.project_key.clone(), project))
                    .collect())
            })
            .await
    }

    /// All users keyed by username, each fetched from its detail endpoint.
    ///
    /// # Errors
    /// Returns error if the listing or any detail call fails.
    pub async fn users(&self) -> Result<&BTreeMap<String, User>> {
        self.users
            .get_or_try_init(|| async {
                let listing: UserList = self.http.get_json(&self.http.endpoint(USERS)).await?;
                debug!(users = listing.users.len(), "listed users");

                let users = self
                    .fetcher
                    .fetch_all(
                        listing.users,
                        |entry| {
                            let url = self.url(USERS, &[entry.username.as_str()]);
                            fetch_detail::<User>(self.http.clone(), url)
                        },
                        |user: &User| user.username.clone(),
                    )
                    .await?;
                info!(users = users.len(), "loaded users");
                Ok(users)
            })
            .await
    }

    /// All groups keyed by name, each fetched from its detail endpoint.
    ///
    /// The listing names groups `group_name`; the cache is keyed by the
    /// detail record's own `name`.
    ///
    /// # Errors
    /// Returns error if the listing or any detail call fails.
    pub async fn groups(&self) -> Result<&BTreeMap<String, Group>> {
        self.groups
            .get_or_try_init(|| async {
                let listing: GroupList = self.http.get_json(&self.http.endpoint(GROUPS)).await?;
                let names: Vec<String> = listing
                    .groups
                    .into_iter()
                    .map(|entry| entry.group_name)
                    .collect();
                debug!(groups = names.len(), "listed groups");

                let groups = self
                    .fetcher
                    .fetch_all(
                        names,
                        |name| {
                            let url = self.url(GROUPS, &[name.as_str()]);
                            fetch_detail::<Group>(self.http.clone(), url)
                        },
                        |group: &Group| group.name.clone(),
                    )
                    .await?;
                info!(groups = groups.len(), "loaded groups");
                Ok(groups)
            })
            .await
    }

    /// All repository configurations, each fetched from its detail endpoint.
    ///
    /// # Errors
    /// Returns error if the listing or any detail call fails.
    pub async fn repositories(&self) -> Result<&[Repository]> {
        let repositories = self
            .repositories
            .get_or_try_init(|| async {
                let listing: Vec<RepositoryListEntry> =
                    self.http.get_json(&self.http.endpoint(REPOSITORIES)).await?;
                debug!(repositories = listing.len(), "listed repositories");

                let repositories = self
                    .fetcher
                    .fetch_list(listing, |entry| {
                        let url = self.url(REPOSITORIES, &[entry.key.as_str()]);
                        fetch_detail::<Repository>(self.http.clone(), url)
                    })
                    .await?;
                info!(repositories = repositories.len(), "loaded repositories");
                Ok::<_, Error>(repositories)
            })
            .await?;
        Ok(repositories)
    }

    /// All access tokens.
    ///
    /// # Errors
    /// Returns error if the listing call fails.
    pub async fn tokens(&self) -> Result<&[Token]> {
        let tokens = self
            .tokens
            .get_or_try_init(|| async {
                let listing: TokenList = self.http.get_json(&self.http.endpoint(TOKENS)).await?;
                info!(tokens = listing.tokens.len(), "loaded tokens");
                Ok::<_, Error>(listing.tokens)
            })
            .await?;
        Ok(tokens)
    }

    /// Groups that are service accounts, read from the `groups` aggregate.
    ///
    /// # Errors
    /// Returns error if the groups cannot be fetched.
    pub async fn service_accounts(&self) -> Result<Vec<&Group>> {
        Ok(join::service_accounts(self.groups().await?))
    }

    // ------------------------------------------------------------------
    // Single records
    // ------------------------------------------------------------------

    /// Fetch one user. Not cached.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn user(&self, username: &str) -> Result<User> {
        self.http.get_json(&self.url(USERS, &[username])).await
    }

    /// Fetch one group. Not cached.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn group(&self, group_name: &str) -> Result<Group> {
        self.http.get_json(&self.url(GROUPS, &[group_name])).await
    }

    /// Fetch one repository configuration. Not cached.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn repository(&self, repo_key: &str) -> Result<Repository> {
        self.http.get_json(&self.url(REPOSITORIES, &[repo_key])).await
    }

    /// Project record from the `projects` aggregate.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] for an unknown key.
    pub async fn project_info(&self, project_key: &str) -> Result<&Project> {
        self.projects()
            .await?
            .get(project_key)
            .ok_or_else(|| Error::not_found("project", project_key))
    }

    // ------------------------------------------------------------------
    // Project joins
    // ------------------------------------------------------------------

    /// Roles defined on a project. Not cached.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn project_roles(&self, project_key: &str) -> Result<Vec<Role>> {
        self.http
            .get_json(&self.url(PROJECTS, &[project_key, "roles"]))
            .await
    }

    async fn project_members(&self, project_key: &str, kind: &str) -> Result<Vec<ProjectMember>> {
        let listing: MemberList = self
            .http
            .get_json(&self.url(PROJECTS, &[project_key, kind]))
            .await?;
        Ok(listing.members)
    }

    /// Group memberships of a project, each with the users in that group.
    ///
    /// # Errors
    /// Returns error if the memberships or users cannot be fetched.
    pub async fn project_groups(&self, project_key: &str) -> Result<Vec<ProjectGroup>> {
        let memberships = self.project_members(project_key, "groups").await?;
        let users = self.users().await?;
        Ok(join::group_members(memberships, users))
    }

    /// User memberships of a project with their project roles.
    ///
    /// Each entry is a copy of the cached user; the cached record is left
    /// untouched.
    ///
    /// # Errors
    /// Returns error if the memberships or users cannot be fetched, or
    /// [`Error::NotFound`] if a member has no user record.
    pub async fn project_users(&self, project_key: &str) -> Result<Vec<ProjectUser>> {
        let memberships = self.project_members(project_key, "users").await?;
        let users = self.users().await?;
        join::project_users(memberships, users)
    }

    /// Repositories assigned to a project.
    ///
    /// # Errors
    /// Returns error if the repositories cannot be fetched.
    pub async fn project_repositories(&self, project_key: &str) -> Result<Vec<Repository>> {
        Ok(join::repositories_for_project(
            self.repositories().await?,
            project_key,
        ))
    }

    /// Security watches scoped to a project.
    ///
    /// Uses a fresh scan client with this client's credentials.
    ///
    /// # Errors
    /// Returns error if the watches cannot be fetched.
    pub async fn project_watches(&self, project_key: &str) -> Result<Vec<Watch>> {
        self.security_scan_client()
            .watches_for_project(project_key)
            .await
    }

    /// Repositories of a package type named by its wire name.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the name is not a known package
    /// type, or error if the repositories cannot be fetched.
    pub async fn repositories_by_package_type(&self, package_type: &str) -> Result<Vec<Repository>> {
        let package_type: PackageType = package_type.parse()?;
        self.repositories_of_type(package_type).await
    }

    /// Repositories of a package type.
    ///
    /// # Errors
    /// Returns error if the repositories cannot be fetched.
    pub async fn repositories_of_type(&self, package_type: PackageType) -> Result<Vec<Repository>> {
        Ok(join::repositories_of_type(
            self.repositories().await?,
            package_type,
        ))
    }

    // ------------------------------------------------------------------
    // Full project views
    // ------------------------------------------------------------------

    /// Every project with its roles, groups, users, repositories and
    /// watches attached. Rebuilt on every call.
    ///
    /// # Errors
    /// Returns error if any underlying fetch fails.
    pub async fn projects_full(&self) -> Result<BTreeMap<String, FullProject>> {
        let projects = self.projects().await?;
        if projects.is_empty() {
            return Ok(BTreeMap::new());
        }
        let scan = self.security_scan_client();
        self.prime_joins(&scan).await?;

        let scan = &scan;
        self.fetcher
            .fetch_all(
                projects.values(),
                move |project| self.assemble(project, scan),
                |full: &FullProject| full.project_key.clone(),
            )
            .await
    }

    /// One project with every joined view attached. Rebuilt on every call.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] for an unknown key, or error if any
    /// underlying fetch fails.
    pub async fn project_info_full(&self, project_key: &str) -> Result<FullProject> {
        let project = self.project_info(project_key).await?;
        let scan = self.security_scan_client();
        self.assemble(project, &scan).await
    }

    /// Load the aggregates every join reads before fanning out over
    /// projects, so each aggregate's own fan-out runs alone.
    async fn prime_joins(&self, scan: &SecurityScanClient) -> Result<()> {
        self.users().await?;
        self.repositories().await?;
        scan.watches().await?;
        Ok(())
    }

    async fn assemble(&self, project: &Project, scan: &SecurityScanClient) -> Result<FullProject> {
        let key = project.project_key.as_str();
        debug!(project = %key, "assembling project view");

        Ok(FullProject {
            project_key: project.project_key.clone(),
            display_name: project.display_name.clone(),
            roles: self.project_roles(key).await?,
            groups: self.project_groups(key).await?,
            users: self.project_users(key).await?,
            repositories: self.project_repositories(key).await?,
            watches: scan.watches_for_project(key).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(workers: usize) -> RepositoryManagementClient {
        let config = ClientConfig::new("https://rt.example.com/", "token")
            .with_concurrent_workers(workers);
        RepositoryManagementClient::new(&config).unwrap()
    }

    #[test]
    fn endpoint_paths() {
        let client = client(4);
        assert_eq!(
            client.url(PROJECTS, &["web", "roles"]).as_str(),
            "https://rt.example.com/access/api/v1/projects/web/roles"
        );
        assert_eq!(
            client.url(REPOSITORIES, &["libs-release"]).as_str(),
            "https://rt.example.com/artifactory/api/repositories/libs-release"
        );
    }

    #[test]
    fn workers_from_config() {
        assert_eq!(client(7).concurrent_workers(), 7);
    }

    #[tokio::test]
    async fn invalid_package_type_fails_before_fetching() {
        let client = client(4);
        let err = client
            .repositories_by_package_type("not-a-real-type")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(client.http().stats().requests(), 0);
    }

    #[test]
    fn scan_client_shares_credentials() {
        let client = client(4);
        let scan = client.security_scan_client();
        assert_eq!(scan.http().base_url(), client.http().base_url());
        assert_eq!(scan.http().ssl_verify(), client.http().ssl_verify());
    }
}
