//! Cached, fan-out clients for an artifact-repository management platform
//! and its security-scanning subsystem.
//!
//! This crate provides typed, aggregated read-only views over the platform's
//! HTTP/JSON management API:
//!
//! - **Aggregates**: projects, users, groups, repositories, tokens, service
//!   accounts and security watches, each fetched once per client on first
//!   access.
//!
//! - **Fan-out**: users, groups and repositories are listed first and then
//!   fetched one by one through [`BoundedFetcher`], never more than the
//!   configured number of requests at once.
//!
//! - **Joins**: project views attach roles, member groups with their users,
//!   member users with their project roles, repositories and watches. Joins
//!   are rebuilt on every call from the cached aggregates.
//!
//! - **HTTP**: bearer authentication, optional TLS verification, and errors
//!   normalized to [`rtscope_core::Error`].
//!
//! ## Example
//!
//! ```no_run
//! use rtscope_client::{ClientConfig, RepositoryManagementClient};
//!
//! # async fn example() -> rtscope_core::Result<()> {
//! let config = ClientConfig::new("https://artifacts.example.com", "access-token")
//!     .with_concurrent_workers(8);
//! let client = RepositoryManagementClient::new(&config)?;
//!
//! for (key, project) in client.projects().await? {
//!     println!("{key}: {}", project.display_name);
//! }
//!
//! let web = client.project_info_full("web").await?;
//! println!("{} users, {} repositories", web.users.len(), web.repositories.len());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod fetcher;
pub mod join;
pub mod management;
pub mod scan;
pub mod types;

pub use client::{HttpClient, HttpClientStats};
pub use config::{ClientConfig, DEFAULT_CONCURRENT_WORKERS};
pub use fetcher::BoundedFetcher;
pub use management::RepositoryManagementClient;
pub use scan::{SecurityScanClient, Watch, WatchGeneralData};
pub use types::{
    FullProject, Group, Project, ProjectGroup, ProjectMember, ProjectUser, Repository, Role,
    SERVICE_ACCOUNT_PREFIX, Token, User,
};

pub use rtscope_core::{Error, PackageType, Result};
