//! In-memory joins between cached aggregates.
//!
//! Joins read the shared aggregates and return fresh values. They never
//! write back into a cached record.

use crate::types::{Group, ProjectGroup, ProjectMember, ProjectUser, Repository, User};
use rtscope_core::{Error, PackageType, Result};
use std::collections::BTreeMap;

/// Attach to each group membership the users belonging to that group.
///
/// Scans every user for every membership.
#[must_use]
pub fn group_members(
    memberships: Vec<ProjectMember>,
    users: &BTreeMap<String, User>,
) -> Vec<ProjectGroup> {
    memberships
        .into_iter()
        .map(|membership| {
            let members = users
                .values()
                .filter(|user| user.is_member_of(&membership.name))
                .cloned()
                .collect();
            ProjectGroup {
                membership,
                members,
            }
        })
        .collect()
}

/// Pair each user membership with a copy of the cached user record.
///
/// # Errors
/// Returns [`Error::NotFound`] if a member has no cached user record.
pub fn project_users(
    memberships: Vec<ProjectMember>,
    users: &BTreeMap<String, User>,
) -> Result<Vec<ProjectUser>> {
    memberships
        .into_iter()
        .map(|membership| {
            let user = users
                .get(&membership.name)
                .ok_or_else(|| Error::not_found("user", membership.name.as_str()))?;
            Ok(ProjectUser {
                user: user.clone(),
                roles: membership.roles,
            })
        })
        .collect()
}

/// Repositories whose `projectKey` equals `project_key`.
#[must_use]
pub fn repositories_for_project(repositories: &[Repository], project_key: &str) -> Vec<Repository> {
    repositories
        .iter()
        .filter(|repo| repo.project_key.as_deref() == Some(project_key))
        .cloned()
        .collect()
}

/// Repositories of the given package type.
#[must_use]
pub fn repositories_of_type(repositories: &[Repository], package_type: PackageType) -> Vec<Repository> {
    repositories
        .iter()
        .filter(|repo| repo.package_type == package_type.as_str())
        .cloned()
        .collect()
}

/// Groups classified as service accounts by their name prefix.
#[must_use]
pub fn service_accounts(groups: &BTreeMap<String, Group>) -> Vec<&Group> {
    groups
        .values()
        .filter(|group| group.is_service_account())
        .collect()
}
