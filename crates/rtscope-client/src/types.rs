//! Access and repository entity types.
//!
//! Every record names the fields rtscope reads and keeps the rest of the
//! upstream document verbatim in `extra`, so a record serializes back to
//! the shape the service returned.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scan::Watch;

/// Upstream fields rtscope does not interpret.
pub type Extra = HashMap<String, serde_json::Value>;

/// Reserved group-name prefix marking service accounts.
pub const SERVICE_ACCOUNT_PREFIX: &str = "svc-";

/// Project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project key.
    pub project_key: String,
    /// Human-readable name.
    pub display_name: String,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

/// User record as returned by the user detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique username.
    pub username: String,
    /// Names of the groups the user belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

impl User {
    /// Check group membership by group name.
    #[must_use]
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// Group record as returned by the group detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group name.
    pub name: String,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

impl Group {
    /// Whether the group is a service account by naming convention.
    #[must_use]
    pub fn is_service_account(&self) -> bool {
        self.name.starts_with(SERVICE_ACCOUNT_PREFIX)
    }
}

/// Repository configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Unique repository key.
    pub key: String,
    /// Package type wire name.
    #[serde(rename = "packageType")]
    pub package_type: String,
    /// Owning project, if the repository is assigned to one.
    #[serde(
        rename = "projectKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub project_key: Option<String>,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

/// Access token record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    /// Subject the token was issued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Expiry as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    /// Issue time as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

/// Project role record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Role name.
    pub name: String,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

/// Project-scoped membership of a user or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// Username or group name.
    pub name: String,
    /// Project roles granted to the member.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

/// Group membership of a project with the users belonging to the group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectGroup {
    /// Project membership record.
    #[serde(flatten)]
    pub membership: ProjectMember,
    /// Users whose `groups` contains the membership name.
    pub members: Vec<User>,
}

/// User of a project: a copy of the cached user with its project roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectUser {
    /// User record.
    #[serde(flatten)]
    pub user: User,
    /// Project roles granted to the user.
    pub roles: Vec<String>,
}

/// Project with every joined view attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullProject {
    /// Unique project key.
    pub project_key: String,
    /// Human-readable name.
    pub display_name: String,
    /// Roles defined on the project.
    pub roles: Vec<Role>,
    /// Group memberships with their member users.
    pub groups: Vec<ProjectGroup>,
    /// User memberships with project roles.
    pub users: Vec<ProjectUser>,
    /// Repositories assigned to the project.
    pub repositories: Vec<Repository>,
    /// Security watches scoped to the project.
    pub watches: Vec<Watch>,
}

// Listing envelopes. Listing calls only contribute identifiers; the detail
// call for each identifier supplies the record that gets cached.

#[derive(Debug, Deserialize)]
pub(crate) struct UserList {
    pub users: Vec<UserListEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserListEntry {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupList {
    pub groups: Vec<GroupListEntry>,
}

/// The group listing spells the key `group_name`; detail records use `name`.
#[derive(Debug, Deserialize)]
pub(crate) struct GroupListEntry {
    pub group_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryListEntry {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenList {
    pub tokens: Vec<Token>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberList {
    pub members: Vec<ProjectMember>,
}
