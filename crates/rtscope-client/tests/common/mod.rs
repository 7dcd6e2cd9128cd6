//! Shared fixtures for the wiremock-backed client tests.

#![allow(dead_code)]

use rtscope_client::{ClientConfig, RepositoryManagementClient, SecurityScanClient};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri(), TOKEN).with_concurrent_workers(4)
}

pub fn management_client(server: &MockServer) -> RepositoryManagementClient {
    RepositoryManagementClient::new(&config(server)).unwrap()
}

pub fn scan_client(server: &MockServer) -> SecurityScanClient {
    SecurityScanClient::new(&config(server)).unwrap()
}

/// Authenticated GET mock answering with a JSON body.
pub fn get_json(route: &str, body: Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// Authenticated GET mock answering with an error status and raw body.
pub fn get_status(route: &str, status: u16, body: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
}

/// Mount the user listing plus one detail endpoint per user.
///
/// Each entry is `(username, groups)`; every endpoint expects one call.
pub async fn mount_users(server: &MockServer, users: &[(&str, &[&str])]) {
    let listing: Vec<Value> = users
        .iter()
        .map(|(name, _)| json!({ "username": name, "realm": "internal" }))
        .collect();
    get_json("/access/api/v2/users", json!({ "users": listing }))
        .expect(1)
        .mount(server)
        .await;

    for (name, groups) in users {
        get_json(
            &format!("/access/api/v2/users/{name}"),
            json!({
                "username": name,
                "email": format!("{name}@example.com"),
                "groups": groups,
                "status": "enabled",
            }),
        )
        .expect(1)
        .mount(server)
        .await;
    }
}

/// Mount the group listing plus one detail endpoint per group.
pub async fn mount_groups(server: &MockServer, names: &[&str]) {
    let listing: Vec<Value> = names
        .iter()
        .map(|name| json!({ "group_name": name, "uri": format!("/groups/{name}") }))
        .collect();
    get_json("/access/api/v2/groups", json!({ "groups": listing }))
        .expect(1)
        .mount(server)
        .await;

    for name in names {
        get_json(
            &format!("/access/api/v2/groups/{name}"),
            json!({ "name": name, "description": format!("{name} group"), "auto_join": false }),
        )
        .expect(1)
        .mount(server)
        .await;
    }
}

/// Mount the repository listing plus one detail endpoint per repository.
///
/// Each entry is `(key, package type, project key)`.
pub async fn mount_repositories(server: &MockServer, repos: &[(&str, &str, Option<&str>)]) {
    let listing: Vec<Value> = repos
        .iter()
        .map(|(key, _, _)| json!({ "key": key, "type": "LOCAL" }))
        .collect();
    get_json("/artifactory/api/repositories", Value::Array(listing))
        .expect(1)
        .mount(server)
        .await;

    for (key, package_type, project) in repos {
        let mut detail = json!({ "key": key, "packageType": package_type, "rclass": "local" });
        if let Some(project) = project {
            detail["projectKey"] = json!(project);
        }
        get_json(&format!("/artifactory/api/repositories/{key}"), detail)
            .expect(1)
            .mount(server)
            .await;
    }
}

/// Watch listing entry.
pub fn watch(name: &str, project: Option<&str>) -> Value {
    let mut general = json!({ "name": name, "active": true });
    if let Some(project) = project {
        general["project_key"] = json!(project);
    }
    json!({
        "general_data": general,
        "project_resources": { "resources": [] },
        "assigned_policies": [{ "name": "block-critical", "type": "security" }],
    })
}
