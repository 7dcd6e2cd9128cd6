//! Security-scan subsystem client.

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::types::Extra;
use rtscope_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::OnceCell;
use tracing::info;

const WATCHES: &[&str] = &["xray", "api", "v2", "watches"];

/// `general_data` block of a watch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchGeneralData {
    /// Unique watch name.
    pub name: String,
    /// Project the watch is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    /// Other upstream fields.
    #[serde(default, flatten)]
    pub extra: Extra,
}

/// Security watch: a scanning policy binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watch {
    /// Identity and scope.
    pub general_data: WatchGeneralData,
    /// Other upstream fields (resources, policies, ...).
    #[serde(default, flatten)]
    pub extra: Extra,
}

impl Watch {
    /// Watch name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.general_data.name
    }

    /// Project the watch is scoped to.
    #[must_use]
    pub fn project_key(&self) -> Option<&str> {
        self.general_data.project_key.as_deref()
    }
}

/// Watches scoped to `project_key`.
#[must_use]
pub fn watches_for_project(watches: &BTreeMap<String, Watch>, project_key: &str) -> Vec<Watch> {
    watches
        .values()
        .filter(|watch| watch.project_key() == Some(project_key))
        .cloned()
        .collect()
}

/// Client for the security-scan subsystem.
///
/// Holds one lazily populated aggregate, the watches keyed by name.
#[derive(Debug)]
pub struct SecurityScanClient {
    http: HttpClient,
    watches: OnceCell<BTreeMap<String, Watch>>,
}

impl SecurityScanClient {
    /// Create a client for the configured platform.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_http(HttpClient::new(config)?))
    }

    /// Create a client on an existing HTTP handle, sharing its credentials
    /// and connection pool.
    #[must_use]
    pub fn with_http(http: HttpClient) -> Self {
        Self {
            http,
            watches: OnceCell::new(),
        }
    }

    /// Underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// All watches keyed by `general_data.name`, fetched on first access.
    ///
    /// # Errors
    /// Returns error if the listing call fails; nothing is cached then.
    pub async fn watches(&self) -> Result<&BTreeMap<String, Watch>> {
        self.watches.get_or_try_init(|| self.fetch_watches()).await
    }

    /// Watches scoped to a project.
    ///
    /// # Errors
    /// Returns error if the watches cannot be fetched.
    pub async fn watches_for_project(&self, project_key: &str) -> Result<Vec<Watch>> {
        Ok(watches_for_project(self.watches().await?, project_key))
    }

    async fn fetch_watches(&self) -> Result<BTreeMap<String, Watch>> {
        let url = self.http.endpoint(WATCHES);
        let watches: Vec<Watch> = self.http.get_json(&url).await?;
        info!(watches = watches.len(), "loaded watches");

        Ok(watches
            .into_iter()
            .map(|watch| (watch.general_data.name.clone(), watch))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watch(name: &str, project: Option<&str>) -> Watch {
        Watch {
            general_data: WatchGeneralData {
                name: name.into(),
                project_key: project.map(Into::into),
                extra: Extra::new(),
            },
            extra: Extra::new(),
        }
    }

    #[test]
    fn parses_nested_name() {
        let watch: Watch = sonic_rs::from_str(
            r#"{"general_data":{"name":"prod-watch","active":true,"project_key":"web"},"project_resources":{"resources":[]}}"#,
        )
        .unwrap();
        assert_eq!(watch.name(), "prod-watch");
        assert_eq!(watch.project_key(), Some("web"));
        assert!(watch.general_data.extra.contains_key("active"));
        assert!(watch.extra.contains_key("project_resources"));
    }

    #[test]
    fn filters_by_project() {
        let watches: BTreeMap<String, Watch> = [
            watch("a", Some("web")),
            watch("b", Some("mobile")),
            watch("c", None),
            watch("d", Some("web")),
        ]
        .into_iter()
        .map(|w| (w.name().to_string(), w))
        .collect();

        let names: Vec<_> = watches_for_project(&watches, "web")
            .iter()
            .map(|w| w.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "d"]);
        assert!(watches_for_project(&watches, "none").is_empty());
    }
}
