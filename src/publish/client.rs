//! HTTP client for the plugin platform.
//!
//! Thin wrapper over `reqwest` that knows the platform's endpoint layout and
//! turns non-success responses into [`PublishError::Status`].

use crate::error::{PublishError, Result};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// Platform the publisher talks to unless overridden
pub const DEFAULT_BASE_URL: &str = "https://www.figma.com";

/// Endpoint-aware platform client
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: Client,
    base_url: Url,
}

impl PlatformClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// Uses the transport's defaults for redirects and timeouts.
    pub fn new(base_url: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Team listing page that hands out the anonymous session cookies.
    pub fn team_files_url(&self, team_id: &str) -> Result<Url> {
        self.endpoint(&["files", "team", team_id, "recents-and-sharing"])
    }

    pub fn login_url(&self) -> Result<Url> {
        self.endpoint(&["api", "session", "login"])
    }

    /// Referer the login form is submitted from.
    pub fn login_page_url(&self) -> Result<Url> {
        self.endpoint(&["login"])
    }

    pub fn plugin_lookup_url(&self, plugin_id: &str) -> Result<Url> {
        let mut url = self.endpoint(&["api", "plugins"])?;
        url.query_pairs_mut().append_pair("id", plugin_id);
        Ok(url)
    }

    pub fn upload_links_url(&self, plugin_id: &str) -> Result<Url> {
        self.endpoint(&["api", "plugins", plugin_id, "upload"])
    }

    pub fn plugin_settings_url(&self, plugin_id: &str) -> Result<Url> {
        self.endpoint(&["api", "plugins", plugin_id])
    }

    pub fn plugin_version_url(&self, plugin_id: &str, version_id: &str) -> Result<Url> {
        self.endpoint(&["api", "plugins", plugin_id, "versions", version_id])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                PublishError::Cli(crate::error::CliError::InvalidArguments {
                    reason: format!("Base URL cannot carry a path: {}", self.base_url),
                })
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Passes a success response through, otherwise reads the body into a
/// [`PublishError::Status`].
pub async fn check_status(method: &Method, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(PublishError::Status {
        method: method.to_string(),
        url,
        status: status.as_u16(),
        body,
    })
}

/// Decodes a JSON body, naming the endpoint when required fields are missing.
pub async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| PublishError::invalid_response(endpoint, e.to_string()))
}
