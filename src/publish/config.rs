//! Inputs of a publish run.

use crate::manifest::DEFAULT_MANIFEST_PATH;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Account credentials for the platform login.
///
/// Supplied once at construction; nothing is read from the process
/// environment after that.
#[derive(Clone)]
pub struct Credentials {
    totp_secret: String,
    email: String,
    password: String,
}

impl Credentials {
    /// The one-time password secret is normalized to uppercase.
    pub fn new(
        totp_secret: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            totp_secret: totp_secret.into().to_uppercase(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn totp_secret(&self) -> &str {
        &self.totp_secret
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("totp_secret", &"<redacted>")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything a single publish run needs.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Platform id of the plugin being published
    pub plugin_id: String,
    /// Release notes attached to the new version
    pub release_notes: String,
    /// Team whose listing page seeds the session
    pub team_id: String,
    /// Plugin manifest location
    pub manifest_path: PathBuf,
    /// Platform root URL
    pub base_url: Url,
    pub credentials: Credentials,
}

impl PublishConfig {
    /// Config against the platform at `base_url`, reading `manifest.json`.
    pub fn new(
        plugin_id: impl Into<String>,
        release_notes: impl Into<String>,
        team_id: impl Into<String>,
        base_url: Url,
        credentials: Credentials,
    ) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            release_notes: release_notes.into(),
            team_id: team_id.into(),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            base_url,
            credentials,
        }
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}
