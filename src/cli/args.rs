//! Command line argument parsing and validation.
//!
//! Plugin/team ids and release notes come from flags or, when run as a CI
//! action step, from the `INPUT_*` variables the action runner exports.
//! Account secrets are read from the environment only.

use crate::error::{CliError, PublishError, Result};
use crate::manifest::DEFAULT_MANIFEST_PATH;
use crate::publish::{Credentials, DEFAULT_BASE_URL, PublishConfig};
use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;
use std::path::PathBuf;
use url::Url;

/// Environment variable holding the base32 one-time password secret
pub const TOTP_SECRET_ENV: &str = "FIGMA_TOTP_SECRET";

/// Environment variable holding the account email
pub const EMAIL_ENV: &str = "FIGMA_EMAIL";

/// Environment variable holding the account password
pub const PASSWORD_ENV: &str = "FIGMA_PASSWORD";

/// Publish a plugin build as a new version
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_plugin_publish",
    version,
    about = "Publish a plugin build as a new version",
    long_about = "Logs in with email, password and a one-time code, uploads the bundled
plugin code and publishes it as a new version of an existing plugin.

Secrets are read from the environment (or a .env file):
  FIGMA_TOTP_SECRET  base32 one-time password secret
  FIGMA_EMAIL        account email
  FIGMA_PASSWORD     account password

Usage:
  kodegen_plugin_publish --plugin-id 1234567890 --team-id 987654321 --release-notes \"Bug fixes\"
  kodegen_plugin_publish --plugin-id 1234567890 --team-id 987654321 --manifest dist/manifest.json

Exit code 0 = the new version is published."
)]
pub struct Args {
    /// Platform id of the plugin to publish
    #[arg(long, env = "INPUT_PLUGIN-ID", value_name = "ID")]
    pub plugin_id: String,

    /// Release notes for the new version
    #[arg(long, env = "INPUT_RELEASE-NOTES", value_name = "TEXT", default_value = "")]
    pub release_notes: String,

    /// Team whose file listing seeds the login session
    #[arg(long, env = "INPUT_TEAM-ID", value_name = "ID")]
    pub team_id: String,

    /// Plugin manifest with `ui` and `main` source paths
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_MANIFEST_PATH)]
    pub manifest: PathBuf,

    /// Print progress to stdout
    #[arg(short, long)]
    pub verbose: bool,

    /// Platform root URL
    #[arg(long, env = "PLUGIN_PUBLISH_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Result<Self> {
        Self::parse_args_from(std::env::args_os())
    }

    /// Parse `argv`; usage errors become [`CliError::InvalidArguments`].
    ///
    /// `--help` and `--version` print and exit 0 as usual.
    pub fn parse_args_from<I, T>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(argv).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => PublishError::from(CliError::InvalidArguments {
                reason: e.to_string().trim_start_matches("error: ").trim_end().to_string(),
            }),
        })
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.plugin_id.trim().is_empty() {
            return Err("Plugin id cannot be empty".to_string());
        }

        if self.team_id.trim().is_empty() {
            return Err("Team id cannot be empty".to_string());
        }

        if let Err(e) = Url::parse(&self.base_url) {
            return Err(format!("Invalid base URL {}: {}", self.base_url, e));
        }

        Ok(())
    }

    /// Builds the run configuration from the arguments and `credentials`.
    pub fn publish_config(&self, credentials: Credentials) -> Result<PublishConfig> {
        let base_url = Url::parse(&self.base_url).map_err(|e| CliError::InvalidArguments {
            reason: format!("Invalid base URL {}: {}", self.base_url, e),
        })?;

        Ok(PublishConfig::new(
            self.plugin_id.trim(),
            self.release_notes.trim(),
            self.team_id.trim(),
            base_url,
            credentials,
        )
        .with_manifest_path(&self.manifest))
    }
}

/// Reads the account secrets from the process environment.
pub fn credentials_from_env() -> Result<Credentials> {
    credentials_from(|name| std::env::var(name).ok())
}

fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Credentials> {
    let required = |name: &str| {
        lookup(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CliError::MissingArgument {
                argument: name.to_string(),
            })
    };

    Ok(Credentials::new(
        required(TOTP_SECRET_ENV)?,
        required(EMAIL_ENV)?,
        required(PASSWORD_ENV)?,
    ))
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose),
        }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }
}
