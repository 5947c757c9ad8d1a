//! Command line interface for plugin publishing.
//!
//! Parses arguments, loads secrets, runs the publish flow and prints the
//! single success line.

mod args;
mod output;

pub use args::{
    Args, EMAIL_ENV, PASSWORD_ENV, RuntimeConfig, TOTP_SECRET_ENV, credentials_from_env,
};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use crate::publish::PublishFlow;

/// Message printed once a version is published
pub const SUCCESS_MESSAGE: &str = "🎉 Plugin published successfully!";

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    // .env is optional; real environment variables take precedence
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }

    let args = Args::parse_args()?;
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let runtime_config = RuntimeConfig::from(&args);

    let config = args.publish_config(credentials_from_env()?)?;
    runtime_config.verbose_println(&format!(
        "Publishing plugin {} from {}",
        config.plugin_id,
        config.manifest_path.display()
    ))?;

    let published = PublishFlow::new(config)?.run().await?;

    runtime_config.verbose_println(&format!("Version {} is live", published.version_id))?;
    runtime_config.success(SUCCESS_MESSAGE)?;
    Ok(0)
}
