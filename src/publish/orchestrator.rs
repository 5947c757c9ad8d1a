//! Publish flow orchestration.
//!
//! [`PublishFlow`] runs the publish steps strictly in order. Each step's
//! output is passed by value or reference into the steps that need it, so no
//! step can observe state before the step that produces it has finished.
//!
//! ```text
//! bootstrap ─► login ─► resolve ─► upload links ─► settings ─► bundle ─► upload ─► publish
//!  cookies     session   plugin     target                      text
//! ```
//!
//! The first failure is logged with its step label and returned wrapped in
//! [`PublishError::Step`]; nothing after it runs. Remote side effects of the
//! steps that did run (e.g. a created version record) are left as they are.

use crate::error::{PublishError, Result, Step};
use crate::manifest::{PluginManifest, load_manifest};
use crate::publish::client::PlatformClient;
use crate::publish::config::PublishConfig;
use crate::publish::steps::{self, PublishedVersion};

/// One publish run.
///
/// # Examples
///
/// ```no_run
/// use kodegen_plugin_publish::publish::{Credentials, DEFAULT_BASE_URL, PublishConfig, PublishFlow};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("JBSWY3DPEHPK3PXP", "ci@example.com", "secret");
/// let base_url = Url::parse(DEFAULT_BASE_URL)?;
/// let config = PublishConfig::new("1234567890", "Bug fixes", "9876543210", base_url, credentials);
///
/// let published = PublishFlow::new(config)?.run().await?;
/// println!("Published version {}", published.version_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PublishFlow {
    config: PublishConfig,
    manifest: PluginManifest,
    client: PlatformClient,
}

impl PublishFlow {
    /// Loads the manifest and prepares the platform client.
    ///
    /// No network traffic happens here.
    pub fn new(config: PublishConfig) -> Result<Self> {
        let manifest = load_manifest(&config.manifest_path)?;
        let client = PlatformClient::new(config.base_url.clone())?;
        Ok(Self {
            config,
            manifest,
            client,
        })
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// Executes every step in order, stopping at the first failure.
    pub async fn run(self) -> Result<PublishedVersion> {
        let Self {
            config,
            manifest,
            client,
        } = self;
        let plugin_id = config.plugin_id.as_str();

        log::info!("Publishing plugin {} (team {})", plugin_id, config.team_id);

        let cookies = steps::fetch_session_cookies(&client, &config.team_id)
            .await
            .map_err(step_failed(Step::Bootstrap))?;

        let session = steps::login(&client, &config.credentials, cookies)
            .await
            .map_err(step_failed(Step::Login))?;

        let plugin = steps::resolve_plugin(&client, &session, plugin_id)
            .await
            .map_err(step_failed(Step::ResolveResource))?;

        let target = steps::request_upload_links(
            &client,
            &session,
            plugin_id,
            &manifest,
            &config.release_notes,
            &plugin,
        )
        .await
        .map_err(step_failed(Step::RequestUploadLinks))?;

        steps::update_settings(&client, &session, plugin_id, &plugin.resources)
            .await
            .map_err(step_failed(Step::UpdateSettings))?;

        let bundle = steps::build_bundle(&manifest).map_err(step_failed(Step::BuildBundle))?;

        steps::upload_bundle(&client, &target, &bundle)
            .await
            .map_err(step_failed(Step::UploadBundle))?;

        let published = steps::publish_version(&client, &session, plugin_id, &target, &plugin)
            .await
            .map_err(step_failed(Step::PublishVersion))?;

        log::info!(
            "Published version {} of plugin {}",
            published.version_id,
            published.plugin_id
        );
        Ok(published)
    }
}

/// Logs a step failure once and attributes it to `step`.
fn step_failed(step: Step) -> impl FnOnce(PublishError) -> PublishError {
    move |source| {
        log::error!("Error {}: {}", step.action(), source);
        PublishError::Step {
            step,
            source: Box::new(source),
        }
    }
}
