//! Plugin metadata lookup and current-version resolution.

use crate::error::{PublishError, Result};
use crate::publish::client::{PlatformClient, check_status, read_json};
use crate::publish::steps::AuthenticatedSession;
use crate::publish::types::{
    CarouselMedia, PluginMeta, PluginVersion, PluginsResponse, normalize_carousel_media,
};
use reqwest::Method;
use serde::Deserialize;

/// The version the platform currently serves, plus its carousel.
#[derive(Debug, Clone)]
pub struct CurrentVersion {
    pub version: PluginVersion,
    pub carousel_media: Vec<CarouselMedia>,
}

/// Platform snapshot of the target plugin.
#[derive(Debug, Clone)]
pub struct ResolvedPlugin {
    pub resources: PluginMeta,
    pub current_version: CurrentVersion,
}

/// Fetches the plugin's metadata and derives its current version.
pub async fn resolve_plugin(
    client: &PlatformClient,
    session: &AuthenticatedSession,
    plugin_id: &str,
) -> Result<ResolvedPlugin> {
    let url = client.plugin_lookup_url(plugin_id)?;
    log::debug!("GET {}", url);

    let response = client
        .http()
        .get(url.clone())
        .headers(session.headers())
        .send()
        .await?;
    let response = check_status(&Method::GET, response).await?;

    let plugins: PluginsResponse = read_json(url.path(), response).await?;
    let resources = plugins.meta.into_iter().next().ok_or_else(|| {
        PublishError::invalid_response(url.path(), format!("no plugin with id {}", plugin_id))
    })?;

    let current_version = resolve_current_version(&resources)?;

    log::info!(
        "Resolved plugin {} at version {} ({} carousel item(s))",
        resources.id,
        current_version.version.id,
        current_version.carousel_media.len()
    );
    Ok(ResolvedPlugin {
        resources,
        current_version,
    })
}

/// Looks up `current_plugin_version_id` in the version map.
///
/// Only the current entry has to be well-formed; older history entries are
/// never read. A pointer to a version that is not in the map is an error,
/// since the upload call needs the version's name.
pub fn resolve_current_version(resources: &PluginMeta) -> Result<CurrentVersion> {
    let current_id = &resources.current_plugin_version_id;
    let entry = resources.versions.get(current_id).ok_or_else(|| {
        PublishError::invalid_response(
            "/api/plugins",
            format!(
                "current version {} not found among {} version(s) of plugin {}",
                current_id,
                resources.versions.len(),
                resources.id
            ),
        )
    })?;

    let version = PluginVersion::deserialize(entry).map_err(|e| {
        PublishError::invalid_response(
            "/api/plugins",
            format!("current version {} is malformed: {}", current_id, e),
        )
    })?;

    Ok(CurrentVersion {
        version,
        carousel_media: normalize_carousel_media(&resources.carousel_media_urls),
    })
}
