//! Final version publish.

use crate::error::Result;
use crate::publish::client::{PlatformClient, check_status};
use crate::publish::steps::{AuthenticatedSession, ResolvedPlugin, UploadTarget};
use crate::publish::types::PublishVersionRequest;
use reqwest::Method;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedVersion {
    pub plugin_id: String,
    pub version_id: String,
}

/// Marks the uploaded version as published.
///
/// Only code is uploaded; icon, cover image and snapshot stay as they are.
pub async fn publish_version(
    client: &PlatformClient,
    session: &AuthenticatedSession,
    plugin_id: &str,
    target: &UploadTarget,
    plugin: &ResolvedPlugin,
) -> Result<PublishedVersion> {
    let url = client.plugin_version_url(plugin_id, &target.version_id)?;
    log::debug!("PUT {}", url);

    let body = PublishVersionRequest {
        icon_uploaded: false,
        cover_image_uploaded: false,
        snapshot_uploaded: false,
        carousel_media: &plugin.current_version.carousel_media,
        code_uploaded: true,
        comments_setting: plugin.resources.comments_setting.as_deref(),
        category_id: plugin.resources.category_id.as_deref(),
        signature: &target.signature,
        agreed_to_tos: true,
        playground_file_publish_type: "noop",
    };

    let response = client
        .http()
        .put(url)
        .headers(session.headers())
        .json(&body)
        .send()
        .await?;
    check_status(&Method::PUT, response).await?;

    Ok(PublishedVersion {
        plugin_id: plugin_id.to_string(),
        version_id: target.version_id.clone(),
    })
}
