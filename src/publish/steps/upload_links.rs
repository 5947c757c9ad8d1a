//! Upload initiation: new version id, signed code URL and signature.

use crate::error::{PublishError, Result};
use crate::manifest::PluginManifest;
use crate::publish::client::{PlatformClient, check_status, read_json};
use crate::publish::steps::{AuthenticatedSession, ResolvedPlugin};
use crate::publish::types::{UploadLinksRequest, UploadLinksResponse};
use reqwest::Method;
use url::Url;

/// Where and under which version the new code goes.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    /// Pre-signed destination for the code bundle
    pub code_upload_url: Url,
    /// Version record created by the platform for this release
    pub version_id: String,
    /// Token the publish call must echo back
    pub signature: String,
}

/// Submits the manifest and current listing fields, and returns the upload
/// target for the new version.
///
/// Name, description, tagline and creator policy are carried over from the
/// current version; tags and category from the plugin itself.
pub async fn request_upload_links(
    client: &PlatformClient,
    session: &AuthenticatedSession,
    plugin_id: &str,
    manifest: &PluginManifest,
    release_notes: &str,
    plugin: &ResolvedPlugin,
) -> Result<UploadTarget> {
    let url = client.upload_links_url(plugin_id)?;
    log::debug!("POST {}", url);

    let version = &plugin.current_version.version;
    let body = UploadLinksRequest {
        manifest: &manifest.raw,
        release_notes,
        name: &version.name,
        description: version.description.as_deref(),
        tagline: version.tagline.as_deref(),
        creator_policy: version.creator_policy.as_deref(),
        tags: &plugin.resources.tags,
        tags_v2: [],
        category_id: plugin.resources.category_id.as_deref(),
        images_sha1: [],
    };

    let response = client
        .http()
        .post(url.clone())
        .headers(session.headers())
        .json(&body)
        .send()
        .await?;
    let response = check_status(&Method::POST, response).await?;

    let links: UploadLinksResponse = read_json(url.path(), response).await?;
    let code_upload_url = Url::parse(&links.meta.code_upload_url.signed_cloudfront_url)
        .map_err(|e| {
            PublishError::invalid_response(url.path(), format!("invalid code upload URL: {}", e))
        })?;

    log::info!("Platform created version {}", links.meta.version_id);
    Ok(UploadTarget {
        code_upload_url,
        version_id: links.meta.version_id,
        signature: links.meta.signature,
    })
}
