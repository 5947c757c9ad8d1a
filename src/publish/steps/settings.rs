//! Settings confirmation before publishing.

use crate::error::Result;
use crate::publish::client::{PlatformClient, check_status};
use crate::publish::steps::AuthenticatedSession;
use crate::publish::types::{PluginMeta, PluginSettingsRequest};
use reqwest::Method;

/// Re-asserts support contact, category and visibility, and accepts the
/// terms of service.
pub async fn update_settings(
    client: &PlatformClient,
    session: &AuthenticatedSession,
    plugin_id: &str,
    resources: &PluginMeta,
) -> Result<()> {
    let url = client.plugin_settings_url(plugin_id)?;
    log::debug!("PUT {}", url);

    let body = PluginSettingsRequest {
        support_contact: resources.support_contact.as_deref(),
        publisher_ids: [],
        agreed_to_tos: true,
        category_id: resources.category_id.as_deref(),
        is_public: resources.roles.is_public,
        is_annual_discount_active: false,
    };

    let response = client
        .http()
        .put(url)
        .headers(session.headers())
        .json(&body)
        .send()
        .await?;
    check_status(&Method::PUT, response).await?;

    log::info!("Plugin settings confirmed");
    Ok(())
}
