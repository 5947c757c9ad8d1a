//! Typed request and response records for the platform API.
//!
//! Response records only declare the fields the publish flow reads. Fields the
//! flow cannot proceed without are non-optional, so a response lacking them
//! fails to deserialize with a message naming the field.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Envelope shared by every JSON API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub status: Option<u16>,
    pub meta: T,
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub totp_key: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_retype: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginMeta {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
}

pub type LoginResponse = ApiResponse<LoginMeta>;

// ---------------------------------------------------------------------------
// Plugin resources
// ---------------------------------------------------------------------------

pub type PluginsResponse = ApiResponse<Vec<PluginMeta>>;

/// Platform snapshot of a published plugin
#[derive(Debug, Clone, Deserialize)]
pub struct PluginMeta {
    pub id: String,
    pub current_plugin_version_id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub roles: PluginRoles,
    #[serde(default)]
    pub support_contact: Option<String>,
    #[serde(default)]
    pub comments_setting: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Version history, left untyped; only the current entry is checked
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: HashMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub carousel_media_urls: IndexMap<String, CarouselMediaUrl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginRoles {
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// One entry of a plugin's version history
#[derive(Debug, Clone, Deserialize)]
pub struct PluginVersion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub creator_policy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarouselMediaUrl {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub sha1: String,
}

/// Carousel entry as submitted with a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselMedia {
    pub carousel_position: usize,
    pub sha1: String,
}

/// Orders a carousel mapping the way the platform's web client enumerates
/// it, then assigns positions from that order.
///
/// Keys that are canonical non-negative integers come first in ascending
/// numeric order; all other keys follow in document order.
pub fn normalize_carousel_media(media: &IndexMap<String, CarouselMediaUrl>) -> Vec<CarouselMedia> {
    let mut entries: Vec<(Option<u32>, &CarouselMediaUrl)> = media
        .iter()
        .map(|(key, entry)| (array_index(key), entry))
        .collect();

    // stable: non-index keys keep document order
    entries.sort_by_key(|(index, _)| match index {
        Some(i) => (0, *i),
        None => (1, 0),
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(position, (_, entry))| CarouselMedia {
            carousel_position: position,
            sha1: entry.sha1.clone(),
        })
        .collect()
}

fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    // "01" and "+1" are plain string keys
    (index.to_string() == key && index != u32::MAX).then_some(index)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Upload links
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UploadLinksRequest<'a> {
    pub manifest: &'a Map<String, Value>,
    pub release_notes: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_policy: Option<&'a str>,
    pub tags: &'a [String],
    pub tags_v2: [String; 0],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<&'a str>,
    pub images_sha1: [String; 0],
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadLinksMeta {
    pub version_id: String,
    pub code_upload_url: CodeUploadUrl,
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeUploadUrl {
    #[serde(default)]
    pub code_path: Option<String>,
    pub signed_cloudfront_url: String,
}

pub type UploadLinksResponse = ApiResponse<UploadLinksMeta>;

// ---------------------------------------------------------------------------
// Settings and publish
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PluginSettingsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_contact: Option<&'a str>,
    pub publisher_ids: [String; 0],
    pub agreed_to_tos: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<&'a str>,
    pub is_public: Option<bool>,
    pub is_annual_discount_active: bool,
}

#[derive(Debug, Serialize)]
pub struct PublishVersionRequest<'a> {
    pub icon_uploaded: bool,
    pub cover_image_uploaded: bool,
    pub snapshot_uploaded: bool,
    pub carousel_media: &'a [CarouselMedia],
    pub code_uploaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_setting: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<&'a str>,
    pub signature: &'a str,
    pub agreed_to_tos: bool,
    pub playground_file_publish_type: &'static str,
}
