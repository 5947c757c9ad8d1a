//! Platform double shared by the integration tests.
#![allow(dead_code)]

use kodegen_plugin_publish::Step;
use kodegen_plugin_publish::publish::{Credentials, PublishConfig};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use url::Url;
use wiremock::matchers::{body_partial_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const PLUGIN_ID: &str = "1234567890";
pub const TEAM_ID: &str = "team-77";
pub const RELEASE_NOTES: &str = "Adds token export";
pub const TOTP_SECRET: &str = "jbswy3dpehpk3pxp";
pub const EMAIL: &str = "ci@example.com";
pub const PASSWORD: &str = "correct horse";
pub const USER_ID: &str = "user-42";
pub const NEW_VERSION_ID: &str = "v-101";
pub const SIGNATURE: &str = "sig-abc123";

/// Cookie header expected on the login call
pub const BOOTSTRAP_COOKIES: &str = "__Host-figma.did=abc; figma.anon=1";

/// Cookie header expected on every call after login
pub const SESSION_COOKIES: &str =
    "__Host-figma.did=abc; figma.anon=1; __Host-figma.authn=tok; figma.session=s3cr3t";

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn plugin_dir() -> PathBuf {
    fixture_dir().join("plugin")
}

pub fn manifest_path() -> PathBuf {
    plugin_dir().join("manifest.json")
}

pub fn plugins_fixture() -> Value {
    serde_json::from_str(include_str!("../fixtures/responses/plugins.json")).unwrap()
}

pub fn login_fixture() -> Value {
    serde_json::from_str(include_str!("../fixtures/responses/login.json")).unwrap()
}

/// The bundle the fixture plugin must produce.
pub fn expected_bundle() -> String {
    let ui = std::fs::read_to_string(plugin_dir().join("dist/ui.html")).unwrap();
    let main = std::fs::read_to_string(plugin_dir().join("dist/code.js")).unwrap();
    format!("const __html__ = {};{}", serde_json::to_string(&ui).unwrap(), main)
}

/// How far a scripted run gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every endpoint answers successfully
    Success,
    /// The endpoint of this step answers with the given status
    RejectedAt(Step, u16),
    /// The run stops at this step for a non-HTTP reason; its endpoint (if
    /// any) still answers successfully
    AbortedAt(Step),
}

impl Outcome {
    fn last_step(self) -> Option<Step> {
        match self {
            Outcome::Success => None,
            Outcome::RejectedAt(step, _) | Outcome::AbortedAt(step) => Some(step),
        }
    }

    /// Calls each endpoint must receive: once up to the failing step, never after.
    pub fn expected_calls(self, step: Step) -> u64 {
        match self.last_step() {
            Some(last) if position(step) > position(last) => 0,
            _ => 1,
        }
    }

    fn respond(self, step: Step, ok: ResponseTemplate) -> ResponseTemplate {
        match self {
            Outcome::RejectedAt(rejected, status) if rejected == step => {
                ResponseTemplate::new(status).set_body_string(format!("{:?} rejected by platform", step))
            }
            _ => ok,
        }
    }
}

pub fn position(step: Step) -> usize {
    Step::ALL.iter().position(|s| *s == step).unwrap()
}

fn no_header(name: &'static str) -> impl Fn(&Request) -> bool + Send + Sync {
    move |req: &Request| !req.headers.contains_key(name)
}

/// A mock platform on a local port.
pub struct Platform {
    pub server: MockServer,
}

impl Platform {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn upload_path(&self) -> String {
        format!("/upload/code/{}", NEW_VERSION_ID)
    }

    pub fn credentials() -> Credentials {
        Credentials::new(TOTP_SECRET, EMAIL, PASSWORD)
    }

    pub fn config(&self) -> PublishConfig {
        self.config_with_manifest(&manifest_path())
    }

    pub fn config_with_manifest(&self, manifest: &Path) -> PublishConfig {
        let base_url = Url::parse(&self.uri()).unwrap();
        PublishConfig::new(PLUGIN_ID, RELEASE_NOTES, TEAM_ID, base_url, Self::credentials())
            .with_manifest_path(manifest)
    }

    pub async fn mount(&self, outcome: Outcome) {
        self.mount_with_plugins(outcome, plugins_fixture()).await;
    }

    /// Mounts every platform endpoint with the matchers a correct run satisfies.
    pub async fn mount_with_plugins(&self, outcome: Outcome, plugins: Value) {
        let uri = self.uri();

        Mock::given(method("GET"))
            .and(path(format!("/files/team/{}/recents-and-sharing", TEAM_ID)))
            .and(no_header("x-figma-user-id"))
            .respond_with(outcome.respond(
                Step::Bootstrap,
                ResponseTemplate::new(200)
                    .append_header("set-cookie", "__Host-figma.did=abc; Path=/; Secure; HttpOnly")
                    .append_header("set-cookie", "figma.anon=1; Path=/")
                    .set_body_string("<html><body>Team files</body></html>"),
            ))
            .expect(outcome.expected_calls(Step::Bootstrap))
            .named("bootstrap")
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/session/login"))
            .and(header("cookie", BOOTSTRAP_COOKIES))
            .and(header("x-csrf-bypass", "yes"))
            .and(header("referer", format!("{}/login", uri).as_str()))
            .and(no_header("x-figma-user-id"))
            .and(body_partial_json(json!({
                "email": EMAIL,
                "username": EMAIL,
                "password": PASSWORD,
                "password_retype": PASSWORD,
            })))
            .and(|req: &Request| {
                let body: Value = serde_json::from_slice(&req.body).unwrap_or_default();
                body["totp_key"]
                    .as_str()
                    .is_some_and(|code| code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()))
            })
            .respond_with(outcome.respond(
                Step::Login,
                ResponseTemplate::new(200)
                    .append_header("set-cookie", "__Host-figma.authn=tok; Path=/; Secure")
                    .append_header("set-cookie", "figma.session=s3cr3t; Path=/")
                    .set_body_json(login_fixture()),
            ))
            .expect(outcome.expected_calls(Step::Login))
            .named("login")
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/plugins"))
            .and(query_param("id", PLUGIN_ID))
            .and(header("cookie", SESSION_COOKIES))
            .and(header("x-figma-user-id", USER_ID))
            .respond_with(outcome.respond(
                Step::ResolveResource,
                ResponseTemplate::new(200).set_body_json(plugins),
            ))
            .expect(outcome.expected_calls(Step::ResolveResource))
            .named("plugin lookup")
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/api/plugins/{}/upload", PLUGIN_ID)))
            .and(header("cookie", SESSION_COOKIES))
            .and(header("x-figma-user-id", USER_ID))
            .and(body_partial_json(json!({
                "manifest": {
                    "name": "Palette Sync",
                    "id": PLUGIN_ID,
                    "main": "dist/code.js",
                    "ui": "dist/ui.html",
                    "editorType": ["figma"]
                },
                "release_notes": RELEASE_NOTES,
                "name": "Palette Sync",
                "description": "Keep color styles in sync across files.",
                "tagline": "Colors everywhere",
                "creator_policy": "No data leaves the file.",
                "tags": ["colors", "tokens"],
                "tags_v2": [],
                "category_id": "design-tools",
                "images_sha1": []
            })))
            .respond_with(outcome.respond(
                Step::RequestUploadLinks,
                ResponseTemplate::new(200).set_body_json(json!({
                    "error": false,
                    "status": 200,
                    "meta": {
                        "version_id": NEW_VERSION_ID,
                        "code_upload_url": {
                            "code_path": "plugins/1234567890/code.js",
                            "fields": {},
                            "signed_cloudfront_url": format!("{}{}?Signature=xyz", uri, self.upload_path())
                        },
                        "icon_upload_url": {
                            "image_path": "icon.png",
                            "fields": {},
                            "signed_cloudfront_url": format!("{}/upload/icon", uri)
                        },
                        "signature": SIGNATURE,
                        "carousel_images": []
                    },
                    "i18n": null
                })),
            ))
            .expect(outcome.expected_calls(Step::RequestUploadLinks))
            .named("upload links")
            .mount(&self.server)
            .await;

        Mock::given(method("PUT"))
            .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
            .and(header("cookie", SESSION_COOKIES))
            .and(header("x-figma-user-id", USER_ID))
            .and(body_partial_json(json!({
                "support_contact": "support@example.com",
                "publisher_ids": [],
                "agreed_to_tos": true,
                "category_id": "design-tools",
                "is_public": true,
                "is_annual_discount_active": false
            })))
            .respond_with(outcome.respond(
                Step::UpdateSettings,
                ResponseTemplate::new(200).set_body_json(json!({ "error": false, "status": 200 })),
            ))
            .expect(outcome.expected_calls(Step::UpdateSettings))
            .named("settings")
            .mount(&self.server)
            .await;

        Mock::given(method("PUT"))
            .and(path(self.upload_path()))
            .and(query_param("Signature", "xyz"))
            .and(header("content-type", "text/javascript"))
            .and(header("x-amz-acl", "bucket-owner-full-control"))
            .and(no_header("cookie"))
            .and(body_string(expected_bundle()))
            .respond_with(outcome.respond(Step::UploadBundle, ResponseTemplate::new(200)))
            .expect(outcome.expected_calls(Step::UploadBundle))
            .named("code upload")
            .mount(&self.server)
            .await;

        Mock::given(method("PUT"))
            .and(path(format!("/api/plugins/{}/versions/{}", PLUGIN_ID, NEW_VERSION_ID)))
            .and(header("cookie", SESSION_COOKIES))
            .and(header("x-figma-user-id", USER_ID))
            .and(body_partial_json(json!({
                "icon_uploaded": false,
                "cover_image_uploaded": false,
                "snapshot_uploaded": false,
                "carousel_media": [
                    { "carousel_position": 0, "sha1": "0a4d55a8d778e5022fab701977c5d840bbc486d0" },
                    { "carousel_position": 1, "sha1": "7c211433f02071597741e6ff5a8ea34789abbf43" }
                ],
                "code_uploaded": true,
                "comments_setting": "all_comments",
                "category_id": "design-tools",
                "signature": SIGNATURE,
                "agreed_to_tos": true,
                "playground_file_publish_type": "noop"
            })))
            .respond_with(outcome.respond(
                Step::PublishVersion,
                ResponseTemplate::new(200).set_body_json(json!({ "error": false, "status": 200 })),
            ))
            .expect(outcome.expected_calls(Step::PublishVersion))
            .named("publish version")
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
