//! Plugin publishing against a session-authenticated platform.
//!
//! The flow logs in with a one-time code, reads the plugin's current
//! listing, uploads a freshly built code bundle to a pre-signed URL and
//! publishes it as a new version.

pub mod client;
pub mod config;
mod orchestrator;
pub mod session;
pub mod steps;
pub mod totp;
pub mod types;

pub use client::{DEFAULT_BASE_URL, PlatformClient};
pub use config::{Credentials, PublishConfig};
pub use orchestrator::PublishFlow;
pub use session::CookieJar;
pub use steps::PublishedVersion;
