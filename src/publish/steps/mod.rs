//! The publish steps, one module each, in execution order.
//!
//! Each step takes what it needs as arguments and returns what it produces;
//! none of them touch shared state.

mod bootstrap;
mod bundle;
mod login;
mod release;
mod resources;
mod settings;
mod upload;
mod upload_links;

pub use bootstrap::fetch_session_cookies;
pub use bundle::{BUNDLE_PREFIX, build_bundle, synthesize_bundle};
pub use login::{AuthenticatedSession, login};
pub use release::{PublishedVersion, publish_version};
pub use resources::{CurrentVersion, ResolvedPlugin, resolve_plugin, resolve_current_version};
pub use settings::update_settings;
pub use upload::upload_bundle;
pub use upload_links::{UploadTarget, request_upload_links};
