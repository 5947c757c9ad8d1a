//! Code bundle synthesis.
//!
//! The platform runs a single script. The UI document is inlined into it as
//! a string constant ahead of the main script.

use crate::error::{PublishError, Result};
use crate::manifest::PluginManifest;
use std::path::Path;

/// Declaration the UI document is bound to
pub const BUNDLE_PREFIX: &str = "const __html__ = ";

/// Reads the manifest's `ui` and `main` sources and synthesizes the bundle.
pub fn build_bundle(manifest: &PluginManifest) -> Result<String> {
    let ui = read_source(&manifest.ui)?;
    let main = read_source(&manifest.main)?;
    let bundle = synthesize_bundle(&ui, &main)?;
    log::info!(
        "Built {} byte bundle from {} and {}",
        bundle.len(),
        manifest.ui.display(),
        manifest.main.display()
    );
    Ok(bundle)
}

/// `const __html__ = <JSON string of ui>;` followed directly by `main`.
pub fn synthesize_bundle(ui: &str, main: &str) -> Result<String> {
    let escaped_ui = serde_json::to_string(ui)?;
    let mut bundle = String::with_capacity(BUNDLE_PREFIX.len() + escaped_ui.len() + 1 + main.len());
    bundle.push_str(BUNDLE_PREFIX);
    bundle.push_str(&escaped_ui);
    bundle.push(';');
    bundle.push_str(main);
    Ok(bundle)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        log::error!("Failed to read {}: {}", path.display(), e);
        PublishError::Io(e)
    })
}
