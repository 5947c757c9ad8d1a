//! Plugin manifest loading from a single manifest.json

use crate::error::{PublishError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Default manifest location, relative to the working directory
pub const DEFAULT_MANIFEST_PATH: &str = "manifest.json";

/// Plugin manifest as read from disk
#[derive(Debug, Clone)]
pub struct PluginManifest {
    /// The whole manifest object, sent verbatim to the platform
    pub raw: Map<String, Value>,

    /// UI source file (HTML), resolved against the manifest directory
    pub ui: PathBuf,

    /// Main source file (JS), resolved against the manifest directory
    pub main: PathBuf,

    /// Plugin name, if the manifest declares one
    pub name: Option<String>,

    /// Plugin id, if the manifest declares one
    pub id: Option<String>,
}

/// Load the plugin manifest (single read + parse)
///
/// `ui` and `main` are required string fields. Relative paths are resolved
/// against the directory containing the manifest.
pub fn load_manifest(manifest_path: &Path) -> Result<PluginManifest> {
    let contents = std::fs::read_to_string(manifest_path).map_err(|e| PublishError::Manifest {
        path: manifest_path.to_path_buf(),
        reason: format!("Failed to read: {}", e),
    })?;

    parse_manifest(manifest_path, &contents)
}

fn parse_manifest(manifest_path: &Path, contents: &str) -> Result<PluginManifest> {
    let manifest_error = |reason: String| PublishError::Manifest {
        path: manifest_path.to_path_buf(),
        reason,
    };

    let value: Value = serde_json::from_str(contents)
        .map_err(|e| manifest_error(format!("Invalid JSON: {}", e)))?;

    let Value::Object(raw) = value else {
        return Err(manifest_error("Manifest root must be a JSON object".to_string()));
    };

    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));

    let source_path = |field: &str| -> Result<PathBuf> {
        raw.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(|s| base_dir.join(s))
            .ok_or_else(|| manifest_error(format!("Missing '{}' source path", field)))
    };

    let ui = source_path("ui")?;
    let main = source_path("main")?;

    let optional = |field: &str| raw.get(field).and_then(Value::as_str).map(String::from);
    let name = optional("name");
    let id = optional("id");

    Ok(PluginManifest {
        raw,
        ui,
        main,
        name,
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_manifest_and_resolves_sources() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(
            &path,
            r#"{"name":"Palette","id":"123","api":"1.0.0","main":"dist/code.js","ui":"dist/ui.html"}"#,
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.ui, dir.path().join("dist/ui.html"));
        assert_eq!(manifest.main, dir.path().join("dist/code.js"));
        assert_eq!(manifest.name.as_deref(), Some("Palette"));
        assert_eq!(manifest.id.as_deref(), Some("123"));
        // key order survives for the upload body
        let keys: Vec<_> = manifest.raw.keys().cloned().collect();
        assert_eq!(keys, ["name", "id", "api", "main", "ui"]);
    }

    #[test]
    fn bare_file_name_resolves_to_working_directory() {
        let manifest =
            parse_manifest(Path::new("manifest.json"), r#"{"main":"code.js","ui":"ui.html"}"#)
                .unwrap();
        assert_eq!(manifest.main, PathBuf::from("code.js"));
        assert_eq!(manifest.ui, PathBuf::from("ui.html"));
        assert!(manifest.name.is_none());
    }

    #[test]
    fn rejects_missing_ui() {
        let err = parse_manifest(Path::new("manifest.json"), r#"{"main":"code.js"}"#).unwrap_err();
        assert!(err.to_string().contains("'ui'"), "{err}");
    }

    #[test]
    fn rejects_non_object_root() {
        let err = parse_manifest(Path::new("manifest.json"), "[]").unwrap_err();
        assert!(matches!(err, PublishError::Manifest { .. }));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("nope.json"), "{err}");
    }
}
