//! Declared versions from project manifests.

use crate::domain::error::{BuildstampError, Result};
use crate::domain::project::Project;
use std::path::Path;
use tracing::debug;

/// Marker for floating pre-release versions (`1.0.0-*`).
const UNSTABLE_MARKER: &str = "-*";

/// Read the version declared across `projects`.
///
/// Every manifest is read; the last project that declares a version wins.
/// Returns `None` when no manifest declares one. Unreadable or malformed
/// manifests are errors.
pub fn read_version(projects: &[Project]) -> Result<Option<String>> {
    let mut version = None;
    for project in projects {
        if let Some(declared) = read_manifest_version(&project.manifest)? {
            debug!(project = %project.name, version = %declared, "Manifest declares version");
            version = Some(declared);
        }
    }
    Ok(version)
}

/// Read the `version` key of a single manifest, with the unstable marker removed.
///
/// `*.toml` manifests are read as TOML (top-level `version`, then
/// `package.version`); everything else as JSON.
pub fn read_manifest_version(path: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| BuildstampError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    let declared = if path.extension().is_some_and(|ext| ext == "toml") {
        toml_version(path, &content)?
    } else {
        json_version(path, &content)?
    };

    Ok(declared.map(|v| v.replace(UNSTABLE_MARKER, "")))
}

fn json_version(path: &Path, content: &str) -> Result<Option<String>> {
    let doc: serde_json::Value =
        serde_json::from_str(content).map_err(|e| BuildstampError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(match doc.get("version") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    })
}

fn toml_version(path: &Path, content: &str) -> Result<Option<String>> {
    let doc: toml::Value = content.parse().map_err(|e: toml::de::Error| {
        BuildstampError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let version = doc
        .get("version")
        .or_else(|| doc.get("package").and_then(|pkg| pkg.get("version")));

    Ok(version.and_then(|v| v.as_str()).map(str::to_string))
}
