//! Version resolution with fallback between sources.
//!
//! Order of preference:
//! 1. The version calculator, when the host can run it
//! 2. Versions declared in project manifests
//! 3. Forced version/suffix values replace whatever was detected

use crate::domain::error::{BuildstampError, Result};
use crate::domain::project::Project;
use crate::domain::version::BuildVersion;
use crate::manifest;
use buildstamp_ci::is_blank;
use gitversion_runner::{compute_version, VersionTool};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where a detected version came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    GitVersion,
    Manifest,
}

/// A version found by detection, before overrides and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedVersion {
    pub release: String,
    pub suffix: String,
    pub source: VersionSource,
}

/// Version and suffix forced by the invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForcedVersion {
    pub version: Option<String>,
    pub suffix: Option<String>,
}

impl ForcedVersion {
    fn is_complete(&self) -> bool {
        self.version.is_some() && self.suffix.is_some()
    }
}

/// Detect a version from the calculator, falling back to manifests.
///
/// Returns `None` when neither source yields a non-blank version.
pub fn detect_version(
    tool: &dyn VersionTool,
    projects: &[Project],
    is_local_build: bool,
) -> Result<Option<DetectedVersion>> {
    if tool.is_supported() {
        if let Some(result) = compute_version(tool, is_local_build) {
            let suffix = strip_separator(
                result
                    .full_sem_ver
                    .strip_prefix(result.release.as_str())
                    .unwrap_or(&result.full_sem_ver),
            );
            return Ok(Some(DetectedVersion {
                release: result.release,
                suffix,
                source: VersionSource::GitVersion,
            }));
        }
    } else {
        debug!("Version calculator not supported on this host");
    }

    info!("Fetching version from project manifests...");
    Ok(manifest::read_version(projects)?
        .filter(|v| !is_blank(v))
        .map(|version| DetectedVersion {
            // No suffix is derivable from a manifest; the suffix mirrors the version.
            suffix: version.clone(),
            release: version,
            source: VersionSource::Manifest,
        }))
}

/// Resolve the build version.
///
/// Forced values win per field. Detection is skipped when both are forced,
/// and only fails the build when no version is forced either.
pub fn resolve_version(
    tool: &dyn VersionTool,
    projects: &[Project],
    is_local_build: bool,
    forced: &ForcedVersion,
) -> Result<BuildVersion> {
    let detected = if forced.is_complete() {
        debug!("Version and suffix forced, skipping detection");
        None
    } else {
        detect_version(tool, projects, is_local_build)?
    };

    if let Some(detected) = &detected {
        debug!(source = ?detected.source, "Detected version {}", detected.release);
    }

    let forced_suffix = forced.suffix.as_deref().map(strip_separator);

    let (release, suffix) = match (detected, &forced.version) {
        (None, None) => return Err(BuildstampError::VersionUndetermined),
        (None, Some(version)) => {
            if forced_suffix.is_none() {
                warn!("No version detected; using forced version with an empty suffix");
            }
            (version.clone(), forced_suffix.unwrap_or_default())
        }
        (Some(detected), version) => (
            version.clone().unwrap_or(detected.release),
            forced_suffix.unwrap_or(detected.suffix),
        ),
    };

    BuildVersion::new(release, suffix)
}

/// A suffix never carries its leading `-` separator.
fn strip_separator(suffix: &str) -> String {
    suffix.trim().trim_start_matches('-').to_string()
}
