//! GitVersion JSON output model
//!
//! Only the fields a build identity needs are modeled; everything else in
//! the tool's output is ignored.

use crate::error::GitVersionError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Structured result of `gitversion /output json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GitVersionOutput {
    /// `MAJOR.MINOR.PATCH` numeric core
    pub major_minor_patch: Option<String>,
    /// Full semantic version with a zero-padded pre-release number
    pub legacy_sem_ver_padded: Option<String>,
    pub full_sem_ver: Option<String>,
    pub branch_name: Option<String>,
    pub sha: Option<String>,
}

impl GitVersionOutput {
    /// Parse the tool's stdout.
    pub fn parse(stdout: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(stdout)?)
    }
}

/// Release version and padded full semantic version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionResult {
    /// e.g. `1.2.3`
    pub release: String,
    /// `release` optionally followed by `-` and a pre-release tag
    pub full_sem_ver: String,
}

impl VersionResult {
    pub fn new(release: impl Into<String>, full_sem_ver: impl Into<String>) -> Self {
        Self {
            release: release.into(),
            full_sem_ver: full_sem_ver.into(),
        }
    }
}

impl TryFrom<GitVersionOutput> for VersionResult {
    type Error = GitVersionError;

    /// Both fields must be present and non-blank.
    fn try_from(output: GitVersionOutput) -> Result<Self> {
        let release = non_blank(output.major_minor_patch)
            .ok_or(GitVersionError::MissingField("MajorMinorPatch"))?;
        let full_sem_ver = non_blank(output.legacy_sem_ver_padded)
            .ok_or(GitVersionError::MissingField("LegacySemVerPadded"))?;
        Ok(Self {
            release,
            full_sem_ver,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
