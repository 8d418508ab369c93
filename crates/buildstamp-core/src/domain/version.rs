//! Resolved build version.

use crate::domain::error::{BuildstampError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn release_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d+)*$").expect("valid release regex"))
}

/// Release version plus suffix, fixed once per build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildVersion {
    release: String,
    suffix: String,
}

impl BuildVersion {
    /// Validate and create a build version.
    ///
    /// The release must be non-blank and dotted numeric. The suffix is
    /// stored as given.
    pub fn new(release: impl Into<String>, suffix: impl Into<String>) -> Result<Self> {
        let release = release.into().trim().to_string();
        if release.is_empty() {
            return Err(BuildstampError::VersionUndetermined);
        }
        if !release_pattern().is_match(&release) {
            return Err(BuildstampError::InvalidRelease(release));
        }
        Ok(Self {
            release,
            suffix: suffix.into(),
        })
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl std::fmt::Display for BuildVersion {
    /// `release`, or `release-suffix` when the suffix adds something.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.suffix.is_empty() || self.suffix == self.release {
            write!(f, "{}", self.release)
        } else {
            write!(f, "{}-{}", self.release, self.suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_versions() {
        for release in ["1", "1.2", "1.2.3", "10.20.30.40"] {
            assert!(BuildVersion::new(release, "").is_ok(), "{release}");
        }
    }

    #[test]
    fn test_blank_release_is_undetermined() {
        assert!(matches!(
            BuildVersion::new("  ", "beta"),
            Err(BuildstampError::VersionUndetermined)
        ));
    }

    #[test]
    fn test_non_numeric_release_rejected() {
        for release in ["1.2.x", "v1.2.3", "1..2", "1.2.3-beta"] {
            assert!(matches!(
                BuildVersion::new(release, ""),
                Err(BuildstampError::InvalidRelease(_))
            ));
        }
    }

    #[test]
    fn test_display() {
        let v = BuildVersion::new("1.2.3", "beta.1").unwrap();
        assert_eq!(v.to_string(), "1.2.3-beta.1");

        let v = BuildVersion::new("1.2.3", "").unwrap();
        assert_eq!(v.to_string(), "1.2.3");

        let v = BuildVersion::new("2.0.0", "2.0.0").unwrap();
        assert_eq!(v.to_string(), "2.0.0");
    }
}
