//! Build configuration file.
//!
//! ```toml
//! origin_repository = "stevedores-org/buildstamp"
//!
//! [[projects]]
//! name = "buildstamp"
//! manifest = "crates/buildstamp-cli/Cargo.toml"
//! publish = true
//! ```

use crate::domain::error::{BuildstampError, Result};
use crate::domain::project::Project;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "buildstamp.toml";

/// Hand-authored build configuration, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Expected `owner/name` of the upstream repository.
    pub origin_repository: String,

    /// Projects in declaration order.
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl BuildConfig {
    pub fn new(origin_repository: impl Into<String>, projects: Vec<Project>) -> Self {
        Self {
            origin_repository: origin_repository.into(),
            projects,
        }
    }

    /// Load from a TOML file; manifest paths are taken relative to its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildstampError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(path, &content)?;
        debug!(
            path = %path.display(),
            projects = config.projects.len(),
            "Loaded build configuration"
        );
        Ok(config)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let raw: BuildConfig = toml::from_str(content).map_err(|e| BuildstampError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if raw.origin_repository.trim().is_empty() {
            return Err(BuildstampError::Config {
                path: path.to_path_buf(),
                message: "origin_repository must not be empty".to_string(),
            });
        }

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self {
            origin_repository: raw.origin_repository,
            projects: raw
                .projects
                .into_iter()
                .map(|p| p.rooted_at(base))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_load_resolves_manifests_against_config_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
origin_repository = "stevedores-org/buildstamp"

[[projects]]
name = "App"
manifest = "src/App/project.json"
publish = true

[[projects]]
name = "App.Tests"
manifest = "src/App.Tests/project.json"
"#,
        )
        .unwrap();

        let config = BuildConfig::load(&path).unwrap();
        assert_eq!(config.origin_repository, "stevedores-org/buildstamp");
        assert_eq!(config.projects.len(), 2);
        assert_eq!(
            config.projects[0].manifest,
            dir.path().join("src/App/project.json")
        );
        assert!(config.projects[0].publish);
        assert!(!config.projects[1].publish);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = BuildConfig::load(Path::new("/nonexistent/buildstamp.toml")).unwrap_err();
        assert!(matches!(err, BuildstampError::Config { .. }));
    }

    #[test]
    fn test_empty_origin_rejected() {
        let err = BuildConfig::parse(&PathBuf::from("b.toml"), "origin_repository = \" \"")
            .unwrap_err();
        assert!(err.to_string().contains("origin_repository"));
    }

    #[test]
    fn test_projects_default_to_empty() {
        let config =
            BuildConfig::parse(&PathBuf::from("b.toml"), "origin_repository = \"a/b\"").unwrap();
        assert!(config.projects.is_empty());
    }
}
