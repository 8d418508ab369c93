//! Project descriptors.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A project taking part in the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,

    /// Path to the project's manifest (`project.json`, `package.json`, `Cargo.toml`).
    pub manifest: PathBuf,

    /// Artifacts of this project are published.
    #[serde(default)]
    pub publish: bool,
}

impl Project {
    pub fn new(name: impl Into<String>, manifest: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            manifest: manifest.into(),
            publish: false,
        }
    }

    /// Mark the project as published.
    pub fn published(mut self) -> Self {
        self.publish = true;
        self
    }

    /// Resolve a relative manifest path against `base`.
    pub(crate) fn rooted_at(mut self, base: &Path) -> Self {
        if self.manifest.is_relative() {
            self.manifest = base.join(&self.manifest);
        }
        self
    }
}
