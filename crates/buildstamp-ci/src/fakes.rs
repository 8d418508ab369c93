//! In-memory fakes for the CI capability (testing only)
//!
//! `StaticCiProvider` answers every [`CiProvider`] query from plain fields.

use crate::provider::{CiProvider, TagInfo};

/// CI provider with fixed answers.
#[derive(Debug, Clone, Default)]
pub struct StaticCiProvider {
    pub running: bool,
    pub local: bool,
    pub repo_name: Option<String>,
    pub branch: Option<String>,
    pub pull_request: bool,
    pub tag: TagInfo,
}

impl StaticCiProvider {
    /// A developer machine: not running on CI, local build.
    pub fn local() -> Self {
        Self {
            local: true,
            ..Self::default()
        }
    }

    /// Running on CI for `repo_name` at `branch`.
    pub fn running(repo_name: &str, branch: &str) -> Self {
        Self {
            running: true,
            local: false,
            repo_name: Some(repo_name.to_string()),
            branch: Some(branch.to_string()),
            ..Self::default()
        }
    }

    pub fn with_pull_request(mut self) -> Self {
        self.pull_request = true;
        self
    }

    pub fn with_tag(mut self, is_tag: bool, name: &str) -> Self {
        self.tag = TagInfo::new(is_tag, name);
        self
    }
}

impl CiProvider for StaticCiProvider {
    fn is_running(&self) -> bool {
        self.running
    }

    fn is_local(&self) -> bool {
        self.local
    }

    fn repo_name(&self) -> Option<String> {
        self.repo_name.clone()
    }

    fn branch(&self) -> Option<String> {
        self.branch.clone()
    }

    fn is_pull_request(&self) -> bool {
        self.pull_request
    }

    fn tag(&self) -> TagInfo {
        self.tag.clone()
    }
}
