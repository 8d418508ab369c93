//! Normalized build-context facts.

use crate::provider::{CiProvider, TagInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Branch whose builds count as mainline.
pub const MASTER_BRANCH: &str = "master";

/// True for empty or whitespace-only strings.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Build-context facts derived from a [`CiProvider`].
///
/// Values are facts only; nothing here is ever forced by arguments.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CiFacts {
    pub is_ci: bool,
    pub is_local_build: bool,
    pub is_pull_request: bool,
    pub is_original_repo: bool,
    pub is_tagged: bool,
    pub is_master_branch: bool,
}

impl CiFacts {
    /// Read and normalize facts from `provider`.
    ///
    /// `origin_repository` is the expected `owner/name`; both it and the
    /// branch are compared ignoring ASCII case.
    pub fn resolve(provider: &dyn CiProvider, origin_repository: &str) -> Self {
        let facts = Self {
            is_ci: provider.is_running(),
            is_local_build: provider.is_local(),
            is_pull_request: provider.is_pull_request(),
            is_original_repo: provider
                .repo_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(origin_repository)),
            is_tagged: is_tagged(&provider.tag()),
            is_master_branch: provider
                .branch()
                .is_some_and(|branch| branch.eq_ignore_ascii_case(MASTER_BRANCH)),
        };
        debug!(?facts, "Resolved CI facts");
        facts
    }
}

/// A tag only counts when the flag is set and the name is non-blank.
fn is_tagged(tag: &TagInfo) -> bool {
    tag.is_tag && !is_blank(&tag.name)
}
