//! AppVeyor build environment.
//!
//! Maps the variables AppVeyor sets on every build onto [`CiProvider`].

use crate::env::EnvSource;
use crate::facts::is_blank;
use crate::provider::{detect_provider, CiProvider, TagInfo};

const APPVEYOR: &str = "APPVEYOR";
const REPO_NAME: &str = "APPVEYOR_REPO_NAME";
const REPO_BRANCH: &str = "APPVEYOR_REPO_BRANCH";
const PULL_REQUEST_NUMBER: &str = "APPVEYOR_PULL_REQUEST_NUMBER";
const REPO_TAG: &str = "APPVEYOR_REPO_TAG";
const REPO_TAG_NAME: &str = "APPVEYOR_REPO_TAG_NAME";

/// AppVeyor facts read from an [`EnvSource`].
#[derive(Debug, Clone)]
pub struct AppVeyor<E> {
    env: E,
}

impl<E: EnvSource> AppVeyor<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    fn flag(&self, name: &str) -> bool {
        self.env
            .var(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    fn non_blank(&self, name: &str) -> Option<String> {
        self.env.var(name).filter(|v| !is_blank(v))
    }
}

impl<E: EnvSource> CiProvider for AppVeyor<E> {
    /// Any non-blank `APPVEYOR` value counts, matching [`detect_provider`].
    fn is_running(&self) -> bool {
        self.non_blank(APPVEYOR).is_some()
    }

    fn is_local(&self) -> bool {
        detect_provider(&self.env).is_local()
    }

    fn repo_name(&self) -> Option<String> {
        self.non_blank(REPO_NAME)
    }

    fn branch(&self) -> Option<String> {
        self.non_blank(REPO_BRANCH)
    }

    fn is_pull_request(&self) -> bool {
        self.env
            .var(PULL_REQUEST_NUMBER)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .is_some_and(|n| n > 0)
    }

    fn tag(&self) -> TagInfo {
        TagInfo::new(
            self.flag(REPO_TAG),
            self.env.var(REPO_TAG_NAME).unwrap_or_default(),
        )
    }
}
