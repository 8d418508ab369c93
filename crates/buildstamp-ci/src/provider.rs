//! CI provider detection and the capability trait for CI facts.

use crate::env::EnvSource;
use crate::facts::is_blank;
use serde::{Deserialize, Serialize};

/// Recognised build systems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuildProvider {
    /// No recognised CI system; a developer machine.
    Local,
    AppVeyor,
    AzurePipelines,
    GitHubActions,
    GitLabCi,
    Jenkins,
    TeamCity,
    TravisCi,
    BitbucketPipelines,
}

/// Detection order and the variable each system always sets.
const MARKERS: &[(BuildProvider, &str)] = &[
    (BuildProvider::AppVeyor, "APPVEYOR"),
    (BuildProvider::AzurePipelines, "TF_BUILD"),
    (BuildProvider::GitHubActions, "GITHUB_ACTIONS"),
    (BuildProvider::GitLabCi, "GITLAB_CI"),
    (BuildProvider::Jenkins, "JENKINS_URL"),
    (BuildProvider::TeamCity, "TEAMCITY_VERSION"),
    (BuildProvider::TravisCi, "TRAVIS"),
    (BuildProvider::BitbucketPipelines, "BITBUCKET_BUILD_NUMBER"),
];

impl BuildProvider {
    /// Get the provider name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            BuildProvider::Local => "local",
            BuildProvider::AppVeyor => "appveyor",
            BuildProvider::AzurePipelines => "azure_pipelines",
            BuildProvider::GitHubActions => "github_actions",
            BuildProvider::GitLabCi => "gitlab_ci",
            BuildProvider::Jenkins => "jenkins",
            BuildProvider::TeamCity => "teamcity",
            BuildProvider::TravisCi => "travis_ci",
            BuildProvider::BitbucketPipelines => "bitbucket_pipelines",
        }
    }

    pub fn is_local(&self) -> bool {
        *self == BuildProvider::Local
    }
}

impl std::fmt::Display for BuildProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the CI system from its marker variable.
///
/// The first recognised system wins; a marker that is set but blank does not
/// count.
pub fn detect_provider(env: &dyn EnvSource) -> BuildProvider {
    MARKERS
        .iter()
        .find(|(_, var)| env.var(var).is_some_and(|v| !is_blank(&v)))
        .map(|(provider, _)| *provider)
        .unwrap_or(BuildProvider::Local)
}

/// Tag information reported by the CI system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagInfo {
    /// The build was triggered by a tag.
    pub is_tag: bool,
    /// Tag name; may be empty even when `is_tag` is set.
    pub name: String,
}

impl TagInfo {
    pub fn new(is_tag: bool, name: impl Into<String>) -> Self {
        Self {
            is_tag,
            name: name.into(),
        }
    }
}

/// Normalized facts exposed by a CI platform.
///
/// Implementations only read; they never force or cache a value.
pub trait CiProvider {
    /// The build is running under this CI system.
    fn is_running(&self) -> bool;

    /// No recognised CI system was detected at all.
    fn is_local(&self) -> bool;

    /// Repository name as `owner/name`, if reported.
    fn repo_name(&self) -> Option<String>;

    /// Branch being built, if reported.
    fn branch(&self) -> Option<String>;

    /// The build is for a pull request.
    fn is_pull_request(&self) -> bool;

    fn tag(&self) -> TagInfo;
}
