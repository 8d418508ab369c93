//! The build context: every build-time fact, assembled once at startup.

use crate::config::BuildConfig;
use crate::domain::error::Result;
use crate::domain::project::Project;
use crate::domain::version::BuildVersion;
use crate::overrides::{
    resolve_override, resolve_override_or, CONFIGURATION_ENV, MYGET_API_KEY_ENV,
    MYGET_SOURCE_ENV, SUFFIX_ENV, TARGET_ENV, VERSION_ENV,
};
use crate::resolution::{resolve_version, ForcedVersion};
use buildstamp_ci::{CiFacts, CiProvider, EnvSource};
use gitversion_runner::VersionTool;
use serde::Serialize;
use tracing::info;

pub const DEFAULT_TARGET: &str = "Default";
pub const DEFAULT_CONFIGURATION: &str = "Release";

/// Named invocation arguments.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BuildArguments {
    pub target: Option<String>,
    pub configuration: Option<String>,
    pub version: Option<String>,
    pub suffix: Option<String>,
    pub force_publish: bool,
    pub myget_source: Option<String>,
    pub myget_api_key: Option<String>,
}

impl std::fmt::Debug for BuildArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildArguments")
            .field("target", &self.target)
            .field("configuration", &self.configuration)
            .field("version", &self.version)
            .field("suffix", &self.suffix)
            .field("force_publish", &self.force_publish)
            .field("myget_source", &self.myget_source)
            .field("myget_api_key", &self.myget_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Collaborators and inputs for [`BuildContext::setup`].
pub struct Setup<'a> {
    pub arguments: &'a BuildArguments,
    pub env: &'a dyn EnvSource,
    pub ci: &'a dyn CiProvider,
    pub tool: &'a dyn VersionTool,
    pub config: &'a BuildConfig,
}

/// Build-time facts, read-only after setup.
#[derive(Clone, Serialize)]
pub struct BuildContext {
    target: String,
    configuration: String,
    version: BuildVersion,
    #[serde(flatten)]
    ci: CiFacts,
    force_publish: bool,
    myget_source: Option<String>,
    #[serde(skip)]
    myget_api_key: Option<String>,
    projects: Vec<Project>,
}

impl BuildContext {
    /// Assemble the context.
    ///
    /// Fields are filled in a fixed order: arguments, CI facts, forced
    /// overrides, publish feed, version. Fails when no version can be
    /// determined; no partial context is ever returned.
    pub fn setup(inputs: Setup<'_>) -> Result<Self> {
        let args = inputs.arguments;

        let target = resolve_override_or(
            inputs.env,
            TARGET_ENV,
            args.target.as_deref(),
            DEFAULT_TARGET,
        );
        let configuration = resolve_override_or(
            inputs.env,
            CONFIGURATION_ENV,
            args.configuration.as_deref(),
            DEFAULT_CONFIGURATION,
        );

        let ci = CiFacts::resolve(inputs.ci, &inputs.config.origin_repository);

        let forced = ForcedVersion {
            version: resolve_override(inputs.env, VERSION_ENV, args.version.as_deref()),
            suffix: resolve_override(inputs.env, SUFFIX_ENV, args.suffix.as_deref()),
        };

        let myget_source =
            resolve_override(inputs.env, MYGET_SOURCE_ENV, args.myget_source.as_deref());
        let myget_api_key =
            resolve_override(inputs.env, MYGET_API_KEY_ENV, args.myget_api_key.as_deref());

        let projects = inputs.config.projects.clone();
        let version = resolve_version(inputs.tool, &projects, ci.is_local_build, &forced)?;

        let context = Self {
            target,
            configuration,
            version,
            ci,
            force_publish: args.force_publish,
            myget_source,
            myget_api_key,
            projects,
        };
        context.log_summary();
        Ok(context)
    }

    fn log_summary(&self) {
        info!("Version: {}", self.version.release());
        info!("Version suffix: {}", self.version.suffix());
        info!("Configuration: {}", self.configuration);
        info!("Target: {}", self.target);
        info!("CI: {}", self.ci.is_ci);
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    pub fn version(&self) -> &BuildVersion {
        &self.version
    }

    pub fn ci(&self) -> &CiFacts {
        &self.ci
    }

    pub fn is_ci(&self) -> bool {
        self.ci.is_ci
    }

    pub fn is_local_build(&self) -> bool {
        self.ci.is_local_build
    }

    pub fn is_pull_request(&self) -> bool {
        self.ci.is_pull_request
    }

    pub fn is_original_repo(&self) -> bool {
        self.ci.is_original_repo
    }

    pub fn is_tagged(&self) -> bool {
        self.ci.is_tagged
    }

    pub fn is_master_branch(&self) -> bool {
        self.ci.is_master_branch
    }

    pub fn force_publish(&self) -> bool {
        self.force_publish
    }

    pub fn myget_source(&self) -> Option<&str> {
        self.myget_source.as_deref()
    }

    pub fn myget_api_key(&self) -> Option<&str> {
        self.myget_api_key.as_deref()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects flagged for publishing, in declaration order.
    pub fn publishable_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.publish)
    }

    /// Pretty JSON rendering; the API key is never included.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("target", &self.target)
            .field("configuration", &self.configuration)
            .field("version", &self.version)
            .field("ci", &self.ci)
            .field("force_publish", &self.force_publish)
            .field("myget_source", &self.myget_source)
            .field("myget_api_key", &self.myget_api_key.as_ref().map(|_| "<redacted>"))
            .field("projects", &self.projects)
            .finish()
    }
}
