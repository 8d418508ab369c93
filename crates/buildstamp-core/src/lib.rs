//! Buildstamp Core Library
//!
//! Resolves the identity of a build once at startup: the release version and
//! suffix, plus the CI context facts every later build step reads.

pub mod config;
pub mod domain;
pub mod manifest;
pub mod overrides;
pub mod resolution;
pub mod telemetry;

pub use config::{BuildConfig, DEFAULT_CONFIG_FILE};
pub use domain::{
    BuildArguments, BuildContext, BuildVersion, BuildstampError, Project, Result, Setup,
    DEFAULT_CONFIGURATION, DEFAULT_TARGET,
};
pub use manifest::{read_manifest_version, read_version};
pub use overrides::{resolve_override, resolve_override_or};
pub use resolution::{detect_version, resolve_version, DetectedVersion, ForcedVersion, VersionSource};
pub use telemetry::init_tracing;

pub use buildstamp_ci::{
    detect_provider, AppVeyor, BuildProvider, CiFacts, CiProvider, EnvSource, MapEnv, ProcessEnv,
    StaticCiProvider, TagInfo,
};

pub use gitversion_runner::{
    compute_version, FakeVersionTool, GitVersionCli, GitVersionError, GitVersionOutput,
    VersionResult, VersionTool,
};

/// Buildstamp version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
