//! GitVersion-Runner: version calculator integration for buildstamp
//!
//! Runs the GitVersion tool to derive a semantic version from repository
//! history. The tool is reached through the [`VersionTool`] trait so the
//! resolution logic can run against [`FakeVersionTool`] in tests.

pub mod error;
pub mod fakes;
pub mod output;
pub mod runner;

pub use error::GitVersionError;
pub use fakes::FakeVersionTool;
pub use output::{GitVersionOutput, VersionResult};
pub use runner::{compute_version, GitVersionCli, VersionTool, DEFAULT_EXECUTABLE, EXECUTABLE_ENV};

/// Result type for gitversion-runner operations
pub type Result<T> = std::result::Result<T, GitVersionError>;
