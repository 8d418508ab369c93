//! Domain models for buildstamp.
//!
//! Canonical definitions for the core entities:
//! - `BuildVersion`: Release version and suffix, fixed once per build
//! - `Project`: A project and its manifest
//! - `BuildContext`: All build-time facts, read-only after setup

pub mod context;
pub mod error;
pub mod project;
pub mod version;

// Re-export main types and errors
pub use context::{BuildArguments, BuildContext, Setup, DEFAULT_CONFIGURATION, DEFAULT_TARGET};
pub use error::{BuildstampError, Result};
pub use project::Project;
pub use version::BuildVersion;
