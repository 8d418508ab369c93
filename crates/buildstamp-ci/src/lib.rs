//! Buildstamp CI - build-context facts from the CI platform
//!
//! Provides the read-only side of build identity:
//! - Detects which CI system (if any) the build runs under
//! - Exposes the facts a build needs through the `CiProvider` capability
//! - Normalizes those facts into `CiFacts` (is-CI, pull request, tag, branch)

pub mod appveyor;
pub mod env;
pub mod facts;
pub mod fakes;
pub mod provider;

// Re-export key types
pub use appveyor::AppVeyor;
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use facts::{is_blank, CiFacts, MASTER_BRANCH};
pub use fakes::StaticCiProvider;
pub use provider::{detect_provider, BuildProvider, CiProvider, TagInfo};
