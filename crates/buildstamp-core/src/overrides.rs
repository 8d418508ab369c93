//! Settings forced from the environment or the command line.
//!
//! A non-blank environment variable wins over a non-blank argument, which
//! wins over the default.

use buildstamp_ci::{is_blank, EnvSource};

/// Environment variable for the artifact feed source.
pub const MYGET_SOURCE_ENV: &str = "BUILDSTAMP_MYGET_SOURCE";
/// Environment variable for the artifact feed API key.
pub const MYGET_API_KEY_ENV: &str = "BUILDSTAMP_MYGET_API_KEY";
/// Environment variable forcing the release version.
pub const VERSION_ENV: &str = "BUILDSTAMP_VERSION";
/// Environment variable forcing the version suffix.
pub const SUFFIX_ENV: &str = "BUILDSTAMP_SUFFIX";
/// Environment variable selecting the build target.
pub const TARGET_ENV: &str = "BUILDSTAMP_TARGET";
/// Environment variable selecting the build configuration.
pub const CONFIGURATION_ENV: &str = "BUILDSTAMP_CONFIGURATION";

/// Resolve a setting with no default.
pub fn resolve_override(
    env: &dyn EnvSource,
    env_var: &str,
    argument: Option<&str>,
) -> Option<String> {
    env.var(env_var)
        .filter(|v| !is_blank(v))
        .or_else(|| argument.filter(|v| !is_blank(v)).map(str::to_string))
}

/// Resolve a setting, falling back to `default`.
pub fn resolve_override_or(
    env: &dyn EnvSource,
    env_var: &str,
    argument: Option<&str>,
    default: &str,
) -> String {
    resolve_override(env, env_var, argument).unwrap_or_else(|| default.to_string())
}
