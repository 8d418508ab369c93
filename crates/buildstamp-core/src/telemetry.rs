//! Log output for the `buildstamp` binary.
//!
//! Resolution logs go to stderr; stdout carries only the resolved values so
//! build scripts can capture them with `$(buildstamp version)`.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives for buildstamp, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "BUILDSTAMP_LOG";

/// Crates whose events follow the requested level.
const LOG_TARGETS: &[&str] = &[
    "buildstamp",
    "buildstamp_core",
    "buildstamp_ci",
    "gitversion_runner",
];

/// Directives used when neither `BUILDSTAMP_LOG` nor `RUST_LOG` is set.
///
/// Buildstamp crates log at `level`; everything else only at `warn`.
pub fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    std::iter::once("warn".to_string())
        .chain(LOG_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Install the global subscriber.
///
/// `json` switches to newline-delimited JSON. Only the first call in a
/// process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let filter = build_filter(level);
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_scope_buildstamp_crates() {
        let directives = default_directives(Level::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("buildstamp_core=debug"));
        assert!(directives.contains("gitversion_runner=debug"));
        assert!(directives.contains("buildstamp=debug"));
    }

    #[test]
    fn test_default_directives_parse() {
        for level in [Level::INFO, Level::DEBUG, Level::TRACE] {
            assert!(EnvFilter::try_new(default_directives(level)).is_ok());
        }
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(false, Level::INFO);
        init_tracing(true, Level::DEBUG);
    }
}
