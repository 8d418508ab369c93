//! GitVersion invocation
//!
//! The calculator runs in two modes:
//! 1. `/output buildserver` publishes version metadata to the CI system
//!    (side effect only, output ignored)
//! 2. `/output json` answers with the structured version result

use crate::error::GitVersionError;
use crate::output::{GitVersionOutput, VersionResult};
use crate::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info, warn};

/// Default executable name.
pub const DEFAULT_EXECUTABLE: &str = "gitversion";

/// Environment variable that overrides the executable.
pub const EXECUTABLE_ENV: &str = "GITVERSION_EXE";

/// An external version calculator.
pub trait VersionTool {
    /// The host can run the tool at all.
    fn is_supported(&self) -> bool;

    /// Write build metadata to the CI system.
    fn publish_metadata(&self) -> Result<()>;

    /// Ask for the structured version result.
    fn query_version(&self) -> Result<GitVersionOutput>;
}

/// Compute the release and padded full semantic version.
///
/// On a CI build the tool first publishes metadata; a failure there is
/// logged and ignored. Returns `None` when the query fails or its output is
/// missing either field, so the caller can fall back to another source.
pub fn compute_version(tool: &dyn VersionTool, is_local_build: bool) -> Option<VersionResult> {
    info!("Calculating semantic version...");

    if !is_local_build {
        if let Err(e) = tool.publish_metadata() {
            warn!("Publishing version metadata failed: {}", e);
        }
    }

    let output = match tool.query_version() {
        Ok(output) => output,
        Err(e) => {
            warn!("Version query failed: {}", e);
            return None;
        }
    };

    match VersionResult::try_from(output) {
        Ok(result) => {
            debug!(
                release = %result.release,
                full_sem_ver = %result.full_sem_ver,
                "Calculated version"
            );
            Some(result)
        }
        Err(e) => {
            info!("Incomplete version result: {}", e);
            None
        }
    }
}

/// GitVersion command-line runner
#[derive(Debug, Clone)]
pub struct GitVersionCli {
    executable: PathBuf,
    working_dir: PathBuf,
}

impl GitVersionCli {
    /// Runner for `executable` inside `working_dir`.
    pub fn new(executable: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        GitVersionCli {
            executable: executable.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Runner using `GITVERSION_EXE` or the default executable name.
    ///
    /// `lookup` reads an environment variable; a blank value is ignored.
    pub fn from_env<F>(working_dir: impl Into<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let executable = lookup(EXECUTABLE_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string());
        Self::new(executable, working_dir)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Version string reported by the tool itself.
    pub fn tool_version(&self) -> Result<String> {
        let output = self.run("version", &["/version"])?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run(&self, mode: &'static str, args: &[&str]) -> Result<Output> {
        debug!("Running {:?} {:?}", self.executable, args);

        let output = Command::new(&self.executable)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    GitVersionError::NotFound(self.executable.display().to_string())
                }
                _ => GitVersionError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // GitVersion reports most failures on stdout
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(GitVersionError::CommandFailed {
                mode,
                stderr: detail.trim().to_string(),
            });
        }

        Ok(output)
    }
}

impl VersionTool for GitVersionCli {
    fn is_supported(&self) -> bool {
        match self.tool_version() {
            Ok(version) => {
                debug!("GitVersion available: {}", version);
                true
            }
            Err(e) => {
                debug!("GitVersion unavailable: {}", e);
                false
            }
        }
    }

    fn publish_metadata(&self) -> Result<()> {
        self.run("buildserver", &["/output", "buildserver"])?;
        Ok(())
    }

    fn query_version(&self) -> Result<GitVersionOutput> {
        let output = self.run("json", &["/output", "json"])?;
        GitVersionOutput::parse(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeVersionTool;
    use tempfile::tempdir;

    #[test]
    fn test_missing_executable_is_unsupported() {
        let dir = tempdir().unwrap();
        let cli = GitVersionCli::new("definitely-not-gitversion-xyz", dir.path());
        assert!(!cli.is_supported());
        assert!(matches!(
            cli.query_version().unwrap_err(),
            GitVersionError::NotFound(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_executable_reports_command_failed() {
        let dir = tempdir().unwrap();
        let cli = GitVersionCli::new("false", dir.path());
        assert!(!cli.is_supported());
        assert!(matches!(
            cli.publish_metadata().unwrap_err(),
            GitVersionError::CommandFailed { mode: "buildserver", .. }
        ));
    }

    #[test]
    fn test_from_env_executable_override() {
        let cli = GitVersionCli::from_env(".", |name| {
            (name == EXECUTABLE_ENV).then(|| "/opt/gitversion/gitversion".to_string())
        });
        assert_eq!(cli.executable(), Path::new("/opt/gitversion/gitversion"));
    }

    #[test]
    fn test_from_env_falls_back_to_default() {
        let cli = GitVersionCli::from_env(".", |_| None);
        assert_eq!(cli.executable(), Path::new(DEFAULT_EXECUTABLE));

        let cli = GitVersionCli::from_env(".", |_| Some("  ".to_string()));
        assert_eq!(cli.executable(), Path::new(DEFAULT_EXECUTABLE));
    }

    #[test]
    fn test_compute_version_complete() {
        let tool = FakeVersionTool::with_version("1.2.3", "1.2.3-beta.1");
        let result = compute_version(&tool, true).unwrap();
        assert_eq!(result, VersionResult::new("1.2.3", "1.2.3-beta.1"));
    }

    #[test]
    fn test_compute_version_publishes_only_on_ci() {
        let tool = FakeVersionTool::with_version("1.2.3", "1.2.3");
        compute_version(&tool, true);
        assert_eq!(tool.publish_calls(), 0);

        compute_version(&tool, false);
        assert_eq!(tool.publish_calls(), 1);
    }

    #[test]
    fn test_publish_failure_is_not_fatal() {
        let tool = FakeVersionTool::with_version("2.0.0", "2.0.0").failing_publish();
        let result = compute_version(&tool, false);
        assert_eq!(result, Some(VersionResult::new("2.0.0", "2.0.0")));
        assert_eq!(tool.publish_calls(), 1);
    }

    #[test]
    fn test_incomplete_output_returns_none() {
        let tool = FakeVersionTool::with_output(GitVersionOutput {
            major_minor_patch: Some("1.2.3".to_string()),
            ..Default::default()
        });
        assert!(compute_version(&tool, true).is_none());
    }

    #[test]
    fn test_query_failure_returns_none() {
        let tool = FakeVersionTool::failing_query();
        assert!(compute_version(&tool, true).is_none());
    }
}
