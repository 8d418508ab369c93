//! In-memory fake for [`VersionTool`] (testing only)

use std::cell::Cell;

use crate::error::GitVersionError;
use crate::output::GitVersionOutput;
use crate::runner::VersionTool;
use crate::Result;

/// Version tool with canned answers that counts publish calls.
#[derive(Debug, Default)]
pub struct FakeVersionTool {
    supported: bool,
    output: Option<GitVersionOutput>,
    publish_fails: bool,
    publish_calls: Cell<usize>,
}

impl FakeVersionTool {
    /// A supported tool answering with `release` / `full_sem_ver`.
    pub fn with_version(release: &str, full_sem_ver: &str) -> Self {
        Self::with_output(GitVersionOutput {
            major_minor_patch: Some(release.to_string()),
            legacy_sem_ver_padded: Some(full_sem_ver.to_string()),
            ..Default::default()
        })
    }

    /// A supported tool answering with raw `output`.
    pub fn with_output(output: GitVersionOutput) -> Self {
        Self {
            supported: true,
            output: Some(output),
            ..Self::default()
        }
    }

    /// A supported tool whose query always fails.
    pub fn failing_query() -> Self {
        Self {
            supported: true,
            ..Self::default()
        }
    }

    /// A host that cannot run the tool.
    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn failing_publish(mut self) -> Self {
        self.publish_fails = true;
        self
    }

    pub fn publish_calls(&self) -> usize {
        self.publish_calls.get()
    }
}

impl VersionTool for FakeVersionTool {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn publish_metadata(&self) -> Result<()> {
        self.publish_calls.set(self.publish_calls.get() + 1);
        if self.publish_fails {
            return Err(GitVersionError::CommandFailed {
                mode: "buildserver",
                stderr: "build server not detected".to_string(),
            });
        }
        Ok(())
    }

    fn query_version(&self) -> Result<GitVersionOutput> {
        self.output.clone().ok_or_else(|| GitVersionError::CommandFailed {
            mode: "json",
            stderr: "not a git repository".to_string(),
        })
    }
}
