//! Error types for gitversion-runner

use thiserror::Error;

/// Errors that can occur while running the version calculator
#[derive(Error, Debug)]
pub enum GitVersionError {
    /// Executable not found
    #[error("GitVersion is not installed or not in PATH: {0}")]
    NotFound(String),

    /// Command exited unsuccessfully
    #[error("GitVersion {mode} failed: {stderr}")]
    CommandFailed { mode: &'static str, stderr: String },

    /// A field the build needs was absent from the output
    #[error("GitVersion output is missing {0}")]
    MissingField(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = GitVersionError::CommandFailed {
            mode: "json",
            stderr: "not a git repository".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("json"));
        assert!(msg.contains("not a git repository"));
    }

    #[test]
    fn test_missing_field_display() {
        let err = GitVersionError::MissingField("MajorMinorPatch");
        assert!(err.to_string().contains("MajorMinorPatch"));
    }
}
