// Error types for the query stage and configuration

use thiserror::Error;

/// Everything that can go wrong while collecting the job queue.
///
/// A job that vanishes between the listing and a detail query is not an
/// error; it shows up as a missing entry in the field table instead.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The USER environment variable is not set (or is not valid unicode)
    #[error("USER environment variable not set")]
    MissingUser,

    #[error("Failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} produced output that is not valid UTF-8")]
    InvalidOutput {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The header line of a per-field query did not name the field we asked for.
    /// The compiled-in format codes no longer match what squeue reports.
    #[error("squeue header mismatch for job {job}: expected '{field}', got '{found}'")]
    HeaderMismatch {
        field: String,
        job: String,
        found: String,
    },

    /// Values were gathered, but not for exactly the configured set of fields.
    #[error("queue data covers the wrong set of fields (missing: [{}], unexpected: [{}])",
        .missing.join(", "), .unexpected.join(", "))]
    FieldSetMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl QueryError {
    /// True when squeue's report format drifted away from the field table
    pub fn is_protocol_drift(&self) -> bool {
        matches!(self, QueryError::HeaderMismatch { .. })
    }

    /// User/environment errors exit with 1; everything else is internal (2)
    pub fn exit_code(&self) -> i32 {
        match self {
            QueryError::MissingUser => 1,
            _ => 2,
        }
    }
}
