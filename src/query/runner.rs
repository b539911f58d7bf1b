// Running squeue and splitting its output into lines

use std::process::Command;

use crate::error::QueryError;

/// One squeue invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqueueRequest {
    /// All of the user's job ids, no header
    ListJobs { user: String },
    /// One format code for one job, with header
    FieldForJob {
        user: String,
        code: String,
        job: String,
    },
}

impl SqueueRequest {
    /// Command-line arguments for this request
    pub fn args(&self) -> Vec<String> {
        match self {
            SqueueRequest::ListJobs { user } => vec![
                "-u".to_string(),
                user.clone(),
                "-h".to_string(),
                "-o".to_string(),
                "%A".to_string(),
            ],
            SqueueRequest::FieldForJob { user, code, job } => vec![
                "-u".to_string(),
                user.clone(),
                "-o".to_string(),
                code.clone(),
                "--job".to_string(),
                job.clone(),
            ],
        }
    }
}

/// Runs a request and hands back its output as lines
pub trait QueryRunner {
    fn run(&mut self, request: &SqueueRequest) -> Result<Vec<String>, QueryError>;
}

/// Executes the real squeue binary, found on PATH
pub struct SqueueRunner {
    program: String,
    invocations: usize,
}

impl SqueueRunner {
    pub fn new() -> Self {
        Self::with_program("squeue")
    }

    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
            invocations: 0,
        }
    }

    /// Number of processes spawned so far
    pub fn invocations(&self) -> usize {
        self.invocations
    }
}

impl Default for SqueueRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRunner for SqueueRunner {
    fn run(&mut self, request: &SqueueRequest) -> Result<Vec<String>, QueryError> {
        let args = request.args();
        log::debug!("running {} {}", self.program, args.join(" "));
        self.invocations += 1;

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| QueryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(QueryError::ToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|source| QueryError::InvalidOutput {
            program: self.program.clone(),
            source,
        })?;
        Ok(split_lines(&stdout))
    }
}

/// Trim the whole output, then split it on newlines.
///
/// Individual lines are left as squeue printed them, so a padded header
/// still fails the header check. Empty output yields no lines at all.
pub fn split_lines(output: &str) -> Vec<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_string).collect()
}
