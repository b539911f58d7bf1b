// Error reporting and exit codes for the binary

use crate::error::QueryError;

/// Exit code for an error returned by `run`
///
/// 1 for user/environment errors, 2 for internal failures (squeue could not
/// be run, its output format drifted, or the gathered data is inconsistent).
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<QueryError>())
        .map(QueryError::exit_code)
        .unwrap_or(2)
}

/// Render an error for stderr: one line for user errors, the full cause chain
/// for internal ones
pub fn format_error(err: &anyhow::Error) -> String {
    if exit_code(err) == 1 {
        return format!("Error: {}", err);
    }

    let mut message = format!("Internal error: {}", err);
    let drift = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<QueryError>())
        .any(QueryError::is_protocol_drift);

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        message.push_str("\n\nCaused by:");
        for (indent, cause) in causes.enumerate() {
            message.push_str(&format!("\n{:indent$}  {}", "", cause, indent = indent + 1));
        }
    }

    if drift {
        message.push_str("\n\nsqueue's report format does not match the built-in field table.");
    }
    message
}
