use std::ffi::OsString;
use std::process::Stdio;

use tokio::process::Command;

use crate::application::ports::ToolError;

/// Runs `program` to completion, capturing its output.
///
/// A non-zero exit becomes [`ToolError::Failed`] carrying stderr, or stdout when
/// stderr is empty.
pub async fn run_tool(program: &str, args: &[OsString]) -> Result<(), ToolError> {
    tracing::debug!(program = %program, args = ?args, "Invoking external tool");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ToolError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        tracing::debug!(program = %program, "External tool finished");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let diagnostics = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    };

    tracing::error!(
        program = %program,
        status = %output.status,
        "External tool failed"
    );

    Err(ToolError::Failed {
        program: program.to_string(),
        status: output.status.to_string(),
        stderr: diagnostics,
    })
}

/// Whether `program` can be launched and exits successfully with `args`.
pub async fn check_binary(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}
