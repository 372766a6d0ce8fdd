//! Child-process execution for external media tools.

use crate::error::ToolError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

const MAX_STDERR_CHARS: usize = 2048;

/// Run `command` to completion and return its stdout.
///
/// The child is killed if it outlives `timeout` or if the returned future is
/// dropped. A non-zero exit becomes [`ToolError::Failed`] carrying stderr.
pub(crate) async fn run_tool(
    tool: &'static str,
    mut command: Command,
    timeout: Duration,
) -> Result<Vec<u8>, ToolError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = command
        .spawn()
        .map_err(|source| ToolError::Spawn { tool, source })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| ToolError::Wait { tool, source })?,
        Err(_) => return Err(ToolError::TimedOut { tool, timeout }),
    };

    if !output.status.success() {
        return Err(ToolError::Failed {
            tool,
            status: output.status.to_string(),
            stderr: truncate_stderr(&output.stderr),
        });
    }

    Ok(output.stdout)
}

fn truncate_stderr(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.chars().count() <= MAX_STDERR_CHARS {
        return text.to_string();
    }
    let tail: String = text
        .chars()
        .rev()
        .take(MAX_STDERR_CHARS)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("...{}", tail)
}
