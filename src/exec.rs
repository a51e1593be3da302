use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

/// Run a command inside `dir` and return the result regardless of exit code.
///
/// Only a failure to spawn the process is an error.
pub fn run_cmd_in(cmd: &Path, args: &[&str], dir: &Path) -> Result<ExecResult> {
    let start = Instant::now();
    let output = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed to execute {}", cmd.display()))?;
    let duration = start.elapsed();

    Ok(ExecResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_cmd_in_captures_output_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_cmd_in(
            Path::new("sh"),
            &["-c", "pwd; echo oops >&2; exit 3"],
            dir.path(),
        )
        .unwrap();
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stderr.trim(), "oops");
        let cwd = std::fs::canonicalize(result.stdout.trim()).unwrap();
        assert_eq!(cwd, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn test_run_cmd_in_missing_binary_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_cmd_in(Path::new("definitely-not-a-real-binary-xyz"), &[], dir.path())
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to execute"));
    }
}
