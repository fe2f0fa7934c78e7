//! Bounded subprocess invocation for the external downloader.
//!
//! Goals:
//! - **Bounded**: every run carries an explicit timeout; the child is killed
//!   when it expires (or when the caller goes away) via `kill_on_drop`.
//! - **Captured**: stdout and stderr are both collected so failures can
//!   surface the tool's own diagnostics to the caller.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use yttools_core::{Error, Result};

pub fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn timeout_from_env_ms(key: &str, default_ms: u64) -> Duration {
    let ms = env(key)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default_ms)
        .clamp(50, 300_000);
    Duration::from_millis(ms)
}

pub fn max_chars_from_env(key: &str, default_chars: usize) -> usize {
    env(key)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default_chars)
        .clamp(200, 2_000_000)
}

pub fn which(bin: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        let cand = dir.join(bin);
        if cand.is_file() {
            return Some(cand);
        }
    }
    None
}

pub fn has(bin: &str) -> bool {
    which(bin).is_some()
}

/// Run a command to completion, capturing stdout and stderr, killing it if it
/// outlives `timeout`. A non-zero exit is NOT an error here: callers decide
/// what the exit status means and which stream to surface.
pub async fn run_bounded(mut cmd: Command, timeout: Duration) -> Result<std::process::Output> {
    let program = cmd.as_std().get_program().to_string_lossy().to_string();
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::Internal(format!("{program} not found on PATH"))
        } else {
            Error::Internal(format!("failed to spawn {program}: {e}"))
        }
    })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(out) => out.map_err(|e| Error::Internal(format!("failed waiting for {program}: {e}"))),
        // Dropping the child handle kills the process (kill_on_drop).
        Err(_) => Err(Error::Tool(format!(
            "{program} timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}
