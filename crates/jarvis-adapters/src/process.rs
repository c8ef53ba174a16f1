//! System process manager -- launch, enumerate and terminate processes.
//!
//! Launching wraps `tokio::process::Command` and never waits for the child.
//! Enumeration and termination shell out to the platform tools (`ps`/`kill`
//! on Unix, `tasklist`/`taskkill` on Windows) under a timeout.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{AdapterError, Result};
use crate::platform::Platform;
use crate::traits::{LaunchCommand, ProcessInfo, ProcessManager};

/// Default timeout for process-table commands in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process manager backed by the host OS.
pub struct SystemProcessManager {
    platform: Platform,
    timeout_secs: u64,
}

impl SystemProcessManager {
    /// Create a manager for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the timeout applied to `ps`/`kill`-style commands.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Run a short-lived command to completion under the configured timeout.
    async fn run(&self, operation: &str, mut cmd: Command) -> Result<std::process::Output> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result =
            tokio::time::timeout(Duration::from_secs(self.timeout_secs), cmd.output()).await;

        match result {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(AdapterError::ExecutionFailed {
                operation: operation.to_owned(),
                reason: e.to_string(),
            }),
            Err(_) => {
                warn!(operation, timeout_secs = self.timeout_secs, "process command timed out");
                Err(AdapterError::Timeout {
                    seconds: self.timeout_secs,
                    reason: format!("{operation} exceeded time limit"),
                })
            }
        }
    }
}

/// Pick the first existing path for an absolute-path launch command.
fn resolve_program(command: &LaunchCommand) -> String {
    let program = std::path::Path::new(&command.program);
    if !program.is_absolute() || program.exists() {
        return command.program.clone();
    }

    command
        .fallback_paths
        .iter()
        .find(|candidate| std::path::Path::new(candidate).exists())
        .cloned()
        .unwrap_or_else(|| command.program.clone())
}

/// Parse `ps -A -o pid=,comm=` output.
fn parse_ps(stdout: &str) -> Vec<ProcessInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (pid, comm) = line.split_once(char::is_whitespace)?;
            let pid = pid.parse().ok()?;
            // macOS reports the full executable path.
            let name = comm.trim().rsplit('/').next().unwrap_or_default().to_owned();
            Some(ProcessInfo { pid, name })
        })
        .collect()
}

/// Parse `tasklist /FO CSV /NH` output: `"name","pid","session",...`.
fn parse_tasklist(stdout: &str) -> Vec<ProcessInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split("\",\"").map(|f| f.trim().trim_matches('"'));
            let name = fields.next()?.to_owned();
            let pid = fields.next()?.parse().ok()?;
            Some(ProcessInfo { pid, name })
        })
        .collect()
}

#[async_trait]
impl ProcessManager for SystemProcessManager {
    async fn launch(&self, command: &LaunchCommand) -> Result<u32> {
        let program = resolve_program(command);

        let mut cmd = match self.platform {
            // Windows resolves app aliases (`calc`, `msedge`) through the shell.
            Platform::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C").arg(&program).args(&command.args);
                cmd
            }
            _ => {
                let mut cmd = Command::new(&program);
                cmd.args(&command.args);
                cmd
            }
        };

        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AdapterError::ExecutionFailed {
                operation: format!("launching `{program}`"),
                reason: e.to_string(),
            })?;

        let pid = child.id().unwrap_or_default();
        info!(program = %program, args = ?command.args, pid, "process launched");
        Ok(pid)
    }

    async fn terminate(&self, pid: u32) -> Result<bool> {
        let cmd = if self.platform.uses_windows_process_tools() {
            let mut cmd = Command::new("taskkill");
            cmd.args(["/PID", &pid.to_string()]);
            cmd
        } else {
            let mut cmd = Command::new("kill");
            cmd.args(["-TERM", &pid.to_string()]);
            cmd
        };

        let output = self.run("terminating process", cmd).await?;
        let accepted = output.status.success();
        info!(pid, accepted, "terminate requested");
        Ok(accepted)
    }

    async fn list_processes(&self) -> Result<Vec<ProcessInfo>> {
        let windows = self.platform.uses_windows_process_tools();
        let cmd = if windows {
            let mut cmd = Command::new("tasklist");
            cmd.args(["/FO", "CSV", "/NH"]);
            cmd
        } else {
            let mut cmd = Command::new("ps");
            cmd.args(["-A", "-o", "pid=,comm="]);
            cmd
        };

        let output = self.run("listing processes", cmd).await?;
        if !output.status.success() {
            return Err(AdapterError::ExecutionFailed {
                operation: "listing processes".into(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let processes = if windows {
            parse_tasklist(&stdout)
        } else {
            parse_ps(&stdout)
        };

        debug!(count = processes.len(), "process table read");
        Ok(processes)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ps_output() {
        let out = "    1 systemd\n  742 /Applications/Google Chrome.app/Contents/MacOS/Google Chrome\nbogus\n";
        let procs = parse_ps(out);
        assert_eq!(procs.len(), 2);
        assert_eq!(procs[0], ProcessInfo { pid: 1, name: "systemd".into() });
        assert_eq!(procs[1].pid, 742);
        assert_eq!(procs[1].name, "Google Chrome");
    }

    #[test]
    fn parse_tasklist_output() {
        let out = "\"chrome.exe\",\"4312\",\"Console\",\"1\",\"120,332 K\"\r\n\
                   \"explorer.exe\",\"988\",\"Console\",\"1\",\"80,000 K\"\r\n";
        let procs = parse_tasklist(out);
        assert_eq!(procs.len(), 2);
        assert_eq!(procs[0], ProcessInfo { pid: 4312, name: "chrome.exe".into() });
        assert_eq!(procs[1].pid, 988);
    }

    #[test]
    fn resolve_program_uses_first_existing_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("app.exe");
        std::fs::write(&present, b"").unwrap();

        let cmd = LaunchCommand::program(dir.path().join("missing.exe").display().to_string())
            .with_fallback_paths(vec![
                dir.path().join("also-missing.exe").display().to_string(),
                present.display().to_string(),
            ]);
        assert_eq!(resolve_program(&cmd), present.display().to_string());

        let bare = LaunchCommand::program("firefox");
        assert_eq!(resolve_program(&bare), "firefox");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launch_missing_program_fails() {
        let manager = SystemProcessManager::new(Platform::Linux);
        let result = manager
            .launch(&LaunchCommand::program("definitely-not-a-real-binary-xyz"))
            .await;
        assert!(matches!(result, Err(AdapterError::ExecutionFailed { .. })));
    }
}
