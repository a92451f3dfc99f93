//! Managed child process wrapper

use std::process::ExitStatus;
use tokio::process::{Child, ChildStderr, ChildStdout};
use tracing::debug;

use crate::{
    config::ProcessConfig,
    error::{ProcessError, Result},
};

/// Wrapper around tokio::process::Child
pub struct ManagedChild {
    child: Child,
    config: ProcessConfig,
    pid: u32,
}

impl ManagedChild {
    pub(crate) fn new(child: Child, pid: u32, config: ProcessConfig) -> Self {
        Self { child, config, pid }
    }

    /// Get process ID
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Get process configuration
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Check if process is still running
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Wait for process to exit
    ///
    /// Resolves once, with the terminal status. There is no timeout.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|source| ProcessError::Wait {
                pid: self.pid,
                source,
            })?;

        debug!(pid = %self.pid, status = %status, "Process exited");
        Ok(status)
    }

    /// Take stdout handle
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Take stderr handle
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }
}

impl std::fmt::Debug for ManagedChild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedChild")
            .field("pid", &self.pid)
            .field("program", &self.config.program)
            .finish()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;
    use crate::ProcessManager;

    #[tokio::test]
    async fn test_is_running() {
        let manager = ProcessManager::new();
        let config = ProcessConfig::new("sleep").args(["1"]);

        let mut child = manager.spawn(config).await.unwrap();
        assert!(child.is_running());

        child.wait().await.unwrap();
        assert!(!child.is_running());
    }

    #[tokio::test]
    async fn test_streams_taken_once() {
        let manager = ProcessManager::new();
        let config = ProcessConfig::new("sh").args(["-c", "echo out; echo err >&2"]);

        let mut child = manager.spawn(config).await.unwrap();
        let mut stdout = child.take_stdout().unwrap();
        let mut stderr = child.take_stderr().unwrap();
        assert!(child.take_stdout().is_none());
        assert!(child.take_stderr().is_none());

        let mut out = String::new();
        let mut err = String::new();
        stdout.read_to_string(&mut out).await.unwrap();
        stderr.read_to_string(&mut err).await.unwrap();

        assert_eq!(out, "out\n");
        assert_eq!(err, "err\n");
        assert!(child.wait().await.unwrap().success());
    }

    #[tokio::test]
    async fn test_inherits_parent_cwd_and_env() {
        let manager = ProcessManager::new();
        let config = ProcessConfig::new("sh").args(["-c", "pwd; printf '%s' \"$PATH\""]);

        let mut child = manager.spawn(config).await.unwrap();
        let mut out = String::new();
        child
            .take_stdout()
            .unwrap()
            .read_to_string(&mut out)
            .await
            .unwrap();
        assert!(child.wait().await.unwrap().success());

        let (cwd, path) = out.split_once('\n').unwrap();
        let expected_cwd = std::env::current_dir().unwrap().canonicalize().unwrap();
        assert_eq!(std::path::Path::new(cwd).canonicalize().unwrap(), expected_cwd);
        assert_eq!(Some(path.to_string()), std::env::var("PATH").ok());
    }

    #[tokio::test]
    async fn test_wait_reports_exit_code() {
        let manager = ProcessManager::new();
        let config = ProcessConfig::new("sh").args(["-c", "exit 7"]);

        let mut child = manager.spawn(config).await.unwrap();
        let status = child.wait().await.unwrap();
        assert_eq!(status.code(), Some(7));
    }
}
