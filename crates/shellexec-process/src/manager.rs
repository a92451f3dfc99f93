//! Process manager - spawning

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    child::ManagedChild,
    config::ProcessConfig,
    error::{ProcessError, Result},
};

/// Spawns configured processes
#[derive(Debug, Clone, Copy)]
pub struct ProcessManager;

impl ProcessManager {
    /// Create new process manager
    pub fn new() -> Self {
        Self
    }

    /// Spawn a managed process
    ///
    /// Stdin is always closed. Stdout and stderr are piped when the
    /// configuration asks for them to be captured, otherwise discarded.
    ///
    /// # Examples
    /// ```no_run
    /// use shellexec_process::{ProcessManager, ProcessConfig};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let manager = ProcessManager::new();
    /// let config = ProcessConfig::new("echo").args(["hello"]);
    /// let child = manager.spawn(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn spawn(&self, config: ProcessConfig) -> Result<ManagedChild> {
        debug!(
            program = %config.program,
            args = ?config.args,
            "Spawning process"
        );

        let mut cmd = Command::new(&config.program);
        cmd.args(&config.args);

        cmd.stdin(Stdio::null());
        cmd.stdout(if config.capture_stdout {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stderr(if config.capture_stderr {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let child = cmd.spawn().map_err(|source| ProcessError::SpawnFailed {
            program: config.program.clone(),
            source,
        })?;
        let pid = child.id().ok_or_else(|| ProcessError::MissingPid {
            program: config.program.clone(),
        })?;

        info!(pid = %pid, program = %config.program, "Process spawned");

        Ok(ManagedChild::new(child, pid, config))
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}
