//! Error types for shell execution
//!
//! Only [`ShellError::ExitCodeMismatch`] means "the command ran and reported
//! the wrong code". Every other variant means the command never ran or ended
//! abnormally, see [`ShellError::is_mismatch`].

use std::io;

use shellexec_process::ProcessError;
use thiserror::Error;

use crate::sink::OutputStream;

/// Shell execution errors
#[derive(Debug, Error)]
pub enum ShellError {
    /// The command terminated with a code other than the expected one
    #[error("unexpected exit code: expected {expected} got {actual}.")]
    ExitCodeMismatch { expected: i32, actual: i32 },

    /// The shell process could not be started
    #[error("Failed to start shell: {0}")]
    SpawnFailed(#[source] ProcessError),

    /// Reading one of the child's output streams failed
    #[error("Failed to read {stream}: {source}")]
    StreamRead {
        stream: OutputStream,
        #[source]
        source: io::Error,
    },

    /// Waiting for the child to exit failed
    #[error("Failed to wait for shell: {0}")]
    Wait(#[source] ProcessError),

    /// The process ended without reporting an exit code
    #[error("Shell terminated without an exit code{}", signal_suffix(.signal))]
    Terminated { signal: Option<i32> },

    /// The task driving a started execution did not finish
    #[error("Execution task failed: {0}")]
    Join(String),

    /// Invalid runner configuration value
    #[error("Invalid runner configuration: {0}")]
    InvalidConfig(String),
}

impl ShellError {
    /// Whether the command ran to completion and only the exit code was wrong
    pub fn is_mismatch(&self) -> bool {
        matches!(self, ShellError::ExitCodeMismatch { .. })
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Wait { .. } => ShellError::Wait(err),
            _ => ShellError::SpawnFailed(err),
        }
    }
}

fn signal_suffix(signal: &Option<i32>) -> String {
    match signal {
        Some(signal) => format!(" (signal {})", signal),
        None => String::new(),
    }
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
