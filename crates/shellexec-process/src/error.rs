//! Error types for process spawning

use std::io;
use thiserror::Error;

/// Process launcher errors
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be started at all
    #[error("Failed to spawn `{program}`: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The OS did not report a PID for a freshly spawned child
    #[error("Spawned `{program}` but no process ID was reported")]
    MissingPid { program: String },

    /// Waiting for the child to exit failed
    #[error("Failed to wait for process (PID: {pid}): {source}")]
    Wait {
        pid: u32,
        #[source]
        source: io::Error,
    },
}

/// Result type for process operations
pub type Result<T> = std::result::Result<T, ProcessError>;
