//! # shellexec-shell
//!
//! **Purpose**: Run a command string through the host shell and check its exit code
//!
//! A [`CommandRunner`] picks `cmd /c` or `sh -c` once, when it is built,
//! spawns the command, decodes stdout and stderr as they arrive and hands
//! every chunk to an injected [`OutputSink`]. The execution succeeds when
//! the exit code equals the one the caller expected.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shellexec_shell::{CommandRunner, MemorySink, ShellError};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = Arc::new(MemorySink::new());
//! let runner = CommandRunner::new(sink.clone());
//!
//! runner.execute("echo hello", 0).await?;
//! assert!(sink.contents().contains("hello"));
//!
//! match runner.execute("exit 1", 0).await {
//!     Err(ShellError::ExitCodeMismatch { expected, actual }) => {
//!         assert_eq!((expected, actual), (0, 1));
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod platform;
pub mod runner;
pub mod sink;

pub use config::RunnerConfig;
pub use encoding::{Encoding, StreamDecoder};
pub use error::{Result, ShellError};
pub use platform::{Platform, ShellInvocation};
pub use runner::{CommandRunner, Execution};
pub use sink::{MemorySink, OutputSink, OutputStream, TracingSink, WriterSink};
