//! # shellexec-process
//!
//! **Purpose**: Thin async process launcher used by the shellexec runner
//!
//! Wraps `tokio::process` with a builder-style configuration, structured
//! spawn logging and a child handle that hands out its piped output streams.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shellexec_process::{ProcessConfig, ProcessManager};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ProcessManager::new();
//! let config = ProcessConfig::new("sh").args(["-c", "echo hello"]);
//!
//! let mut child = manager.spawn(config).await?;
//! let stdout = child.take_stdout();
//! let status = child.wait().await?;
//! # let _ = (stdout, status);
//! # Ok(())
//! # }
//! ```

pub mod child;
pub mod config;
pub mod error;
pub mod manager;

pub use child::ManagedChild;
pub use config::ProcessConfig;
pub use error::{ProcessError, Result};
pub use manager::ProcessManager;
