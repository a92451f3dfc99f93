//! Command runner - shell dispatch, output forwarding and exit code check

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use shellexec_process::{ProcessConfig, ProcessManager};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{
    config::RunnerConfig,
    encoding::Encoding,
    error::{Result, ShellError},
    platform::{Platform, ShellInvocation},
    sink::{OutputSink, OutputStream},
};

/// Read buffer size per stream
const READ_BUFFER_SIZE: usize = 4096;

/// Runs command strings through the host shell
///
/// The platform and encoding are fixed when the runner is built. Cloning a
/// runner is cheap and clones share the sink.
#[derive(Clone)]
pub struct CommandRunner {
    sink: Arc<dyn OutputSink>,
    encoding: Encoding,
    platform: Platform,
    manager: ProcessManager,
}

impl CommandRunner {
    /// Create a runner for the host platform, decoding output as UTF-8
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self::with_config(sink, RunnerConfig::default())
    }

    /// Create a runner with explicit settings
    ///
    /// When `config.platform` is `None` the host is detected here, once.
    pub fn with_config(sink: Arc<dyn OutputSink>, config: RunnerConfig) -> Self {
        let platform = config.platform.unwrap_or_else(Platform::host);
        debug!(platform = %platform, encoding = %config.encoding, "Command runner created");

        Self {
            sink,
            encoding: config.encoding,
            platform,
            manager: ProcessManager::new(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Shell program and flag every execution of this runner uses
    pub fn invocation(&self) -> ShellInvocation {
        self.platform.invocation()
    }

    /// Run `command` and check that it exits with `expected_exit_code`
    ///
    /// Stdout and stderr are decoded and handed to the sink chunk by chunk
    /// while the command runs, whatever the final outcome. The future
    /// resolves after the process has exited and both streams are closed.
    ///
    /// The command string goes to the shell exactly as given. Nothing is
    /// quoted or escaped, so it must not be built from untrusted input.
    ///
    /// # Errors
    ///
    /// - [`ShellError::ExitCodeMismatch`] if the command ran and exited with
    ///   another code
    /// - [`ShellError::SpawnFailed`] if the shell could not be started
    /// - [`ShellError::StreamRead`] / [`ShellError::Wait`] on I/O failures
    /// - [`ShellError::Terminated`] if the process reported no exit code
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use shellexec_shell::{CommandRunner, TracingSink};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let runner = CommandRunner::new(Arc::new(TracingSink::default()));
    /// runner.execute("echo hello", 0).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute(&self, command: &str, expected_exit_code: i32) -> Result<()> {
        let invocation = self.invocation();
        let config = ProcessConfig::new(invocation.program()).args(invocation.args(command));

        let mut child = self.manager.spawn(config).await?;
        let pid = child.pid();
        debug!(pid = %pid, command = %command, "Running shell command");

        let (stdout_result, stderr_result) = tokio::join!(
            forward(
                child.take_stdout(),
                OutputStream::Stdout,
                self.encoding,
                self.sink.as_ref()
            ),
            forward(
                child.take_stderr(),
                OutputStream::Stderr,
                self.encoding,
                self.sink.as_ref()
            ),
        );

        // Reap the child before reporting a read failure
        let status = child.wait().await?;
        stdout_result?;
        stderr_result?;

        let actual = match status.code() {
            Some(code) => code,
            None => {
                let signal = termination_signal(&status);
                error!(pid = %pid, signal = ?signal, "Shell terminated without an exit code");
                return Err(ShellError::Terminated { signal });
            }
        };

        if actual == expected_exit_code {
            info!(pid = %pid, exit_code = actual, "Shell command finished");
            Ok(())
        } else {
            error!(
                pid = %pid,
                expected = expected_exit_code,
                actual,
                "Shell command exited with unexpected code"
            );
            Err(ShellError::ExitCodeMismatch {
                expected: expected_exit_code,
                actual,
            })
        }
    }

    /// Launch `command` on the Tokio runtime and return a handle to its result
    ///
    /// Same contract as [`execute`](Self::execute), but the command starts
    /// running right away instead of when the result is first awaited.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, command: impl Into<String>, expected_exit_code: i32) -> Execution {
        let runner = self.clone();
        let command = command.into();
        let handle =
            tokio::spawn(async move { runner.execute(&command, expected_exit_code).await });

        Execution { handle }
    }
}

impl std::fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner")
            .field("encoding", &self.encoding)
            .field("platform", &self.platform)
            .finish()
    }
}

/// Handle to an execution started with [`CommandRunner::start`]
///
/// Resolves to the same result `execute` would have produced.
#[derive(Debug)]
pub struct Execution {
    handle: JoinHandle<Result<()>>,
}

impl Execution {
    /// Whether the execution has already settled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Execution {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) => Err(ShellError::Join(e.to_string())),
        })
    }
}

/// Pump one child stream into the sink until EOF
async fn forward<R>(
    reader: Option<R>,
    stream: OutputStream,
    encoding: Encoding,
    sink: &dyn OutputSink,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(());
    };

    let mut decoder = encoding.decoder();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let text = decoder.decode(&buf[..n]);
                if !text.is_empty() {
                    sink.write(&text);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(stream = %stream, error = %e, "Failed to read command output");
                return Err(ShellError::StreamRead { stream, source: e });
            }
        }
    }

    let tail = decoder.finish();
    if !tail.is_empty() {
        sink.write(&tail);
    }

    debug!(stream = %stream, "Output stream closed");
    Ok(())
}

#[cfg(unix)]
fn termination_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;

    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
