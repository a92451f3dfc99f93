//! shellexec - run one command through the host shell and check its exit code
//!
//! Command output is copied to stdout as it arrives; diagnostics go to stderr.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use shellexec_shell::{CommandRunner, Encoding, Platform, RunnerConfig, WriterSink};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shellexec")]
#[command(about = "Run a shell command and fail unless it exits with the expected code")]
struct Cli {
    /// Command string, passed to the shell unmodified
    command: String,

    /// Exit code that counts as success
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    expect: i32,

    /// Encoding of the command's output (utf8, latin1)
    #[arg(long, default_value = "utf8")]
    encoding: Encoding,

    /// Shell family to use instead of the host's (windows, posix)
    #[arg(long)]
    platform: Option<Platform>,

    /// Log filter, e.g. `info` or `shellexec_shell=debug`
    #[arg(long, env = "SHELLEXEC_LOG", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn runner_config(&self) -> RunnerConfig {
        let config = RunnerConfig::new().encoding(self.encoding);
        match self.platform {
            Some(platform) => config.platform(platform),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("invalid log filter '{}'", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let runner = CommandRunner::with_config(Arc::new(WriterSink::stdout()), cli.runner_config());
    tracing::debug!(platform = %runner.platform(), command = %cli.command, "Starting");

    runner
        .execute(&cli.command, cli.expect)
        .await
        .with_context(|| format!("command failed: {}", cli.command))?;

    Ok(())
}
