//! End-to-end scenarios for the shell runner
//!
//! Drives `CommandRunner` through its public API with each stock sink:
//! success, exit code mismatch, stdout and stderr forwarding.

#![cfg(unix)]

use std::fs::File;
use std::io::Read;
use std::sync::Arc;

use shellexec_shell::{
    CommandRunner, Encoding, MemorySink, Platform, RunnerConfig, ShellError, TracingSink,
    WriterSink,
};
use tempfile::NamedTempFile;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_exit_zero_expected_zero() {
    init_tracing();
    let sink = Arc::new(MemorySink::new());
    let runner = CommandRunner::new(sink.clone());

    let result = runner.execute("exit 0", 0).await;

    assert!(result.is_ok());
    assert!(sink.chunks().is_empty());
}

#[tokio::test]
async fn test_exit_one_expected_zero() {
    init_tracing();
    let runner = CommandRunner::new(Arc::new(MemorySink::new()));

    let err = runner.execute("exit 1", 0).await.unwrap_err();

    assert_eq!(err.to_string(), "unexpected exit code: expected 0 got 1.");
}

#[tokio::test]
async fn test_echo_reaches_sink() {
    init_tracing();
    let sink = Arc::new(MemorySink::new());
    let runner = CommandRunner::new(sink.clone());

    runner.execute("echo hello", 0).await.unwrap();

    assert!(sink.chunks().iter().any(|chunk| chunk.contains("hello")));
}

#[tokio::test]
async fn test_stderr_with_matching_nonzero_code() {
    init_tracing();
    let sink = Arc::new(MemorySink::new());
    let runner = CommandRunner::new(sink.clone());

    runner.execute("echo err 1>&2; exit 2", 2).await.unwrap();

    assert!(sink.chunks().iter().any(|chunk| chunk.contains("err")));
}

#[tokio::test]
async fn test_shell_metacharacters_pass_through() {
    init_tracing();
    let sink = Arc::new(MemorySink::new());
    let runner = CommandRunner::new(sink.clone());

    runner
        .execute("printf 'a|b\\n' | tr '|' '-' && echo \"$((1 + 2))\"", 0)
        .await
        .unwrap();

    assert_eq!(sink.contents(), "a-b\n3\n");
}

#[tokio::test]
async fn test_writer_sink_to_file() {
    init_tracing();
    let file = NamedTempFile::new().unwrap();
    let sink = Arc::new(WriterSink::new(file.reopen().unwrap()));
    let runner = CommandRunner::new(sink);

    runner
        .execute("echo first; echo second 1>&2", 0)
        .await
        .unwrap();

    let mut written = String::new();
    File::open(file.path())
        .unwrap()
        .read_to_string(&mut written)
        .unwrap();
    assert!(written.contains("first\n"));
    assert!(written.contains("second\n"));
}

#[tokio::test]
async fn test_tracing_sink_does_not_affect_outcome() {
    init_tracing();
    let runner = CommandRunner::new(Arc::new(TracingSink::new("scenario")));

    runner.execute("echo traced", 0).await.unwrap();
    let err = runner.execute("echo traced; exit 5", 0).await.unwrap_err();
    assert!(matches!(
        err,
        ShellError::ExitCodeMismatch {
            expected: 0,
            actual: 5
        }
    ));
}

#[tokio::test]
async fn test_latin1_runner() {
    init_tracing();
    let sink = Arc::new(MemorySink::new());
    let config = RunnerConfig::new()
        .encoding(Encoding::Latin1)
        .platform(Platform::Posix);
    let runner = CommandRunner::with_config(sink.clone(), config);

    runner.execute("printf 'caf\\351'", 0).await.unwrap();

    assert_eq!(sink.contents(), "café");
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced_not_fatal() {
    init_tracing();
    let sink = Arc::new(MemorySink::new());
    let runner = CommandRunner::new(sink.clone());

    runner.execute("printf 'ok\\377ok'", 0).await.unwrap();

    assert_eq!(sink.contents(), "ok\u{FFFD}ok");
}
