use super::*;
use std::time::Duration;

#[tokio::test]
async fn test_production_runner_success() {
    let runner = TokioProcessRunner;
    let command = ProcessCommandBuilder::new("echo")
        .arg("hello world")
        .build();

    let output = runner.run(command).await.unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout.trim(), "hello world");
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn test_production_runner_failure() {
    let runner = TokioProcessRunner;
    let command = ProcessCommandBuilder::new("false").build();

    let output = runner.run(command).await.unwrap();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test]
async fn test_production_runner_command_not_found() {
    let runner = TokioProcessRunner;
    let command = ProcessCommandBuilder::new("nonexistent-command-12345").build();

    let result = runner.run(command).await;
    assert!(matches!(result, Err(ProcessError::CommandNotFound(_))));
}

#[tokio::test]
async fn test_production_runner_timeout() {
    let runner = TokioProcessRunner;
    let command = ProcessCommandBuilder::new("sleep")
        .arg("5")
        .timeout(Duration::from_millis(100))
        .build();

    let result = runner.run(command).await;
    assert!(matches!(result, Err(ProcessError::Timeout(_))));
}

#[tokio::test]
async fn test_production_runner_keeps_args_separate() {
    let runner = TokioProcessRunner;
    let command = ProcessCommandBuilder::new("sh")
        .args(["-c", "echo \"$1|$2\"", "sh"])
        .arg("wg0 peer")
        .arg("latest handshake")
        .build();

    let output = runner.run(command).await.unwrap();
    assert_eq!(output.stdout.trim(), "wg0 peer|latest handshake");
}

#[test]
fn test_builder_collects_args_and_timeout() {
    let command = ProcessCommandBuilder::new("ip")
        .args(["addr", "show"])
        .arg("wg0")
        .timeout(Duration::from_secs(5))
        .build();

    assert_eq!(command.program, "ip");
    assert_eq!(command.args, ["addr", "show", "wg0"]);
    assert_eq!(command.timeout, Some(Duration::from_secs(5)));
    assert_eq!(command.display(), "ip addr show wg0");
    assert_eq!(ProcessCommandBuilder::new("wg").build().display(), "wg");
}

#[tokio::test]
async fn test_mock_runner_matches_args() {
    let mut mock = MockProcessRunner::new();

    mock.expect_command("ip")
        .with_args(|args| args == ["addr", "show", "wg0"])
        .returns_stdout("4: wg0: <POINTOPOINT,UP>\n")
        .returns_success()
        .finish();

    let output = mock
        .run(ProcessCommandBuilder::new("ip").args(["addr", "show", "wg0"]).build())
        .await
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, "4: wg0: <POINTOPOINT,UP>\n");
    assert!(mock.verify_called("ip", 1));

    let unmatched = mock
        .run(ProcessCommandBuilder::new("ip").args(["link"]).build())
        .await;
    assert!(matches!(unmatched, Err(ProcessError::MockExpectationNotMet(_))));
}

#[tokio::test]
async fn test_mock_runner_enforces_times() {
    let mut mock = MockProcessRunner::new();
    mock.expect_command("wg").returns_success().times(1).finish();

    let first = mock.run(ProcessCommandBuilder::new("wg").arg("show").build()).await;
    assert!(first.is_ok());

    let second = mock.run(ProcessCommandBuilder::new("wg").arg("show").build()).await;
    assert!(matches!(second, Err(ProcessError::MockExpectationNotMet(_))));
    assert_eq!(mock.get_call_history().len(), 2);
}

#[tokio::test]
async fn test_mock_runner_scripted_failures() {
    let mut mock = MockProcessRunner::new();
    mock.expect_command("wg").returns_not_found().finish();
    mock.expect_command("ip").returns_timeout().finish();

    let wg = mock.run(ProcessCommandBuilder::new("wg").build()).await;
    assert!(matches!(wg, Err(ProcessError::CommandNotFound(ref p)) if p == "wg"));

    let ip = mock
        .run(
            ProcessCommandBuilder::new("ip")
                .timeout(Duration::from_secs(2))
                .build(),
        )
        .await;
    assert!(matches!(ip, Err(ProcessError::Timeout(d)) if d == Duration::from_secs(2)));
}

#[tokio::test]
async fn test_manager_shares_mock_runner() {
    let (manager, mut mock) = SubprocessManager::mock();
    mock.expect_command("wg")
        .returns_exit_code(1)
        .returns_stderr("Unable to access interface: Operation not permitted")
        .finish();

    let output = manager
        .runner()
        .run(ProcessCommandBuilder::new("wg").arg("show").build())
        .await
        .unwrap();
    assert_eq!(output.status, ExitStatus::Error(1));
    assert!(mock.verify_called("wg", 1));
}
