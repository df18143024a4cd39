// tests/shell_executor.rs
#![cfg(unix)]

use std::error::Error;

use tempfile::TempDir;

use jobguard::capture::CaptureSink;
use jobguard::config::CaptureSettings;
use jobguard::exec::{JobExecutor, ShellExecutor};
use jobguard::supervisor::Supervisor;
use jobguard::types::JobOutcome;
use jobguard_test_utils::builders::{JobSpecBuilder, supervisor_config};
use jobguard_test_utils::fake_notifier::RecordingNotifier;
use jobguard_test_utils::{dir_entry_count, init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn capture_settings(dir: &TempDir) -> CaptureSettings {
    CaptureSettings {
        dir: dir.path().to_path_buf(),
        prefix: "shell-test-".to_string(),
    }
}

async fn run_captured(
    job: &jobguard::config::JobSpec,
    dir: &TempDir,
) -> Result<(JobOutcome, String), Box<dyn Error>> {
    let sink = CaptureSink::create(&capture_settings(dir))?;
    let mut executor = ShellExecutor::new();
    let outcome = with_timeout(executor.execute(job, &sink)).await?;
    let output = String::from_utf8(sink.read_contents()?)?;
    sink.release()?;
    Ok((outcome, output))
}

#[tokio::test]
async fn stdout_and_stderr_share_one_capture_in_order() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let job = JobSpecBuilder::new("echo one; echo two >&2; echo three").build();

    let (outcome, output) = run_captured(&job, &dir).await?;

    assert_eq!(outcome, JobOutcome::Success);
    assert_eq!(output, "one\ntwo\nthree\n");
    assert_eq!(dir_entry_count(dir.path()), 0);

    Ok(())
}

#[tokio::test]
async fn nonzero_exit_codes_are_reported_verbatim() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    for code in [1, 2, 42, 127, 255] {
        let job = JobSpecBuilder::new(&format!("echo failing; exit {code}")).build();
        let (outcome, output) = run_captured(&job, &dir).await?;

        assert_eq!(outcome, JobOutcome::Failed(code));
        assert_eq!(outcome.exit_code(), code);
        assert_eq!(output, "failing\n");
    }

    Ok(())
}

#[tokio::test]
async fn child_killed_by_signal_reports_128_plus_signal() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let job = JobSpecBuilder::new("kill -9 $$").build();

    let (outcome, _) = run_captured(&job, &dir).await?;

    assert_eq!(outcome, JobOutcome::Failed(128 + 9));

    Ok(())
}

#[tokio::test]
async fn missing_script_is_a_child_failure_not_a_spawn_error() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let job = JobSpecBuilder::new("./definitely-not-here.py").build();

    let (outcome, output) = run_captured(&job, &dir).await?;

    assert_eq!(outcome, JobOutcome::Failed(127));
    assert!(output.contains("definitely-not-here.py"), "output was {output:?}");

    Ok(())
}

#[tokio::test]
async fn workdir_and_env_are_applied() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let workdir = TempDir::new()?;
    let job = JobSpecBuilder::new("pwd; echo \"$ARCHIVE_MODE\"")
        .workdir(workdir.path())
        .env("ARCHIVE_MODE", "report")
        .build();

    let (outcome, output) = run_captured(&job, &dir).await?;
    let mut lines = output.lines();

    assert_eq!(outcome, JobOutcome::Success);
    let pwd = std::fs::canonicalize(lines.next().unwrap_or_default())?;
    assert_eq!(pwd, std::fs::canonicalize(workdir.path())?);
    assert_eq!(lines.next(), Some("report"));

    Ok(())
}

#[tokio::test]
async fn venv_is_activated_before_the_job_starts() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let venv = TempDir::new()?;
    let job = JobSpecBuilder::new("echo \"$VIRTUAL_ENV\"; echo \"$PATH\"; echo \"${PYTHONHOME-unset}\"")
        .venv(venv.path())
        .build();

    let (outcome, output) = run_captured(&job, &dir).await?;
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(outcome, JobOutcome::Success);
    assert_eq!(lines[0], venv.path().display().to_string());
    let first_path_entry = lines[1].split(':').next().unwrap_or_default();
    assert_eq!(first_path_entry, venv.path().join("bin").display().to_string());
    assert_eq!(lines[2], "unset");

    Ok(())
}

#[tokio::test]
async fn real_child_failure_is_reported_with_its_output() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let notifier = RecordingNotifier::new();
    let mut supervisor = Supervisor::new(
        supervisor_config(dir.path(), Some("ops@example.com")),
        ShellExecutor::new(),
        notifier.clone(),
    );
    let job = JobSpecBuilder::new("echo 'Archiving bucket-a'; echo 'quota exceeded' >&2; exit 1")
        .name("archive-s3")
        .build();

    let summary = with_timeout(supervisor.run(&job)).await?;

    assert_eq!(summary.exit_code, 1);
    assert!(summary.notified);
    assert_eq!(dir_entry_count(dir.path()), 0);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, "Archiving bucket-a\nquota exceeded\n");

    Ok(())
}

#[tokio::test]
async fn real_child_success_leaves_nothing_behind() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    let notifier = RecordingNotifier::new();
    let mut supervisor = Supervisor::new(
        supervisor_config(dir.path(), Some("ops@example.com")),
        ShellExecutor::new(),
        notifier.clone(),
    );
    let job = JobSpecBuilder::new("echo all good").build();

    let summary = with_timeout(supervisor.run(&job)).await?;

    assert_eq!(summary.exit_code, 0);
    assert!(notifier.sent().is_empty());
    assert!(!summary.capture_path.exists());
    assert_eq!(dir_entry_count(dir.path()), 0);

    Ok(())
}
