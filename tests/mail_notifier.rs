// tests/mail_notifier.rs
#![cfg(unix)]

// Kept to a single test: writing a script and exec'ing it while another
// test thread forks can fail with ETXTBSY.

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use jobguard::errors::JobguardError;
use jobguard::notify::{MailCommandNotifier, Notification, Notifier};
use jobguard::types::NotifyTarget;
use jobguard_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

fn report(body: &str) -> Notification {
    report_to("ops@example.com", body)
}

fn report_to(target: &str, body: &str) -> Notification {
    Notification {
        target: NotifyTarget::parse(target).expect("valid target"),
        subject: "archive-s3 fault".to_string(),
        body: body.to_string(),
    }
}

#[tokio::test]
async fn mail_command_notifier_dispatches_and_reports_failures() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;

    // 1. Successful dispatch: arguments and body reach the mailer.
    let recording = write_script(
        dir.path(),
        "fake-mail",
        r#"out="$(dirname "$0")"
printf '%s\n' "$@" > "$out/args"
cat > "$out/body""#,
    )?;
    let mut notifier = MailCommandNotifier::new(recording.display().to_string());

    with_timeout(notifier.notify(report("line one\nline two\n"))).await?;

    let args = fs::read_to_string(dir.path().join("args"))?;
    assert_eq!(args, "-s\narchive-s3 fault\n--\nops@example.com\n");
    let body = fs::read_to_string(dir.path().join("body"))?;
    assert_eq!(body, "line one\nline two\n");

    // 1b. Several recipients, with an option-like entry that must never reach
    // the mailer's option parser.
    with_timeout(notifier.notify(report_to("ops@example.com, -Sfoo oncall@example.com", "x"))).await?;

    let args = fs::read_to_string(dir.path().join("args"))?;
    assert_eq!(
        args,
        "-s\narchive-s3 fault\n--\nops@example.com\noncall@example.com\n"
    );

    // 2. Mailer exits nonzero: error carries its stderr.
    let broken = write_script(
        dir.path(),
        "broken-mail",
        "cat > /dev/null\necho 'smtp relay unreachable' >&2\nexit 3",
    )?;
    let mut notifier = MailCommandNotifier::new(broken.display().to_string());

    match with_timeout(notifier.notify(report("x"))).await {
        Err(JobguardError::NotifyError(msg)) => {
            assert!(msg.contains("smtp relay unreachable"), "message was {msg:?}")
        }
        other => panic!("expected NotifyError, got {:?}", other),
    }

    // 3. Mailer missing entirely.
    let mut notifier = MailCommandNotifier::new(dir.path().join("no-such-mailer").display().to_string());

    match with_timeout(notifier.notify(report("x"))).await {
        Err(JobguardError::NotifyError(msg)) => assert!(msg.contains("spawning mailer")),
        other => panic!("expected NotifyError, got {:?}", other),
    }

    Ok(())
}
