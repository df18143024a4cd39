// src/notify/mail.rs

//! Notifier backed by a `mail(1)`-compatible command.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{JobguardError, Result};

use super::{Notification, Notifier};

/// Sends reports by running `<mailer> -s <subject> -- <recipient>...` and
/// writing the body to its stdin.
#[derive(Debug, Clone)]
pub struct MailCommandNotifier {
    mailer: String,
}

impl MailCommandNotifier {
    pub fn new(mailer: impl Into<String>) -> Self {
        Self {
            mailer: mailer.into(),
        }
    }
}

impl Notifier for MailCommandNotifier {
    fn notify(
        &mut self,
        notification: Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { send_mail(&self.mailer, &notification).await })
    }
}

async fn send_mail(mailer: &str, notification: &Notification) -> Result<()> {
    debug!(
        mailer,
        recipient = %notification.target,
        subject = %notification.subject,
        bytes = notification.body.len(),
        "dispatching failure report"
    );

    let mut child = Command::new(mailer)
        .arg("-s")
        .arg(&notification.subject)
        .arg("--")
        .args(notification.target.recipients())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| JobguardError::NotifyError(format!("spawning mailer '{}': {}", mailer, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(notification.body.as_bytes())
            .await
            .map_err(|e| {
                JobguardError::NotifyError(format!("writing report to mailer '{}': {}", mailer, e))
            })?;
        // Dropping stdin closes the pipe so the mailer sees end of message.
    }

    let output = child.wait_with_output().await.map_err(|e| {
        JobguardError::NotifyError(format!("waiting for mailer '{}': {}", mailer, e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(JobguardError::NotifyError(format!(
            "mailer '{}' exited with {}: {}",
            mailer,
            output.status,
            stderr.trim()
        )));
    }

    info!(recipient = %notification.target, "failure report sent");
    Ok(())
}
