// src/supervisor.rs

//! The job supervisor: one capture sink, one child run, one optional
//! failure report.
//!
//! The notify decision is the pure function [`should_notify`]; everything
//! else in [`Supervisor::run`] is IO sequencing around it.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::capture::CaptureSink;
use crate::config::{CaptureSettings, ConfigFile, JobSpec};
use crate::errors::Result;
use crate::exec::JobExecutor;
use crate::notify::{Notification, Notifier};
use crate::types::{JobOutcome, NotifyTarget};

/// Everything the supervisor needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// `None` disables failure reports.
    pub notify_target: Option<NotifyTarget>,
    pub subject: String,
    pub capture: CaptureSettings,
}

impl From<&ConfigFile> for SupervisorConfig {
    fn from(cfg: &ConfigFile) -> Self {
        Self {
            notify_target: cfg.notify.target.clone(),
            subject: cfg.notify.subject.clone(),
            capture: cfg.capture.clone(),
        }
    }
}

/// Result of one supervised run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: JobOutcome,
    /// The child's exit code, which is also the supervisor's.
    pub exit_code: i32,
    /// Where output was captured. The file no longer exists.
    pub capture_path: PathBuf,
    /// Whether a failure report was handed off successfully.
    pub notified: bool,
}

/// Report iff the job failed and someone is listening.
pub fn should_notify(outcome: JobOutcome, target: Option<&NotifyTarget>) -> bool {
    outcome.is_failure() && target.is_some()
}

pub struct Supervisor<E: JobExecutor, N: Notifier> {
    config: SupervisorConfig,
    executor: E,
    notifier: N,
}

impl<E: JobExecutor, N: Notifier> fmt::Debug for Supervisor<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E: JobExecutor, N: Notifier> Supervisor<E, N> {
    pub fn new(config: SupervisorConfig, executor: E, notifier: N) -> Self {
        Self {
            config,
            executor,
            notifier,
        }
    }

    /// Run `job` once.
    ///
    /// Child failure is not an error: it comes back as a `RunSummary` with a
    /// nonzero `exit_code`. `Err` means the supervisor itself could not do
    /// its job (no capture file, child not spawnable, interrupted). The
    /// capture file is gone by the time this returns, either way.
    pub async fn run(&mut self, job: &JobSpec) -> Result<RunSummary> {
        let sink = CaptureSink::create(&self.config.capture)?;
        let capture_path = sink.path().to_path_buf();

        let outcome = self.executor.execute(job, &sink).await?;
        let exit_code = outcome.exit_code();

        if outcome.is_failure() {
            warn!(job = %job.name, exit_code, "job failed");
        } else {
            info!(job = %job.name, "job succeeded");
        }

        let notified = match self.config.notify_target.clone() {
            Some(target) if should_notify(outcome, Some(&target)) => {
                self.dispatch_report(job, target, &sink).await
            }
            None if outcome.is_failure() => {
                debug!(job = %job.name, "no notification target configured");
                false
            }
            _ => false,
        };

        if let Err(e) = sink.release() {
            warn!(error = %e, "failed to remove capture file");
        }

        Ok(RunSummary {
            outcome,
            exit_code,
            capture_path,
            notified,
        })
    }

    /// Send the captured output to `target`. Never fails the run.
    async fn dispatch_report(
        &mut self,
        job: &JobSpec,
        target: NotifyTarget,
        sink: &CaptureSink,
    ) -> bool {
        let body = match sink.read_contents() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!(job = %job.name, error = %e, "could not read captured output");
                format!("(captured output unavailable: {e})\n")
            }
        };

        let notification = Notification {
            target: target.clone(),
            subject: self.config.subject.clone(),
            body,
        };

        match self.notifier.notify(notification).await {
            Ok(()) => {
                info!(job = %job.name, recipient = %target, "failure report dispatched");
                true
            }
            Err(e) => {
                warn!(
                    job = %job.name,
                    recipient = %target,
                    error = %e,
                    "failure report could not be dispatched"
                );
                false
            }
        }
    }
}
