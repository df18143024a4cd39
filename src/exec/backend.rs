// src/exec/backend.rs

//! Pluggable job executor abstraction.
//!
//! The supervisor talks to a `JobExecutor` instead of spawning processes
//! itself. Production uses [`ShellExecutor`]; tests substitute an executor
//! that writes scripted output into the capture sink and returns a fixed
//! outcome.

use std::future::Future;
use std::pin::Pin;

use crate::capture::CaptureSink;
use crate::config::JobSpec;
use crate::errors::Result;
use crate::types::JobOutcome;

use super::signals::ShutdownSignal;
use super::task_runner::run_job;

/// Trait abstracting how the child task is run.
pub trait JobExecutor: Send {
    /// Run `job` once, sending its combined output into `sink`.
    ///
    /// Returns the child's outcome; `Err` only when the child could not be
    /// run or awaited at all.
    fn execute<'a>(
        &'a mut self,
        job: &'a JobSpec,
        sink: &'a CaptureSink,
    ) -> Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'a>>;
}

/// Real executor used in production: runs the job through the platform
/// shell via [`run_job`].
#[derive(Debug)]
pub struct ShellExecutor {
    shutdown: ShutdownSignal,
}

impl ShellExecutor {
    /// Installs the termination signal handlers, so build this before the
    /// supervisor creates its capture file.
    pub fn new() -> Self {
        Self {
            shutdown: ShutdownSignal::install(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl JobExecutor for ShellExecutor {
    fn execute<'a>(
        &'a mut self,
        job: &'a JobSpec,
        sink: &'a CaptureSink,
    ) -> Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'a>> {
        Box::pin(run_job(job, sink, &mut self.shutdown))
    }
}
