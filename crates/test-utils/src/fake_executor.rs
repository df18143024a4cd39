use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use jobguard::capture::CaptureSink;
use jobguard::config::JobSpec;
use jobguard::errors::{JobguardError, Result};
use jobguard::exec::JobExecutor;
use jobguard::types::JobOutcome;

/// What a `FakeExecutor` observed for one run.
#[derive(Debug, Clone)]
pub struct ObservedRun {
    pub job: String,
    pub capture_path: PathBuf,
    /// Whether the capture file existed while the "child" ran.
    pub capture_existed: bool,
}

/// A fake executor that:
/// - records each job it was asked to run
/// - writes a scripted output into the capture sink
/// - reports a fixed exit code
pub struct FakeExecutor {
    output: Vec<u8>,
    exit_code: i32,
    runs: Arc<Mutex<Vec<ObservedRun>>>,
}

impl FakeExecutor {
    pub fn new(output: impl Into<Vec<u8>>, exit_code: i32) -> Self {
        Self {
            output: output.into(),
            exit_code,
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn runs(&self) -> Arc<Mutex<Vec<ObservedRun>>> {
        Arc::clone(&self.runs)
    }
}

impl JobExecutor for FakeExecutor {
    fn execute<'a>(
        &'a mut self,
        job: &'a JobSpec,
        sink: &'a CaptureSink,
    ) -> Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut guard = self.runs.lock().unwrap();
                guard.push(ObservedRun {
                    job: job.name.clone(),
                    capture_path: sink.path().to_path_buf(),
                    capture_existed: sink.path().exists(),
                });
            }

            let mut writer = sink.writer()?;
            writer.write_all(&self.output)?;
            writer.flush()?;

            Ok(JobOutcome::from_exit_code(self.exit_code))
        })
    }
}

/// An executor whose child can never be started.
pub struct SpawnFailingExecutor {
    kind: io::ErrorKind,
    capture_paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl SpawnFailingExecutor {
    pub fn new(kind: io::ErrorKind) -> Self {
        Self {
            kind,
            capture_paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn capture_paths(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        Arc::clone(&self.capture_paths)
    }
}

impl JobExecutor for SpawnFailingExecutor {
    fn execute<'a>(
        &'a mut self,
        job: &'a JobSpec,
        sink: &'a CaptureSink,
    ) -> Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.capture_paths
                .lock()
                .unwrap()
                .push(sink.path().to_path_buf());

            Err(JobguardError::Spawn {
                job: job.name.clone(),
                source: io::Error::new(self.kind, "simulated spawn failure"),
            })
        })
    }
}
