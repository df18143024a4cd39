// src/exec/task_runner.rs

//! Child process runner for the supervised job.

use std::path::Path;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::capture::CaptureSink;
use crate::config::JobSpec;
use crate::errors::{JobguardError, Result};
use crate::exec::signals::ShutdownSignal;
use crate::types::JobOutcome;

/// Run the job to completion with stdout and stderr redirected into `sink`.
///
/// - A nonzero exit is a normal `Ok(JobOutcome::Failed(code))`.
/// - A termination signal kills the child and returns
///   `JobguardError::Interrupted`; the caller still owns `sink` and drops it.
pub async fn run_job(
    job: &JobSpec,
    sink: &CaptureSink,
    shutdown: &mut ShutdownSignal,
) -> Result<JobOutcome> {
    info!(
        job = %job.name,
        cmd = %job.cmd,
        capture = %sink.path().display(),
        "starting job process"
    );

    let mut cmd = build_command(job)?;
    cmd.stdin(Stdio::null())
        .stdout(sink.stdio()?)
        .stderr(sink.stdio()?)
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| JobguardError::Spawn {
        job: job.name.clone(),
        source,
    })?;

    tokio::select! {
        status_res = child.wait() => {
            let status = status_res.with_context(|| {
                format!("waiting for process of job '{}'", job.name)
            })?;

            let outcome = JobOutcome::from_status(status);

            info!(
                job = %job.name,
                exit_code = outcome.exit_code(),
                success = !outcome.is_failure(),
                "job process exited"
            );

            Ok(outcome)
        }

        signal = shutdown.recv() => {
            warn!(
                job = %job.name,
                signal,
                "termination signal received; killing job process"
            );
            if let Err(e) = child.kill().await {
                warn!(
                    job = %job.name,
                    error = %e,
                    "failed to kill child process on termination"
                );
            }
            Err(JobguardError::Interrupted(signal))
        }
    }
}

/// Build the platform shell command for `job`, with its working directory
/// and environment applied.
pub fn build_command(job: &JobSpec) -> Result<Command> {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&job.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&job.cmd);
        c
    };

    if let Some(ref dir) = job.workdir {
        cmd.current_dir(dir);
    }

    if let Some(ref venv) = job.venv {
        activate_venv(&mut cmd, venv)?;
    }

    cmd.envs(&job.env);

    Ok(cmd)
}

/// Apply what sourcing `<venv>/bin/activate` would do to the child's
/// environment.
fn activate_venv(cmd: &mut Command, venv: &Path) -> Result<()> {
    let bin = if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    };

    let mut paths = vec![bin];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    let joined = std::env::join_paths(paths).map_err(|e| {
        JobguardError::ConfigError(format!(
            "cannot add {:?} to PATH: {}",
            venv, e
        ))
    })?;

    debug!(venv = %venv.display(), "activating environment for job");

    cmd.env("PATH", joined)
        .env("VIRTUAL_ENV", venv)
        .env_remove("PYTHONHOME");

    Ok(())
}
