// src/config/validate.rs

use tracing::warn;

use crate::config::model::{
    CaptureSettings, ConfigFile, JobSpec, NotifySettings, RawConfigFile,
};
use crate::errors::{JobguardError, Result};
use crate::types::NotifyTarget;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::JobguardError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let RawConfigFile {
            job,
            capture,
            notify,
        } = raw;

        let subject = notify
            .subject
            .unwrap_or_else(|| format!("{} fault", job.name.trim()));
        let notify = NotifySettings {
            target: notify.target.as_deref().and_then(resolve_target),
            subject,
            mailer: notify.mailer.trim().to_string(),
        };

        let capture = CaptureSettings {
            dir: capture.dir.unwrap_or_else(std::env::temp_dir),
            prefix: capture.prefix,
        };

        let job = JobSpec {
            name: job.name.trim().to_string(),
            cmd: job.cmd,
            workdir: job.workdir,
            venv: job.venv,
            env: job.env,
        };

        Ok(ConfigFile::new_unchecked(job, capture, notify))
    }
}

/// Turn the configured address list into a target, dropping entries that
/// cannot be handed to a mailer. Nothing usable left means "disabled".
fn resolve_target(raw: &str) -> Option<NotifyTarget> {
    let (target, rejected) = NotifyTarget::parse_with_rejects(raw);
    for entry in rejected.iter() {
        warn!(entry = %entry, "ignoring notification recipient that looks like an option");
    }
    if target.is_none() && !rejected.is_empty() {
        warn!("no usable notification recipient; failure reports are disabled");
    }
    target
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_job(cfg)?;
    validate_capture(cfg)?;
    validate_notify(cfg)?;
    Ok(())
}

fn validate_job(cfg: &RawConfigFile) -> Result<()> {
    if cfg.job.cmd.trim().is_empty() {
        return Err(JobguardError::ConfigError(
            "[job].cmd must not be empty".to_string(),
        ));
    }
    if cfg.job.name.trim().is_empty() {
        return Err(JobguardError::ConfigError(
            "[job].name must not be empty".to_string(),
        ));
    }
    for key in cfg.job.env.keys() {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(JobguardError::ConfigError(format!(
                "[job.env] has invalid variable name {:?}",
                key
            )));
        }
    }
    Ok(())
}

fn validate_capture(cfg: &RawConfigFile) -> Result<()> {
    if cfg.capture.prefix.is_empty() {
        return Err(JobguardError::ConfigError(
            "[capture].prefix must not be empty".to_string(),
        ));
    }
    if cfg.capture.prefix.contains(std::path::is_separator) {
        return Err(JobguardError::ConfigError(format!(
            "[capture].prefix must not contain a path separator (got {:?})",
            cfg.capture.prefix
        )));
    }
    Ok(())
}

fn validate_notify(cfg: &RawConfigFile) -> Result<()> {
    if cfg.notify.mailer.trim().is_empty() {
        return Err(JobguardError::ConfigError(
            "[notify].mailer must not be empty".to_string(),
        ));
    }

    if let Some(ref subject) = cfg.notify.subject {
        if subject.trim().is_empty() {
            return Err(JobguardError::ConfigError(
                "[notify].subject must not be empty".to_string(),
            ));
        }
        if subject.contains(['\n', '\r']) {
            return Err(JobguardError::ConfigError(
                "[notify].subject must be a single line".to_string(),
            ));
        }
    }

    // Targets never fail the config; `resolve_target` drops bad entries.

    Ok(())
}
