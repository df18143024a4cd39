// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::NotifyTarget;

pub const DEFAULT_JOB_NAME: &str = "job";
pub const DEFAULT_CAPTURE_PREFIX: &str = "jobguard-";
pub const DEFAULT_MAILER: &str = "mail";

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [job]
/// name = "archive-s3"
/// cmd = "./archive-s3.py"
/// workdir = "/opt/archive-s3"
/// venv = "/opt/archive-s3/env"
///
/// [capture]
/// dir = "/var/tmp"
///
/// [notify]
/// target = "ops@example.com"
/// subject = "archive-s3 fault"
/// ```
///
/// Only `[job].cmd` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    pub job: JobSection,

    #[serde(default)]
    pub capture: CaptureSection,

    #[serde(default)]
    pub notify: NotifySection,
}

/// `[job]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSection {
    /// Label used in log lines and the default fault subject.
    #[serde(default = "default_job_name")]
    pub name: String,

    /// Command line of the child task, run through the platform shell.
    pub cmd: String,

    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Virtualenv-style directory to activate for the child.
    #[serde(default)]
    pub venv: Option<PathBuf>,

    /// Extra environment for the child, applied after activation.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// `[capture]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureSection {
    /// Directory for the capture file; the system temp dir when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_capture_prefix")]
    pub prefix: String,
}

impl Default for CaptureSection {
    fn default() -> Self {
        Self {
            dir: None,
            prefix: default_capture_prefix(),
        }
    }
}

/// `[notify]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// Failure report address. `JOBGUARD_NOTIFY` takes precedence.
    #[serde(default)]
    pub target: Option<String>,

    /// Fault subject; defaults to `"<job name> fault"`.
    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default = "default_mailer")]
    pub mailer: String,
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            target: None,
            subject: None,
            mailer: default_mailer(),
        }
    }
}

fn default_job_name() -> String {
    DEFAULT_JOB_NAME.to_string()
}

fn default_capture_prefix() -> String {
    DEFAULT_CAPTURE_PREFIX.to_string()
}

fn default_mailer() -> String {
    DEFAULT_MAILER.to_string()
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub job: JobSpec,
    pub capture: CaptureSettings,
    pub notify: NotifySettings,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        job: JobSpec,
        capture: CaptureSettings,
        notify: NotifySettings,
    ) -> Self {
        Self {
            job,
            capture,
            notify,
        }
    }
}

/// The child task to supervise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub name: String,
    pub cmd: String,
    pub workdir: Option<PathBuf>,
    pub venv: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl JobSpec {
    /// A job with only a name and a command line.
    pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            workdir: None,
            venv: None,
            env: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub dir: PathBuf,
    pub prefix: String,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir(),
            prefix: default_capture_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySettings {
    /// `None` disables failure reports.
    pub target: Option<NotifyTarget>,
    pub subject: String,
    pub mailer: String,
}
