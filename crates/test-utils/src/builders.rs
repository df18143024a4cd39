#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use jobguard::config::{
    CaptureSection, CaptureSettings, ConfigFile, EnvOverrides, JobSection, JobSpec,
    NotifySection, RawConfigFile,
};
use jobguard::supervisor::SupervisorConfig;
use jobguard::types::NotifyTarget;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
    overrides: EnvOverrides,
}

impl ConfigFileBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            config: RawConfigFile {
                job: JobSection {
                    name: "job".to_string(),
                    cmd: cmd.to_string(),
                    workdir: None,
                    venv: None,
                    env: BTreeMap::new(),
                },
                capture: CaptureSection::default(),
                notify: NotifySection::default(),
            },
            overrides: EnvOverrides::default(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.config.job.name = name.to_string();
        self
    }

    pub fn capture_dir(mut self, dir: &Path) -> Self {
        self.config.capture.dir = Some(dir.to_path_buf());
        self
    }

    pub fn target(mut self, target: &str) -> Self {
        self.config.notify.target = Some(target.to_string());
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.config.notify.subject = Some(subject.to_string());
        self
    }

    pub fn mailer(mut self, mailer: &str) -> Self {
        self.config.notify.mailer = mailer.to_string();
        self
    }

    /// Simulate `JOBGUARD_NOTIFY` without touching the process environment.
    pub fn env_target(mut self, target: &str) -> Self {
        self.overrides.notify_target = Some(target.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        let mut raw = self.config;
        raw.apply_env(&self.overrides);
        raw
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.raw()).expect("Failed to build valid config from builder")
    }
}

/// Builder for `JobSpec`.
pub struct JobSpecBuilder {
    job: JobSpec,
}

impl JobSpecBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            job: JobSpec::new("job", cmd),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.job.name = name.to_string();
        self
    }

    pub fn workdir(mut self, dir: &Path) -> Self {
        self.job.workdir = Some(dir.to_path_buf());
        self
    }

    pub fn venv(mut self, dir: &Path) -> Self {
        self.job.venv = Some(dir.to_path_buf());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.job.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> JobSpec {
        self.job
    }
}

/// Supervisor config capturing into `dir`, reporting to `target` if given.
pub fn supervisor_config(dir: &Path, target: Option<&str>) -> SupervisorConfig {
    SupervisorConfig {
        notify_target: target.and_then(NotifyTarget::parse),
        subject: "job fault".to_string(),
        capture: CaptureSettings {
            dir: dir.to_path_buf(),
            prefix: "jobguard-test-".to_string(),
        },
    }
}
