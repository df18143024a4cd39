// src/config/env.rs

//! Process environment read once at startup.
//!
//! Everything the supervisor takes from the environment is captured here and
//! then passed down explicitly, so nothing reads `std::env` mid-run.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::warn;

use crate::config::model::RawConfigFile;

pub const NOTIFY_ENV: &str = "JOBGUARD_NOTIFY";
pub const CONFIG_ENV: &str = "JOBGUARD_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Value of `JOBGUARD_NOTIFY`. `Some("")` is meaningful: it disables a
    /// target configured in the file.
    pub notify_target: Option<String>,

    /// Value of `JOBGUARD_CONFIG`.
    pub config_path: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        Self::from_values(std::env::var_os(NOTIFY_ENV), std::env::var_os(CONFIG_ENV))
    }

    /// Build from raw `JOBGUARD_NOTIFY` and `JOBGUARD_CONFIG` values.
    pub fn from_values(notify: Option<OsString>, config: Option<OsString>) -> Self {
        Self {
            notify_target: notify.map(notify_value),
            config_path: config.filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }
}

/// A value that is set but not UTF-8 cannot name a recipient. It still
/// overrides the file, as a blank value would, so mail never goes to a
/// target the operator tried to replace.
fn notify_value(raw: OsString) -> String {
    raw.into_string().unwrap_or_else(|_| {
        warn!(
            variable = NOTIFY_ENV,
            "value is not valid UTF-8; failure reports are disabled"
        );
        String::new()
    })
}

impl RawConfigFile {
    /// Fold environment overrides into the raw config.
    pub fn apply_env(&mut self, overrides: &EnvOverrides) {
        if let Some(ref target) = overrides.notify_target {
            self.notify.target = Some(target.clone());
        }
    }
}
