// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::env::EnvOverrides;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

pub const DEFAULT_CONFIG_FILE: &str = "Jobguard.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file {:?}", path))?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file, fold in environment overrides and validate.
///
/// Overrides are applied before validation so an address coming from
/// `JOBGUARD_NOTIFY` is checked the same way as one from the file.
pub fn load_and_validate(path: impl AsRef<Path>, overrides: &EnvOverrides) -> Result<ConfigFile> {
    let mut raw_config = load_from_path(&path)?;
    raw_config.apply_env(overrides);
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the config path: CLI flag, then `JOBGUARD_CONFIG`, then
/// `Jobguard.toml` in the current working directory.
pub fn resolve_config_path(cli_path: Option<&str>, overrides: &EnvOverrides) -> PathBuf {
    if let Some(path) = cli_path {
        return PathBuf::from(path);
    }
    overrides
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
