// src/config/mod.rs

//! Configuration loading and validation for jobguard.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Capture the process environment once (`env.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it into a `ConfigFile` (`validate.rs`).

pub mod env;
pub mod loader;
pub mod model;
pub mod validate;

pub use env::EnvOverrides;
pub use loader::{load_and_validate, load_from_path, resolve_config_path};
pub use model::{
    CaptureSection, CaptureSettings, ConfigFile, JobSection, JobSpec, NotifySection,
    NotifySettings, RawConfigFile,
};
