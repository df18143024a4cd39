// src/lib.rs

pub mod capture;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod notify;
pub mod supervisor;
pub mod types;

use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{ConfigFile, EnvOverrides, load_and_validate, resolve_config_path};
use crate::errors::Result;
use crate::exec::ShellExecutor;
use crate::notify::MailCommandNotifier;
use crate::supervisor::{Supervisor, SupervisorConfig};

/// High-level entry point used by `main.rs`.
///
/// Reads the environment once, loads the config, then runs the job under a
/// [`Supervisor`]. Returns the exit code the process should end with.
pub async fn run(args: CliArgs) -> Result<i32> {
    run_with_env(args, EnvOverrides::from_process()).await
}

/// Same as [`run`], with the environment snapshot supplied by the caller.
pub async fn run_with_env(args: CliArgs, overrides: EnvOverrides) -> Result<i32> {
    let config_path = resolve_config_path(args.config.as_deref(), &overrides);
    let cfg = load_and_validate(&config_path, &overrides)?;

    if args.dry_run {
        print_dry_run(&config_path, &cfg);
        return Ok(0);
    }

    // Signal handlers go in before the supervisor creates the capture file.
    let executor = ShellExecutor::new();
    let notifier = MailCommandNotifier::new(cfg.notify.mailer.clone());
    let mut supervisor = Supervisor::new(SupervisorConfig::from(&cfg), executor, notifier);

    let summary = supervisor.run(&cfg.job).await?;
    Ok(summary.exit_code)
}

/// Simple dry-run output: print what would run and where reports would go.
fn print_dry_run(config_path: &Path, cfg: &ConfigFile) {
    println!("jobguard dry-run");
    println!("  config = {}", config_path.display());
    println!();

    println!("job {}:", cfg.job.name);
    println!("    cmd: {}", cfg.job.cmd);
    if let Some(ref dir) = cfg.job.workdir {
        println!("    workdir: {}", dir.display());
    }
    if let Some(ref venv) = cfg.job.venv {
        println!("    venv: {}", venv.display());
    }
    for (key, value) in cfg.job.env.iter() {
        println!("    env: {key}={value}");
    }
    println!();

    println!("capture:");
    println!("    dir: {}", cfg.capture.dir.display());
    println!("    prefix: {}", cfg.capture.prefix);
    println!();

    println!("notify:");
    match cfg.notify.target {
        Some(ref target) => {
            println!("    target: {target}");
            println!("    subject: {}", cfg.notify.subject);
            println!("    mailer: {}", cfg.notify.mailer);
        }
        None => println!("    disabled"),
    }

    debug!("dry-run complete (no execution)");
}
