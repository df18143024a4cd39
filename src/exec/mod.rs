// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`task_runner`] spawns the child through `tokio::process::Command` with
//!   both output streams redirected into the capture sink.
//! - [`signals`] holds the SIGINT/SIGTERM listeners, installed before the
//!   capture file exists and polled while the child runs.
//! - [`backend`] provides the `JobExecutor` trait and the concrete
//!   `ShellExecutor` that the supervisor uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod signals;
pub mod task_runner;

pub use backend::{JobExecutor, ShellExecutor};
pub use signals::ShutdownSignal;
pub use task_runner::{build_command, run_job};
