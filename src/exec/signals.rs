// src/exec/signals.rs

//! Termination signals that abort a run.
//!
//! Handlers are installed when a [`ShutdownSignal`] is built, which happens
//! before the capture file is created. A signal that lands between the two
//! is queued on the stream instead of taking the default action, so the
//! supervisor always gets to clean up.

use tracing::warn;

pub const SIGINT: i32 = 2;
pub const SIGTERM: i32 = 15;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// SIGINT and SIGTERM listeners for the lifetime of an executor.
#[derive(Debug)]
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: Option<Signal>,
    #[cfg(unix)]
    terminate: Option<Signal>,
}

#[cfg(unix)]
fn install(kind: SignalKind, name: &str) -> Option<Signal> {
    match signal(kind) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(signal = name, error = %e, "failed to install signal handler");
            None
        }
    }
}

#[cfg(unix)]
async fn next(stream: &mut Option<Signal>) -> Option<()> {
    match stream {
        Some(s) => s.recv().await,
        None => std::future::pending().await,
    }
}

impl ShutdownSignal {
    /// Install the handlers now. Must be called inside a tokio runtime.
    #[cfg(unix)]
    pub fn install() -> Self {
        Self {
            interrupt: install(SignalKind::interrupt(), "SIGINT"),
            terminate: install(SignalKind::terminate(), "SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    pub fn install() -> Self {
        Self {}
    }

    /// Resolve with the signal number once SIGINT or SIGTERM arrives.
    ///
    /// If no handler could be installed this never resolves, which leaves
    /// the child to run to completion.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> i32 {
        tokio::select! {
            Some(()) = next(&mut self.interrupt) => SIGINT,
            Some(()) = next(&mut self.terminate) => SIGTERM,
            else => std::future::pending::<i32>().await,
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> i32 {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        SIGINT
    }
}
