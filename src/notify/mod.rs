// src/notify/mod.rs

//! Failure notification.
//!
//! The supervisor hands a [`Notification`] to a [`Notifier`]. Dispatch is
//! best-effort: the supervisor logs a failed dispatch and carries on.

pub mod mail;

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::NotifyTarget;

pub use mail::MailCommandNotifier;

/// A failure report ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub target: NotifyTarget,
    pub subject: String,
    /// The captured output of the failed job.
    pub body: String,
}

/// Trait abstracting how failure reports leave the process.
pub trait Notifier: Send {
    fn notify(
        &mut self,
        notification: Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
