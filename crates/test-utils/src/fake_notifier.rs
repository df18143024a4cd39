use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use jobguard::errors::{JobguardError, Result};
use jobguard::notify::{Notification, Notifier};

/// A notifier that records every notification and optionally fails.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the attempt, then reports a dispatch error.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(
        &mut self,
        notification: Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let sent = Arc::clone(&self.sent);
        let fail = self.fail;

        Box::pin(async move {
            sent.lock().unwrap().push(notification);
            if fail {
                return Err(JobguardError::NotifyError(
                    "simulated mailer outage".to_string(),
                ));
            }
            Ok(())
        })
    }
}
