use std::fmt;
use std::process::ExitStatus;

/// How the child task finished.
///
/// - `Success`: exit status 0.
/// - `Failed(code)`: any other status. A child killed by signal N is
///   reported as `128 + N`, matching what a shell would report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Success,
    Failed(i32),
}

impl JobOutcome {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            JobOutcome::Success
        } else {
            JobOutcome::Failed(code)
        }
    }

    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::from_exit_code(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return JobOutcome::Failed(128 + signal);
            }
        }

        JobOutcome::Failed(-1)
    }

    /// The exit code the supervisor propagates for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            JobOutcome::Success => 0,
            JobOutcome::Failed(code) => code,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, JobOutcome::Failed(_))
    }
}

/// Destination addresses for failure reports.
///
/// Only constructible with at least one recipient, so "configured" and
/// "non-empty" are the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyTarget(Vec<String>);

impl NotifyTarget {
    /// Split `raw` on whitespace and commas into recipients.
    ///
    /// Returns `None` when no usable recipient remains.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::parse_with_rejects(raw).0
    }

    /// Like [`NotifyTarget::parse`], also returning the entries that were
    /// dropped. An entry starting with `-` would be read as a mailer option,
    /// so it is never passed on.
    pub fn parse_with_rejects(raw: &str) -> (Option<Self>, Vec<String>) {
        let (recipients, rejected): (Vec<String>, Vec<String>) = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .partition(|s| !s.starts_with('-'));

        let target = if recipients.is_empty() {
            None
        } else {
            Some(NotifyTarget(recipients))
        };
        (target, rejected)
    }

    pub fn recipients(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for NotifyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}
