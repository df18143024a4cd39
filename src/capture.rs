// src/capture.rs

//! Scoped capture sink for the child's combined output.
//!
//! A [`CaptureSink`] owns a `tempfile::NamedTempFile`. The file is removed
//! when the sink is dropped, so every exit path out of the supervisor
//! (including `?` early returns and spawn failures) cleans it up.
//! [`CaptureSink::release`] is the normal-path variant that reports
//! deletion errors instead of ignoring them.

use std::fs::{self, File};
use std::path::Path;
use std::process::Stdio;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::CaptureSettings;
use crate::errors::{JobguardError, Result};

#[derive(Debug)]
pub struct CaptureSink {
    file: NamedTempFile,
}

impl CaptureSink {
    /// Create an empty capture file under `settings.dir`.
    pub fn create(settings: &CaptureSettings) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&settings.prefix)
            .suffix(".log")
            .tempfile_in(&settings.dir)
            .map_err(|source| JobguardError::Capture {
                context: format!("creating capture file in {:?}", settings.dir),
                source,
            })?;

        debug!(capture = %file.path().display(), "capture sink created");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// A new handle onto the capture file.
    ///
    /// All handles share one file offset, so output written through them
    /// interleaves in write order.
    pub fn writer(&self) -> Result<File> {
        self.file
            .as_file()
            .try_clone()
            .map_err(|source| JobguardError::Capture {
                context: format!("duplicating handle for {:?}", self.path()),
                source,
            })
    }

    /// A `Stdio` that redirects a child stream into the capture file.
    pub fn stdio(&self) -> Result<Stdio> {
        Ok(Stdio::from(self.writer()?))
    }

    /// Everything captured so far.
    pub fn read_contents(&self) -> Result<Vec<u8>> {
        fs::read(self.path()).map_err(|source| JobguardError::Capture {
            context: format!("reading {:?}", self.path()),
            source,
        })
    }

    /// Delete the capture file now.
    pub fn release(self) -> Result<()> {
        let path = self.path().to_path_buf();
        self.file.close().map_err(|source| JobguardError::Capture {
            context: format!("removing {:?}", path),
            source,
        })?;
        debug!(capture = %path.display(), "capture sink released");
        Ok(())
    }
}
