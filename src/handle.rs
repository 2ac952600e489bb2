use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::ops::{Deref, DerefMut};
use std::path::Path;

use tracing::{debug, error};

use crate::error::EditError;

/// The file operations a run needs from its target.
pub trait Handle: Read + Write + Seek {
    fn size(&self) -> io::Result<u64>;

    fn truncate(&mut self, len: u64) -> io::Result<()>;

    /// Releases the handle, reporting failures `Drop` would hide.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

impl Handle for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn close(self) -> io::Result<()> {
        // deferred write errors only surface on sync, a plain drop discards them
        self.sync_all()
    }
}

pub fn open(path: &Path) -> Result<File, EditError> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| EditError::FileAccess {
            path: path.display().to_string(),
            source,
        })?;
    debug!(path = %path.display(), "file opened");
    return Ok(file);
}

/// Owns a [`Handle`] for the length of a run and closes it on every exit path.
pub struct Closing<H: Handle> {
    name: String,
    inner: Option<H>,
}

impl<H: Handle> Closing<H> {
    pub fn new(name: impl Into<String>, handle: H) -> Self {
        Closing {
            name: name.into(),
            inner: Some(handle),
        }
    }
}

impl<H: Handle> Deref for Closing<H> {
    type Target = H;

    fn deref(&self) -> &H {
        // only taken in drop
        self.inner.as_ref().unwrap()
    }
}

impl<H: Handle> DerefMut for Closing<H> {
    fn deref_mut(&mut self) -> &mut H {
        self.inner.as_mut().unwrap()
    }
}

impl<H: Handle> Drop for Closing<H> {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.take() {
            match handle.close() {
                Ok(()) => debug!(file = %self.name, "file closed"),
                Err(err) => error!(file = %self.name, error = %err, "error closing file"),
            }
        }
    }
}
