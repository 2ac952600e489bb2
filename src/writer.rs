use std::fs;
use std::io::{self, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::EditError;
use crate::handle::Handle;

/// How the serialized document replaces the file on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveStrategy {
    /// Truncate, seek and write through the open handle. A write failure
    /// after the truncate leaves the file empty.
    #[default]
    InPlace,
    /// Write a sibling temp file and rename it over the target.
    Atomic,
}

/// Replaces the handle's content with the serialized document.
pub fn save<D: Document, H: Handle>(handle: &mut H, document: &D) -> Result<(), EditError> {
    handle.truncate(0).map_err(EditError::Truncate)?;
    handle.seek(SeekFrom::Start(0)).map_err(EditError::Seek)?;

    let content = document.serialize();
    if let Err(err) = handle.write_all(&content) {
        warn!(error = %err, "file was truncated but not rewritten, its content is lost");
        return Err(EditError::Write(err));
    }
    debug!(bytes = content.len(), "document written");
    Ok(())
}

/// Serializes into a temp file next to `path` and renames it into place,
/// carrying over the original permissions.
pub fn save_atomic<D: Document>(path: &Path, document: &D) -> Result<(), EditError> {
    let persist_error = |source: io::Error| EditError::Persist {
        path: path.display().to_string(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(EditError::Write)?;
    temp.write_all(&document.serialize()).map_err(EditError::Write)?;
    temp.as_file().sync_all().map_err(EditError::Write)?;

    let permissions = fs::metadata(path).map_err(persist_error)?.permissions();
    fs::set_permissions(temp.path(), permissions).map_err(persist_error)?;
    temp.persist(path).map_err(|err| persist_error(err.error))?;
    debug!(path = %path.display(), "document persisted");
    Ok(())
}
