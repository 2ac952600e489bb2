use tracing::debug;

use crate::document::Document;
use crate::error::EditError;
use crate::handle::Handle;

/// Reads the whole handle and parses it. `origin` is only used in diagnostics.
pub fn load<D: Document, H: Handle>(handle: &mut H, origin: &str) -> Result<D, EditError> {
    let size = handle.size().map_err(EditError::FileInfo)?;

    let mut content = vec![0u8; size as usize];
    handle
        .read_exact(&mut content)
        .map_err(|source| EditError::Read { expected: size, source })?;
    debug!(file = origin, bytes = size, "file content read");

    let document = D::parse(&content, origin)?;
    return Ok(document);
}
