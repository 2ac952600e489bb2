use tracing::debug;

use crate::document::{ConfigBlock, Document};
use crate::error::EditError;

/// Block type whose attributes are the file's locals.
pub const LOCALS_BLOCK: &str = "locals";

/// Sets `name` to the string `value` in the first `block_type` block that
/// defines it. Later blocks of the same type are never touched, even when
/// they define the same attribute.
pub fn update_attribute<D: Document>(
    document: &mut D,
    block_type: &str,
    name: &str,
    value: &str,
) -> Result<(), EditError> {
    for block in document.blocks_mut() {
        if block.block_type() != block_type {
            continue;
        }
        debug!(block_type, labels = ?block.labels(), attribute = name, "inspecting block");
        if block.set_string_attribute(name, value) {
            debug!(attribute = name, value, "attribute updated");
            return Ok(());
        }
    }
    Err(EditError::AttributeNotFound(name.to_string()))
}
