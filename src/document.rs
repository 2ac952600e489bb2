//! The seam between the edit pipeline and the configuration language
//! library. Loader, updater and writer only see these traits.

use crate::error::EditError;

pub trait Document: Sized {
    type Block: ConfigBlock;

    /// Parses raw file bytes. `origin` names the source in diagnostics.
    fn parse(content: &[u8], origin: &str) -> Result<Self, EditError>;

    /// Renders the tree, preserving the formatting of untouched parts.
    fn serialize(&self) -> Vec<u8>;

    /// Top-level blocks in document order.
    fn blocks_mut(&mut self) -> Box<dyn Iterator<Item = &mut Self::Block> + '_>;
}

pub trait ConfigBlock {
    fn block_type(&self) -> &str;

    fn labels(&self) -> Vec<&str>;

    /// Replaces the value of an existing attribute with a string literal.
    /// Returns `false` when the body has no attribute called `name`.
    fn set_string_attribute(&mut self, name: &str, value: &str) -> bool;
}
