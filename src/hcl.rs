use hcl_edit::expr::Expression;
use hcl_edit::parser::parse_body;
use hcl_edit::structure::{Block, Body, Structure};
use hcl_edit::Decorate;

use crate::document::{ConfigBlock, Document};
use crate::error::EditError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

/// An HCL file body plus the line ending it was written with.
///
/// The parser emits `\n` after each structure whatever the source used, so
/// CRLF files are parsed with `\n` and expanded back on serialize.
#[derive(Debug, Clone, Default)]
pub struct HclDocument {
    body: Body,
    line_ending: LineEnding,
}

impl HclDocument {
    pub fn body(&self) -> &Body {
        &self.body
    }

    fn render(&self) -> String {
        let text = self.body.to_string();
        match self.line_ending {
            LineEnding::Lf => text,
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        }
    }
}

impl Document for HclDocument {
    type Block = Block;

    fn parse(content: &[u8], origin: &str) -> Result<Self, EditError> {
        let parse_error = |diagnostics: String| EditError::Parse {
            origin: origin.to_string(),
            diagnostics,
        };
        let text = std::str::from_utf8(content)
            .map_err(|err| parse_error(format!("invalid UTF-8: {}", err)))?;

        let (line_ending, normalized) = if text.contains("\r\n") {
            (LineEnding::CrLf, text.replace("\r\n", "\n"))
        } else {
            (LineEnding::Lf, text.to_string())
        };
        let body = parse_body(&normalized).map_err(|err| parse_error(err.to_string()))?;

        let document = HclDocument { body, line_ending };
        // mixed line endings or anything else the renderer would rewrite
        if document.render() != text {
            return Err(parse_error(
                "file layout cannot be reproduced byte for byte (mixed line endings?)".to_string(),
            ));
        }
        return Ok(document);
    }

    fn serialize(&self) -> Vec<u8> {
        self.render().into_bytes()
    }

    fn blocks_mut(&mut self) -> Box<dyn Iterator<Item = &mut Block> + '_> {
        Box::new(self.body.blocks_mut())
    }
}

impl ConfigBlock for Block {
    fn block_type(&self) -> &str {
        self.ident.value().as_str()
    }

    fn labels(&self) -> Vec<&str> {
        self.labels.iter().map(|label| label.as_str()).collect()
    }

    fn set_string_attribute(&mut self, name: &str, value: &str) -> bool {
        let index = self.body.iter().position(|structure| {
            structure
                .as_attribute()
                .map_or(false, |attr| attr.key.value().as_str() == name)
        });
        let index = match index {
            Some(index) => index,
            None => return false,
        };

        match self.body.remove(index) {
            Structure::Attribute(mut attr) => {
                // keep the spacing and trailing comment around the old literal
                let decor = attr.value.decor().clone();
                attr.value = Expression::from(value);
                *attr.value.decor_mut() = decor;
                self.body.insert(index, attr);
                true
            }
            block => {
                self.body.insert(index, block);
                false
            }
        }
    }
}
