use std::fmt::{Display, Error as FmtError, Formatter};
use std::io;

use thiserror::Error;

/// Failure kinds of one run, each keeping the cause it came from.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("cannot open {path}: {source}")]
    FileAccess { path: String, source: io::Error },

    #[error("failed to get file info: {0}")]
    FileInfo(#[source] io::Error),

    #[error("failed to read file content: expected {expected} bytes: {source}")]
    Read { expected: u64, source: io::Error },

    #[error("failed to parse file content: {origin}: {diagnostics}")]
    Parse { origin: String, diagnostics: String },

    #[error("local variable '{0}' not found")]
    AttributeNotFound(String),

    #[error("failed to truncate file: {0}")]
    Truncate(#[source] io::Error),

    #[error("failed to seek the start of file: {0}")]
    Seek(#[source] io::Error),

    #[error("failed to write to file: {0}")]
    Write(#[source] io::Error),

    #[error("failed to replace {path}: {source}")]
    Persist { path: String, source: io::Error },
}

impl EditError {
    /// `FileInfo` is an access failure too, it only differs in wording.
    pub fn is_file_access(&self) -> bool {
        matches!(self, EditError::FileAccess { .. } | EditError::FileInfo(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Open,
    Parse,
    Update,
    Save,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        let description = match self {
            Stage::Open => "failed to open file",
            Stage::Parse => "failed to parse HCL file",
            Stage::Update => "failed to update local",
            Stage::Save => "failed to save to file",
        };
        write!(f, "{}", description)
    }
}

/// An [`EditError`] tagged with the stage of the run it stopped.
#[derive(Debug, Error)]
#[error("{stage}: {cause}")]
pub struct WrapError {
    pub stage: Stage,
    #[source]
    pub cause: EditError,
}

impl WrapError {
    pub fn new(stage: Stage, cause: EditError) -> Self {
        WrapError { stage, cause }
    }

    pub fn kind(&self) -> &EditError {
        &self.cause
    }
}

pub trait ToWrapErrorResult<T> {
    fn wrap(self, stage: Stage) -> Result<T, WrapError>;
}

impl<T> ToWrapErrorResult<T> for Result<T, EditError> {
    fn wrap(self, stage: Stage) -> Result<T, WrapError> {
        self.map_err(|err| WrapError::new(stage, err))
    }
}
