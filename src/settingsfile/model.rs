use crate::error::{Result, SettingsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which session, if any, a settings store currently has open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenState {
    #[default]
    Closed,
    OpenForRead,
    OpenForWrite,
}

impl OpenState {
    pub fn is_open(self) -> bool {
        self != OpenState::Closed
    }
}

impl fmt::Display for OpenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpenState::Closed => "closed",
            OpenState::OpenForRead => "open for read",
            OpenState::OpenForWrite => "open for write",
        };
        f.write_str(s)
    }
}

/// Outcome of a single `read_line` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRead {
    /// A full line, terminated by `'\n'`, is in the buffer.
    Complete,
    /// The medium ended before a `'\n'`. The buffer holds the trailing
    /// bytes, possibly none, and there is no more data.
    EndOfFile,
}

/// The flat four-way outcome tag of a store operation.
///
/// The store API itself uses `Result`; this is for callers that need to
/// report or branch on a single code (the CLI maps it to exit codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    EndOfFile,
    InvalidState,
    IoError,
}

impl ResultCode {
    /// Collapse an operation result into its tag. Only the error side is
    /// inspected: use [`ResultCode::of_read`] or [`ResultCode::of_line`]
    /// to see `EndOfFile`.
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => ResultCode::Success,
            Err(e) => e.into(),
        }
    }

    pub fn of_read(result: &Result<Option<u8>>) -> Self {
        match result {
            Ok(Some(_)) => ResultCode::Success,
            Ok(None) => ResultCode::EndOfFile,
            Err(e) => e.into(),
        }
    }

    pub fn of_line(result: &Result<LineRead>) -> Self {
        match result {
            Ok(LineRead::Complete) => ResultCode::Success,
            Ok(LineRead::EndOfFile) => ResultCode::EndOfFile,
            Err(e) => e.into(),
        }
    }
}

impl From<&SettingsError> for ResultCode {
    fn from(err: &SettingsError) -> Self {
        match err {
            SettingsError::InvalidState { .. } => ResultCode::InvalidState,
            SettingsError::Io(_) => ResultCode::IoError,
        }
    }
}
