use crate::model::OpenState;
use thiserror::Error;

/// Failure of a settings store operation.
///
/// `EndOfFile` is not an error and never appears here: reads report it as a
/// value (`Ok(None)` / `Ok(LineRead::EndOfFile)`).
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The operation is not valid in the store's current open state.
    #[error("cannot {op} while {state}")]
    InvalidState { op: &'static str, state: OpenState },

    /// The backing medium failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SettingsError {
    pub(crate) fn invalid_state(op: &'static str, state: OpenState) -> Self {
        SettingsError::InvalidState { op, state }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, SettingsError::InvalidState { .. })
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors loading or saving [`StoreConfig`](crate::config::StoreConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
