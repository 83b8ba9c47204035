//! # Settingsfile Architecture
//!
//! Settingsfile is a **storage contract for one settings file**. It does not
//! know what the bytes mean. It only promises how they get in and out of
//! durable storage, and when they are durable.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Caller (settings parser, CLI, app)                         │
//! │  - Decides what the bytes mean                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  SettingsFile trait
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/buffered.rs)                                  │
//! │  - Closed / OpenForRead / OpenForWrite state machine        │
//! │  - Write buffer + flush policy, line assembly               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  BackingMedium trait
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Medium (store/fs_medium.rs, store/mem_medium.rs)           │
//! │  - Sequential read, atomic whole-content commit             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Result Taxonomy
//!
//! Every operation ends in exactly one of four outcomes:
//!
//! - **Success**: `Ok(..)`
//! - **EndOfFile**: `Ok(None)` from `read`, `Ok(LineRead::EndOfFile)` from
//!   `read_line`. Expected, not an error.
//! - **InvalidState**: `Err(SettingsError::InvalidState)`, the operation was
//!   called in the wrong open state.
//! - **IOError**: `Err(SettingsError::Io)`, the medium failed.
//!
//! [`model::ResultCode`] flattens these into one tag for reporting.
//! `force_close` is the only operation that cannot fail: it logs and discards.
//!
//! ## Example
//!
//! ```
//! use settingsfile::model::LineRead;
//! use settingsfile::store::{MemMedium, MemorySettings, SettingsFile};
//!
//! let mut store = MemorySettings::with_medium(MemMedium::new());
//! store.open_for_write()?;
//! store.write(b"volume=7\n")?;
//! store.close()?;
//!
//! store.open_for_read()?;
//! let mut line = Vec::new();
//! assert_eq!(store.read_line(&mut line)?, LineRead::Complete);
//! assert_eq!(line, b"volume=7\n");
//! assert_eq!(store.read_line(&mut line)?, LineRead::EndOfFile);
//! assert!(line.is_empty());
//! # Ok::<(), settingsfile::error::SettingsError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`store`]: The `SettingsFile` trait, the state machine and the media
//! - [`model`]: `OpenState`, `LineRead`, `ResultCode`
//! - [`config`]: Flush policy and fsync configuration
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
