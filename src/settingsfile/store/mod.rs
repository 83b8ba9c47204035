//! # Storage Layer
//!
//! This module defines the settings store abstraction. The [`SettingsFile`]
//! trait is the caller contract: one logical settings file, opened either
//! for reading or for writing, never both.
//!
//! ## State Machine
//!
//! ```text
//!             open_for_read              open_for_write
//!  OpenForRead <------------- Closed -------------> OpenForWrite
//!              ------------->        <-------------
//!               close / force_close    close / force_close
//! ```
//!
//! - Opening is only valid from `Closed`. Opening an already open store is
//!   `InvalidState`; the existing session is left untouched.
//! - Reads are only valid in `OpenForRead`, writes only in `OpenForWrite`.
//! - `close` from `Closed` is `InvalidState`.
//! - `force_close` is valid everywhere, is idempotent and never fails.
//! - Dropping a store performs a `force_close`.
//!
//! ## Durability
//!
//! Written bytes are buffered. They reach the backing medium, atomically and
//! durably, no later than the first of:
//!
//! 1. `close()` when the flush policy is `OnClose`,
//! 2. the next `open_for_read`,
//! 3. `force_close()`,
//! 4. drop.
//!
//! Because writes only buffer, `write` can only fail with `InvalidState`.
//! Medium failures surface where the commit happens: at `close` (`OnClose`),
//! at the next `open_for_read` (`Deferred`), or are logged and discarded by
//! `force_close`. `open_for_write` never touches the medium: a new session
//! supersedes bytes still pending from an earlier one.
//!
//! ## Implementations
//!
//! - [`buffered::BufferedSettingsFile`]: the state machine, generic over a
//!   [`medium::BackingMedium`].
//! - [`fs_medium::FsMedium`]: production medium, one file replaced atomically.
//! - [`mem_medium::MemMedium`]: in-memory medium with fault injection for tests.

use crate::error::Result;
use crate::model::{LineRead, OpenState};

pub mod buffered;
pub mod fs_medium;
pub mod mem_medium;
pub mod medium;
pub mod reader;
pub mod write_buffer;

pub use buffered::BufferedSettingsFile;
pub use fs_medium::FsMedium;
pub use mem_medium::MemMedium;
pub use medium::BackingMedium;

/// A settings store backed by one file on disk.
pub type FileSettings = BufferedSettingsFile<FsMedium>;

/// A settings store backed by memory, for tests.
pub type MemorySettings = BufferedSettingsFile<MemMedium>;

/// Abstract interface for one settings file.
///
/// All operations are synchronous and never block waiting for a retry.
/// Implementations assume a single owner: no internal locking.
pub trait SettingsFile {
    /// Open for reading, cursor at the start of the content.
    fn open_for_read(&mut self) -> Result<()>;

    /// Read one byte. `Ok(None)` is end of file, reported by the call that
    /// discovers it.
    fn read(&mut self) -> Result<Option<u8>>;

    /// Read one line, including its `'\n'`, into `buffer`.
    ///
    /// `buffer` is cleared on entry. On [`LineRead::EndOfFile`] it holds the
    /// final unterminated bytes, which may be empty.
    fn read_line(&mut self, buffer: &mut Vec<u8>) -> Result<LineRead>;

    /// Open for writing. The previous content stays intact until the new
    /// content is committed as a whole.
    fn open_for_write(&mut self) -> Result<()>;

    /// Append one byte.
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Append a buffer.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Cooperative close. May defer the physical flush.
    fn close(&mut self) -> Result<()>;

    fn open_state(&self) -> OpenState;

    /// Flush anything pending and close, whatever the state. Never fails;
    /// errors are logged and discarded.
    fn force_close(&mut self);
}
