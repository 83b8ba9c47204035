use std::io::{self, Read};

/// Abstract interface for the storage behind a settings file.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while [`BufferedSettingsFile`](super::BufferedSettingsFile) handles the
/// "when" (state machine, buffering, flush triggers).
///
/// A medium is bound to one location when constructed. Errors are plain
/// `io::Error`s; the store maps them to `IOError`.
pub trait BackingMedium {
    type Reader: Read;

    /// A fresh sequential reader positioned at the start of the content.
    /// A location that does not exist yet reads as empty.
    fn open_reader(&mut self) -> io::Result<Self::Reader>;

    /// Replace the whole content with `contents` and make it durable.
    /// MUST be atomic: after a crash the old or the new content is visible,
    /// never a mix.
    fn commit(&mut self, contents: &[u8]) -> io::Result<()>;

    /// Human readable binding, for logs.
    fn location(&self) -> String;
}
