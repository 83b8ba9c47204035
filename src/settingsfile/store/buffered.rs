use super::medium::BackingMedium;
use super::reader::SettingsReader;
use super::write_buffer::WriteBuffer;
use super::{FileSettings, FsMedium, SettingsFile};
use crate::config::{FlushPolicy, StoreConfig};
use crate::error::{Result, SettingsError};
use crate::model::{LineRead, OpenState};
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// The settings store state machine over any [`BackingMedium`].
///
/// Writes go to a [`WriteBuffer`] and are committed to the medium as one
/// atomic replacement at the flush points the policy allows. Reads go
/// through a [`SettingsReader`] that lives only while open for read.
pub struct BufferedSettingsFile<M: BackingMedium> {
    medium: M,
    state: OpenState,
    reader: Option<SettingsReader<M::Reader>>,
    buffer: WriteBuffer,
}

impl<M: BackingMedium> BufferedSettingsFile<M> {
    /// A closed store that commits on `close()`.
    pub fn with_medium(medium: M) -> Self {
        Self::with_policy(medium, FlushPolicy::OnClose)
    }

    pub fn with_policy(medium: M, policy: FlushPolicy) -> Self {
        Self {
            medium,
            state: OpenState::Closed,
            reader: None,
            buffer: WriteBuffer::new(policy),
        }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn policy(&self) -> FlushPolicy {
        self.buffer.policy()
    }

    /// True when a closed write session has not reached the medium yet.
    pub fn has_pending_writes(&self) -> bool {
        self.buffer.has_pending()
    }

    fn require(&self, op: &'static str, wanted: OpenState) -> Result<()> {
        if self.state == wanted {
            Ok(())
        } else {
            Err(SettingsError::invalid_state(op, self.state))
        }
    }

    fn reader_mut(&mut self, op: &'static str) -> Result<&mut SettingsReader<M::Reader>> {
        let state = self.state;
        match (state, self.reader.as_mut()) {
            (OpenState::OpenForRead, Some(reader)) => Ok(reader),
            _ => Err(SettingsError::invalid_state(op, state)),
        }
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        if let Some(bytes) = self.buffer.flush(&mut self.medium)? {
            debug!(location = %self.medium.location(), bytes, "committed settings");
        }
        Ok(())
    }
}

impl FileSettings {
    /// A closed store bound to `path`, with default configuration.
    pub fn open_path<P: Into<PathBuf>>(path: P) -> Self {
        Self::from_config(path, &StoreConfig::default())
    }

    pub fn from_config<P: Into<PathBuf>>(path: P, config: &StoreConfig) -> Self {
        let medium = FsMedium::new(path).with_fsync(config.fsync);
        Self::with_policy(medium, config.flush)
    }
}

impl<M: BackingMedium> SettingsFile for BufferedSettingsFile<M> {
    fn open_for_read(&mut self) -> Result<()> {
        self.require("open for read", OpenState::Closed)?;
        self.flush_pending()?;

        let reader = self.medium.open_reader()?;
        self.reader = Some(SettingsReader::new(reader));
        self.state = OpenState::OpenForRead;
        debug!(location = %self.medium.location(), "opened for read");
        Ok(())
    }

    fn read(&mut self) -> Result<Option<u8>> {
        let reader = self.reader_mut("read")?;
        Ok(reader.read_byte()?)
    }

    fn read_line(&mut self, buffer: &mut Vec<u8>) -> Result<LineRead> {
        let reader = self.reader_mut("read line")?;
        Ok(reader.read_line(buffer)?)
    }

    fn open_for_write(&mut self) -> Result<()> {
        self.require("open for write", OpenState::Closed)?;

        // No I/O here: the new session replaces the whole content, so any
        // pending one is simply superseded.
        if let Some(bytes) = self.buffer.begin() {
            debug!(location = %self.medium.location(), bytes, "superseded pending settings");
        }
        self.state = OpenState::OpenForWrite;
        debug!(location = %self.medium.location(), "opened for write");
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write(&[byte])
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.require("write", OpenState::OpenForWrite)?;
        if !self.buffer.push(data) {
            return Err(SettingsError::invalid_state("write", self.state));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        match self.state {
            OpenState::Closed => Err(SettingsError::invalid_state("close", self.state)),
            OpenState::OpenForRead => {
                self.reader = None;
                self.state = OpenState::Closed;
                debug!(location = %self.medium.location(), "closed after read");
                Ok(())
            }
            OpenState::OpenForWrite => {
                let bytes = self.buffer.active_len();
                self.state = OpenState::Closed;
                if self.buffer.end() {
                    self.flush_pending()?;
                } else {
                    debug!(
                        location = %self.medium.location(),
                        bytes,
                        "closed after write, commit deferred"
                    );
                }
                Ok(())
            }
        }
    }

    fn open_state(&self) -> OpenState {
        self.state
    }

    fn force_close(&mut self) {
        let was = self.state;
        self.reader = None;
        self.buffer.end();
        self.state = OpenState::Closed;

        // Last-resort path: the error has nowhere to go but the log. The
        // bytes stay pending, so a later open still retries the commit.
        if let Err(e) = self.flush_pending() {
            warn!(
                location = %self.medium.location(),
                error = %e,
                "force close could not commit settings"
            );
        }
        if was.is_open() {
            debug!(location = %self.medium.location(), "force closed");
        }
    }
}

impl<M: BackingMedium> Drop for BufferedSettingsFile<M> {
    fn drop(&mut self) {
        self.force_close();
    }
}


#[cfg(test)]
mod file_tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn test_missing_file_is_empty_settings() {
        let env = TestEnv::new();
        let mut store = env.store();
        let mut line = Vec::new();

        store.open_for_read().unwrap();
        assert_eq!(store.read_line(&mut line).unwrap(), LineRead::EndOfFile);
        assert!(line.is_empty());
        store.close().unwrap();
        assert!(!env.path.exists());
    }

    #[test]
    fn test_disk_untouched_until_close() {
        let env = TestEnv::new();
        std::fs::write(&env.path, "theme=dark\n").unwrap();
        let mut store = env.store();

        store.open_for_write().unwrap();
        store.write(b"theme=light\n").unwrap();
        assert_eq!(env.on_disk(), b"theme=dark\n");
        store.close().unwrap();
        assert_eq!(env.on_disk(), b"theme=light\n");
    }

    #[test]
    fn test_deferred_file_store_flushes_on_drop() {
        let env = TestEnv::new();
        let config = StoreConfig {
            flush: FlushPolicy::Deferred,
            fsync: false,
        };
        {
            let mut store = env.store_with(&config);
            store.open_for_write().unwrap();
            store.write(b"a=1\n").unwrap();
            store.close().unwrap();
            assert!(env.on_disk().is_empty());
        }
        assert_eq!(env.on_disk(), b"a=1\n");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let env = TestEnv::new();
        let mut store = env.store();
        for round in 0..3u8 {
            store.open_for_write().unwrap();
            store.write_byte(b'0' + round).unwrap();
            store.close().unwrap();
        }

        let names: Vec<_> = std::fs::read_dir(&env.root)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("settings.conf")]);
        assert_eq!(env.on_disk(), b"2");
    }
}
