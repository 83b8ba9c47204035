use super::medium::BackingMedium;
use std::cell::RefCell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;

#[derive(Default)]
struct MemCell {
    contents: Vec<u8>,
    commits: usize,
    simulate_write_error: bool,
    simulate_read_error: bool,
}

/// In-memory storage medium for testing.
///
/// Uses `Rc<RefCell<_>>` since a store has a single owner. Clones share the
/// same cell, so a test can keep a handle and inspect what the store
/// committed, even after the store itself is dropped.
#[derive(Clone, Default)]
pub struct MemMedium {
    cell: Rc<RefCell<MemCell>>,
    name: String,
}

impl MemMedium {
    pub fn new() -> Self {
        Self::named("settings")
    }

    pub fn named(name: &str) -> Self {
        Self {
            cell: Rc::default(),
            name: name.to_string(),
        }
    }

    /// A medium that already holds `contents`, as if committed earlier.
    pub fn with_contents(contents: &[u8]) -> Self {
        let medium = Self::new();
        medium.cell.borrow_mut().contents = contents.to_vec();
        medium
    }

    /// Committed content.
    pub fn contents(&self) -> Vec<u8> {
        self.cell.borrow().contents.clone()
    }

    /// Number of successful commits so far.
    pub fn commit_count(&self) -> usize {
        self.cell.borrow().commits
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.cell.borrow_mut().simulate_write_error = simulate;
    }

    /// Make readers opened from now on fail on their first read.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.cell.borrow_mut().simulate_read_error = simulate;
    }
}

/// Snapshot reader over the committed content.
pub struct MemReader {
    cursor: Cursor<Vec<u8>>,
    fail: bool,
}

impl Read for MemReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail {
            return Err(io::Error::other("Simulated read error"));
        }
        self.cursor.read(buf)
    }
}

impl BackingMedium for MemMedium {
    type Reader = MemReader;

    fn open_reader(&mut self) -> io::Result<MemReader> {
        let cell = self.cell.borrow();
        Ok(MemReader {
            cursor: Cursor::new(cell.contents.clone()),
            fail: cell.simulate_read_error,
        })
    }

    fn commit(&mut self, contents: &[u8]) -> io::Result<()> {
        let mut cell = self.cell.borrow_mut();
        if cell.simulate_write_error {
            return Err(io::Error::other("Simulated write error"));
        }
        cell.contents = contents.to_vec();
        cell.commits += 1;
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory://{}", self.name)
    }
}
