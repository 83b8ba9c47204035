use super::medium::BackingMedium;
use crate::config::FlushPolicy;
use std::io;

/// Bytes written but not yet committed, plus the policy deciding when they
/// are.
///
/// The buffer holds at most two generations: the `active` session being
/// written, and one `pending` session that was closed but not committed.
/// Every commit replaces the whole content, so a new session supersedes a
/// pending one instead of committing it first.
#[derive(Debug, Default)]
pub struct WriteBuffer {
    policy: FlushPolicy,
    active: Option<Vec<u8>>,
    pending: Option<Vec<u8>>,
}

impl WriteBuffer {
    pub fn new(policy: FlushPolicy) -> Self {
        Self {
            policy,
            active: None,
            pending: None,
        }
    }

    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    /// Start an empty write session, dropping any pending generation it
    /// supersedes. Returns the superseded byte count.
    pub fn begin(&mut self) -> Option<usize> {
        let superseded = self.pending.take().map(|buf| buf.len());
        self.active = Some(Vec::new());
        superseded
    }

    /// Returns false when no session is active.
    pub fn push(&mut self, data: &[u8]) -> bool {
        match self.active.as_mut() {
            Some(buf) => {
                buf.extend_from_slice(data);
                true
            }
            None => false,
        }
    }

    /// End the active session, making its bytes pending. Returns true when
    /// the policy wants them committed right away.
    pub fn end(&mut self) -> bool {
        if let Some(buf) = self.active.take() {
            self.pending = Some(buf);
        }
        self.pending.is_some() && self.policy == FlushPolicy::OnClose
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Bytes in the active session so far.
    pub fn active_len(&self) -> usize {
        self.active.as_ref().map_or(0, Vec::len)
    }

    /// Commit pending bytes, if any. On failure they stay pending so the
    /// next flush trigger retries them. Returns the committed byte count.
    pub fn flush<M: BackingMedium>(&mut self, medium: &mut M) -> io::Result<Option<usize>> {
        let Some(buf) = self.pending.as_ref() else {
            return Ok(None);
        };
        medium.commit(buf)?;
        let len = buf.len();
        self.pending = None;
        Ok(Some(len))
    }
}
