use crate::models::kyc::VerificationStatus;
use std::sync::Mutex;

/// Single source of truth for the cached verification status.
///
/// Both the poller and the submit path write here. Writes carry the sequence
/// number the writer observed when it started; a write is discarded if the
/// cell has moved on since, so a slow poll response cannot overwrite a newer
/// optimistic update. Unconditional writes always advance the sequence.
pub struct StatusCell {
    inner: Mutex<Entry>,
}

struct Entry {
    seq: u64,
    status: VerificationStatus,
}

impl StatusCell {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Entry {
                seq: 0,
                status: VerificationStatus::NotSubmitted,
            }),
        }
    }

    /// Current sequence number and status, read together.
    pub fn snapshot(&self) -> (u64, VerificationStatus) {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        (guard.seq, guard.status.clone())
    }

    pub fn status(&self) -> VerificationStatus {
        self.snapshot().1
    }

    /// Unconditional write. Returns the new sequence number.
    pub fn store(&self, status: VerificationStatus) -> u64 {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.seq += 1;
        guard.status = status;
        guard.seq
    }

    /// Write that only applies if no other writer got there first.
    ///
    /// `observed_seq` is the sequence the caller saw before starting its
    /// (possibly slow) work. Returns whether the write was applied.
    pub fn store_if_unchanged(&self, observed_seq: u64, status: VerificationStatus) -> bool {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if guard.seq != observed_seq {
            return false;
        }
        guard.seq += 1;
        guard.status = status;
        true
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}
