use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Orders responses of one operation by when their requests were issued.
///
/// Only the response to the newest-issued request may touch the snapshot.
#[derive(Debug, Default)]
pub(super) struct RequestSequence {
    issued: AtomicU64,
}

impl RequestSequence {
    pub(super) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// False once a later request of the same operation has been issued.
    pub(super) fn is_current(&self, token: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == token
    }
}

/// Counts running operations; `is_loading` is true while any is running.
#[derive(Debug, Default)]
pub(super) struct InFlight(AtomicUsize);

impl InFlight {
    pub(super) fn enter(&self) -> LoadingGuard<'_> {
        self.0.fetch_add(1, Ordering::SeqCst);
        LoadingGuard(&self.0)
    }

    pub(super) fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }
}

pub(super) struct LoadingGuard<'a>(&'a AtomicUsize);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
