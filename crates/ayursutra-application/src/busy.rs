//! In-flight flag shared by the submit paths.

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds the busy flag for the lifetime of one request.
///
/// Acquired with a compare-exchange, released on drop, so every exit path
/// (success, failure, panic, dropped future) returns the form to idle.
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Returns `None` when a request is already in flight.
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
