//! Single-entry flags released on drop.

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds an [`AtomicBool`] raised until dropped, including on early return
/// or unwinding.
#[derive(Debug)]
pub(crate) struct FlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlagGuard<'a> {
    /// Raise `flag`, or return `None` if it is already raised.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
