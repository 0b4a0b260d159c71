//! First-committer-wins result slot and stop coordination across workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Guarded single-commit slot shared by all workers of one invocation.
///
/// The interrupt flag only ever transitions false to true and is never
/// reset. Workers read it lock-free at batch boundaries, so the value may
/// be stale by up to one batch; it is written only together with the
/// winning nonce while holding the lock.
#[derive(Debug, Default)]
pub struct ResultCell {
    interrupted: AtomicBool,
    slot: Mutex<Option<u64>>,
}

impl ResultCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock-free read of the stop signal.
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }

    /// Try to record `nonce` as the winning result.
    ///
    /// The flag is re-checked under the lock: two workers finishing
    /// near-simultaneously both reach here, but exactly one commit ever
    /// succeeds. Returns whether this caller won the race. The committed
    /// nonce is whichever worker wins, not necessarily the smallest valid
    /// one.
    pub fn commit(&self, nonce: u64) -> bool {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.interrupted.load(Ordering::SeqCst) {
            return false;
        }
        self.interrupted.store(true, Ordering::SeqCst);
        *slot = Some(nonce);
        true
    }

    /// The committed nonce, if any worker has won yet.
    pub fn winner(&self) -> Option<u64> {
        match self.slot.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
