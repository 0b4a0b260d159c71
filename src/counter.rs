//! Nonce kept as an integer and as an in-place ASCII decimal buffer.

use crate::error::Error;

// u64::MAX has 20 decimal digits.
const CAPACITY: usize = 20;

/// A nonce maintained in two synchronized forms: the `u64` value and a
/// fixed-capacity, left-zero-padded ASCII buffer with a tracked count of
/// active digits.
///
/// `increment` touches only the trailing run of digits affected by the
/// carry, so the hot loop never re-serializes the whole number and never
/// allocates.
#[derive(Debug, Clone)]
pub struct NonceCounter {
    value: u64,
    buf: [u8; CAPACITY],
    len: usize,
}

impl NonceCounter {
    pub fn new(start: u64) -> Self {
        let mut buf = [b'0'; CAPACITY];
        let mut len = 0;
        let mut rem = start;
        loop {
            buf[CAPACITY - 1 - len] = b'0' + (rem % 10) as u8;
            rem /= 10;
            len += 1;
            if rem == 0 {
                break;
            }
        }
        NonceCounter { value: start, buf, len }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// The active decimal digits, most significant first. This slice, not
    /// the whole buffer, is what gets hashed.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.buf[CAPACITY - self.len..]
    }

    /// Add `step`, propagating the carry leftward digit by digit and
    /// widening the active count when a new leading digit appears.
    ///
    /// Exhausting the `u64` range is reported as [`Error::NonceOverflow`]
    /// rather than wrapping.
    pub fn increment(&mut self, step: u64) -> Result<(), Error> {
        self.value = self.value.checked_add(step).ok_or(Error::NonceOverflow)?;
        // `carry` holds the value still to be added at the current decimal
        // position; widened to u128 so digit + carry cannot overflow.
        let mut carry = step as u128;
        let mut pos = CAPACITY;
        while carry > 0 {
            pos -= 1;
            let total = (self.buf[pos] - b'0') as u128 + carry;
            self.buf[pos] = b'0' + (total % 10) as u8;
            carry = total / 10;
        }
        let touched = CAPACITY - pos;
        if touched > self.len {
            self.len = touched;
        }
        Ok(())
    }
}
