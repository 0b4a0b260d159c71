//! Difficulty target expressed as a 64-bit comparison mask.

/// Highest supported difficulty: the mask covers the first 8 digest bytes.
pub const MAX_DIFFICULTY: u32 = 64;

/// Mask for the trailing `1..=7` bits of a partial byte.
///
/// Deployed verifiers expect these exact values; for 2, 3, 6 and 7 bits
/// they are *not* the plain top-bits pattern (0xC0, 0xE0, 0xFC, 0xFE).
const PARTIAL_BYTE: [u8; 7] = [0x80, 0xb0, 0xd0, 0xf0, 0xf8, 0xfb, 0xfd];

/// A difficulty target compiled into a single `u64` bitmask.
///
/// The first 8 bytes of a digest, read as a little-endian `u64` and ANDed
/// with the mask, are zero exactly when the digest meets the target.
/// Built once per search invocation, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyMask(u64);

impl DifficultyMask {
    /// Build the mask for `bits` leading zero bits.
    ///
    /// Callers validate the range up front; an out-of-range value here is a
    /// programming error.
    pub fn new(bits: u32) -> Self {
        assert!(bits <= MAX_DIFFICULTY, "difficulty must be <= 64");
        let mut bytes = [0u8; 8];
        let full = (bits / 8) as usize;
        for byte in bytes.iter_mut().take(full) {
            *byte = 0xff;
        }
        let rem = (bits % 8) as usize;
        if rem > 0 {
            bytes[full] = PARTIAL_BYTE[rem - 1];
        }
        DifficultyMask(u64::from_le_bytes(bytes))
    }

    /// Whether `digest` (at least 8 bytes) satisfies the target.
    #[inline]
    pub fn matches(&self, digest: &[u8]) -> bool {
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(head) & self.0 == 0
    }

    /// The raw mask value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
