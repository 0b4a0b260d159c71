//! npow: a parallel hashcash-style nonce miner.
//!
//! Given an invariant prefix and suffix, the search finds an integer whose
//! decimal ASCII form, hashed between them, yields a digest with the
//! required number of leading zero bits (0..=64). This is the costly half
//! of a Hashcash anti-abuse scheme: issuing a message means paying for a
//! nonce, checking one is a single hash.
//!
//! The search amortizes prefix hashing by cloning a cached hash state per
//! candidate, keeps the nonce as an in-place decimal counter instead of
//! re-serializing it, and races N worker threads over disjoint arithmetic
//! progressions; the first to commit stops the rest.
//!
//! ```no_run
//! let nonce = npow::search(b"event:abc", b"", 16).unwrap();
//! assert!(npow::meets_difficulty::<sha2::Sha256>(b"event:abc", nonce, b"", 16));
//! ```

mod context;
mod counter;
mod error;
mod mask;
mod miner;
mod search;
mod stream;
mod types;
mod verify;

pub use context::PrefixState;
pub use counter::NonceCounter;
pub use error::Error;
pub use mask::{DifficultyMask, MAX_DIFFICULTY};
pub use miner::{Miner, MinerBuilder, DEFAULT_BATCH_SIZE};
pub use stream::ResultCell;
pub use types::Solution;
pub use verify::{meets_difficulty, verify_solution};

/// Search with the default configuration: SHA-256, one worker per
/// available core, 1000-iteration interrupt batches. Blocks until found.
pub fn search(prefix: &[u8], suffix: &[u8], difficulty: u32) -> Result<u64, Error> {
    Miner::default().search(prefix, suffix, difficulty)
}

/// Default-configuration search on a detached thread; the winning nonce
/// arrives on the returned channel.
pub fn search_deferred(
    prefix: Vec<u8>,
    suffix: Vec<u8>,
    difficulty: u32,
) -> flume::Receiver<Result<u64, Error>> {
    Miner::default().search_deferred(prefix, suffix, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    #[test]
    fn full_byte_difficulty_zeroes_the_first_digest_byte() {
        let nonce = search(b"event:abc", b"", 8).unwrap();
        let mut hasher = Sha256::new();
        hasher.update(b"event:abc");
        hasher.update(nonce.to_string().as_bytes());
        let digest = hasher.finalize();
        assert_eq!(digest[0], 0x00);
    }

    #[test]
    fn top_level_search_verifies() {
        let nonce = search(b"lib:", b":tail", 10).unwrap();
        assert!(meets_difficulty::<Sha256>(b"lib:", nonce, b":tail", 10));
    }
}
