//! Verifier counterparts to the search: recompute and re-check a claimed nonce.

use sha2::digest::Digest;

use crate::context::PrefixState;
use crate::mask::{DifficultyMask, MAX_DIFFICULTY};
use crate::types::Solution;

/// Whether `nonce`, rendered in decimal between `prefix` and `suffix`,
/// hashes to a digest meeting `difficulty` leading zero bits.
pub fn meets_difficulty<D: Digest + Clone>(
    prefix: &[u8],
    nonce: u64,
    suffix: &[u8],
    difficulty: u32,
) -> bool {
    if difficulty > MAX_DIFFICULTY || <D as Digest>::output_size() < 8 {
        return false;
    }
    let digest = PrefixState::<D>::new(prefix).digest(nonce.to_string().as_bytes(), suffix);
    DifficultyMask::new(difficulty).matches(&digest)
}

/// Strictly verify a [`Solution`]: the recorded digest must match the
/// recomputed one byte for byte, and the difficulty mask must hold.
pub fn verify_solution<D: Digest + Clone>(
    prefix: &[u8],
    suffix: &[u8],
    solution: &Solution,
) -> bool {
    if solution.difficulty > MAX_DIFFICULTY || <D as Digest>::output_size() < 8 {
        return false;
    }
    let digest =
        PrefixState::<D>::new(prefix).digest(solution.nonce.to_string().as_bytes(), suffix);
    digest.as_slice() == solution.digest.as_slice()
        && DifficultyMask::new(solution.difficulty).matches(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miner::MinerBuilder;
    use sha2::Sha256;

    #[test]
    fn accepts_every_searched_nonce() {
        let miner = MinerBuilder::default().workers(2).build_validated().unwrap();
        for difficulty in [0u32, 2, 8] {
            let nonce = miner.search(b"verify:", b"", difficulty).unwrap();
            assert!(meets_difficulty::<Sha256>(b"verify:", nonce, b"", difficulty));
        }
    }

    #[test]
    fn rejects_an_arbitrary_nonce_at_full_difficulty() {
        assert!(!meets_difficulty::<Sha256>(b"verify:", 12345, b"", 64));
    }

    #[test]
    fn rejects_out_of_range_difficulty() {
        assert!(!meets_difficulty::<Sha256>(b"verify:", 0, b"", 65));
    }

    #[test]
    fn verify_solution_rejects_tampering() {
        let miner = MinerBuilder::default().workers(1).build_validated().unwrap();
        let solution = miner.search_solution(b"tamper:", b"s", 8).unwrap();
        assert!(verify_solution::<Sha256>(b"tamper:", b"s", &solution));

        let mut wrong_digest = solution.clone();
        wrong_digest.digest[0] ^= 1;
        assert!(!verify_solution::<Sha256>(b"tamper:", b"s", &wrong_digest));

        // Different prefix, same record.
        assert!(!verify_solution::<Sha256>(b"tamper!", b"s", &solution));
    }
}
