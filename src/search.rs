//! Single-worker candidate loop.

use sha2::digest::Digest;

use crate::context::PrefixState;
use crate::counter::NonceCounter;
use crate::error::Error;
use crate::mask::DifficultyMask;
use crate::stream::ResultCell;

/// Terminal state of one worker's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Found(u64),
    Interrupted,
}

/// Run one worker over the arithmetic progression `start, start + step, ...`.
///
/// Each iteration clones the cached prefix state, absorbs the counter's
/// active digits and the suffix, and tests the digest against the mask.
/// The stop signal is read once per `batch_size` iterations, never on the
/// hot path, so a worker does up to one extra batch of work after another
/// worker has committed.
pub(crate) fn run_worker<D: Digest + Clone>(
    prefix: &PrefixState<D>,
    suffix: &[u8],
    mask: DifficultyMask,
    start: u64,
    step: u64,
    batch_size: u64,
    cell: &ResultCell,
) -> Result<Outcome, Error> {
    let mut counter = NonceCounter::new(start);
    let mut iters: u64 = 0;
    loop {
        let digest = prefix.digest(counter.digits(), suffix);
        if mask.matches(&digest) {
            return Ok(Outcome::Found(counter.value()));
        }
        counter.increment(step)?;
        iters += 1;
        if iters % batch_size == 0 && cell.is_interrupted() {
            return Ok(Outcome::Interrupted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    fn state(prefix: &[u8]) -> PrefixState<Sha256> {
        PrefixState::new(prefix)
    }

    #[test]
    fn zero_difficulty_finds_the_start_nonce() {
        let cell = ResultCell::new();
        let outcome = run_worker(
            &state(b"anything"),
            b"",
            DifficultyMask::new(0),
            5,
            3,
            1000,
            &cell,
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Found(5));
    }

    #[test]
    fn found_nonce_satisfies_the_mask() {
        let mask = DifficultyMask::new(6);
        let prefix = state(b"search-loop-test");
        let cell = ResultCell::new();
        let outcome = run_worker(&prefix, b"tail", mask, 0, 1, 1000, &cell).unwrap();
        let Outcome::Found(nonce) = outcome else {
            panic!("worker was not interrupted, must find");
        };
        let digest = prefix.digest(nonce.to_string().as_bytes(), b"tail");
        assert!(mask.matches(&digest));
    }

    #[test]
    fn interrupt_is_observed_within_one_batch() {
        let cell = ResultCell::new();
        assert!(cell.commit(0));
        // Difficulty 64 will not be met in a handful of iterations, so the
        // only way out is the batch-boundary flag check.
        let outcome = run_worker(
            &state(b"interrupted"),
            b"",
            DifficultyMask::new(64),
            1,
            2,
            16,
            &cell,
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Interrupted);
    }

    #[test]
    fn counter_exhaustion_propagates() {
        let cell = ResultCell::new();
        let err = run_worker(
            &state(b"overflow"),
            b"",
            DifficultyMask::new(64),
            u64::MAX - 3,
            u64::MAX / 2,
            1000,
            &cell,
        )
        .unwrap_err();
        assert_eq!(err, Error::NonceOverflow);
    }
}
