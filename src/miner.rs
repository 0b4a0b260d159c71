//! Worker partitioning and the public search entry points.

use derive_builder::Builder;
use flume::Receiver;
use sha2::digest::Digest;
use sha2::Sha256;
use std::num::NonZeroUsize;
use std::thread;

use crate::context::PrefixState;
use crate::error::Error;
use crate::mask::{DifficultyMask, MAX_DIFFICULTY};
use crate::search::{run_worker, Outcome};
use crate::stream::ResultCell;
use crate::types::Solution;

/// How many iterations a worker runs between reads of the stop signal.
pub const DEFAULT_BATCH_SIZE: u64 = 1000;

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Configuration for a nonce search.
///
/// Worker `i` of `N` walks the arithmetic progression `i, i + N, i + 2N, ...`;
/// the `N` progressions cover the non-negative integers exactly once, so no
/// candidate is checked twice and none is skipped. Workers are fixed at
/// launch; there is no rebalancing and no timeout, termination is
/// probabilistic with expected iteration count around
/// `2^difficulty / workers`.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(pattern = "owned")]
pub struct Miner {
    /// Parallel OS-thread workers. Defaults to the available hardware
    /// parallelism; set to 1 for deterministic searches.
    #[builder(default = "default_workers()")]
    pub workers: usize,
    /// Stop-signal polling interval in iterations.
    #[builder(default = "DEFAULT_BATCH_SIZE")]
    pub batch_size: u64,
}

impl Default for Miner {
    fn default() -> Self {
        Miner {
            workers: default_workers(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Miner {
    fn validate(&self) -> Result<(), Error> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be >= 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be >= 1".into()));
        }
        Ok(())
    }

    /// Find a nonce whose decimal digits, hashed between `prefix` and
    /// `suffix` with SHA-256, satisfy `difficulty` leading zero bits.
    ///
    /// Blocks until every worker has terminated. The returned nonce is
    /// whichever worker committed first, not necessarily the smallest
    /// valid one.
    pub fn search(&self, prefix: &[u8], suffix: &[u8], difficulty: u32) -> Result<u64, Error> {
        self.search_with::<Sha256>(prefix, suffix, difficulty)
    }

    /// [`Miner::search`] with a caller-chosen incremental digest backend.
    ///
    /// `D` must expose a cheap cloneable state and produce at least 8
    /// digest bytes for the mask comparison.
    pub fn search_with<D>(&self, prefix: &[u8], suffix: &[u8], difficulty: u32) -> Result<u64, Error>
    where
        D: Digest + Clone + Send + Sync,
    {
        self.validate()?;
        if difficulty > MAX_DIFFICULTY {
            return Err(Error::DifficultyOutOfRange(difficulty));
        }
        if <D as Digest>::output_size() < 8 {
            return Err(Error::InvalidConfig(
                "digest output must be at least 8 bytes".into(),
            ));
        }

        let mask = DifficultyMask::new(difficulty);
        let prefix_state = PrefixState::<D>::new(prefix);
        let cell = ResultCell::new();
        let step = self.workers as u64;
        let mut failures: Vec<Error> = Vec::new();

        let prefix_state = &prefix_state;
        let cell = &cell;
        let batch_size = self.batch_size;
        thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers)
                .map(|i| {
                    scope.spawn(move || -> Result<(), Error> {
                        let outcome = run_worker(
                            prefix_state,
                            suffix,
                            mask,
                            i as u64,
                            step,
                            batch_size,
                            cell,
                        )?;
                        if let Outcome::Found(nonce) = outcome {
                            cell.commit(nonce);
                        }
                        Ok(())
                    })
                })
                .collect();
            for handle in handles {
                if let Ok(Err(err)) = handle.join() {
                    failures.push(err);
                }
            }
        });

        match cell.winner() {
            Some(nonce) => Ok(nonce),
            // A worker exits without committing only on interrupt (which
            // implies a commit elsewhere) or on overflow, so an empty slot
            // means every progression was exhausted.
            None => Err(failures.into_iter().next().unwrap_or(Error::NonceOverflow)),
        }
    }

    /// Like [`Miner::search`], but also returns the winning digest as a
    /// transportable [`Solution`] record.
    pub fn search_solution(
        &self,
        prefix: &[u8],
        suffix: &[u8],
        difficulty: u32,
    ) -> Result<Solution, Error> {
        self.search_solution_with::<Sha256>(prefix, suffix, difficulty)
    }

    pub fn search_solution_with<D>(
        &self,
        prefix: &[u8],
        suffix: &[u8],
        difficulty: u32,
    ) -> Result<Solution, Error>
    where
        D: Digest + Clone + Send + Sync,
    {
        let nonce = self.search_with::<D>(prefix, suffix, difficulty)?;
        let digest = PrefixState::<D>::new(prefix)
            .digest(nonce.to_string().as_bytes(), suffix);
        Ok(Solution {
            nonce,
            difficulty,
            digest: digest.to_vec(),
        })
    }

    /// Run the search on a detached thread and deliver the result over a
    /// channel.
    ///
    /// The receiver end completes once the search does; `recv_async` makes
    /// it awaitable from async contexts. Dropping the receiver abandons the
    /// result but the search still runs to completion.
    pub fn search_deferred(
        &self,
        prefix: Vec<u8>,
        suffix: Vec<u8>,
        difficulty: u32,
    ) -> Receiver<Result<u64, Error>> {
        self.search_deferred_with::<Sha256>(prefix, suffix, difficulty)
    }

    pub fn search_deferred_with<D>(
        &self,
        prefix: Vec<u8>,
        suffix: Vec<u8>,
        difficulty: u32,
    ) -> Receiver<Result<u64, Error>>
    where
        D: Digest + Clone + Send + Sync + 'static,
    {
        let (tx, rx) = flume::bounded(1);
        let miner = self.clone();
        thread::spawn(move || {
            let _ = tx.send(miner.search_with::<D>(&prefix, &suffix, difficulty));
        });
        rx
    }
}

impl MinerBuilder {
    /// Build after rejecting configurations no worker pool can run with.
    pub fn build_validated(self) -> Result<Miner, Error> {
        let miner = self
            .build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        miner.validate()?;
        Ok(miner)
    }
}
