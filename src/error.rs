use thiserror::Error;

/// Errors surfaced by the nonce search.
///
/// There is no recoverable-error category inside the search loop itself:
/// a candidate that misses the difficulty target is simply followed by the
/// next candidate. Everything here is caught at setup or on exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The target difficulty lies outside the supported `0..=64` range.
    /// Checked once before any worker starts.
    #[error("target difficulty {0} out of range (0..=64)")]
    DifficultyOutOfRange(u32),

    /// The nonce counter ran past `u64::MAX` without finding a hit.
    #[error("nonce counter exhausted the u64 range")]
    NonceOverflow,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The deferred-search channel was dropped before a result arrived.
    #[error("search channel closed")]
    ChannelClosed,
}
