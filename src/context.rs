//! Cached hash state with the invariant prefix absorbed once.

use sha2::digest::{Digest, Output};

/// A partially-absorbed hash state holding the invariant prefix.
///
/// The search loop iterates until success, potentially millions of times;
/// cloning this state per candidate is O(1) while re-absorbing the prefix
/// would not be. The state is shared read-only across workers: cloning
/// never mutates the source, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct PrefixState<D: Digest + Clone> {
    state: D,
}

impl<D: Digest + Clone> PrefixState<D> {
    pub fn new(prefix: &[u8]) -> Self {
        let mut state = D::new();
        state.update(prefix);
        PrefixState { state }
    }

    /// Digest of `prefix ++ digits ++ suffix` without re-absorbing the prefix.
    #[inline]
    pub fn digest(&self, digits: &[u8], suffix: &[u8]) -> Output<D> {
        let mut state = self.state.clone();
        state.update(digits);
        state.update(suffix);
        state.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    #[test]
    fn matches_one_shot_digest() {
        let state = PrefixState::<Sha256>::new(b"prefix|");
        let cached = state.digest(b"12345", b"|suffix");
        let oneshot = Sha256::digest(b"prefix|12345|suffix");
        assert_eq!(cached, oneshot);
    }

    #[test]
    fn state_is_reusable_across_candidates() {
        let state = PrefixState::<Sha256>::new(b"abc");
        let first = state.digest(b"1", b"");
        let second = state.digest(b"2", b"");
        assert_ne!(first, second);
        // Re-deriving the first candidate gives the same digest: the cached
        // state was not consumed.
        assert_eq!(state.digest(b"1", b""), first);
    }

    #[test]
    fn binary_prefix_and_suffix_are_accepted() {
        let raw = [0u8, 159, 146, 150, 255];
        let state = PrefixState::<Sha256>::new(&raw);
        let digest = state.digest(b"0", &raw);
        let mut oneshot = Sha256::new();
        oneshot.update(raw);
        oneshot.update(b"0");
        oneshot.update(raw);
        assert_eq!(digest, oneshot.finalize());
    }
}
