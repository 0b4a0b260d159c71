use serde::{Deserialize, Serialize};

/// A completed search result, sufficient for external verification:
/// the verifier re-hashes `prefix ++ decimal(nonce) ++ suffix` and checks
/// both the digest bytes and the difficulty mask.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solution {
    pub nonce: u64,
    pub difficulty: u32,
    pub digest: Vec<u8>,
}

impl Solution {
    /// Serialize the digest as hex for logging or transport.
    pub fn digest_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}
