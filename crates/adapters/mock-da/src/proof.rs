use std::fmt::{Debug, Formatter};

use seqda_interface::BlobCommitment;
use sha2::Digest;

/// A mock block hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, derive_more::From, derive_more::Into)]
pub struct MockHash(pub [u8; 32]);

impl Debug for MockHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl core::fmt::Display for MockHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for MockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The inclusion proof handed out by [`crate::MockDaBackend`].
///
/// It binds a commitment to the hash of the single-blob block it was included in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProof {
    /// The height of the block holding the blob.
    pub height: u64,
    /// The commitment of the proven blob.
    pub commitment: BlobCommitment,
    /// The hash of the block holding the blob.
    pub block_hash: MockHash,
}

/// Computes the commitment of `blob` within `namespace`.
pub(crate) fn blob_commitment(namespace: &[u8], blob: &[u8]) -> BlobCommitment {
    let mut hasher = sha2::Sha256::new();
    hasher.update(namespace);
    hasher.update(blob);
    BlobCommitment::new(hasher.finalize().into())
}

/// Hashes a block holding exactly one blob.
pub(crate) fn block_hash(height: u64, commitment: &BlobCommitment) -> MockHash {
    let mut hasher = sha2::Sha256::new();
    hasher.update(height.to_be_bytes());
    hasher.update(commitment.as_bytes());
    MockHash(hasher.finalize().into())
}
