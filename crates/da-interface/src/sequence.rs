//! Ordered lists of batch payloads and their signing hash.

use tiny_keccak::{Hasher, Keccak};

/// A 32-byte keccak-256 digest.
pub type Keccak256Hash = [u8; 32];

/// Computes the keccak-256 digest of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> Keccak256Hash {
    let mut hasher = Keccak::v256();
    hasher.update(data.as_ref());
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// An ordered list of opaque batch payloads published as one logical unit.
///
/// Order is significant: it defines both the signing hash and the order in which
/// batches are reconstructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<Vec<u8>>);

impl Sequence {
    /// Creates a sequence from batch payloads, preserving their order.
    pub fn new(batches: Vec<Vec<u8>>) -> Self {
        Self(batches)
    }

    /// The batches of the sequence, in order.
    pub fn batches(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Consumes the sequence, returning its batches.
    pub fn into_batches(self) -> Vec<Vec<u8>> {
        self.0
    }

    /// The number of batches.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the sequence has no batches.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total payload size, in bytes.
    pub fn total_bytes(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    /// The hash covered by the sequencer signature.
    ///
    /// This is an accumulated hash chain: starting from 32 zero bytes, every batch folds
    /// in as `keccak256(acc || keccak256(batch))`. Batch boundaries and order both
    /// change the result.
    pub fn hash_to_sign(&self) -> Keccak256Hash {
        self.0.iter().fold([0u8; 32], |acc, batch| {
            let mut hasher = Keccak::v256();
            hasher.update(&acc);
            hasher.update(&keccak256(batch));
            let mut next = [0u8; 32];
            hasher.finalize(&mut next);
            next
        })
    }
}

impl From<Vec<Vec<u8>>> for Sequence {
    fn from(batches: Vec<Vec<u8>>) -> Self {
        Self::new(batches)
    }
}

impl From<Sequence> for Vec<Vec<u8>> {
    fn from(sequence: Sequence) -> Self {
        sequence.into_batches()
    }
}

impl<B: Into<Vec<u8>>> FromIterator<B> for Sequence {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl AsRef<[Vec<u8>]> for Sequence {
    fn as_ref(&self) -> &[Vec<u8>] {
        &self.0
    }
}
