//! Fixed-size binary encoding of the location of a blob on the DA layer.

use std::fmt::{Debug, Display, Formatter};

use crate::DaError;

/// The size of a blob commitment, in bytes.
pub const COMMITMENT_SIZE: usize = 32;

/// The size of an encoded [`BlobPointer`]: an 8-byte big-endian height followed by the commitment.
pub const BLOB_POINTER_SIZE: usize = 8 + COMMITMENT_SIZE;

/// A content commitment returned by the DA layer when a blob is submitted.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::From,
    derive_more::Into,
    derive_more::AsRef,
)]
pub struct BlobCommitment(pub [u8; COMMITMENT_SIZE]);

impl BlobCommitment {
    /// Creates a new commitment from its raw bytes.
    pub const fn new(bytes: [u8; COMMITMENT_SIZE]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the commitment.
    pub const fn as_bytes(&self) -> &[u8; COMMITMENT_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for BlobCommitment {
    type Error = DaError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; COMMITMENT_SIZE] =
            value.try_into().map_err(|_| DaError::MalformedPointer {
                expected: COMMITMENT_SIZE,
                actual: value.len(),
            })?;
        Ok(Self(bytes))
    }
}

impl Debug for BlobCommitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Display for BlobCommitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Where a blob lives on the DA layer.
///
/// Height and commitment are opaque, backend-defined values. The only validation
/// performed on decoding is the length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobPointer {
    /// The block (or slot) height at which the blob was included.
    pub height: u64,
    /// The commitment identifying the blob content.
    pub commitment: BlobCommitment,
}

impl BlobPointer {
    /// Creates a new pointer.
    pub const fn new(height: u64, commitment: BlobCommitment) -> Self {
        Self { height, commitment }
    }

    /// Encodes the pointer as `height (big-endian) || commitment`.
    pub fn encode(&self) -> [u8; BLOB_POINTER_SIZE] {
        let mut out = [0u8; BLOB_POINTER_SIZE];
        self.encode_into(&mut out);
        out
    }

    /// Writes the encoded pointer into the first [`BLOB_POINTER_SIZE`] bytes of `out`.
    ///
    /// # Panics
    /// If `out` is shorter than [`BLOB_POINTER_SIZE`].
    pub(crate) fn encode_into(&self, out: &mut [u8]) {
        out[..8].copy_from_slice(&self.height.to_be_bytes());
        out[8..BLOB_POINTER_SIZE].copy_from_slice(self.commitment.as_bytes());
    }

    /// Decodes a pointer, rejecting any input that is not exactly [`BLOB_POINTER_SIZE`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, DaError> {
        if bytes.len() != BLOB_POINTER_SIZE {
            return Err(DaError::MalformedPointer {
                expected: BLOB_POINTER_SIZE,
                actual: bytes.len(),
            });
        }
        let (height, commitment) = bytes.split_at(8);
        let mut height_bytes = [0u8; 8];
        height_bytes.copy_from_slice(height);

        Ok(Self {
            height: u64::from_be_bytes(height_bytes),
            commitment: BlobCommitment::try_from(commitment)?,
        })
    }
}

impl Display for BlobPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BlobPointer {{ height: {}, commitment: {} }}",
            self.height, self.commitment
        )
    }
}

impl TryFrom<&[u8]> for BlobPointer {
    type Error = DaError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(value)
    }
}

impl From<BlobPointer> for [u8; BLOB_POINTER_SIZE] {
    fn from(value: BlobPointer) -> Self {
        value.encode()
    }
}
