//! The DA message: `signature || pointer_0 || pointer_1 || ...`.

use secp256k1::PublicKey;

use crate::{
    BlobPointer, DaError, Sequence, SequenceSignature, BLOB_POINTER_SIZE, SIGNATURE_SIZE,
};

/// The compact reference stored on-chain for a published sequence.
///
/// Every pointer is fixed-width, so the number of pointers follows from the length:
/// `(len - 65) / 40`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaMessage {
    signature: SequenceSignature,
    pointers: Vec<BlobPointer>,
}

impl DaMessage {
    /// Assembles a message. At least one pointer is required.
    pub fn new(signature: SequenceSignature, pointers: Vec<BlobPointer>) -> Result<Self, DaError> {
        if pointers.is_empty() {
            return Err(DaError::InvalidMessageLength(SIGNATURE_SIZE));
        }
        Ok(Self {
            signature,
            pointers,
        })
    }

    /// The signature over the logical sequence.
    pub fn signature(&self) -> &SequenceSignature {
        &self.signature
    }

    /// The blob pointers, in submission order.
    pub fn pointers(&self) -> &[BlobPointer] {
        &self.pointers
    }

    /// Splits the message into its signature and pointers.
    pub fn into_parts(self) -> (SequenceSignature, Vec<BlobPointer>) {
        (self.signature, self.pointers)
    }

    /// The size of the encoded message.
    pub fn encoded_len(&self) -> usize {
        SIGNATURE_SIZE + BLOB_POINTER_SIZE * self.pointers.len()
    }

    /// Encodes the message into a buffer sized up front.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.encoded_len()];
        out[..SIGNATURE_SIZE].copy_from_slice(self.signature.as_bytes());
        for (pointer, chunk) in self
            .pointers
            .iter()
            .zip(out[SIGNATURE_SIZE..].chunks_exact_mut(BLOB_POINTER_SIZE))
        {
            pointer.encode_into(chunk);
        }
        out
    }

    /// Decodes a message, rejecting any length that is not `65 + 40 * k` with `k >= 1`.
    ///
    /// This is a purely local check and never touches the network.
    pub fn decode(bytes: &[u8]) -> Result<Self, DaError> {
        if bytes.len() <= SIGNATURE_SIZE || (bytes.len() - SIGNATURE_SIZE) % BLOB_POINTER_SIZE != 0
        {
            return Err(DaError::InvalidMessageLength(bytes.len()));
        }
        let (signature, pointers) = bytes.split_at(SIGNATURE_SIZE);

        Ok(Self {
            signature: SequenceSignature::from_slice(signature)?,
            pointers: pointers
                .chunks_exact(BLOB_POINTER_SIZE)
                .map(BlobPointer::decode)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Returns `true` if the message signature authenticates `sequence` for `signer`.
    pub fn verify(&self, sequence: &Sequence, signer: &PublicKey) -> bool {
        self.signature.verify(sequence, signer)
    }
}

impl TryFrom<&[u8]> for DaMessage {
    type Error = DaError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(value)
    }
}

impl From<&DaMessage> for Vec<u8> {
    fn from(message: &DaMessage) -> Self {
        message.encode()
    }
}
