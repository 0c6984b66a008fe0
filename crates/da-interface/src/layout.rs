//! How a [`Sequence`] is laid out in blobs on the DA layer.
//!
//! The two layouts are incompatible wire formats. A DA message does not record which one
//! produced it, so the layout is fixed for a deployment and chosen when a session is built.

use serde::{Deserialize, Serialize};

use crate::{DaError, Sequence};

/// The blob layout of a published sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlobLayout {
    /// The whole sequence is one blob: a JSON array of `0x`-prefixed hex strings.
    /// Produces exactly one pointer per sequence.
    WholeSequence,
    /// Every batch is its own blob, stored verbatim. Produces one pointer per batch.
    PerBatch,
}

impl BlobLayout {
    /// Lays out the sequence as the list of blobs to submit, in order.
    pub fn to_blobs(&self, sequence: &Sequence) -> Result<Vec<Vec<u8>>, DaError> {
        if sequence.is_empty() {
            return Err(DaError::EmptySequence);
        }
        match self {
            Self::WholeSequence => Ok(vec![encode_sequence_document(sequence)?]),
            Self::PerBatch => Ok(sequence.batches().to_vec()),
        }
    }

    /// Rebuilds the sequence from the blobs resolved from a DA message, in pointer order.
    pub fn from_blobs(&self, blobs: Vec<Vec<u8>>) -> Result<Sequence, DaError> {
        self.check_pointer_count(blobs.len())?;
        match self {
            Self::WholeSequence => {
                // The pointer count check guarantees exactly one blob.
                let document = blobs.into_iter().next().unwrap_or_default();
                decode_sequence_document(&document)
            }
            Self::PerBatch => Ok(Sequence::new(blobs)),
        }
    }

    /// Checks that a DA message with `pointers` pointers can have been produced by this layout.
    pub fn check_pointer_count(&self, pointers: usize) -> Result<(), DaError> {
        let (valid, expected) = match self {
            Self::WholeSequence => (pointers == 1, "exactly 1"),
            Self::PerBatch => (pointers >= 1, "at least 1"),
        };
        if valid {
            Ok(())
        } else {
            Err(DaError::UnexpectedPointerCount {
                expected,
                actual: pointers,
            })
        }
    }
}

impl std::fmt::Display for BlobLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WholeSequence => write!(f, "whole_sequence"),
            Self::PerBatch => write!(f, "per_batch"),
        }
    }
}

/// Serializes the sequence as a JSON array of `0x`-prefixed hex strings.
pub fn encode_sequence_document(sequence: &Sequence) -> Result<Vec<u8>, DaError> {
    let texts: Vec<String> = sequence
        .batches()
        .iter()
        .map(|batch| format!("0x{}", hex::encode(batch)))
        .collect();
    serde_json::to_vec(&texts)
        .map_err(|e| DaError::SequenceEncode(e.to_string()))
}

/// Parses a document produced by [`encode_sequence_document`].
///
/// Elements may omit the `0x` prefix and odd-length elements are left-padded with a `0`.
/// A single malformed element fails the whole document.
pub fn decode_sequence_document(document: &[u8]) -> Result<Sequence, DaError> {
    let texts: Vec<String> = serde_json::from_slice(document).map_err(|e| {
        tracing::debug!(bytes = document.len(), error = %e, "Blob is not a sequence document");
        DaError::SequenceDecode(format!("blob is not a JSON array of strings: {e}"))
    })?;

    texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            decode_hex_text(text).map_err(|e| {
                DaError::SequenceDecode(format!("batch {index} is not valid hex: {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Sequence::new)
}

fn decode_hex_text(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    }
}
