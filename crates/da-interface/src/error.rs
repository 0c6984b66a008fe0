//! The error taxonomy shared by every component of the DA protocol.

/// Errors produced while publishing, retrieving or authenticating a sequence.
///
/// Backend failures carry the underlying [`anyhow::Error`] reported by the DA client.
/// Structural errors ([`DaError::MalformedPointer`], [`DaError::InvalidMessageLength`],
/// [`DaError::UnexpectedPointerCount`], [`DaError::SequenceDecode`]) are always raised locally.
#[derive(Debug, thiserror::Error)]
pub enum DaError {
    /// The session or backend was configured with invalid parameters.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// A sequence without batches cannot be published.
    #[error("Cannot publish an empty sequence")]
    EmptySequence,
    /// The backend rejected a blob or reported an invalid height.
    #[error("Blob submission failed: {0}")]
    Submission(anyhow::Error),
    /// The inclusion proof for a submitted blob could not be retrieved.
    #[error("Failed to retrieve inclusion proof: {0}")]
    Proof(anyhow::Error),
    /// The backend reported that a submitted blob is not included, or the check itself failed.
    #[error("Blob inclusion check failed: {0}")]
    Inclusion(anyhow::Error),
    /// A blob referenced by a DA message could not be fetched.
    #[error("Failed to fetch blob: {0}")]
    Retrieval(anyhow::Error),
    /// A blob pointer did not have the expected fixed size.
    #[error("Malformed blob pointer: expected {expected} bytes, got {actual}")]
    MalformedPointer {
        /// The size every pointer must have.
        expected: usize,
        /// The size of the rejected input.
        actual: usize,
    },
    /// A DA message was not `signature || pointer * k` with `k >= 1`.
    #[error("Wrong DA message length: {0}")]
    InvalidMessageLength(usize),
    /// A DA message carried a number of pointers the blob layout cannot produce.
    #[error("Unexpected number of blob pointers: expected {expected}, got {actual}")]
    UnexpectedPointerCount {
        /// A human readable description of the accepted pointer count.
        expected: &'static str,
        /// The number of pointers found in the message.
        actual: usize,
    },
    /// A sequence could not be written as a whole-sequence document.
    #[error("Cannot encode sequence: {0}")]
    SequenceEncode(String),
    /// Blob data could not be decoded back into a sequence.
    #[error("Cannot decode sequence: {0}")]
    SequenceDecode(String),
    /// The sequence could not be signed.
    #[error("Cannot sign sequence: {0}")]
    Signing(#[from] secp256k1::Error),
    /// A signature did not authenticate the sequence for the expected signer.
    #[error("Signature verification failed: {0}")]
    Verification(String),
    /// The operation was cancelled by the caller before it completed.
    #[error("Operation was cancelled")]
    Cancelled,
}

impl DaError {
    /// Returns `true` if the error was caused by a corrupt DA message or blob payload,
    /// as opposed to a backend or configuration failure.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MalformedPointer { .. }
                | Self::InvalidMessageLength(_)
                | Self::UnexpectedPointerCount { .. }
                | Self::SequenceDecode(_)
        )
    }
}
