//! This crate defines the wire formats and integrity protocol a rollup sequencer uses to
//! publish batches on a blob-oriented data availability layer: blob pointers, the two
//! sequence layouts, sequence signatures and the DA message that ties them together.
//! It also defines [`DaBackend`], the contract every DA layer client implements.

#![deny(missing_docs)]

mod backend;
mod crypto;
mod error;
mod layout;
mod message;
mod pointer;
mod sequence;

pub use backend::DaBackend;
pub use crypto::{
    signer_address, SequenceSignature, SignedSequence, SignerAddress, SIGNATURE_SIZE,
};
pub use error::DaError;
pub use layout::{decode_sequence_document, encode_sequence_document, BlobLayout};
pub use message::DaMessage;
pub use pointer::{BlobCommitment, BlobPointer, BLOB_POINTER_SIZE, COMMITMENT_SIZE};
pub use sequence::{keccak256, Keccak256Hash, Sequence};
pub use {anyhow, secp256k1};
