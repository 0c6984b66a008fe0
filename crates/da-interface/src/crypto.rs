//! Recoverable ECDSA signatures binding a [`Sequence`] to a sequencer key.
//!
//! Signatures are produced over [`Sequence::hash_to_sign`], so a single signature
//! authenticates a sequence regardless of how many blobs it was split into.

use std::fmt::{Debug, Display, Formatter};

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId, Signature};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

use crate::{keccak256, DaError, Sequence};

/// The size of a [`SequenceSignature`]: `r (32) || s (32) || v (1)`.
pub const SIGNATURE_SIZE: usize = 65;

/// Offset added to the recovery id when it is stored in `v`.
const RECOVERY_ID_OFFSET: u8 = 27;

/// A 20-byte Ethereum-style account address.
pub type SignerAddress = [u8; 20];

/// A 65-byte recoverable signature over the hash of a [`Sequence`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceSignature([u8; SIGNATURE_SIZE]);

impl SequenceSignature {
    /// Signs the sequence hash with `signer`. The recovery byte is stored as `27 + recovery_id`.
    pub fn sign(sequence: &Sequence, signer: &SecretKey) -> Result<Self, DaError> {
        let message = Message::from_slice(&sequence.hash_to_sign())?;
        let (recovery_id, compact) = SECP256K1
            .sign_ecdsa_recoverable(&message, signer)
            .serialize_compact();

        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..64].copy_from_slice(&compact);
        // Recovery ids are always in 0..=3.
        bytes[64] = recovery_id.to_i32() as u8 + RECOVERY_ID_OFFSET;
        Ok(Self(bytes))
    }

    /// Wraps raw signature bytes without validating them.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Reads a signature from a slice of exactly [`SIGNATURE_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DaError> {
        let bytes: [u8; SIGNATURE_SIZE] = bytes.try_into().map_err(|_| {
            DaError::Verification(format!(
                "expected a {SIGNATURE_SIZE} byte signature, got {} bytes",
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// The raw signature bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Returns `true` if this signature was produced over `sequence` by the key behind `signer`.
    ///
    /// Fails closed: any malformed component yields `false`.
    pub fn verify(&self, sequence: &Sequence, signer: &PublicKey) -> bool {
        match self.check(sequence, signer) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Sequence signature rejected");
                false
            }
        }
    }

    /// Like [`SequenceSignature::verify`], but reports why verification failed.
    ///
    /// Both the plain ECDSA check over `(r, s)` and the recovery byte must agree on `signer`.
    pub fn check(&self, sequence: &Sequence, signer: &PublicKey) -> Result<(), DaError> {
        let message = sequence_message(sequence)?;
        let signature = Signature::from_compact(&self.0[..64])
            .map_err(|e| DaError::Verification(format!("malformed signature: {e}")))?;

        SECP256K1
            .verify_ecdsa(&message, &signature, signer)
            .map_err(|_| {
                DaError::Verification("signature does not match the sequence".to_string())
            })?;

        if &self.recover_from(&message)? != signer {
            return Err(DaError::Verification(
                "recovery id does not recover the signer".to_string(),
            ));
        }
        Ok(())
    }

    /// Recovers the public key that produced this signature over `sequence`.
    pub fn recover_signer(&self, sequence: &Sequence) -> Result<PublicKey, DaError> {
        self.recover_from(&sequence_message(sequence)?)
    }

    fn recover_from(&self, message: &Message) -> Result<PublicKey, DaError> {
        let recoverable = RecoverableSignature::from_compact(&self.0[..64], self.recovery_id()?)
            .map_err(|e| DaError::Verification(format!("malformed signature: {e}")))?;
        recoverable
            .recover(message)
            .map_err(|e| DaError::Verification(format!("cannot recover signer: {e}")))
    }

    /// Decodes `v`, which may be stored either as `27 + id` or as the raw id.
    fn recovery_id(&self) -> Result<RecoveryId, DaError> {
        let id = match self.0[64] {
            v @ (27 | 28) => v - RECOVERY_ID_OFFSET,
            v @ (0 | 1) => v,
            v => {
                return Err(DaError::Verification(format!(
                    "invalid recovery byte {v}"
                )))
            }
        };
        RecoveryId::from_i32(i32::from(id))
            .map_err(|e| DaError::Verification(format!("invalid recovery id: {e}")))
    }
}

fn sequence_message(sequence: &Sequence) -> Result<Message, DaError> {
    Message::from_slice(&sequence.hash_to_sign())
        .map_err(|e| DaError::Verification(format!("invalid sequence hash: {e}")))
}

impl From<[u8; SIGNATURE_SIZE]> for SequenceSignature {
    fn from(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SequenceSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SequenceSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SequenceSignature(0x{})", hex::encode(self.0))
    }
}

impl Display for SequenceSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// The Ethereum-style address of `key`: the last 20 bytes of the keccak-256 hash of
/// the uncompressed key without its `0x04` tag.
pub fn signer_address(key: &PublicKey) -> SignerAddress {
    let uncompressed = key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// A sequence together with the signature that authenticates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSequence {
    sequence: Sequence,
    signature: SequenceSignature,
}

impl SignedSequence {
    /// Signs `sequence` with `signer`.
    pub fn sign(sequence: Sequence, signer: &SecretKey) -> Result<Self, DaError> {
        let signature = SequenceSignature::sign(&sequence, signer)?;
        Ok(Self {
            sequence,
            signature,
        })
    }

    /// Pairs a sequence with a signature obtained elsewhere. Nothing is checked.
    pub fn from_parts(sequence: Sequence, signature: SequenceSignature) -> Self {
        Self {
            sequence,
            signature,
        }
    }

    /// The signed sequence.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The signature.
    pub fn signature(&self) -> &SequenceSignature {
        &self.signature
    }

    /// See [`SequenceSignature::verify`].
    pub fn verify(&self, signer: &PublicKey) -> bool {
        self.signature.verify(&self.sequence, signer)
    }

    /// The public key that produced the signature.
    pub fn signer(&self) -> Result<PublicKey, DaError> {
        self.signature.recover_signer(&self.sequence)
    }

    /// The address of the key that produced the signature.
    pub fn signer_address(&self) -> Result<SignerAddress, DaError> {
        self.signer().map(|key| signer_address(&key))
    }

    /// Splits into the sequence and its signature.
    pub fn into_parts(self) -> (Sequence, SequenceSignature) {
        (self.sequence, self.signature)
    }
}
