//! Publishing sequences to a DA backend and resolving them back.

use futures::{StreamExt, TryStreamExt};
use seqda_interface::secp256k1::{PublicKey, SecretKey, SECP256K1};
use seqda_interface::{
    BlobLayout, BlobPointer, DaBackend, DaError, DaMessage, Sequence, SequenceSignature,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{PublisherConfig, DEFAULT_MAX_IN_FLIGHT_BLOBS};

/// A session with one DA backend, publishing with a fixed [`BlobLayout`] and signer.
///
/// The session holds no state between calls and can be shared between tasks: concurrent
/// calls share the backend, which is responsible for multiplexing its connection.
pub struct DaSession<B> {
    backend: B,
    layout: BlobLayout,
    signer: SecretKey,
    max_in_flight_blobs: usize,
}

impl<B: DaBackend> DaSession<B> {
    /// Creates a session submitting at most [`DEFAULT_MAX_IN_FLIGHT_BLOBS`] blobs at once.
    pub fn new(backend: B, layout: BlobLayout, signer: SecretKey) -> Self {
        Self {
            backend,
            layout,
            signer,
            max_in_flight_blobs: DEFAULT_MAX_IN_FLIGHT_BLOBS,
        }
    }

    /// Creates a session from a [`PublisherConfig`]. The DA section is not used here:
    /// the backend is built from it by the caller.
    pub fn from_config<Da>(
        backend: B,
        config: &PublisherConfig<Da>,
        signer: SecretKey,
    ) -> Result<Self, DaError> {
        Self::new(backend, config.blob_layout, signer)
            .with_max_in_flight_blobs(config.max_in_flight_blobs)
    }

    /// Limits how many blobs of one sequence are submitted or fetched concurrently.
    pub fn with_max_in_flight_blobs(mut self, max_in_flight_blobs: usize) -> Result<Self, DaError> {
        if max_in_flight_blobs == 0 {
            return Err(DaError::Config(
                "max_in_flight_blobs must be at least 1".to_string(),
            ));
        }
        self.max_in_flight_blobs = max_in_flight_blobs;
        Ok(self)
    }

    /// The backend of this session.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The blob layout used to publish and resolve sequences.
    pub fn layout(&self) -> BlobLayout {
        self.layout
    }

    /// The public key DA messages of this session can be verified against.
    pub fn signer_public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(SECP256K1, &self.signer)
    }

    /// Publishes `sequence` and returns the DA message referencing it.
    ///
    /// Every blob must be submitted, proven and found included before the message is
    /// built. Pointers keep the order of the batches, whatever order the backend
    /// confirms them in. The first failure aborts the blobs still in flight.
    pub async fn post_sequence(
        &self,
        cancel: &CancellationToken,
        sequence: &Sequence,
    ) -> Result<DaMessage, DaError> {
        let blobs = self.layout.to_blobs(sequence)?;
        debug!(
            layout = %self.layout,
            batches = sequence.len(),
            blobs = blobs.len(),
            bytes = sequence.total_bytes(),
            "Posting sequence"
        );

        let submissions = futures::stream::iter(blobs.iter().enumerate())
            .map(|(index, blob)| self.submit_blob(index, blob))
            .buffered(self.max_in_flight_blobs)
            .try_collect::<Vec<_>>();

        let pointers = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Posting sequence was cancelled");
                return Err(DaError::Cancelled);
            }
            pointers = submissions => pointers?,
        };

        let signature = SequenceSignature::sign(sequence, &self.signer)?;
        let message = DaMessage::new(signature, pointers)?;
        info!(
            pointers = message.pointers().len(),
            bytes = message.encoded_len(),
            "Sequence posted"
        );
        Ok(message)
    }

    /// Resolves the sequence referenced by an encoded DA message.
    ///
    /// Malformed messages are rejected before any backend call. The signature is not
    /// checked here, see [`DaSession::verify_message`].
    pub async fn get_sequence(
        &self,
        cancel: &CancellationToken,
        message: &[u8],
    ) -> Result<Sequence, DaError> {
        let message = DaMessage::decode(message)?;
        self.layout.check_pointer_count(message.pointers().len())?;

        let fetches = futures::stream::iter(message.pointers())
            .map(|pointer| self.fetch_blob(pointer))
            .buffered(self.max_in_flight_blobs)
            .try_collect::<Vec<_>>();

        let blobs = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Getting sequence was cancelled");
                return Err(DaError::Cancelled);
            }
            blobs = fetches => blobs?,
        };

        self.layout.from_blobs(blobs)
    }

    /// Checks, without touching the backend, that `message` is well formed for this
    /// session's layout and that its signature authenticates `sequence` for `signer`.
    pub fn verify_message(
        &self,
        message: &[u8],
        sequence: &Sequence,
        signer: &PublicKey,
    ) -> Result<(), DaError> {
        let message = DaMessage::decode(message)?;
        self.layout.check_pointer_count(message.pointers().len())?;
        message.signature().check(sequence, signer)
    }

    async fn submit_blob(&self, index: usize, blob: &[u8]) -> Result<BlobPointer, DaError> {
        let pointer = self.backend.submit(blob).await.map_err(|e| {
            warn!(index, error = %e, "Blob submission error");
            DaError::Submission(e)
        })?;
        let BlobPointer { height, commitment } = pointer;

        if height == 0 {
            warn!(index, %commitment, "Unexpected height from blob submission");
            return Err(DaError::Submission(anyhow::anyhow!(
                "backend reported height 0 for blob {commitment}"
            )));
        }

        let proof = self
            .backend
            .get_proof(height, &commitment)
            .await
            .map_err(|e| {
                warn!(index, height, %commitment, error = %e, "Error retrieving proof");
                DaError::Proof(e)
            })?;

        match self
            .backend
            .check_included(height, &proof, &commitment)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(index, height, %commitment, ?proof, "Blob is not included");
                return Err(DaError::Inclusion(anyhow::anyhow!(
                    "blob {commitment} is not included at height {height}"
                )));
            }
            Err(e) => {
                warn!(index, height, %commitment, error = %e, "Error checking for inclusion");
                return Err(DaError::Inclusion(e));
            }
        }

        info!(index, height, %commitment, "Successfully posted blob");
        Ok(pointer)
    }

    async fn fetch_blob(&self, pointer: &BlobPointer) -> Result<Vec<u8>, DaError> {
        self.backend.get_blob(pointer).await.map_err(|e| {
            warn!(%pointer, error = %e, "Cannot fetch blob");
            DaError::Retrieval(e)
        })
    }
}
