//! The contract a DA layer client must fulfil to publish and resolve blobs.

use core::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{BlobCommitment, BlobPointer};

/// A client of a blob-oriented DA layer.
///
/// Blobs can only be looked up by `(height, namespace, commitment)`, never by an arbitrary
/// key. The namespace is fixed per backend instance, so it does not appear in the method
/// signatures.
///
/// Implementations must be safe to call from many tasks at once: they either multiplex
/// over a single connection or serialize internally.
#[async_trait]
pub trait DaBackend: Send + Sync + 'static {
    /// The inclusion proof returned by [`DaBackend::get_proof`].
    type Proof: Debug + Send + Sync;

    /// Submits a blob and returns where it was included.
    ///
    /// A height of `0` is never a valid inclusion height.
    async fn submit(&self, blob: &[u8]) -> anyhow::Result<BlobPointer>;

    /// Fetches the inclusion proof of the blob with `commitment` at `height`.
    async fn get_proof(
        &self,
        height: u64,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<Self::Proof>;

    /// Checks `proof` against the block at `height`. Returns `Ok(false)` if the blob is not included.
    async fn check_included(
        &self,
        height: u64,
        proof: &Self::Proof,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<bool>;

    /// Fetches the blob stored at `pointer`. Fails if no such blob exists.
    async fn get_blob(&self, pointer: &BlobPointer) -> anyhow::Result<Vec<u8>>;
}

#[async_trait]
impl<B: DaBackend> DaBackend for Arc<B> {
    type Proof = B::Proof;

    async fn submit(&self, blob: &[u8]) -> anyhow::Result<BlobPointer> {
        self.as_ref().submit(blob).await
    }

    async fn get_proof(
        &self,
        height: u64,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<Self::Proof> {
        self.as_ref().get_proof(height, commitment).await
    }

    async fn check_included(
        &self,
        height: u64,
        proof: &Self::Proof,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<bool> {
        self.as_ref().check_included(height, proof, commitment).await
    }

    async fn get_blob(&self, pointer: &BlobPointer) -> anyhow::Result<Vec<u8>> {
        self.as_ref().get_blob(pointer).await
    }
}
