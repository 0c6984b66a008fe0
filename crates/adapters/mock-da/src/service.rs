//! [`DaBackend`] implementation on top of [`MockDaLayer`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use seqda_interface::{BlobCommitment, BlobPointer, DaBackend};
use tokio::sync::RwLock;

use crate::layer::MockDaLayer;
use crate::proof::{blob_commitment, MockProof};
use crate::MockDaConfig;

/// Failures the mock backend can be told to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockFault {
    /// `submit` returns an error.
    RejectSubmission,
    /// `submit` accepts the blob but reports height `0`.
    ZeroHeight,
    /// `get_proof` returns an error.
    ProofUnavailable,
    /// `check_included` reports that the blob is not included.
    NotIncluded,
    /// `check_included` returns an error.
    InclusionCheckError,
    /// `get_blob` reports that the blob does not exist.
    BlobMissing,
}

/// How many times each backend method was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockDaStats {
    /// Calls to `submit`.
    pub submissions: usize,
    /// Calls to `get_proof`.
    pub proof_requests: usize,
    /// Calls to `check_included`.
    pub inclusion_checks: usize,
    /// Calls to `get_blob`.
    pub blob_fetches: usize,
}

impl MockDaStats {
    /// Total number of calls made to the backend.
    pub fn total(&self) -> usize {
        self.submissions + self.proof_requests + self.inclusion_checks + self.blob_fetches
    }
}

#[derive(Default)]
struct Counters {
    submissions: AtomicUsize,
    proof_requests: AtomicUsize,
    inclusion_checks: AtomicUsize,
    blob_fetches: AtomicUsize,
}

/// In-memory DA backend. Clones share the same underlying layer.
#[derive(Clone)]
pub struct MockDaBackend {
    namespace: Vec<u8>,
    submission_latency: Duration,
    da_layer: Arc<RwLock<MockDaLayer>>,
    counters: Arc<Counters>,
}

impl MockDaBackend {
    /// Creates an empty backend storing blobs under `namespace`.
    pub fn new(namespace: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace: namespace.into(),
            submission_latency: Duration::ZERO,
            da_layer: Arc::new(RwLock::new(MockDaLayer::new())),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Creates an empty backend from [`MockDaConfig`].
    pub fn from_config(config: &MockDaConfig) -> Self {
        let mut backend = Self::new(config.namespace.as_bytes());
        backend.submission_latency = config.submission_latency();
        backend
    }

    /// Makes every submission of exactly `payload` take `delay` before it is confirmed.
    ///
    /// Heights are assigned on confirmation, so a delayed blob lands above blobs that
    /// were submitted after it but confirmed first.
    pub async fn set_submission_delay(&self, payload: impl Into<Vec<u8>>, delay: Duration) {
        self.da_layer.write().await.set_delay(payload.into(), delay);
    }

    /// Enables `fault` until [`MockDaBackend::clear_fault`] is called.
    pub async fn inject_fault(&self, fault: MockFault) {
        tracing::debug!(?fault, "Injecting mock DA fault");
        self.da_layer.write().await.set_fault(fault, true);
    }

    /// Disables `fault`.
    pub async fn clear_fault(&self, fault: MockFault) {
        self.da_layer.write().await.set_fault(fault, false);
    }

    /// Height of the last produced block, `0` before the first submission.
    pub async fn head_height(&self) -> u64 {
        self.da_layer.read().await.head_height()
    }

    /// A snapshot of the call counters.
    pub fn stats(&self) -> MockDaStats {
        MockDaStats {
            submissions: self.counters.submissions.load(Ordering::SeqCst),
            proof_requests: self.counters.proof_requests.load(Ordering::SeqCst),
            inclusion_checks: self.counters.inclusion_checks.load(Ordering::SeqCst),
            blob_fetches: self.counters.blob_fetches.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl DaBackend for MockDaBackend {
    type Proof = MockProof;

    async fn submit(&self, blob: &[u8]) -> anyhow::Result<BlobPointer> {
        self.counters.submissions.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .da_layer
            .read()
            .await
            .delay_for(blob)
            .unwrap_or(self.submission_latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut da_layer = self.da_layer.write().await;
        if da_layer.has_fault(MockFault::RejectSubmission) {
            anyhow::bail!("Mock DA rejected blob of {} bytes", blob.len());
        }
        let commitment = blob_commitment(&self.namespace, blob);
        let height = da_layer.include(commitment, blob.to_vec());
        tracing::debug!(height, %commitment, bytes = blob.len(), "Mock DA included blob");

        if da_layer.has_fault(MockFault::ZeroHeight) {
            return Ok(BlobPointer::new(0, commitment));
        }
        Ok(BlobPointer::new(height, commitment))
    }

    async fn get_proof(
        &self,
        height: u64,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<Self::Proof> {
        self.counters.proof_requests.fetch_add(1, Ordering::SeqCst);
        let da_layer = self.da_layer.read().await;
        if da_layer.has_fault(MockFault::ProofUnavailable) {
            anyhow::bail!("Proof for blob {commitment} at height {height} is unavailable");
        }
        let stored = da_layer.blob_at(height, commitment).ok_or_else(|| {
            anyhow::anyhow!("No blob with commitment {commitment} at height {height}")
        })?;

        Ok(MockProof {
            height,
            commitment: *commitment,
            block_hash: stored.block_hash,
        })
    }

    async fn check_included(
        &self,
        height: u64,
        proof: &Self::Proof,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<bool> {
        self.counters.inclusion_checks.fetch_add(1, Ordering::SeqCst);
        let da_layer = self.da_layer.read().await;
        if da_layer.has_fault(MockFault::InclusionCheckError) {
            anyhow::bail!("Inclusion check for blob {commitment} at height {height} failed");
        }
        if da_layer.has_fault(MockFault::NotIncluded) {
            return Ok(false);
        }
        if proof.height != height || &proof.commitment != commitment {
            return Ok(false);
        }

        Ok(da_layer
            .blob_at(height, commitment)
            .is_some_and(|stored| stored.block_hash == proof.block_hash))
    }

    async fn get_blob(&self, pointer: &BlobPointer) -> anyhow::Result<Vec<u8>> {
        self.counters.blob_fetches.fetch_add(1, Ordering::SeqCst);
        let da_layer = self.da_layer.read().await;
        let stored = da_layer
            .blob_at(pointer.height, &pointer.commitment)
            .filter(|_| !da_layer.has_fault(MockFault::BlobMissing))
            .ok_or_else(|| anyhow::anyhow!("Blob not found: {pointer}"))?;
        Ok(stored.data.clone())
    }
}
