use async_trait::async_trait;
use celestia_rpc::prelude::*;
use celestia_types::blob::{Blob as JsonBlob, GasPrice};
use celestia_types::nmt::{Namespace, NamespaceProof};
use celestia_types::Commitment;
use jsonrpsee::http_client::{HeaderMap, HttpClient};
use seqda_interface::{BlobCommitment, BlobPointer, DaBackend, DaError};
use tracing::{debug, info};

use crate::CelestiaConfig;

/// Inclusion proof returned by `blob.GetProof`: one NMT proof per row the blob spans.
pub type CelestiaProof = Vec<NamespaceProof>;

/// [`DaBackend`] talking to a Celestia node over JSON-RPC.
#[derive(Debug, Clone)]
pub struct CelestiaBackend {
    client: HttpClient,
    namespace: Namespace,
    gas_price: GasPrice,
}

impl CelestiaBackend {
    /// Creates a backend from an already built client. A negative `gas_price` lets the
    /// node estimate one.
    pub fn with_client(client: HttpClient, namespace: Namespace, gas_price: f64) -> Self {
        let gas_price = if gas_price < 0.0 {
            GasPrice::default()
        } else {
            GasPrice::from(gas_price)
        };
        Self {
            client,
            namespace,
            gas_price,
        }
    }

    /// Validates the configuration and builds an authenticated HTTP client.
    pub fn new(config: &CelestiaConfig) -> Result<Self, DaError> {
        let namespace = config.namespace()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", config.celestia_rpc_auth_token)
                .parse()
                .map_err(|e| DaError::Config(format!("invalid auth token: {e}")))?,
        );

        let client = jsonrpsee::http_client::HttpClientBuilder::default()
            .set_headers(headers)
            .max_response_size(config.max_celestia_response_body_size)
            .max_request_size(config.max_celestia_response_body_size)
            .request_timeout(std::time::Duration::from_secs(
                config.celestia_rpc_timeout_seconds,
            ))
            .build(&config.celestia_rpc_address)
            .map_err(|e| {
                DaError::Config(format!(
                    "cannot connect to {}: {e}",
                    config.celestia_rpc_address
                ))
            })?;

        Ok(Self::with_client(client, namespace, config.gas_price))
    }

    /// The namespace blobs are published under.
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }
}

#[async_trait]
impl DaBackend for CelestiaBackend {
    type Proof = CelestiaProof;

    async fn submit(&self, blob: &[u8]) -> anyhow::Result<BlobPointer> {
        let bytes = blob.len();
        debug!(bytes, namespace = ?self.namespace, "Sending raw data to Celestia");

        let blob = JsonBlob::new(self.namespace, blob.to_vec())?;
        let commitment = BlobCommitment::new(blob.commitment.0);
        info!(%commitment, gas_price = ?self.gas_price, bytes, "Submitting a blob");

        let height = self.client.blob_submit(&[blob], self.gas_price).await?;

        info!(height, %commitment, "Blob has been submitted to Celestia");
        Ok(BlobPointer::new(height, commitment))
    }

    async fn get_proof(
        &self,
        height: u64,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<Self::Proof> {
        debug!(height, %commitment, "Fetching blob proof");
        let proof = self
            .client
            .blob_get_proof(height, self.namespace, Commitment(commitment.0))
            .await?;
        Ok(proof)
    }

    async fn check_included(
        &self,
        height: u64,
        proof: &Self::Proof,
        commitment: &BlobCommitment,
    ) -> anyhow::Result<bool> {
        if proof.is_empty() {
            debug!(height, %commitment, "Empty inclusion proof");
            return Ok(false);
        }
        for row_proof in proof {
            let included = self
                .client
                .blob_included(height, self.namespace, row_proof, Commitment(commitment.0))
                .await?;
            if !included {
                debug!(height, %commitment, "Blob row is not included");
                return Ok(false);
            }
        }
        debug!(height, %commitment, rows = proof.len(), "Blob is included");
        Ok(true)
    }

    async fn get_blob(&self, pointer: &BlobPointer) -> anyhow::Result<Vec<u8>> {
        debug!(height = pointer.height, commitment = %pointer.commitment, "Fetching blob");
        let blob = self
            .client
            .blob_get(
                pointer.height,
                self.namespace,
                Commitment(pointer.commitment.0),
            )
            .await?;

        if blob.commitment.0 != pointer.commitment.0 {
            anyhow::bail!(
                "Celestia returned blob with commitment 0x{} for {pointer}",
                hex::encode(blob.commitment.0)
            );
        }
        Ok(blob.data)
    }
}
