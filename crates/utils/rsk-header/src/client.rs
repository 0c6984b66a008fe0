use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use tracing::{debug, warn};

use crate::{RskHeader, RskHeaderError};

/// Fetches block headers from an RSK node.
#[derive(Debug, Clone)]
pub struct RskHeaderClient {
    client: HttpClient,
}

impl RskHeaderClient {
    /// Connects to the JSON-RPC endpoint at `url`.
    pub fn new(url: &str) -> Result<Self, RskHeaderError> {
        let client = HttpClientBuilder::default().build(url)?;
        Ok(Self { client })
    }

    /// Returns the header of block `number` without transactions.
    pub async fn header_by_number(&self, number: u64) -> Result<RskHeader, RskHeaderError> {
        debug!(number, "Fetching RSK header");
        let header: Option<RskHeader> = self
            .client
            .request(
                "eth_getBlockByNumber",
                rpc_params![format!("{number:#x}"), false],
            )
            .await?;
        header.ok_or(RskHeaderError::BlockNotFound(number))
    }

    /// Returns the header of block `number` once its recomputed hash matches the reported one.
    pub async fn verified_header_by_number(
        &self,
        number: u64,
    ) -> Result<RskHeader, RskHeaderError> {
        let header = self.header_by_number(number).await?;
        if let Err(e) = header.verify_hash() {
            warn!(number, error = %e, "RSK header hash does not match");
            return Err(e);
        }
        Ok(header)
    }
}
