#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod client;
mod header;

pub use client::RskHeaderClient;
pub use header::RskHeader;

/// Errors raised while fetching or checking an RSK header.
#[derive(Debug, thiserror::Error)]
pub enum RskHeaderError {
    /// The recomputed hash differs from the one reported by the node.
    #[error("Header hash mismatch at block {number}: reported {reported:?}, computed {computed:?}")]
    HashMismatch {
        /// Number of the offending block.
        number: ethers_core::types::U256,
        /// Hash reported by the node.
        reported: ethers_core::types::H256,
        /// Hash recomputed from the header fields.
        computed: ethers_core::types::H256,
    },
    /// The node does not know the requested block.
    #[error("Block {0} not found")]
    BlockNotFound(u64),
    /// The JSON-RPC call failed.
    #[error("RSK RPC error: {0}")]
    Rpc(#[from] jsonrpsee::core::Error),
}
