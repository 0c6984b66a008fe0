use ethers_core::types::{Address, Bloom, Bytes, H256, U256, U64};
use ethers_core::utils::keccak256;
use ethers_core::utils::rlp::RlpStream;
use serde::{Deserialize, Serialize};

use crate::RskHeaderError;

/// Number of items in the RLP list an RSK header hash is computed over.
const HASHED_FIELDS: usize = 18;

/// An RSK block header as returned by `eth_getBlockByNumber`.
///
/// Unknown fields of the response, such as the transactions or the total difficulty,
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RskHeader {
    /// Hash of the parent block.
    pub parent_hash: H256,
    /// Hash of the uncle list.
    #[serde(rename = "sha3Uncles")]
    pub uncles_hash: H256,
    /// Address receiving the block reward.
    pub miner: Address,
    /// State trie root after the block.
    pub state_root: H256,
    /// Transaction trie root.
    pub transactions_root: H256,
    /// Receipt trie root.
    pub receipts_root: H256,
    /// Bloom filter of the block logs.
    pub logs_bloom: Bloom,
    /// Block difficulty.
    pub difficulty: U256,
    /// Block number.
    pub number: U256,
    /// Gas limit.
    pub gas_limit: U64,
    /// Gas used by the block transactions.
    pub gas_used: U64,
    /// Unix timestamp, in seconds.
    pub timestamp: U64,
    /// Free-form miner data.
    pub extra_data: Bytes,
    /// Fees paid by the block transactions.
    pub paid_fees: U256,
    /// Minimum gas price accepted in the block.
    pub minimum_gas_price: U64,
    /// Only the number of uncles is hashed.
    #[serde(default)]
    pub uncles: Vec<H256>,
    /// Missing on nodes that predate the UMM upgrade; hashed as empty bytes.
    #[serde(default)]
    pub umm_root: Option<Bytes>,
    /// Bitcoin block header carrying the merged mining proof of work.
    pub bitcoin_merged_mining_header: Bytes,
    /// The hash reported by the node.
    #[serde(rename = "hash")]
    pub reported_hash: H256,
}

impl RskHeader {
    /// RLP encoding of the fields covered by the header hash.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        let mut stream = RlpStream::new_list(HASHED_FIELDS);
        stream
            .append(&self.parent_hash)
            .append(&self.uncles_hash)
            .append(&self.miner)
            .append(&self.state_root)
            .append(&self.transactions_root)
            .append(&self.receipts_root)
            .append(&self.logs_bloom)
            .append(&self.difficulty)
            .append(&self.number)
            .append(&self.gas_limit.as_u64())
            .append(&self.gas_used.as_u64())
            .append(&self.timestamp.as_u64())
            .append(&self.extra_data.to_vec())
            .append(&self.paid_fees)
            .append(&self.minimum_gas_price.as_u64())
            .append(&(self.uncles.len() as u64))
            .append(&self.umm_root.as_ref().map(|root| root.to_vec()).unwrap_or_default())
            .append(&self.bitcoin_merged_mining_header.to_vec());
        stream.out().to_vec()
    }

    /// Recomputes the header hash.
    pub fn hash(&self) -> H256 {
        H256(keccak256(self.rlp_bytes()))
    }

    /// Checks that the recomputed hash matches the one reported by the node.
    pub fn verify_hash(&self) -> Result<H256, RskHeaderError> {
        let computed = self.hash();
        if computed != self.reported_hash {
            return Err(RskHeaderError::HashMismatch {
                number: self.number,
                reported: self.reported_hash,
                computed,
            });
        }
        Ok(computed)
    }
}
