//! Blocks and blobs held by the mock DA layer.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use seqda_interface::BlobCommitment;

use crate::proof::{block_hash, MockHash};
use crate::MockFault;

/// A blob together with the block it was included in.
pub(crate) struct StoredBlob {
    pub(crate) commitment: BlobCommitment,
    pub(crate) data: Vec<u8>,
    pub(crate) block_hash: MockHash,
}

/// Every blob lands in its own block. Heights start at 1.
pub(crate) struct MockDaLayer {
    /// Height of the next block to be produced.
    next_height: u64,
    blocks: HashMap<u64, StoredBlob>,
    faults: HashSet<MockFault>,
    /// Confirmation delays keyed by exact payload.
    delays: HashMap<Vec<u8>, Duration>,
}

impl MockDaLayer {
    pub(crate) fn new() -> Self {
        Self {
            next_height: 1,
            blocks: HashMap::new(),
            faults: HashSet::new(),
            delays: HashMap::new(),
        }
    }

    /// Produces a block holding `data` and returns its height.
    pub(crate) fn include(&mut self, commitment: BlobCommitment, data: Vec<u8>) -> u64 {
        let height = self.next_height;
        self.blocks.insert(
            height,
            StoredBlob {
                commitment,
                data,
                block_hash: block_hash(height, &commitment),
            },
        );
        self.next_height += 1;
        height
    }

    pub(crate) fn blob_at(&self, height: u64, commitment: &BlobCommitment) -> Option<&StoredBlob> {
        self.blocks
            .get(&height)
            .filter(|stored| &stored.commitment == commitment)
    }

    /// Height of the last produced block, `0` if there is none.
    pub(crate) fn head_height(&self) -> u64 {
        self.next_height - 1
    }

    pub(crate) fn has_fault(&self, fault: MockFault) -> bool {
        self.faults.contains(&fault)
    }

    pub(crate) fn set_fault(&mut self, fault: MockFault, enabled: bool) {
        if enabled {
            self.faults.insert(fault);
        } else {
            self.faults.remove(&fault);
        }
    }

    pub(crate) fn delay_for(&self, payload: &[u8]) -> Option<Duration> {
        self.delays.get(payload).copied()
    }

    pub(crate) fn set_delay(&mut self, payload: Vec<u8>, delay: Duration) {
        self.delays.insert(payload, delay);
    }
}
