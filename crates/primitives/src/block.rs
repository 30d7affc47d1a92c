use crate::{
    EventKind, ForcedBatch, ForkId, GlobalExitRoot, RollupEvent, SequencedBatch,
    SequencedForceBatch, VerifiedBatch,
};
use alloy_primitives::B256;
use std::fmt::{Display, Formatter};

/// Information about a block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BlockInfo {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

impl BlockInfo {
    /// Returns a new instance of [`BlockInfo`].
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

impl Display for BlockInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockInfo {{ number: {}, hash: {} }}", self.number, self.hash)
    }
}

/// The subset of an L1 header the synchronization core relies on.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct L1Header {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The hash of the parent block.
    pub parent_hash: B256,
    /// The block timestamp, in unix seconds.
    pub timestamp: u64,
}

impl From<&L1Header> for BlockInfo {
    fn from(value: &L1Header) -> Self {
        Self { number: value.number, hash: value.hash }
    }
}

/// An L1 block along with the rollup events it contains, in their typed slots.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct L1Block {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The hash of the parent block.
    pub parent_hash: B256,
    /// The block timestamp, in unix seconds.
    pub timestamp: u64,
    /// The global exit root updates.
    pub global_exit_roots: Vec<GlobalExitRoot>,
    /// The forced batches.
    pub forced_batches: Vec<ForcedBatch>,
    /// The sequenced batches, one entry per sequencing transaction.
    pub sequenced_batches: Vec<Vec<SequencedBatch>>,
    /// The verified batches, trusted and untrusted.
    pub verified_batches: Vec<VerifiedBatch>,
    /// The force-sequenced batches, one entry per sequencing transaction.
    pub sequenced_force_batches: Vec<Vec<SequencedForceBatch>>,
    /// The fork id updates.
    pub fork_ids: Vec<ForkId>,
}

impl L1Block {
    /// Returns an empty [`L1Block`] for the provided header.
    pub fn new(header: &L1Header) -> Self {
        Self {
            number: header.number,
            hash: header.hash,
            parent_hash: header.parent_hash,
            timestamp: header.timestamp,
            ..Default::default()
        }
    }

    /// Returns the [`BlockInfo`] of the block.
    pub const fn info(&self) -> BlockInfo {
        BlockInfo::new(self.number, self.hash)
    }

    /// Pushes the event in its typed slot. Returns the kind of the event along with its index in
    /// the slot.
    pub fn push(&mut self, event: RollupEvent) -> (EventKind, usize) {
        let kind = event.kind();
        let index = match event {
            RollupEvent::GlobalExitRoot(ger) => push_indexed(&mut self.global_exit_roots, ger),
            RollupEvent::ForcedBatch(batch) => push_indexed(&mut self.forced_batches, batch),
            RollupEvent::SequencedBatches(batches) => {
                push_indexed(&mut self.sequenced_batches, batches)
            }
            RollupEvent::VerifiedBatch(batch) => push_indexed(&mut self.verified_batches, batch),
            RollupEvent::SequencedForceBatches(batches) => {
                push_indexed(&mut self.sequenced_force_batches, batches)
            }
            RollupEvent::ForkId(fork) => push_indexed(&mut self.fork_ids, fork),
        };
        (kind, index)
    }

    /// Returns true if the block holds no rollup event.
    pub fn is_empty(&self) -> bool {
        self.global_exit_roots.is_empty() &&
            self.forced_batches.is_empty() &&
            self.sequenced_batches.is_empty() &&
            self.verified_batches.is_empty() &&
            self.sequenced_force_batches.is_empty() &&
            self.fork_ids.is_empty()
    }
}

fn push_indexed<T>(slot: &mut Vec<T>, value: T) -> usize {
    slot.push(value);
    slot.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};

    #[test]
    fn test_push_returns_slot_index() {
        let header = L1Header { number: 7, timestamp: 42, ..Default::default() };
        let mut block = L1Block::new(&header);
        assert!(block.is_empty());

        let ger = GlobalExitRoot::new(7, B256::repeat_byte(1), B256::repeat_byte(2), 42);
        let forced = ForcedBatch {
            block_number: 7,
            forced_batch_number: 1,
            sequencer: Address::ZERO,
            global_exit_root: B256::ZERO,
            raw_txs_data: Bytes::new(),
            forced_at: 42,
        };

        assert_eq!(block.push(ger.into()), (EventKind::GlobalExitRoot, 0));
        assert_eq!(block.push(forced.into()), (EventKind::ForcedBatch, 0));
        assert_eq!(block.push(ger.into()), (EventKind::GlobalExitRoot, 1));
        assert_eq!(block.global_exit_roots.len(), 2);
        assert_eq!(block.info(), BlockInfo::new(7, B256::ZERO));
        assert!(!block.is_empty());
    }
}
