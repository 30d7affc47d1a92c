use crate::EventKind;
use alloy_primitives::{keccak256, Address, Bytes, B256};

/// An update of the global exit root, emitted by the global exit root manager.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct GlobalExitRoot {
    /// The L1 block number of the update.
    pub block_number: u64,
    /// The mainnet exit root.
    pub mainnet_exit_root: B256,
    /// The rollup exit root.
    pub rollup_exit_root: B256,
    /// The global exit root, `keccak256(mainnet_exit_root ‖ rollup_exit_root)`.
    pub global_exit_root: B256,
    /// The timestamp of the L1 block of the update.
    pub timestamp: u64,
}

impl GlobalExitRoot {
    /// Returns a new [`GlobalExitRoot`], computing the combined root from its two halves.
    pub fn new(
        block_number: u64,
        mainnet_exit_root: B256,
        rollup_exit_root: B256,
        timestamp: u64,
    ) -> Self {
        let global_exit_root = keccak256([mainnet_exit_root.0, rollup_exit_root.0].concat());
        Self { block_number, mainnet_exit_root, rollup_exit_root, global_exit_root, timestamp }
    }
}

/// A batch forced on the rollup contract, bypassing the trusted sequencer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ForcedBatch {
    /// The L1 block number at which the batch was forced.
    pub block_number: u64,
    /// The forced batch number assigned by the contract.
    pub forced_batch_number: u64,
    /// The account that forced the batch.
    pub sequencer: Address,
    /// The last global exit root at the time the batch was forced.
    pub global_exit_root: B256,
    /// The raw L2 transactions of the batch.
    pub raw_txs_data: Bytes,
    /// The unix timestamp at which the batch was forced.
    pub forced_at: u64,
}

impl ForcedBatch {
    /// Returns the hash of the raw transactions, as committed to by a sequencing transaction.
    pub fn transactions_hash(&self) -> B256 {
        keccak256(&self.raw_txs_data)
    }
}

/// The per-batch data of a sequencing transaction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BatchData {
    /// The global exit root of the batch.
    pub global_exit_root: B256,
    /// The timestamp of the batch.
    pub timestamp: u64,
    /// The timestamp of the forced batch this batch redeems, zero for a regular batch.
    pub min_forced_timestamp: u64,
    /// The hash of the batch L2 transactions.
    pub transactions_hash: B256,
}

/// The metadata shared by all the batches of a sequencing transaction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SequenceMetadata {
    /// The L2 coinbase.
    pub coinbase: Address,
    /// The account which sent the sequencing transaction.
    pub sequencer: Address,
}

/// A batch sequenced by the trusted sequencer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SequencedBatch {
    /// The batch number.
    pub batch_number: u64,
    /// The hash of the sequencing transaction.
    pub tx_hash: B256,
    /// The batch data.
    pub data: BatchData,
    /// The sequence metadata.
    pub metadata: SequenceMetadata,
}

/// A batch verified on the rollup contract.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct VerifiedBatch {
    /// The L1 block number of the verification.
    pub block_number: u64,
    /// The last verified batch number.
    pub batch_number: u64,
    /// The aggregator that submitted the proof.
    pub aggregator: Address,
    /// The hash of the verification transaction.
    pub tx_hash: B256,
    /// The new state root.
    pub state_root: B256,
    /// Whether the batch was verified by the trusted aggregator.
    pub trusted: bool,
}

/// A forced batch sequenced through the force-sequencing path.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SequencedForceBatch {
    /// The batch number.
    pub batch_number: u64,
    /// The hash of the sequencing transaction.
    pub tx_hash: B256,
    /// The account which sent the sequencing transaction.
    pub coinbase: Address,
    /// The timestamp of the L1 block the batch was sequenced in.
    pub timestamp: u64,
    /// The global exit root of the batch.
    pub global_exit_root: B256,
    /// The raw L2 transactions of the batch.
    pub transactions: Bytes,
    /// The timestamp at which the redeemed batch was forced.
    pub min_forced_timestamp: u64,
}

/// A fork id update as observed on L1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ForkId {
    /// The L1 block number of the update.
    pub block_number: u64,
    /// The index of the log in the L1 block.
    pub log_index: u64,
    /// The last batch number of the previous fork.
    pub batch_number: u64,
    /// The new fork id.
    pub fork_id: u64,
    /// The version string of the new fork.
    pub version: String,
}

impl ForkId {
    /// Returns the first batch number ruled by the fork.
    pub const fn first_batch_number(&self) -> u64 {
        self.batch_number.saturating_add(1)
    }
}

/// A decoded rollup event, ready to be appended to its [`crate::L1Block`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum RollupEvent {
    /// A global exit root update.
    GlobalExitRoot(GlobalExitRoot),
    /// A forced batch.
    ForcedBatch(ForcedBatch),
    /// The batches of a sequencing transaction.
    SequencedBatches(Vec<SequencedBatch>),
    /// The batches of a force-sequencing transaction.
    SequencedForceBatches(Vec<SequencedForceBatch>),
    /// A batch verification.
    VerifiedBatch(VerifiedBatch),
    /// A fork id update.
    ForkId(ForkId),
}

impl RollupEvent {
    /// Returns the [`EventKind`] of the event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::GlobalExitRoot(_) => EventKind::GlobalExitRoot,
            Self::ForcedBatch(_) => EventKind::ForcedBatch,
            Self::SequencedBatches(_) => EventKind::SequenceBatches,
            Self::SequencedForceBatches(_) => EventKind::SequenceForceBatches,
            Self::VerifiedBatch(batch) if batch.trusted => EventKind::TrustedVerifyBatches,
            Self::VerifiedBatch(_) => EventKind::VerifyBatches,
            Self::ForkId(_) => EventKind::ForkId,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn test_global_exit_root_hash() {
        let mainnet = b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
        let ger = GlobalExitRoot::new(1, mainnet, B256::ZERO, 10);

        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(mainnet.as_slice());
        assert_eq!(ger.global_exit_root, keccak256(preimage));
    }

    #[test]
    fn test_verified_batch_kind_follows_trust() {
        let trusted = VerifiedBatch { trusted: true, ..Default::default() };
        let untrusted = VerifiedBatch::default();

        assert_eq!(RollupEvent::from(trusted).kind(), EventKind::TrustedVerifyBatches);
        assert_eq!(RollupEvent::from(untrusted).kind(), EventKind::VerifyBatches);
    }

    #[test]
    fn test_fork_id_first_batch() {
        let fork = ForkId { batch_number: 49, fork_id: 2, ..Default::default() };
        assert_eq!(fork.first_batch_number(), 50);
    }
}
