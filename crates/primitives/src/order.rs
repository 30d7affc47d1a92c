use crate::L1Block;
use alloy_primitives::B256;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// The kind of a rollup event, used to order the events of an L1 block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum EventKind {
    /// A global exit root update.
    GlobalExitRoot,
    /// A forced batch.
    ForcedBatch,
    /// A sequencing of batches.
    SequenceBatches,
    /// A sequencing of forced batches.
    SequenceForceBatches,
    /// A verification of batches by the trusted aggregator.
    TrustedVerifyBatches,
    /// A verification of batches.
    VerifyBatches,
    /// A fork id update.
    ForkId,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::GlobalExitRoot => "GlobalExitRoot",
            Self::ForcedBatch => "ForcedBatch",
            Self::SequenceBatches => "SequenceBatches",
            Self::SequenceForceBatches => "SequenceForceBatches",
            Self::TrustedVerifyBatches => "TrustedVerifyBatches",
            Self::VerifyBatches => "VerifyBatches",
            Self::ForkId => "ForkId",
        };
        f.write_str(name)
    }
}

/// The position of an event in its L1 block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    /// The kind of the event.
    pub kind: EventKind,
    /// The position of the event in the block, across all kinds.
    pub position: usize,
    /// The index of the event in the typed slot of the block matching its kind.
    pub index: usize,
}

/// The order of the events, per L1 block hash.
pub type OrderIndex = HashMap<B256, Vec<OrderEntry>>;

/// The result of a range scan: the L1 blocks in ascending order and the order of their events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RollupInfo {
    /// The L1 blocks containing rollup events.
    pub blocks: Vec<L1Block>,
    /// The order of the events, per block hash.
    pub order: OrderIndex,
}

impl RollupInfo {
    /// Returns the order entries for the given block hash.
    pub fn order_of(&self, hash: &B256) -> &[OrderEntry] {
        self.order.get(hash).map(Vec::as_slice).unwrap_or_default()
    }
}
