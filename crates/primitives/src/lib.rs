//! Primitive types for the zkEVM L1 synchronization core.

pub use block::{BlockInfo, L1Block, L1Header};
mod block;

pub use event::{
    BatchData, ForcedBatch, ForkId, GlobalExitRoot, RollupEvent, SequenceMetadata,
    SequencedBatch, SequencedForceBatch, VerifiedBatch,
};
mod event;

pub use fork::{ForkIdInterval, GENESIS_FORK_ID, GENESIS_FORK_VERSION, OPEN_BATCH_NUMBER};
mod fork;

pub use order::{EventKind, OrderEntry, OrderIndex, RollupInfo};
mod order;

pub use transaction::L1Transaction;
mod transaction;
