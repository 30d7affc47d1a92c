//! The payload of a batch sequencing transaction.

use crate::SequenceError;
use alloy_primitives::{keccak256, Address, Bytes, B256};
use alloy_sol_types::SolCall;
use zkevm_l1::abi::calls::{sequenceBatches_1Call, ValidiumBatchData};

/// A batch to be sequenced on L1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The global exit root of the batch.
    pub global_exit_root: B256,
    /// The timestamp of the batch.
    pub timestamp: u64,
    /// The L2 transactions of the batch.
    pub batch_l2_data: Bytes,
    /// The timestamp of the forced batch the batch redeems, zero for a regular batch.
    pub min_forced_timestamp: u64,
}

impl Sequence {
    /// Returns the hash of the batch L2 transactions.
    pub fn transactions_hash(&self) -> B256 {
        keccak256(&self.batch_l2_data)
    }
}

/// A validated sequencing payload, committing to the hash of each batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePayload {
    call: sequenceBatches_1Call,
}

impl SequencePayload {
    /// Returns the batches of the payload.
    pub fn batches(&self) -> &[ValidiumBatchData] {
        &self.call.batches
    }

    /// Returns the L2 coinbase of the payload.
    pub const fn coinbase(&self) -> Address {
        self.call.l2Coinbase
    }

    /// Returns the committee signatures and addresses attached to the payload.
    pub const fn extra_data(&self) -> &Bytes {
        &self.call.signaturesAndAddrs
    }

    /// Returns the ABI encoded `sequenceBatches` calldata.
    pub fn calldata(&self) -> Bytes {
        self.call.abi_encode().into()
    }
}

/// Builds the sequencing payload for the provided sequences. The sequences must be non-empty with
/// non-decreasing timestamps.
pub fn build_sequence_payload(
    sequences: &[Sequence],
    coinbase: Address,
    extra_data: Bytes,
) -> Result<SequencePayload, SequenceError> {
    if sequences.is_empty() {
        return Err(SequenceError::Empty);
    }

    for (index, pair) in sequences.windows(2).enumerate() {
        let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
        if current < previous {
            return Err(SequenceError::OutOfOrderTimestamp { index: index + 1, previous, current });
        }
    }

    let batches = sequences
        .iter()
        .map(|sequence| ValidiumBatchData {
            transactionsHash: sequence.transactions_hash(),
            globalExitRoot: sequence.global_exit_root,
            timestamp: sequence.timestamp,
            minForcedTimestamp: sequence.min_forced_timestamp,
        })
        .collect();

    Ok(SequencePayload {
        call: sequenceBatches_1Call {
            batches,
            l2Coinbase: coinbase,
            signaturesAndAddrs: extra_data,
        },
    })
}
