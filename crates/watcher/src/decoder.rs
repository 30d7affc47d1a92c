use crate::{DecodeError, ForcedBatchIndex};

use alloy_primitives::{keccak256, Address, TxHash};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::{SolCall, SolEvent};
use zkevm_l1::abi::{
    calls::{sequenceForceBatchesCall, try_decode_force_batch_transactions, SequenceBatchesCall},
    logs::{
        ForceBatch, SequenceBatches, SequenceForceBatches, UpdateGlobalExitRoot,
        UpdateZkEVMVersion, VerifyBatches, VerifyBatchesTrustedAggregator,
    },
};
use zkevm_sync_primitives::{
    BatchData, EventKind, ForcedBatch, ForkId, GlobalExitRoot, L1Header, L1Transaction,
    RollupEvent, SequenceMetadata, SequencedBatch, SequencedForceBatch, VerifiedBatch,
};

/// The addresses of the contracts tracked on L1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackedContracts {
    /// The rollup contract.
    pub rollup: Address,
    /// The global exit root manager contract.
    pub global_exit_root_manager: Address,
    /// The bridge contract.
    pub bridge: Address,
    /// The data availability committee contract, for validium deployments.
    pub data_committee: Option<Address>,
}

impl TrackedContracts {
    /// Returns the addresses of every tracked contract.
    pub fn addresses(&self) -> Vec<Address> {
        [self.rollup, self.global_exit_root_manager, self.bridge]
            .into_iter()
            .chain(self.data_committee)
            .collect()
    }
}

/// Decodes the logs of the tracked contracts into [`RollupEvent`].
#[derive(Debug, Clone)]
pub struct EventDecoder {
    contracts: TrackedContracts,
}

impl EventDecoder {
    /// Returns a new [`EventDecoder`] for the provided contracts.
    pub const fn new(contracts: TrackedContracts) -> Self {
        Self { contracts }
    }

    /// Returns the tracked contracts.
    pub const fn contracts(&self) -> &TrackedContracts {
        &self.contracts
    }

    /// Returns the [`EventKind`] of the log, or `None` if the log is not a rollup event.
    pub fn kind(&self, log: &Log) -> Option<EventKind> {
        let topic = *log.topic0()?;
        let address = log.address();

        if address == self.contracts.global_exit_root_manager {
            return (topic == UpdateGlobalExitRoot::SIGNATURE_HASH)
                .then_some(EventKind::GlobalExitRoot);
        }
        if address != self.contracts.rollup {
            return None;
        }

        match topic {
            ForceBatch::SIGNATURE_HASH => Some(EventKind::ForcedBatch),
            SequenceBatches::SIGNATURE_HASH => Some(EventKind::SequenceBatches),
            SequenceForceBatches::SIGNATURE_HASH => Some(EventKind::SequenceForceBatches),
            VerifyBatchesTrustedAggregator::SIGNATURE_HASH => {
                Some(EventKind::TrustedVerifyBatches)
            }
            VerifyBatches::SIGNATURE_HASH => Some(EventKind::VerifyBatches),
            UpdateZkEVMVersion::SIGNATURE_HASH => Some(EventKind::ForkId),
            _ => None,
        }
    }

    /// Returns true if the emitting transaction is needed to decode the log. A forced batch only
    /// needs it when the log carries no transactions, which happens on direct calls.
    pub fn requires_transaction(&self, log: &Log) -> bool {
        match self.kind(log) {
            Some(EventKind::SequenceBatches | EventKind::SequenceForceBatches) => true,
            Some(EventKind::ForcedBatch) => {
                ForceBatch::decode_log(&log.inner).is_ok_and(|log| log.data.transactions.is_empty())
            }
            _ => false,
        }
    }

    /// Decodes the log into a [`RollupEvent`]. Returns `None` if the log is not a rollup event.
    ///
    /// Forced batches are inserted in the index, sequenced batches redeem from it.
    #[tracing::instrument(skip_all, fields(block = header.number, log_index = ?log.log_index))]
    pub fn decode(
        &self,
        log: &Log,
        header: &L1Header,
        transaction: Option<&L1Transaction>,
        forced_batches: &mut ForcedBatchIndex,
    ) -> Result<Option<RollupEvent>, DecodeError> {
        let Some(kind) = self.kind(log) else { return Ok(None) };

        let event = match kind {
            EventKind::GlobalExitRoot => decode_global_exit_root(log, header)?.into(),
            EventKind::ForcedBatch => {
                let batch = decode_forced_batch(log, header, transaction)?;
                forced_batches.insert(&batch)?;
                batch.into()
            }
            EventKind::SequenceBatches => {
                let transaction = transaction.ok_or(DecodeError::MissingTransaction(kind))?;
                decode_sequenced_batches(log, transaction, forced_batches)?.into()
            }
            EventKind::SequenceForceBatches => {
                let transaction = transaction.ok_or(DecodeError::MissingTransaction(kind))?;
                decode_sequenced_force_batches(log, header, transaction, forced_batches)?.into()
            }
            EventKind::TrustedVerifyBatches => decode_verified_batch(log, header, true)?.into(),
            EventKind::VerifyBatches => decode_verified_batch(log, header, false)?.into(),
            EventKind::ForkId => decode_fork_id(log, header.number)?.into(),
        };

        tracing::trace!(target: "zkevm::watcher", %kind, "decoded event");
        Ok(Some(event))
    }
}

/// Decodes a `UpdateZkEVMVersion` log emitted in the provided block.
pub fn decode_fork_id(log: &Log, block_number: u64) -> Result<ForkId, DecodeError> {
    let event = decode_log::<UpdateZkEVMVersion>(log, "UpdateZkEVMVersion")?;
    Ok(ForkId {
        block_number,
        log_index: log.log_index.ok_or(DecodeError::MissingLogField("log index"))?,
        batch_number: event.numBatch,
        fork_id: event.forkID,
        version: event.version,
    })
}

fn decode_log<T: SolEvent>(log: &Log, log_type: &'static str) -> Result<T, DecodeError> {
    T::decode_log(&log.inner)
        .map(|log| log.data)
        .map_err(|error| DecodeError::DecodeLogFailed { log_type, error })
}

fn transaction_hash(log: &Log) -> Result<TxHash, DecodeError> {
    log.transaction_hash.ok_or(DecodeError::MissingLogField("transaction hash"))
}

/// Returns the batch number of batch `index` in a sequence of `count` batches ending at
/// `num_batch`.
fn batch_number(num_batch: u64, count: usize, index: usize) -> Result<u64, DecodeError> {
    let offset = (count - 1 - index) as u64;
    num_batch.checked_sub(offset).ok_or(DecodeError::BatchNumberUnderflow { num_batch, count })
}

fn decode_global_exit_root(log: &Log, header: &L1Header) -> Result<GlobalExitRoot, DecodeError> {
    let event = decode_log::<UpdateGlobalExitRoot>(log, "UpdateGlobalExitRoot")?;
    Ok(GlobalExitRoot::new(
        header.number,
        event.mainnetExitRoot,
        event.rollupExitRoot,
        header.timestamp,
    ))
}

fn decode_forced_batch(
    log: &Log,
    header: &L1Header,
    transaction: Option<&L1Transaction>,
) -> Result<ForcedBatch, DecodeError> {
    let event = decode_log::<ForceBatch>(log, "ForceBatch")?;

    let raw_txs_data = if event.transactions.is_empty() {
        let transaction =
            transaction.ok_or(DecodeError::MissingTransaction(EventKind::ForcedBatch))?;
        try_decode_force_batch_transactions(&transaction.input)
            .ok_or(DecodeError::UnknownCallSelector {
                kind: EventKind::ForcedBatch,
                tx_hash: transaction.hash,
            })?
            .map_err(|error| DecodeError::DecodeCallFailed { call_type: "forceBatch", error })?
    } else {
        event.transactions
    };

    Ok(ForcedBatch {
        block_number: header.number,
        forced_batch_number: event.forceBatchNum,
        sequencer: event.sequencer,
        global_exit_root: event.lastGlobalExitRoot,
        raw_txs_data,
        forced_at: header.timestamp,
    })
}

fn decode_sequenced_batches(
    log: &Log,
    transaction: &L1Transaction,
    forced_batches: &mut ForcedBatchIndex,
) -> Result<Vec<SequencedBatch>, DecodeError> {
    let event = decode_log::<SequenceBatches>(log, "SequenceBatches")?;
    let call = SequenceBatchesCall::try_decode(&transaction.input)
        .ok_or(DecodeError::UnknownCallSelector {
            kind: EventKind::SequenceBatches,
            tx_hash: transaction.hash,
        })?
        .map_err(|error| DecodeError::DecodeCallFailed { call_type: "sequenceBatches", error })?;

    let metadata = SequenceMetadata { coinbase: call.coinbase(), sequencer: transaction.from };
    let batches = call.batches();
    let count = batches.len();

    batches
        .into_iter()
        .enumerate()
        .map(|(index, batch)| {
            let min_forced_timestamp = if batch.min_forced_timestamp == 0 {
                0
            } else {
                forced_batches
                    .redeem(&batch.transactions_hash)
                    .unwrap_or(batch.min_forced_timestamp)
            };

            Ok(SequencedBatch {
                batch_number: batch_number(event.numBatch, count, index)?,
                tx_hash: transaction.hash,
                data: BatchData {
                    global_exit_root: batch.global_exit_root,
                    timestamp: batch.timestamp,
                    min_forced_timestamp,
                    transactions_hash: batch.transactions_hash,
                },
                metadata,
            })
        })
        .collect()
}

fn decode_sequenced_force_batches(
    log: &Log,
    header: &L1Header,
    transaction: &L1Transaction,
    forced_batches: &mut ForcedBatchIndex,
) -> Result<Vec<SequencedForceBatch>, DecodeError> {
    let event = decode_log::<SequenceForceBatches>(log, "SequenceForceBatches")?;
    if !transaction.input.starts_with(&sequenceForceBatchesCall::SELECTOR) {
        return Err(DecodeError::UnknownCallSelector {
            kind: EventKind::SequenceForceBatches,
            tx_hash: transaction.hash,
        });
    }
    let call = sequenceForceBatchesCall::abi_decode(&transaction.input).map_err(|error| {
        DecodeError::DecodeCallFailed { call_type: "sequenceForceBatches", error }
    })?;
    let count = call.batches.len();

    call.batches
        .into_iter()
        .enumerate()
        .map(|(index, batch)| {
            let transactions_hash = keccak256(&batch.transactions);
            let min_forced_timestamp =
                forced_batches.redeem(&transactions_hash).unwrap_or(batch.minForcedTimestamp);

            Ok(SequencedForceBatch {
                batch_number: batch_number(event.numBatch, count, index)?,
                tx_hash: transaction.hash,
                coinbase: transaction.from,
                timestamp: header.timestamp,
                global_exit_root: batch.globalExitRoot,
                transactions: batch.transactions,
                min_forced_timestamp,
            })
        })
        .collect()
}

fn decode_verified_batch(
    log: &Log,
    header: &L1Header,
    trusted: bool,
) -> Result<VerifiedBatch, DecodeError> {
    let (batch_number, state_root, aggregator) = if trusted {
        let event =
            decode_log::<VerifyBatchesTrustedAggregator>(log, "VerifyBatchesTrustedAggregator")?;
        (event.numBatch, event.stateRoot, event.aggregator)
    } else {
        let event = decode_log::<VerifyBatches>(log, "VerifyBatches")?;
        (event.numBatch, event.stateRoot, event.aggregator)
    };

    Ok(VerifiedBatch {
        block_number: header.number,
        batch_number,
        aggregator,
        tx_hash: transaction_hash(log)?,
        state_root,
        trusted,
    })
}
