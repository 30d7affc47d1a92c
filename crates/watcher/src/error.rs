use alloy_primitives::{TxHash, B256};
use zkevm_providers::L1ProviderError;
use zkevm_sync_primitives::EventKind;

/// A [`Result`] that uses [`L1ScannerError`] as the error type.
pub(crate) type L1ScannerResult<T> = Result<T, L1ScannerError>;

/// An error that occurred with the L1 scanner.
#[derive(Debug, thiserror::Error)]
pub enum L1ScannerError {
    /// The L1 source failed to answer.
    #[error("l1 source unavailable: {0}")]
    Source(#[from] L1ProviderError),
    /// A recognized log could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The requested block range is empty.
    #[error("invalid block range: from {from} > to {to}")]
    InvalidRange {
        /// The first block of the range.
        from: u64,
        /// The last block of the range.
        to: u64,
    },
    /// An error related to logs in the L1 scanner.
    #[error(transparent)]
    Logs(#[from] FilterLogError),
    /// An Ethereum request error.
    #[error("failed Ethereum JSON RPC request: {0}")]
    EthRequest(#[from] EthRequestError),
}

/// An error occurred during a request to the L1 source.
#[derive(Debug, thiserror::Error)]
pub enum EthRequestError {
    /// The requested block does not exist.
    #[error("unknown block {0}")]
    MissingBlock(u64),
    /// The source has no latest block.
    #[error("missing latest block")]
    MissingLatestBlock,
    /// The requested transaction hash does not exist.
    #[error("unknown transaction {0}")]
    MissingTransactionHash(TxHash),
    /// The header of a block does not match the block hash of its logs, the chain reorganized
    /// during the scan.
    #[error("block {number} hash mismatch: log {log_hash}, header {header_hash}")]
    BlockHashMismatch {
        /// The block number.
        number: u64,
        /// The block hash carried by the log.
        log_hash: B256,
        /// The block hash of the header.
        header_hash: B256,
    },
}

/// An error that occurred when filtering logs.
#[derive(Debug, thiserror::Error)]
pub enum FilterLogError {
    /// The log is missing a block number.
    #[error("missing block number for log")]
    MissingBlockNumber,
    /// The log is missing a block hash.
    #[error("missing block hash for log")]
    MissingBlockHash,
    /// The log is missing a log index.
    #[error("missing log index for log")]
    MissingLogIndex,
    /// The log is missing a transaction hash.
    #[error("unknown transaction hash for log")]
    MissingTransactionHash,
}

/// An error that occurred when decoding a recognized log.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The log payload is malformed.
    #[error("failed to decode log of type {log_type}: {error}")]
    DecodeLogFailed {
        /// The type of the log.
        log_type: &'static str,
        /// The decoding error.
        error: alloy_sol_types::Error,
    },
    /// The calldata of the emitting transaction is malformed.
    #[error("failed to decode call of type {call_type}: {error}")]
    DecodeCallFailed {
        /// The type of the call.
        call_type: &'static str,
        /// The decoding error.
        error: alloy_sol_types::Error,
    },
    /// The calldata of the emitting transaction has an unknown selector.
    #[error("unknown call selector for {kind} in transaction {tx_hash}")]
    UnknownCallSelector {
        /// The kind of the event.
        kind: EventKind,
        /// The hash of the emitting transaction.
        tx_hash: TxHash,
    },
    /// The emitting transaction is required to decode the event.
    #[error("missing transaction to decode {0}")]
    MissingTransaction(EventKind),
    /// The log is missing a field required by the event.
    #[error("missing {0} for log")]
    MissingLogField(&'static str),
    /// The last batch number of the sequence is lower than the number of batches.
    #[error("batch number underflow: last batch {num_batch} for {count} batches")]
    BatchNumberUnderflow {
        /// The last batch number of the sequence.
        num_batch: u64,
        /// The number of batches in the sequence.
        count: usize,
    },
    /// The forced batch number does not follow the previous one.
    #[error("non sequential forced batch: expected {expected}, got {got}")]
    NonSequentialForcedBatch {
        /// The expected forced batch number.
        expected: u64,
        /// The received forced batch number.
        got: u64,
    },
}
