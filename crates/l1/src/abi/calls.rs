use alloy_primitives::{keccak256, Address, Bytes, B256};
use alloy_sol_types::{sol, SolCall};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct BatchData {
        bytes transactions;
        bytes32 globalExitRoot;
        uint64 timestamp;
        uint64 minForcedTimestamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct ValidiumBatchData {
        bytes32 transactionsHash;
        bytes32 globalExitRoot;
        uint64 timestamp;
        uint64 minForcedTimestamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct ForcedBatchData {
        bytes transactions;
        bytes32 globalExitRoot;
        uint64 minForcedTimestamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    function sequenceBatches(BatchData[] batches, address l2Coinbase) external;

    #[derive(Debug, PartialEq, Eq)]
    function sequenceBatches(
        ValidiumBatchData[] batches,
        address l2Coinbase,
        bytes signaturesAndAddrs
    ) external;

    #[derive(Debug, PartialEq, Eq)]
    function sequenceForceBatches(ForcedBatchData[] batches) external;

    #[derive(Debug, PartialEq, Eq)]
    function forceBatch(bytes transactions, uint256 maticAmount) external;

    #[derive(Debug, PartialEq, Eq)]
    function verifyBatchesTrustedAggregator(
        uint64 pendingStateNum,
        uint64 initNumBatch,
        uint64 finalNewBatch,
        bytes32 newLocalExitRoot,
        bytes32 newStateRoot,
        bytes32[24] proof
    ) external;

    #[derive(Debug)]
    function latestRoundData() external view returns (
        uint80 roundId,
        int256 answer,
        uint256 startedAt,
        uint256 updatedAt,
        uint80 answeredInRound
    );
}

/// A batch as committed to by a sequencing call, regardless of the contract variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencedBatchData {
    /// The hash of the batch L2 transactions.
    pub transactions_hash: B256,
    /// The global exit root of the batch.
    pub global_exit_root: B256,
    /// The timestamp of the batch.
    pub timestamp: u64,
    /// The timestamp of the forced batch this batch redeems, zero for a regular batch.
    pub min_forced_timestamp: u64,
}

/// A call to sequence batches on the L1 rollup contract.
#[derive(Debug, derive_more::From)]
pub enum SequenceBatchesCall {
    /// A call carrying the full batch transactions.
    Rollup(sequenceBatches_0Call),
    /// A call carrying only the hash of the batch transactions, the data being held by the
    /// committee.
    Validium(sequenceBatches_1Call),
}

impl SequenceBatchesCall {
    /// Tries to decode the calldata into a [`SequenceBatchesCall`]. Returns `None` if the selector
    /// is unknown, and an error if the payload is malformed.
    pub fn try_decode(calldata: &[u8]) -> Option<Result<Self, alloy_sol_types::Error>> {
        let selector: [u8; 4] = calldata.get(0..4)?.try_into().ok()?;
        match selector {
            sequenceBatches_0Call::SELECTOR => {
                Some(sequenceBatches_0Call::abi_decode(calldata).map(Into::into))
            }
            sequenceBatches_1Call::SELECTOR => {
                Some(sequenceBatches_1Call::abi_decode(calldata).map(Into::into))
            }
            _ => None,
        }
    }

    /// Returns the L2 coinbase of the sequence.
    pub const fn coinbase(&self) -> Address {
        match self {
            Self::Rollup(call) => call.l2Coinbase,
            Self::Validium(call) => call.l2Coinbase,
        }
    }

    /// Returns the number of batches in the sequence.
    pub fn len(&self) -> usize {
        match self {
            Self::Rollup(call) => call.batches.len(),
            Self::Validium(call) => call.batches.len(),
        }
    }

    /// Returns true if the sequence holds no batch.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the batches of the sequence. For the rollup variant the transactions hash is
    /// computed from the embedded transactions.
    pub fn batches(&self) -> Vec<SequencedBatchData> {
        match self {
            Self::Rollup(call) => call
                .batches
                .iter()
                .map(|batch| SequencedBatchData {
                    transactions_hash: keccak256(&batch.transactions),
                    global_exit_root: batch.globalExitRoot,
                    timestamp: batch.timestamp,
                    min_forced_timestamp: batch.minForcedTimestamp,
                })
                .collect(),
            Self::Validium(call) => call
                .batches
                .iter()
                .map(|batch| SequencedBatchData {
                    transactions_hash: batch.transactionsHash,
                    global_exit_root: batch.globalExitRoot,
                    timestamp: batch.timestamp,
                    min_forced_timestamp: batch.minForcedTimestamp,
                })
                .collect(),
        }
    }
}

/// Tries to decode the transactions out of a `forceBatch` call. Returns `None` on any other
/// selector.
pub fn try_decode_force_batch_transactions(
    calldata: &[u8],
) -> Option<Result<Bytes, alloy_sol_types::Error>> {
    let selector: [u8; 4] = calldata.get(0..4)?.try_into().ok()?;
    (selector == forceBatchCall::SELECTOR)
        .then(|| forceBatchCall::abi_decode(calldata).map(|call| call.transactions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes, U256};

    #[test]
    fn test_should_decode_rollup_sequence() {
        let transactions = bytes!("0xdeadbeef");
        let call = sequenceBatches_0Call {
            batches: vec![BatchData {
                transactions: transactions.clone(),
                globalExitRoot: B256::repeat_byte(3),
                timestamp: 100,
                minForcedTimestamp: 0,
            }],
            l2Coinbase: address!("0x0000000000000000000000000000000000000001"),
        };
        let calldata = call.abi_encode();

        let decoded = SequenceBatchesCall::try_decode(&calldata).unwrap().unwrap();
        assert!(matches!(decoded, SequenceBatchesCall::Rollup(_)));
        assert_eq!(decoded.coinbase(), call.l2Coinbase);
        assert_eq!(decoded.len(), 1);

        let batch = decoded.batches()[0];
        assert_eq!(batch.transactions_hash, keccak256(&transactions));
        assert_eq!(batch.timestamp, 100);
    }

    #[test]
    fn test_should_decode_validium_sequence() {
        let call = sequenceBatches_1Call {
            batches: vec![ValidiumBatchData {
                transactionsHash: B256::repeat_byte(9),
                globalExitRoot: B256::ZERO,
                timestamp: 7,
                minForcedTimestamp: 5,
            }],
            l2Coinbase: Address::ZERO,
            signaturesAndAddrs: Bytes::new(),
        };

        let decoded = SequenceBatchesCall::try_decode(&call.abi_encode()).unwrap().unwrap();
        let batch = decoded.batches()[0];
        assert_eq!(batch.transactions_hash, B256::repeat_byte(9));
        assert_eq!(batch.min_forced_timestamp, 5);
    }

    #[test]
    fn test_should_reject_unknown_selector() {
        assert!(SequenceBatchesCall::try_decode(&[0xde, 0xad, 0xbe, 0xef]).is_none());
        assert!(SequenceBatchesCall::try_decode(&[0x01]).is_none());

        let mut truncated = sequenceBatches_0Call::SELECTOR.to_vec();
        truncated.push(1);
        assert!(SequenceBatchesCall::try_decode(&truncated).unwrap().is_err());
    }

    #[test]
    fn test_should_decode_force_batch_transactions() {
        let call = forceBatchCall { transactions: bytes!("0x0102"), maticAmount: U256::from(1) };
        let txs = try_decode_force_batch_transactions(&call.abi_encode()).unwrap().unwrap();
        assert_eq!(txs, bytes!("0x0102"));
    }
}
