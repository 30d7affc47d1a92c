use alloy_primitives::{Address, Bytes, TxHash};

/// The fields of an L1 transaction needed to decode the calldata of a rollup event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct L1Transaction {
    /// The transaction hash.
    pub hash: TxHash,
    /// The sender of the transaction.
    pub from: Address,
    /// The transaction input.
    pub input: Bytes,
}
