use zkevm_codec::{ProofError, SequenceError};
use zkevm_l1_watcher::{ForkIdError, L1ScannerError};
use zkevm_providers::{GasOracleError, L1ProviderError};

/// An error that occurred at the [`crate::Etherman`].
#[derive(Debug, thiserror::Error)]
pub enum EthermanError {
    /// An error at the L1 scanner.
    #[error(transparent)]
    Scanner(#[from] L1ScannerError),
    /// An error applying a fork id update.
    #[error(transparent)]
    ForkId(#[from] ForkIdError),
    /// An error at the gas price oracle.
    #[error(transparent)]
    GasOracle(#[from] GasOracleError),
    /// An invalid proof.
    #[error(transparent)]
    Proof(#[from] ProofError),
    /// An invalid list of sequences.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// The transactor failed to send the transaction.
    #[error("failed to send transaction: {0}")]
    Transactor(L1ProviderError),
    /// The price feed failed to answer.
    #[error("price feed error: {0}")]
    PriceFeed(L1ProviderError),
    /// No price feed is configured.
    #[error("no price feed configured")]
    MissingPriceFeed,
}
