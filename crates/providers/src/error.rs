use alloy_transport::{RpcError, TransportErrorKind};

/// An error occurring at one of the L1 providers.
#[derive(Debug, thiserror::Error)]
pub enum L1ProviderError {
    /// L1 RPC error.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// Error at an HTTP provider.
    #[error("http provider error: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider returned a response which could not be interpreted.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    /// Error decoding the return data of a contract call.
    #[error(transparent)]
    Abi(#[from] alloy_sol_types::Error),
}

/// An error occurring at the [`crate::GasPriceOracle`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GasOracleError {
    /// The oracle was provided an empty list of gas pricers.
    #[error("gas price oracle requires at least one provider")]
    NoProviders,
}
