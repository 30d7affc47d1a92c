//! The crate exposes the providers the synchronization core relies on: access to the L1 chain, gas
//! price sources aggregated by the [`GasPriceOracle`] and the price feed.

pub use error::{GasOracleError, L1ProviderError};
mod error;

pub use gas::{
    EthGasStationGasPricer, EtherscanGasPricer, GasOracleMetrics, GasPriceOracle, GasPricer,
    NodeGasPricer, ETHERSCAN_API_URL, ETH_GAS_STATION_URL,
};
mod gas;

pub use l1::{L1Source, L1Transactor, PriceFeed};
mod l1;

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;
