//! Gas price sources and the oracle aggregating them.

use crate::L1ProviderError;
use alloy_primitives::U256;

pub use etherscan::{EtherscanGasPricer, ETHERSCAN_API_URL};
mod etherscan;

pub use eth_gas_station::{EthGasStationGasPricer, ETH_GAS_STATION_URL};
mod eth_gas_station;

pub use metrics::GasOracleMetrics;
mod metrics;

pub use node::NodeGasPricer;
mod node;

pub use oracle::GasPriceOracle;
mod oracle;

/// The number of wei in a gwei.
const GWEI: u64 = 1_000_000_000;

/// An implementation of the trait can suggest an L1 gas price.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait GasPricer: Send + Sync {
    /// Returns the suggested gas price, in wei.
    async fn suggest_gas_price(&self) -> Result<U256, L1ProviderError>;
}
