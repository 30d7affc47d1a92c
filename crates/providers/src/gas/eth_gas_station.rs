use super::{GasPricer, GWEI};
use crate::L1ProviderError;

use alloy_primitives::U256;
use reqwest::Client;

/// The default ETH Gas Station endpoint.
pub const ETH_GAS_STATION_URL: &str = "https://api.ethgasstation.info/api/fee-estimate";

/// A reduced ETH Gas Station response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
struct GasStationResponse {
    #[serde(rename = "gasPrice")]
    gas_price: GasPrices,
}

/// The gas prices, in gwei.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
struct GasPrices {
    instant: u64,
}

/// A [`GasPricer`] relying on ETH Gas Station, suggesting its instant gas price.
#[derive(Debug, Clone)]
pub struct EthGasStationGasPricer {
    url: String,
    inner: Client,
}

impl Default for EthGasStationGasPricer {
    fn default() -> Self {
        Self::new(ETH_GAS_STATION_URL.to_string())
    }
}

impl EthGasStationGasPricer {
    /// Returns a new [`EthGasStationGasPricer`] querying the provided endpoint.
    pub fn new(url: String) -> Self {
        Self { url, inner: Client::new() }
    }
}

#[async_trait::async_trait]
impl GasPricer for EthGasStationGasPricer {
    async fn suggest_gas_price(&self) -> Result<U256, L1ProviderError> {
        let response = self
            .inner
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<GasStationResponse>()
            .await?;

        Ok(U256::from(response.gas_price.instant) * U256::from(GWEI))
    }
}
