use super::GasPricer;
use crate::L1ProviderError;

use alloy_primitives::{utils::parse_units, U256};
use reqwest::Client;

/// The default Etherscan API endpoint.
pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/api";

/// An Etherscan API response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
struct ApiResponse<T> {
    status: String,
    message: String,
    result: T,
}

/// A reduced gas oracle result. Prices are decimal strings in gwei.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
struct GasOracleResult {
    #[serde(rename = "FastGasPrice")]
    fast_gas_price: String,
}

/// A [`GasPricer`] relying on the Etherscan gas tracker, suggesting its fast gas price.
#[derive(Debug, Clone)]
pub struct EtherscanGasPricer {
    url: String,
    api_key: String,
    inner: Client,
}

impl EtherscanGasPricer {
    /// Returns a new [`EtherscanGasPricer`] querying the default endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_url(ETHERSCAN_API_URL.to_string(), api_key)
    }

    /// Returns a new [`EtherscanGasPricer`] querying the provided endpoint.
    pub fn with_url(mut url: String, api_key: String) -> Self {
        if url.ends_with('/') {
            url.pop();
        }
        Self { url, api_key, inner: Client::new() }
    }
}

#[async_trait::async_trait]
impl GasPricer for EtherscanGasPricer {
    async fn suggest_gas_price(&self) -> Result<U256, L1ProviderError> {
        let response = self
            .inner
            .get(&self.url)
            .query(&[
                ("module", "gastracker"),
                ("action", "gasoracle"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<ApiResponse<GasOracleResult>>()
            .await?;

        if response.status != "1" {
            return Err(L1ProviderError::InvalidResponse(format!(
                "etherscan status {}: {}",
                response.status, response.message
            )));
        }
        parse_gwei(&response.result.fast_gas_price)
    }
}

/// Parses a decimal gwei amount into wei.
fn parse_gwei(amount: &str) -> Result<U256, L1ProviderError> {
    parse_units(amount, "gwei")
        .map(|units| units.get_absolute())
        .map_err(|err| L1ProviderError::InvalidResponse(format!("{amount}: {err}")))
}
