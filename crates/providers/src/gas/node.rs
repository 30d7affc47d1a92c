use super::GasPricer;
use crate::L1ProviderError;

use alloy_primitives::U256;
use alloy_provider::Provider;

/// A [`GasPricer`] relying on the `eth_gasPrice` method of an L1 node.
#[derive(Debug, Clone)]
pub struct NodeGasPricer<P> {
    provider: P,
}

impl<P> NodeGasPricer<P> {
    /// Returns a new [`NodeGasPricer`] from the provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl<P: Provider> GasPricer for NodeGasPricer<P> {
    async fn suggest_gas_price(&self) -> Result<U256, L1ProviderError> {
        let price = self.provider.get_gas_price().await?;
        Ok(U256::from(price))
    }
}
