use super::{GasOracleMetrics, GasPricer};
use crate::GasOracleError;

use alloy_primitives::U256;
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The list of gas pricers queried by the oracle.
type Providers = Arc<Vec<Arc<dyn GasPricer>>>;

/// A gas price oracle querying a list of [`GasPricer`] concurrently and suggesting the highest
/// price. Failing providers are ignored.
pub struct GasPriceOracle {
    /// The providers, replaced as a whole.
    providers: RwLock<Providers>,
    /// The oracle metrics.
    metrics: GasOracleMetrics,
}

impl std::fmt::Debug for GasPriceOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GasPriceOracle").field("providers", &self.providers.read().len()).finish()
    }
}

impl GasPriceOracle {
    /// Returns a new [`GasPriceOracle`] from the provided list of pricers.
    pub fn new(providers: Vec<Arc<dyn GasPricer>>) -> Result<Self, GasOracleError> {
        if providers.is_empty() {
            return Err(GasOracleError::NoProviders);
        }
        Ok(Self { providers: RwLock::new(Arc::new(providers)), metrics: Default::default() })
    }

    /// Replaces the list of pricers. In-flight requests keep the list they started with.
    pub fn replace_providers(
        &self,
        providers: Vec<Arc<dyn GasPricer>>,
    ) -> Result<(), GasOracleError> {
        if providers.is_empty() {
            return Err(GasOracleError::NoProviders);
        }
        *self.providers.write() = Arc::new(providers);
        tracing::info!(target: "zkevm::gas_oracle", count = self.providers.read().len(), "replaced gas price providers");
        Ok(())
    }

    /// Returns the number of pricers.
    pub fn providers_len(&self) -> usize {
        self.providers.read().len()
    }

    /// Returns the highest gas price suggested by the pricers, or zero if none succeeded. Calls
    /// still pending on cancellation are abandoned.
    pub async fn get_l1_gas_price(&self, cancel: &CancellationToken) -> U256 {
        let providers = self.providers.read().clone();
        self.metrics.requests.increment(1);

        let calls = providers.iter().enumerate().map(|(index, provider)| async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.metrics.cancelled_calls.increment(1);
                    None
                }
                price = provider.suggest_gas_price() => match price {
                    Ok(price) => Some(price),
                    Err(err) => {
                        tracing::debug!(target: "zkevm::gas_oracle", index, ?err, "failed to get gas price");
                        self.metrics.provider_errors.increment(1);
                        None
                    }
                }
            }
        });

        let price = join_all(calls).await.into_iter().flatten().max().unwrap_or_default();
        tracing::trace!(target: "zkevm::gas_oracle", %price, "suggested gas price");
        self.metrics.gas_price.set(price.saturating_to::<u128>() as f64);

        price
    }
}
