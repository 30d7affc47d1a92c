use metrics::{Counter, Gauge};
use metrics_derive::Metrics;

/// The metrics for the [`super::GasPriceOracle`].
#[derive(Metrics, Clone)]
#[metrics(scope = "gas_oracle")]
pub struct GasOracleMetrics {
    /// A counter on the gas price requests.
    pub requests: Counter,
    /// A counter on the failed provider calls.
    pub provider_errors: Counter,
    /// A counter on the provider calls abandoned on cancellation.
    pub cancelled_calls: Counter,
    /// The last gas price returned, in wei.
    pub gas_price: Gauge,
}
