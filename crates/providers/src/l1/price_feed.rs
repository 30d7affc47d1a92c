use crate::{L1ProviderError, L1Source};

use alloy_primitives::{utils::format_units, Address, Bytes, U256};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use zkevm_l1::abi::calls::latestRoundDataCall;

/// The number of decimals the price ratio is scaled down by.
const PRICE_RATIO_DECIMALS: u8 = 18;

/// A Chainlink aggregator price feed, used to convert L1 fees into the rollup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFeed {
    address: Address,
}

impl PriceFeed {
    /// Returns a new [`PriceFeed`] for the aggregator at the provided address.
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// Returns the address of the aggregator.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the latest answer of the aggregator.
    pub async fn latest_answer<S: L1Source>(&self, source: &S) -> Result<U256, L1ProviderError> {
        let request = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(latestRoundDataCall {}.abi_encode()).into());
        let output = source.call(request).await?;
        let round = latestRoundDataCall::abi_decode_returns(&output)?;

        if round.answer.is_negative() {
            return Err(L1ProviderError::InvalidResponse(format!(
                "negative price feed answer {}",
                round.answer
            )));
        }
        Ok(round.answer.into_raw())
    }

    /// Returns the latest price ratio: the answer of the aggregator divided by `1e9` twice.
    pub async fn price_ratio<S: L1Source>(&self, source: &S) -> Result<f64, L1ProviderError> {
        let answer = self.latest_answer(source).await?;
        price_ratio(answer)
    }
}

/// Scales the aggregator answer down to a ratio.
fn price_ratio(answer: U256) -> Result<f64, L1ProviderError> {
    let ratio = format_units(answer, PRICE_RATIO_DECIMALS)
        .map_err(|err| L1ProviderError::InvalidResponse(err.to_string()))?;
    ratio.parse().map_err(|_| L1ProviderError::InvalidResponse(ratio))
}
