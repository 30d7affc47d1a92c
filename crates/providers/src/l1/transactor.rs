use crate::L1ProviderError;

use alloy_primitives::TxHash;
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;

/// Hands transactions to the L1 chain. Signing is the responsibility of the implementer.
#[async_trait::async_trait]
pub trait L1Transactor: Send + Sync {
    /// Sends the transaction and returns its hash.
    async fn send_transaction(&self, request: TransactionRequest)
        -> Result<TxHash, L1ProviderError>;
}

#[async_trait::async_trait]
impl<P: Provider> L1Transactor for P {
    async fn send_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TxHash, L1ProviderError> {
        let pending = Provider::send_transaction(self, request).await?;
        Ok(*pending.tx_hash())
    }
}
