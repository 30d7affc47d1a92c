use crate::L1ProviderError;

use alloy_network::TransactionResponse;
use alloy_primitives::{Address, BlockNumber, Bytes, TxHash, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockNumberOrTag, Filter, Log, TransactionRequest, TransactionTrait};
use zkevm_sync_primitives::{L1Header, L1Transaction};

/// Provides read access to the L1 chain.
#[async_trait::async_trait]
pub trait L1Source: Send + Sync {
    /// Returns the logs emitted in the block range `[from, to]` by any of the addresses. An empty
    /// topic list matches every log, otherwise the first topic must be one of the provided topics.
    async fn filter_logs(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        addresses: &[Address],
        topics: &[B256],
    ) -> Result<Vec<Log>, L1ProviderError>;

    /// Returns the header of the requested block, if any.
    async fn header(&self, number: BlockNumberOrTag) -> Result<Option<L1Header>, L1ProviderError>;

    /// Returns the transaction for the provided hash, if any.
    async fn transaction(&self, hash: TxHash) -> Result<Option<L1Transaction>, L1ProviderError>;

    /// Executes the call against the latest state and returns its output.
    async fn call(&self, request: TransactionRequest) -> Result<Bytes, L1ProviderError>;
}

#[async_trait::async_trait]
impl<P: Provider> L1Source for P {
    async fn filter_logs(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        addresses: &[Address],
        topics: &[B256],
    ) -> Result<Vec<Log>, L1ProviderError> {
        let mut filter = Filter::new().from_block(from).to_block(to).address(addresses.to_vec());
        if !topics.is_empty() {
            filter = filter.event_signature(topics.to_vec());
        }
        Ok(self.get_logs(&filter).await?)
    }

    async fn header(&self, number: BlockNumberOrTag) -> Result<Option<L1Header>, L1ProviderError> {
        let block = self.get_block_by_number(number).await?;
        Ok(block.map(|block| L1Header {
            number: block.header.number,
            hash: block.header.hash,
            parent_hash: block.header.parent_hash,
            timestamp: block.header.timestamp,
        }))
    }

    async fn transaction(&self, hash: TxHash) -> Result<Option<L1Transaction>, L1ProviderError> {
        let tx = self.get_transaction_by_hash(hash).await?;
        Ok(tx.map(|tx| L1Transaction {
            hash: tx.tx_hash(),
            from: tx.from(),
            input: tx.input().clone(),
        }))
    }

    async fn call(&self, request: TransactionRequest) -> Result<Bytes, L1ProviderError> {
        Ok(Provider::call(self, request).await?)
    }
}
