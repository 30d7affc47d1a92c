use crate::{EthRequestError, L1ScannerResult};

use alloy_primitives::TxHash;
use lru::LruCache;
use std::num::NonZeroUsize;
use zkevm_providers::L1Source;
use zkevm_sync_primitives::L1Transaction;

/// A cache for transactions fetched from the source during a scan pass.
#[derive(Debug)]
pub(crate) struct TransactionCache {
    cache: LruCache<TxHash, L1Transaction>,
}

impl TransactionCache {
    /// Creates a new [`TransactionCache`] with the given capacity.
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self { cache: LruCache::new(capacity) }
    }

    /// Gets the transaction for the given hash, fetching it from the source if not cached.
    pub(crate) async fn get_transaction_by_hash<S: L1Source>(
        &mut self,
        tx_hash: TxHash,
        source: &S,
    ) -> L1ScannerResult<L1Transaction> {
        if let Some(transaction) = self.cache.get(&tx_hash) {
            return Ok(transaction.clone());
        }

        let transaction = source
            .transaction(tx_hash)
            .await?
            .ok_or(EthRequestError::MissingTransactionHash(tx_hash))?;
        self.cache.put(tx_hash, transaction.clone());
        Ok(transaction)
    }
}
