//! Test utils for providers.

use crate::{GasPricer, L1ProviderError, L1Source, L1Transactor};

use alloy_primitives::{keccak256, Address, BlockNumber, Bytes, TxHash, B256, U256};
use alloy_rpc_types_eth::{BlockNumberOrTag, Log, TransactionRequest};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};
use zkevm_sync_primitives::{L1Header, L1Transaction};

/// An in-memory implementation of the [`L1Source`] trait.
#[derive(Debug, Default)]
pub struct MockL1Source {
    /// The logs of the chain.
    pub logs: Vec<Log>,
    /// The headers of the chain, by number.
    pub headers: HashMap<BlockNumber, L1Header>,
    /// The transactions of the chain, by hash.
    pub transactions: HashMap<TxHash, L1Transaction>,
    /// The outputs of calls, by called address.
    pub call_outputs: HashMap<Address, Bytes>,
    /// Fails every log query if set.
    pub unavailable: bool,
    /// The number of log queries.
    pub log_queries: AtomicUsize,
    /// The number of transaction queries.
    pub transaction_queries: AtomicUsize,
}

impl MockL1Source {
    /// Returns a new [`MockL1Source`] from the provided headers.
    pub fn new(headers: impl IntoIterator<Item = L1Header>) -> Self {
        Self {
            headers: headers.into_iter().map(|header| (header.number, header)).collect(),
            ..Default::default()
        }
    }

    /// Adds the logs to the source.
    pub fn with_logs(mut self, logs: impl IntoIterator<Item = Log>) -> Self {
        self.logs.extend(logs);
        self
    }

    /// Adds the transactions to the source.
    pub fn with_transactions(mut self, txs: impl IntoIterator<Item = L1Transaction>) -> Self {
        self.transactions.extend(txs.into_iter().map(|tx| (tx.hash, tx)));
        self
    }

    /// Sets the output of the calls to the address.
    pub fn with_call_output(mut self, address: Address, output: Bytes) -> Self {
        self.call_outputs.insert(address, output);
        self
    }

    /// Makes every log query fail.
    pub const fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn latest(&self) -> Option<L1Header> {
        self.headers.values().max_by_key(|header| header.number).copied()
    }
}

#[async_trait::async_trait]
impl L1Source for MockL1Source {
    async fn filter_logs(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        addresses: &[Address],
        topics: &[B256],
    ) -> Result<Vec<Log>, L1ProviderError> {
        self.log_queries.fetch_add(1, Ordering::Relaxed);
        if self.unavailable {
            return Err(L1ProviderError::InvalidResponse("source unavailable".to_string()));
        }

        Ok(self
            .logs
            .iter()
            .filter(|log| log.block_number.is_some_and(|number| (from..=to).contains(&number)))
            .filter(|log| addresses.contains(&log.address()))
            .filter(|log| {
                topics.is_empty() || log.topic0().is_some_and(|topic| topics.contains(topic))
            })
            .cloned()
            .collect())
    }

    async fn header(&self, number: BlockNumberOrTag) -> Result<Option<L1Header>, L1ProviderError> {
        Ok(match number {
            BlockNumberOrTag::Number(number) => self.headers.get(&number).copied(),
            BlockNumberOrTag::Earliest => self.headers.values().min_by_key(|h| h.number).copied(),
            _ => self.latest(),
        })
    }

    async fn transaction(&self, hash: TxHash) -> Result<Option<L1Transaction>, L1ProviderError> {
        self.transaction_queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn call(&self, request: TransactionRequest) -> Result<Bytes, L1ProviderError> {
        request
            .to
            .and_then(|to| to.to().copied())
            .and_then(|to| self.call_outputs.get(&to).cloned())
            .ok_or_else(|| L1ProviderError::InvalidResponse("execution reverted".to_string()))
    }
}

/// An [`L1Transactor`] recording the requests it is handed.
#[derive(Debug, Default)]
pub struct MockL1Transactor {
    /// The requests sent so far.
    pub sent: Mutex<Vec<TransactionRequest>>,
}

#[async_trait::async_trait]
impl L1Transactor for MockL1Transactor {
    async fn send_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TxHash, L1ProviderError> {
        let mut sent = self.sent.lock();
        sent.push(request);
        Ok(keccak256(sent.len().to_be_bytes()))
    }
}

/// A [`GasPricer`] returning a fixed answer after an optional delay.
#[derive(Debug, Clone)]
pub struct MockGasPricer {
    price: Option<U256>,
    delay: Option<Duration>,
}

impl MockGasPricer {
    /// Returns a pricer suggesting the provided price.
    pub const fn price(price: U256) -> Self {
        Self { price: Some(price), delay: None }
    }

    /// Returns a pricer which always fails.
    pub const fn failing() -> Self {
        Self { price: None, delay: None }
    }

    /// Delays the answer of the pricer.
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait::async_trait]
impl GasPricer for MockGasPricer {
    async fn suggest_gas_price(&self) -> Result<U256, L1ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.price.ok_or_else(|| L1ProviderError::InvalidResponse("mock failure".to_string()))
    }
}
