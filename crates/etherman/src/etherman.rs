use crate::{EthermanConfig, EthermanError};

use alloy_primitives::{Address, BlockNumber, Bytes, TxHash, B256, U256};
use alloy_rpc_types_eth::TransactionRequest;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use zkevm_codec::{build_sequence_payload, Sequence, TrustedVerifyBatchesPayload};
use zkevm_l1_watcher::{ForkIdError, ForkIdTracker, L1Scanner, L1ScannerError};
use zkevm_providers::{GasPriceOracle, GasPricer, L1Source, L1Transactor, PriceFeed};
use zkevm_sync_primitives::{ForkId, ForkIdInterval, L1Header, RollupInfo};

/// The L1 synchronization core of a zkEVM node.
///
/// The [`Etherman`] scans the rollup contracts through an [`L1Source`], keeps the fork id timeline
/// in sync with the scanned updates, suggests L1 gas prices and submits the sequencing and
/// verification transactions through an [`L1Transactor`].
#[derive(Debug)]
pub struct Etherman<S, T> {
    scanner: L1Scanner<S>,
    transactor: T,
    gas_oracle: GasPriceOracle,
    fork_ids: Arc<Mutex<ForkIdTracker>>,
    config: EthermanConfig,
}

impl<S: L1Source, T: L1Transactor> Etherman<S, T> {
    /// Returns a new [`Etherman`].
    pub fn new(
        source: S,
        transactor: T,
        gas_oracle: GasPriceOracle,
        config: EthermanConfig,
    ) -> Self {
        let fork_ids =
            ForkIdTracker::new(config.genesis_fork_id, config.genesis_fork_version.clone());
        Self {
            scanner: L1Scanner::new(source, config.scanner_config()),
            transactor,
            gas_oracle,
            fork_ids: Arc::new(Mutex::new(fork_ids)),
            config,
        }
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &EthermanConfig {
        &self.config
    }

    /// Returns the L1 scanner.
    pub const fn scanner(&self) -> &L1Scanner<S> {
        &self.scanner
    }

    /// Returns the transactor.
    pub const fn transactor(&self) -> &T {
        &self.transactor
    }

    /// Returns the latest L1 header.
    pub async fn latest_block(&self) -> Result<L1Header, EthermanError> {
        Ok(self.scanner.latest_block().await?)
    }

    /// Scans the blocks `[from, to]`, up to the latest block if `to` is `None`, and applies the
    /// scanned fork id updates to the timeline.
    ///
    /// Scans are expected to move forward from the genesis block: a fork id update older than the
    /// timeline which it does not hold fails with [`ForkIdError::OutOfOrder`]. [`Self::get_forks`]
    /// rebuilds the timeline from the genesis block.
    pub async fn scan_rollup_info(
        &self,
        from: BlockNumber,
        to: Option<BlockNumber>,
    ) -> Result<RollupInfo, EthermanError> {
        let info = self.scanner.scan(from, to).await?;
        self.apply_fork_ids(info.blocks.iter().flat_map(|block| block.fork_ids.iter()))?;
        Ok(info)
    }

    /// Returns the fork id intervals active at some block of `[from, to]`.
    ///
    /// The fork id history is scanned from the genesis block up to `to`, or up to the last update
    /// of the timeline if later, and replaces the timeline. The answer does not depend on the order
    /// of the calls.
    #[tracing::instrument(skip(self))]
    pub async fn get_forks(
        &self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<Vec<ForkIdInterval>, EthermanError> {
        if from > to {
            return Err(L1ScannerError::InvalidRange { from, to }.into());
        }

        let last_block = self.fork_ids.lock().last_applied().map(|(block, _)| block);
        let start = self.config.genesis_block.min(from);
        let end = last_block.map_or(to, |block| block.max(to));
        let forks = self.scanner.scan_fork_ids(start, end, self.config.fork_id_chunk_size).await?;

        let mut timeline = ForkIdTracker::new(
            self.config.genesis_fork_id,
            self.config.genesis_fork_version.clone(),
        );
        for fork in &forks {
            timeline.apply_event(fork)?;
        }
        let intervals = timeline.intervals_in_block_range(from, to);

        let mut tracker = self.fork_ids.lock();
        // A concurrent scan may have applied later updates in the meantime.
        if timeline.last_applied() >= tracker.last_applied() {
            if tracker.intervals() != timeline.intervals() {
                tracing::info!(target: "zkevm::etherman", start, end, forks = timeline.intervals().len(), "rebuilt fork id timeline");
            }
            *tracker = timeline;
        }

        Ok(intervals)
    }

    /// Returns the full fork id timeline.
    pub fn fork_intervals(&self) -> Vec<ForkIdInterval> {
        self.fork_ids.lock().intervals().to_vec()
    }

    /// Returns the fork id interval containing the batch.
    pub fn fork_for_batch(&self, batch_number: u64) -> Option<ForkIdInterval> {
        self.fork_ids.lock().interval_for_batch(batch_number).cloned()
    }

    fn apply_fork_ids<'a>(
        &self,
        forks: impl Iterator<Item = &'a ForkId>,
    ) -> Result<(), ForkIdError> {
        let mut tracker = self.fork_ids.lock();
        for fork in forks {
            if tracker.apply_event(fork)? {
                tracing::info!(target: "zkevm::etherman", fork_id = fork.fork_id, version = %fork.version, block = fork.block_number, "new fork id");
            }
        }
        Ok(())
    }

    /// Returns the highest gas price suggested by the gas pricers, zero if none answers before
    /// cancellation.
    pub async fn get_l1_gas_price(&self, cancel: &CancellationToken) -> U256 {
        self.gas_oracle.get_l1_gas_price(cancel).await
    }

    /// Replaces the gas pricers of the oracle.
    pub fn replace_gas_providers(
        &self,
        pricers: Vec<Arc<dyn GasPricer>>,
    ) -> Result<(), EthermanError> {
        Ok(self.gas_oracle.replace_providers(pricers)?)
    }

    /// Returns the ratio of the price feed answer, scaled down by 18 decimals.
    pub async fn price_ratio(&self) -> Result<f64, EthermanError> {
        let address = self.config.price_feed.ok_or(EthermanError::MissingPriceFeed)?;
        PriceFeed::new(address)
            .price_ratio(self.scanner.source())
            .await
            .map_err(EthermanError::PriceFeed)
    }

    /// Sends the transaction sequencing the batches to the rollup contract.
    #[tracing::instrument(skip(self, sequences, extra_data), fields(batches = sequences.len()))]
    pub async fn sequence_batches(
        &self,
        account: Address,
        sequences: &[Sequence],
        coinbase: Address,
        extra_data: Bytes,
    ) -> Result<TxHash, EthermanError> {
        let payload = build_sequence_payload(sequences, coinbase, extra_data)?;
        let tx_hash = self.send(account, payload.calldata()).await?;
        tracing::info!(target: "zkevm::etherman", %tx_hash, batches = sequences.len(), "sent sequence batches");
        Ok(tx_hash)
    }

    /// Sends the transaction verifying the batches `(init_num_batch, final_new_batch]` as the
    /// trusted aggregator.
    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(skip(self, proof))]
    pub async fn trusted_verify_batches(
        &self,
        account: Address,
        pending_state_num: u64,
        init_num_batch: u64,
        final_new_batch: u64,
        new_local_exit_root: B256,
        new_state_root: B256,
        proof: &str,
    ) -> Result<TxHash, EthermanError> {
        let payload = TrustedVerifyBatchesPayload::new(
            pending_state_num,
            init_num_batch,
            final_new_batch,
            new_local_exit_root,
            new_state_root,
            proof,
        )?;
        let tx_hash = self.send(account, payload.calldata()).await?;
        tracing::info!(target: "zkevm::etherman", %tx_hash, final_new_batch, "sent trusted verify batches");
        Ok(tx_hash)
    }

    async fn send(&self, account: Address, calldata: Bytes) -> Result<TxHash, EthermanError> {
        let request = TransactionRequest::default()
            .from(account)
            .to(self.config.contracts.rollup)
            .input(calldata.into());
        self.transactor.send_transaction(request).await.map_err(EthermanError::Transactor)
    }
}
