use crate::{
    cache::TransactionCache,
    decoder::{decode_fork_id, EventDecoder, TrackedContracts},
    EthRequestError, FilterLogError, ForcedBatchIndex, L1ScannerError, L1ScannerResult,
    ScannerMetrics,
};

use alloy_primitives::{Address, BlockNumber, B256};
use alloy_rpc_types_eth::{BlockNumberOrTag, Log};
use alloy_sol_types::SolEvent;
use std::{num::NonZeroUsize, time::Instant};
use zkevm_l1::abi::logs::UpdateZkEVMVersion;
use zkevm_providers::L1Source;
use zkevm_sync_primitives::{
    ForkId, L1Block, L1Header, OrderEntry, OrderIndex, RollupEvent, RollupInfo,
};

/// The default block range of a log query.
pub const DEFAULT_LOG_QUERY_BLOCK_RANGE: u64 = 1_000;

/// The default capacity of the transaction cache.
pub const DEFAULT_TRANSACTION_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(capacity) => capacity,
    None => panic!("non zero capacity"),
};

/// Whether the final block of a scanned window is returned when it holds no rollup event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryBlockPolicy {
    /// Blocks without events are omitted.
    #[default]
    OmitEmpty,
    /// The final block of the window is always returned.
    IncludeLast,
}

/// The configuration of the [`L1Scanner`].
#[derive(Debug, Clone)]
pub struct L1ScannerConfig {
    /// The tracked contracts.
    pub contracts: TrackedContracts,
    /// The block range of a log query.
    pub log_query_block_range: u64,
    /// The boundary block policy.
    pub boundary_policy: BoundaryBlockPolicy,
    /// The capacity of the per-scan transaction cache.
    pub transaction_cache_capacity: NonZeroUsize,
}

impl L1ScannerConfig {
    /// Returns a new [`L1ScannerConfig`] for the contracts with default values.
    pub const fn new(contracts: TrackedContracts) -> Self {
        Self {
            contracts,
            log_query_block_range: DEFAULT_LOG_QUERY_BLOCK_RANGE,
            boundary_policy: BoundaryBlockPolicy::OmitEmpty,
            transaction_cache_capacity: DEFAULT_TRANSACTION_CACHE_CAPACITY,
        }
    }
}

/// Scans a range of L1 blocks and assembles the rollup events of each block, preserving their
/// order in the block.
#[derive(Debug)]
pub struct L1Scanner<S> {
    /// The L1 source.
    source: S,
    /// The decoder for the logs of the tracked contracts.
    decoder: EventDecoder,
    /// The addresses of the tracked contracts.
    addresses: Vec<Address>,
    /// The scanner configuration.
    config: L1ScannerConfig,
    /// The scanner metrics.
    metrics: ScannerMetrics,
}

impl<S: L1Source> L1Scanner<S> {
    /// Returns a new [`L1Scanner`] from the source and configuration.
    pub fn new(source: S, config: L1ScannerConfig) -> Self {
        Self {
            source,
            decoder: EventDecoder::new(config.contracts),
            addresses: config.contracts.addresses(),
            config,
            metrics: ScannerMetrics::default(),
        }
    }

    /// Returns a reference to the L1 source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the scanner configuration.
    pub const fn config(&self) -> &L1ScannerConfig {
        &self.config
    }

    /// Scans the blocks `[from, to]` and returns the blocks holding rollup events along with the
    /// order of the events. If `to` is `None`, the scan runs up to the latest block at call time.
    #[tracing::instrument(skip(self))]
    pub async fn scan(
        &self,
        from: BlockNumber,
        to: Option<BlockNumber>,
    ) -> L1ScannerResult<RollupInfo> {
        let start = Instant::now();
        self.metrics.scans.increment(1);

        let to = match to {
            Some(to) => to,
            None => self.latest_block().await?.number,
        };
        if from > to {
            return Err(L1ScannerError::InvalidRange { from, to });
        }

        let range = self.config.log_query_block_range;
        let logs = self.logs(from, to, range, &self.addresses, &[]).await?;
        tracing::trace!(target: "zkevm::watcher", from, to, logs = logs.len(), "fetched logs");

        let mut assembler = BlockAssembler::default();
        let mut forced_batches = ForcedBatchIndex::default();
        let mut cache = TransactionCache::new(self.config.transaction_cache_capacity);

        for log in logs {
            let Some(kind) = self.decoder.kind(&log) else {
                self.metrics.ignored_logs.increment(1);
                continue
            };

            let header = self.header_for_log(&log, &assembler).await?;
            if assembler.current().map(|block| block.hash) != Some(header.hash) {
                assembler.start(&header);
            }

            let transaction = if self.decoder.requires_transaction(&log) {
                let tx_hash = log.transaction_hash.ok_or(FilterLogError::MissingTransactionHash)?;
                Some(cache.get_transaction_by_hash(tx_hash, &self.source).await?)
            } else {
                None
            };

            if let Some(event) =
                self.decoder.decode(&log, &header, transaction.as_ref(), &mut forced_batches)?
            {
                self.metrics.process_event(kind);
                assembler.push(event);
            }
        }

        if self.config.boundary_policy == BoundaryBlockPolicy::IncludeLast &&
            assembler.current().map(|block| block.number) != Some(to)
        {
            let header = self
                .source
                .header(BlockNumberOrTag::Number(to))
                .await?
                .ok_or(EthRequestError::MissingBlock(to))?;
            assembler.start(&header);
        }

        let info = assembler.finish();
        self.metrics.scan_duration.record(start.elapsed().as_secs_f64());
        tracing::debug!(target: "zkevm::watcher", from, to, blocks = info.blocks.len(), "scanned rollup info");

        Ok(info)
    }

    /// Scans the fork id updates emitted by the rollup contract in the blocks `[from, to]`, querying
    /// `chunk_size` blocks at a time.
    #[tracing::instrument(skip(self))]
    pub async fn scan_fork_ids(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        chunk_size: u64,
    ) -> L1ScannerResult<Vec<ForkId>> {
        if from > to {
            return Err(L1ScannerError::InvalidRange { from, to });
        }

        let addresses = [self.config.contracts.rollup];
        let topics = [UpdateZkEVMVersion::SIGNATURE_HASH];
        let logs = self.logs(from, to, chunk_size, &addresses, &topics).await?;

        let forks = logs
            .iter()
            .map(|log| {
                let block_number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;
                Ok(decode_fork_id(log, block_number)?)
            })
            .collect::<L1ScannerResult<Vec<_>>>()?;
        self.metrics.fork_ids.increment(forks.len() as u64);

        Ok(forks)
    }

    /// Returns the latest block of the source.
    pub async fn latest_block(&self) -> L1ScannerResult<L1Header> {
        Ok(self
            .source
            .header(BlockNumberOrTag::Latest)
            .await?
            .ok_or(EthRequestError::MissingLatestBlock)?)
    }

    /// Fetches the logs of the blocks `[from, to]` in pages of `range` blocks. The logs are
    /// returned sorted by block number and log index, without removed logs.
    async fn logs(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        range: u64,
        addresses: &[Address],
        topics: &[B256],
    ) -> L1ScannerResult<Vec<Log>> {
        let range = range.max(1);
        let mut logs = Vec::new();

        let mut page_start = from;
        loop {
            let page_end = page_start.saturating_add(range - 1).min(to);
            let page = self.source.filter_logs(page_start, page_end, addresses, topics).await?;
            tracing::trace!(target: "zkevm::watcher", page_start, page_end, logs = page.len(), "fetched logs page");
            logs.extend(page.into_iter().filter(|log| !log.removed));

            if page_end == to {
                break
            }
            page_start = page_end + 1;
        }

        let mut keyed = logs
            .into_iter()
            .map(|log| {
                let number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;
                let index = log.log_index.ok_or(FilterLogError::MissingLogIndex)?;
                if log.block_hash.is_none() {
                    return Err(FilterLogError::MissingBlockHash);
                }
                Ok(((number, index), log))
            })
            .collect::<Result<Vec<_>, _>>()?;
        keyed.sort_by_key(|(key, _)| *key);

        Ok(keyed.into_iter().map(|(_, log)| log).collect())
    }

    /// Returns the header of the block of the log, fetching it on the first event of the block.
    async fn header_for_log(
        &self,
        log: &Log,
        assembler: &BlockAssembler,
    ) -> L1ScannerResult<L1Header> {
        let number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;
        let hash = log.block_hash.ok_or(FilterLogError::MissingBlockHash)?;

        if let Some(current) = assembler.current().filter(|block| block.number == number) {
            if current.hash != hash {
                return Err(EthRequestError::BlockHashMismatch {
                    number,
                    log_hash: hash,
                    header_hash: current.hash,
                }
                .into());
            }
            return Ok(L1Header {
                number,
                hash,
                parent_hash: current.parent_hash,
                timestamp: current.timestamp,
            });
        }

        let header = self
            .source
            .header(BlockNumberOrTag::Number(number))
            .await?
            .ok_or(EthRequestError::MissingBlock(number))?;
        if header.hash != hash {
            return Err(EthRequestError::BlockHashMismatch {
                number,
                log_hash: hash,
                header_hash: header.hash,
            }
            .into());
        }

        Ok(header)
    }
}

/// Assembles the blocks of a scan in ascending order along with the order of their events.
#[derive(Debug, Default)]
struct BlockAssembler {
    blocks: Vec<L1Block>,
    order: OrderIndex,
}

impl BlockAssembler {
    /// Returns the block being assembled.
    fn current(&self) -> Option<&L1Block> {
        self.blocks.last()
    }

    /// Starts the assembly of a new block.
    fn start(&mut self, header: &L1Header) {
        self.order.entry(header.hash).or_default();
        self.blocks.push(L1Block::new(header));
    }

    /// Appends the event to the current block.
    fn push(&mut self, event: RollupEvent) {
        let Some(block) = self.blocks.last_mut() else { return };
        let (kind, index) = block.push(event);

        let entries = self.order.entry(block.hash).or_default();
        entries.push(OrderEntry { kind, position: entries.len(), index });
    }

    fn finish(self) -> RollupInfo {
        RollupInfo { blocks: self.blocks, order: self.order }
    }
}
