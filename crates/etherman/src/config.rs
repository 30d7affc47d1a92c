use alloy_primitives::Address;
use std::num::NonZeroUsize;
use zkevm_l1::{
    MAINNET_BRIDGE_ADDRESS, MAINNET_GENESIS_BLOCK, MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
    MAINNET_ROLLUP_ADDRESS,
};
use zkevm_l1_watcher::{
    BoundaryBlockPolicy, L1ScannerConfig, TrackedContracts, DEFAULT_LOG_QUERY_BLOCK_RANGE,
    DEFAULT_TRANSACTION_CACHE_CAPACITY,
};
use zkevm_sync_primitives::{GENESIS_FORK_ID, GENESIS_FORK_VERSION};

/// The default block range of a fork id query.
pub const DEFAULT_FORK_ID_CHUNK_SIZE: u64 = 20_000;

/// The configuration of the [`crate::Etherman`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthermanConfig {
    /// The tracked contracts.
    pub contracts: TrackedContracts,
    /// The address of the price feed, if any.
    pub price_feed: Option<Address>,
    /// The L1 block at which the rollup contracts were deployed, where fork id history scans start.
    pub genesis_block: u64,
    /// The block range of a log query.
    pub log_query_block_range: u64,
    /// The block range of a fork id query.
    pub fork_id_chunk_size: u64,
    /// The boundary block policy of the scans.
    pub boundary_policy: BoundaryBlockPolicy,
    /// The capacity of the per-scan transaction cache.
    pub transaction_cache_capacity: NonZeroUsize,
    /// The fork id ruling the chain from genesis.
    pub genesis_fork_id: u64,
    /// The version of the genesis fork.
    pub genesis_fork_version: String,
}

impl EthermanConfig {
    /// Returns the configuration for the provided contracts, with default values.
    pub fn new(contracts: TrackedContracts) -> Self {
        Self {
            contracts,
            price_feed: None,
            genesis_block: 0,
            log_query_block_range: DEFAULT_LOG_QUERY_BLOCK_RANGE,
            fork_id_chunk_size: DEFAULT_FORK_ID_CHUNK_SIZE,
            boundary_policy: BoundaryBlockPolicy::default(),
            transaction_cache_capacity: DEFAULT_TRANSACTION_CACHE_CAPACITY,
            genesis_fork_id: GENESIS_FORK_ID,
            genesis_fork_version: GENESIS_FORK_VERSION.to_string(),
        }
    }

    /// Returns the configuration for mainnet.
    pub fn mainnet() -> Self {
        Self {
            genesis_block: MAINNET_GENESIS_BLOCK,
            ..Self::new(TrackedContracts {
                rollup: MAINNET_ROLLUP_ADDRESS,
                global_exit_root_manager: MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
                bridge: MAINNET_BRIDGE_ADDRESS,
                data_committee: None,
            })
        }
    }

    /// Returns the configuration of the L1 scanner.
    pub const fn scanner_config(&self) -> L1ScannerConfig {
        L1ScannerConfig {
            contracts: self.contracts,
            log_query_block_range: self.log_query_block_range,
            boundary_policy: self.boundary_policy,
            transaction_cache_capacity: self.transaction_cache_capacity,
        }
    }
}
