use crate::{config::DEFAULT_FORK_ID_CHUNK_SIZE, EthermanConfig};

use alloy_primitives::Address;
use alloy_provider::Provider;
use std::{num::NonZeroUsize, sync::Arc};
use zkevm_l1::{
    MAINNET_BRIDGE_ADDRESS, MAINNET_GENESIS_BLOCK, MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
    MAINNET_ROLLUP_ADDRESS,
};
use zkevm_l1_watcher::{
    BoundaryBlockPolicy, TrackedContracts, DEFAULT_LOG_QUERY_BLOCK_RANGE,
    DEFAULT_TRANSACTION_CACHE_CAPACITY,
};
use zkevm_providers::{
    EthGasStationGasPricer, EtherscanGasPricer, GasOracleError, GasPriceOracle, GasPricer,
    NodeGasPricer, ETH_GAS_STATION_URL,
};
use zkevm_sync_primitives::{GENESIS_FORK_ID, GENESIS_FORK_VERSION};

/// The arguments for the L1 synchronization core, to be flattened in a host command.
#[derive(Debug, Clone, clap::Args)]
pub struct EthermanArgs {
    /// The contract addresses.
    #[command(flatten)]
    pub contracts: ContractAddressArgs,
    /// The L1 scan arguments.
    #[command(flatten)]
    pub scan: L1ScanArgs,
    /// The gas price oracle arguments.
    #[command(flatten)]
    pub gas_price_oracle: GasPriceOracleArgs,
}

impl EthermanArgs {
    /// Returns the [`EthermanConfig`] for the arguments.
    pub fn config(&self) -> EthermanConfig {
        EthermanConfig {
            contracts: self.contracts.tracked_contracts(),
            price_feed: self.contracts.price_feed,
            genesis_block: self.scan.genesis_block,
            log_query_block_range: self.scan.logs_query_block_range,
            fork_id_chunk_size: self.scan.fork_id_chunk_size,
            boundary_policy: if self.scan.include_last_block {
                BoundaryBlockPolicy::IncludeLast
            } else {
                BoundaryBlockPolicy::OmitEmpty
            },
            transaction_cache_capacity: self.scan.transaction_cache_capacity,
            genesis_fork_id: self.scan.genesis_fork_id,
            genesis_fork_version: self.scan.genesis_fork_version.clone(),
        }
    }
}

/// The addresses of the contracts tracked on L1.
#[derive(Debug, Clone, clap::Args)]
pub struct ContractAddressArgs {
    /// The address of the rollup contract.
    #[arg(long = "l1.rollup-address", id = "l1_rollup_address", value_name = "L1_ROLLUP_ADDRESS", default_value_t = MAINNET_ROLLUP_ADDRESS)]
    pub rollup: Address,
    /// The address of the global exit root manager contract.
    #[arg(long = "l1.ger-manager-address", id = "l1_ger_manager_address", value_name = "L1_GER_MANAGER_ADDRESS", default_value_t = MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS)]
    pub global_exit_root_manager: Address,
    /// The address of the bridge contract.
    #[arg(long = "l1.bridge-address", id = "l1_bridge_address", value_name = "L1_BRIDGE_ADDRESS", default_value_t = MAINNET_BRIDGE_ADDRESS)]
    pub bridge: Address,
    /// The address of the data availability committee contract, for validium deployments.
    #[arg(long = "l1.data-committee-address", id = "l1_data_committee_address", value_name = "L1_DATA_COMMITTEE_ADDRESS")]
    pub data_committee: Option<Address>,
    /// The address of the price feed.
    #[arg(long = "l1.price-feed-address", id = "l1_price_feed_address", value_name = "L1_PRICE_FEED_ADDRESS")]
    pub price_feed: Option<Address>,
}

impl Default for ContractAddressArgs {
    fn default() -> Self {
        Self {
            rollup: MAINNET_ROLLUP_ADDRESS,
            global_exit_root_manager: MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
            bridge: MAINNET_BRIDGE_ADDRESS,
            data_committee: None,
            price_feed: None,
        }
    }
}

impl ContractAddressArgs {
    /// Returns the [`TrackedContracts`] for the arguments.
    pub const fn tracked_contracts(&self) -> TrackedContracts {
        TrackedContracts {
            rollup: self.rollup,
            global_exit_root_manager: self.global_exit_root_manager,
            bridge: self.bridge,
            data_committee: self.data_committee,
        }
    }
}

/// The arguments for the L1 scans.
#[derive(Debug, Clone, clap::Args)]
pub struct L1ScanArgs {
    /// The L1 block at which the rollup contracts were deployed.
    #[arg(long = "l1.genesis-block", id = "l1_genesis_block", value_name = "L1_GENESIS_BLOCK", default_value_t = MAINNET_GENESIS_BLOCK)]
    pub genesis_block: u64,
    /// The logs query block range.
    #[arg(long = "l1.query-range", id = "l1_query_range", value_name = "L1_QUERY_RANGE", default_value_t = DEFAULT_LOG_QUERY_BLOCK_RANGE)]
    pub logs_query_block_range: u64,
    /// The fork id query block range.
    #[arg(long = "l1.fork-id-chunk-size", id = "l1_fork_id_chunk_size", value_name = "L1_FORK_ID_CHUNK_SIZE", default_value_t = DEFAULT_FORK_ID_CHUNK_SIZE)]
    pub fork_id_chunk_size: u64,
    /// Whether the last block of a scan is returned when it holds no rollup event.
    #[arg(long = "l1.include-last-block", id = "l1_include_last_block")]
    pub include_last_block: bool,
    /// The capacity of the transaction cache of a scan.
    #[arg(long = "l1.tx-cache-capacity", id = "l1_tx_cache_capacity", value_name = "L1_TX_CACHE_CAPACITY", default_value_t = DEFAULT_TRANSACTION_CACHE_CAPACITY)]
    pub transaction_cache_capacity: NonZeroUsize,
    /// The fork id ruling the chain from genesis.
    #[arg(long = "l1.genesis-fork-id", id = "l1_genesis_fork_id", value_name = "L1_GENESIS_FORK_ID", default_value_t = GENESIS_FORK_ID)]
    pub genesis_fork_id: u64,
    /// The version of the genesis fork.
    #[arg(long = "l1.genesis-fork-version", id = "l1_genesis_fork_version", value_name = "L1_GENESIS_FORK_VERSION", default_value = GENESIS_FORK_VERSION)]
    pub genesis_fork_version: String,
}

impl Default for L1ScanArgs {
    fn default() -> Self {
        Self {
            genesis_block: MAINNET_GENESIS_BLOCK,
            logs_query_block_range: DEFAULT_LOG_QUERY_BLOCK_RANGE,
            fork_id_chunk_size: DEFAULT_FORK_ID_CHUNK_SIZE,
            include_last_block: false,
            transaction_cache_capacity: DEFAULT_TRANSACTION_CACHE_CAPACITY,
            genesis_fork_id: GENESIS_FORK_ID,
            genesis_fork_version: GENESIS_FORK_VERSION.to_string(),
        }
    }
}

/// The arguments for the gas price oracle.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GasPriceOracleArgs {
    /// Disables the L1 node as gas price source.
    #[arg(long = "gpo.disable-node", id = "gpo_disable_node")]
    pub disable_node: bool,
    /// The Etherscan API key, enabling Etherscan as gas price source.
    #[arg(long = "gpo.etherscan-api-key", id = "gpo_etherscan_api_key", value_name = "GPO_ETHERSCAN_API_KEY", env = "ETHERSCAN_API_KEY")]
    pub etherscan_api_key: Option<String>,
    /// Enables ETH Gas Station as gas price source.
    #[arg(long = "gpo.eth-gas-station", id = "gpo_eth_gas_station")]
    pub eth_gas_station: bool,
    /// The ETH Gas Station endpoint.
    #[arg(long = "gpo.eth-gas-station-url", id = "gpo_eth_gas_station_url", value_name = "GPO_ETH_GAS_STATION_URL")]
    pub eth_gas_station_url: Option<String>,
}

impl GasPriceOracleArgs {
    /// Returns the gas pricers enabled by the arguments.
    pub fn pricers<P: Provider + 'static>(&self, provider: P) -> Vec<Arc<dyn GasPricer>> {
        let mut pricers: Vec<Arc<dyn GasPricer>> = Vec::new();
        if !self.disable_node {
            pricers.push(Arc::new(NodeGasPricer::new(provider)));
        }
        if let Some(api_key) = &self.etherscan_api_key {
            pricers.push(Arc::new(EtherscanGasPricer::new(api_key.clone())));
        }
        if self.eth_gas_station {
            let url = self.eth_gas_station_url.as_deref().unwrap_or(ETH_GAS_STATION_URL);
            pricers.push(Arc::new(EthGasStationGasPricer::new(url.to_string())));
        }
        pricers
    }

    /// Returns the [`GasPriceOracle`] for the arguments.
    pub fn oracle<P: Provider + 'static>(
        &self,
        provider: P,
    ) -> Result<GasPriceOracle, GasOracleError> {
        GasPriceOracle::new(self.pricers(provider))
    }
}
