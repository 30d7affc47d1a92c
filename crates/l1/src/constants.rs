use alloy_primitives::{address, Address};

/// The address of the rollup contract on mainnet.
pub const MAINNET_ROLLUP_ADDRESS: Address = address!("0x5132A183E9F3CB7C848b0AAC5Ae0c4f0491B7aB2");

/// The address of the global exit root manager contract on mainnet.
pub const MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS: Address =
    address!("0x580bda1e7A0CFAe92Fa7F6c20A3794F169CE3CFb");

/// The address of the bridge contract on mainnet.
pub const MAINNET_BRIDGE_ADDRESS: Address = address!("0x2a3DD3EB832aF982ec71669E178424b10Dca2EDe");

/// The L1 block at which the rollup contracts were deployed on mainnet.
pub const MAINNET_GENESIS_BLOCK: u64 = 16_896_718;
