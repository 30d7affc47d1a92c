//! The entry point of the zkEVM L1 synchronization core: scans the rollup contracts, tracks the
//! fork ids, suggests L1 gas prices and submits batches.

pub use args::{ContractAddressArgs, EthermanArgs, GasPriceOracleArgs, L1ScanArgs};
mod args;

pub use config::{EthermanConfig, DEFAULT_FORK_ID_CHUNK_SIZE};
mod config;

pub use error::EthermanError;
mod error;

pub use etherman::Etherman;
mod etherman;

pub use zkevm_codec::{decode_proof, encode_proof, Proof, Sequence, TrustedVerifyBatchesPayload};
