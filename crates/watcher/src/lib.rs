//! L1 scanner for the zkEVM synchronization core: decodes the logs of the rollup contracts into
//! typed events, assembles them per block and tracks the fork id timeline.

mod cache;

mod decoder;
pub use decoder::{decode_fork_id, EventDecoder, TrackedContracts};

mod error;
pub(crate) use error::L1ScannerResult;
pub use error::{DecodeError, EthRequestError, FilterLogError, L1ScannerError};

mod forced;
pub use forced::ForcedBatchIndex;

pub mod forks;
pub use forks::{ForkIdError, ForkIdTracker};

mod metrics;
pub use metrics::ScannerMetrics;

mod scanner;
pub use scanner::{
    BoundaryBlockPolicy, L1Scanner, L1ScannerConfig, DEFAULT_LOG_QUERY_BLOCK_RANGE,
    DEFAULT_TRANSACTION_CACHE_CAPACITY,
};

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;
