/// The batch number marking an interval without upper bound.
pub const OPEN_BATCH_NUMBER: u64 = u64::MAX;

/// The fork id ruling the chain from genesis.
pub const GENESIS_FORK_ID: u64 = 1;

/// The version of the genesis fork.
pub const GENESIS_FORK_VERSION: &str = "v1";

/// A range of batches ruled by a fork id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkIdInterval {
    /// The fork id.
    pub fork_id: u64,
    /// The first batch number of the interval.
    pub from_batch_number: u64,
    /// The last batch number of the interval, [`OPEN_BATCH_NUMBER`] while the fork is active.
    pub to_batch_number: u64,
    /// The version string of the fork.
    pub version: String,
    /// The L1 block at which the fork was introduced, zero for the genesis fork.
    pub activation_block: u64,
}

impl ForkIdInterval {
    /// Returns the genesis interval, covering every batch.
    pub fn genesis(fork_id: u64, version: impl Into<String>) -> Self {
        Self {
            fork_id,
            from_batch_number: 1,
            to_batch_number: OPEN_BATCH_NUMBER,
            version: version.into(),
            activation_block: 0,
        }
    }

    /// Returns true if the interval has no upper bound.
    pub const fn is_open(&self) -> bool {
        self.to_batch_number == OPEN_BATCH_NUMBER
    }

    /// Returns true if the batch number falls in the interval.
    pub const fn contains(&self, batch_number: u64) -> bool {
        self.from_batch_number <= batch_number && batch_number <= self.to_batch_number
    }
}
