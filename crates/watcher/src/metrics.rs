use metrics::{Counter, Histogram};
use metrics_derive::Metrics;
use zkevm_sync_primitives::EventKind;

/// The metrics for the [`super::L1Scanner`].
#[derive(Metrics, Clone)]
#[metrics(scope = "l1_scanner")]
pub struct ScannerMetrics {
    /// A counter on the scans.
    pub scans: Counter,
    /// A counter on the logs of tracked contracts which are not rollup events.
    pub ignored_logs: Counter,
    /// A counter on the global exit roots processed.
    pub global_exit_roots: Counter,
    /// A counter on the forced batches processed.
    pub forced_batches: Counter,
    /// A counter on the batch sequencing processed.
    pub sequenced_batches: Counter,
    /// A counter on the forced batch sequencing processed.
    pub sequenced_force_batches: Counter,
    /// A counter on the batch verifications processed.
    pub verified_batches: Counter,
    /// A counter on the fork id updates processed.
    pub fork_ids: Counter,
    /// A histogram of the scan durations, in seconds.
    pub scan_duration: Histogram,
}

impl ScannerMetrics {
    /// Processed an event by updating the appropriate metric.
    pub fn process_event(&self, kind: EventKind) {
        match kind {
            EventKind::GlobalExitRoot => self.global_exit_roots.increment(1),
            EventKind::ForcedBatch => self.forced_batches.increment(1),
            EventKind::SequenceBatches => self.sequenced_batches.increment(1),
            EventKind::SequenceForceBatches => self.sequenced_force_batches.increment(1),
            EventKind::TrustedVerifyBatches | EventKind::VerifyBatches => {
                self.verified_batches.increment(1)
            }
            EventKind::ForkId => self.fork_ids.increment(1),
        }
    }
}
