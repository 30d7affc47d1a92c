//! The timeline of fork ids, keyed by batch number.

use zkevm_sync_primitives::{
    ForkId, ForkIdInterval, GENESIS_FORK_ID, GENESIS_FORK_VERSION, OPEN_BATCH_NUMBER,
};

/// An error that occurred when applying a fork id update.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ForkIdError {
    /// The update starts before the active fork.
    #[error("fork id {fork_id} starts at batch {first_batch} before the active fork at batch {active_from}")]
    NonMonotonic {
        /// The fork id of the update.
        fork_id: u64,
        /// The first batch of the update.
        first_batch: u64,
        /// The first batch of the active fork.
        active_from: u64,
    },
    /// The update was emitted before the last applied update but is not part of the timeline.
    #[error("fork id {fork_id} at {block}:{log_index} precedes the last applied update at {last_block}:{last_log_index}")]
    OutOfOrder {
        /// The fork id of the update.
        fork_id: u64,
        /// The L1 block of the update.
        block: u64,
        /// The log index of the update.
        log_index: u64,
        /// The L1 block of the last applied update.
        last_block: u64,
        /// The log index of the last applied update.
        last_log_index: u64,
    },
}

/// An applied fork id update, as the interval it opened.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Update {
    /// The L1 coordinates `(block, log_index)` of the update, `None` for the genesis fork.
    coordinates: Option<(u64, u64)>,
    interval: ForkIdInterval,
}

/// Tracks the fork id intervals as updates are observed on L1.
///
/// The intervals never overlap, cover every batch number from 1 and the last one is open-ended.
/// Updates must be applied in L1 order. Every applied update is kept so the timeline can be
/// replayed as it was at any block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkIdTracker {
    intervals: Vec<ForkIdInterval>,
    updates: Vec<Update>,
}

impl Default for ForkIdTracker {
    fn default() -> Self {
        Self::new(GENESIS_FORK_ID, GENESIS_FORK_VERSION)
    }
}

impl ForkIdTracker {
    /// Returns a new [`ForkIdTracker`] with the genesis fork covering every batch.
    pub fn new(genesis_fork_id: u64, genesis_version: impl Into<String>) -> Self {
        let genesis = ForkIdInterval::genesis(genesis_fork_id, genesis_version);
        Self {
            intervals: vec![genesis.clone()],
            updates: vec![Update { coordinates: None, interval: genesis }],
        }
    }

    /// Applies a fork id update observed on L1. Returns false if the update was already applied.
    ///
    /// An update emitted before the last applied one is rejected unless it was already applied.
    pub fn apply(
        &mut self,
        first_batch: u64,
        fork_id: u64,
        version: &str,
        block: u64,
        log_index: u64,
    ) -> Result<bool, ForkIdError> {
        let coordinates = (block, log_index);
        if let Some((last_block, last_log_index)) = self.last_applied() {
            if coordinates <= (last_block, last_log_index) {
                if self.updates.iter().any(|update| update.coordinates == Some(coordinates)) {
                    tracing::trace!(target: "zkevm::watcher", fork_id, block, log_index, "skipping applied fork id");
                    return Ok(false);
                }
                return Err(ForkIdError::OutOfOrder {
                    fork_id,
                    block,
                    log_index,
                    last_block,
                    last_log_index,
                });
            }
        }

        let interval = ForkIdInterval {
            fork_id,
            from_batch_number: first_batch,
            to_batch_number: OPEN_BATCH_NUMBER,
            version: version.to_string(),
            activation_block: block,
        };
        push_interval(&mut self.intervals, interval.clone())?;
        self.updates.push(Update { coordinates: Some(coordinates), interval });

        tracing::debug!(target: "zkevm::watcher", fork_id, first_batch, version, block, "applied fork id");
        Ok(true)
    }

    /// Applies the fork id update recorded in an L1 block.
    pub fn apply_event(&mut self, event: &ForkId) -> Result<bool, ForkIdError> {
        self.apply(
            event.first_batch_number(),
            event.fork_id,
            &event.version,
            event.block_number,
            event.log_index,
        )
    }

    /// Returns the L1 coordinates `(block, log_index)` of the last applied update.
    pub fn last_applied(&self) -> Option<(u64, u64)> {
        self.updates.last().and_then(|update| update.coordinates)
    }

    /// Returns every interval of the timeline.
    pub fn intervals(&self) -> &[ForkIdInterval] {
        &self.intervals
    }

    /// Returns the interval containing the batch number.
    pub fn interval_for_batch(&self, batch_number: u64) -> Option<&ForkIdInterval> {
        self.intervals.iter().find(|interval| interval.contains(batch_number))
    }

    /// Returns the timeline as it was at block `to`, restricted to the intervals active at some
    /// block of `[from, to]`. The last returned interval is open-ended.
    pub fn intervals_in_block_range(&self, from: u64, to: u64) -> Vec<ForkIdInterval> {
        let known =
            self.updates.partition_point(|update| update.interval.activation_block <= to).max(1);

        // Applied updates replay without error.
        let mut view = Vec::with_capacity(known);
        for update in &self.updates[..known] {
            let _ = push_interval(&mut view, update.interval.clone());
        }

        let mut intervals: Vec<_> = view
            .iter()
            .enumerate()
            .filter(|(i, _)| view.get(i + 1).map_or(true, |next| next.activation_block > from))
            .map(|(_, interval)| interval.clone())
            .collect();
        if let Some(last) = intervals.last_mut() {
            last.to_batch_number = OPEN_BATCH_NUMBER;
        }
        intervals
    }
}

/// Pushes the open interval of an update at the end of the timeline, closing the previous one. An
/// update starting on the first batch of the open interval replaces its fork id, or only refreshes
/// its version for the same fork id.
fn push_interval(
    intervals: &mut Vec<ForkIdInterval>,
    interval: ForkIdInterval,
) -> Result<(), ForkIdError> {
    let Some(open) = intervals.last_mut() else {
        intervals.push(interval);
        return Ok(());
    };

    if interval.from_batch_number < open.from_batch_number {
        return Err(ForkIdError::NonMonotonic {
            fork_id: interval.fork_id,
            first_batch: interval.from_batch_number,
            active_from: open.from_batch_number,
        });
    }

    if interval.from_batch_number == open.from_batch_number {
        if open.fork_id != interval.fork_id {
            open.fork_id = interval.fork_id;
            open.activation_block = interval.activation_block;
        }
        open.version = interval.version;
    } else {
        open.to_batch_number = interval.from_batch_number - 1;
        intervals.push(interval);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(fork_id: u64, from: u64, to: u64, version: &str, block: u64) -> ForkIdInterval {
        ForkIdInterval {
            fork_id,
            from_batch_number: from,
            to_batch_number: to,
            version: version.to_string(),
            activation_block: block,
        }
    }

    #[test]
    fn test_should_start_from_baseline() {
        let tracker = ForkIdTracker::default();
        assert_eq!(tracker.intervals(), &[interval(1, 1, OPEN_BATCH_NUMBER, "v1", 0)]);
        assert_eq!(tracker.intervals_in_block_range(0, 132), tracker.intervals());
    }

    #[test]
    fn test_should_close_open_interval() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::default();
        assert!(tracker.apply(50, 2, "v2", 100, 0)?);

        assert_eq!(
            tracker.intervals(),
            &[interval(1, 1, 49, "v1", 0), interval(2, 50, OPEN_BATCH_NUMBER, "v2", 100)]
        );
        assert_eq!(tracker.interval_for_batch(49).map(|i| i.fork_id), Some(1));
        assert_eq!(tracker.interval_for_batch(50).map(|i| i.fork_id), Some(2));

        Ok(())
    }

    #[test]
    fn test_should_refresh_genesis_version() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::new(1, "");
        let genesis = ForkId {
            block_number: 10,
            batch_number: 0,
            fork_id: 1,
            version: "v1".into(),
            ..Default::default()
        };

        assert!(tracker.apply_event(&genesis)?);
        assert_eq!(tracker.intervals(), &[interval(1, 1, OPEN_BATCH_NUMBER, "v1", 0)]);

        Ok(())
    }

    #[test]
    fn test_should_replace_unclosed_interval() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::default();
        tracker.apply(50, 2, "v2", 100, 0)?;
        tracker.apply(50, 3, "v3", 101, 0)?;

        assert_eq!(
            tracker.intervals(),
            &[interval(1, 1, 49, "v1", 0), interval(3, 50, OPEN_BATCH_NUMBER, "v3", 101)]
        );

        Ok(())
    }

    #[test]
    fn test_should_skip_applied_updates() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::default();
        assert!(tracker.apply(50, 2, "v2", 100, 3)?);

        let before = tracker.clone();
        assert!(!tracker.apply(50, 2, "v2", 100, 3)?);
        assert_eq!(tracker, before);
        assert_eq!(tracker.last_applied(), Some((100, 3)));

        Ok(())
    }

    #[test]
    fn test_should_reject_missed_earlier_update() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::default();
        tracker.apply(50, 3, "v3", 106, 0)?;

        let before = tracker.clone();
        let err = tracker.apply(20, 2, "v2", 102, 0).unwrap_err();
        assert_eq!(
            err,
            ForkIdError::OutOfOrder {
                fork_id: 2,
                block: 102,
                log_index: 0,
                last_block: 106,
                last_log_index: 0
            }
        );
        assert_eq!(tracker, before);

        // A later log of the same block is still in order.
        assert!(tracker.apply(60, 4, "v4", 106, 1)?);

        Ok(())
    }

    #[test]
    fn test_should_view_replaced_interval_before_replacement() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::default();
        tracker.apply(50, 2, "v2", 100, 0)?;
        tracker.apply(50, 3, "v3", 110, 0)?;

        assert_eq!(tracker.intervals_in_block_range(0, 105), vec![
            interval(1, 1, 49, "v1", 0),
            interval(2, 50, OPEN_BATCH_NUMBER, "v2", 100),
        ]);
        assert_eq!(tracker.intervals_in_block_range(0, 110), vec![
            interval(1, 1, 49, "v1", 0),
            interval(3, 50, OPEN_BATCH_NUMBER, "v3", 110),
        ]);

        Ok(())
    }

    #[test]
    fn test_should_reject_non_monotonic_update() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::default();
        tracker.apply(50, 2, "v2", 100, 0)?;

        let err = tracker.apply(20, 3, "v3", 200, 0).unwrap_err();
        assert_eq!(err, ForkIdError::NonMonotonic { fork_id: 3, first_batch: 20, active_from: 50 });

        Ok(())
    }

    #[test]
    fn test_should_view_intervals_in_block_range() -> Result<(), ForkIdError> {
        let mut tracker = ForkIdTracker::default();
        tracker.apply(50, 2, "v2", 100, 0)?;
        tracker.apply(80, 3, "v3", 200, 0)?;

        // Before the first update only the genesis fork is known, open-ended.
        assert_eq!(
            tracker.intervals_in_block_range(0, 99),
            vec![interval(1, 1, OPEN_BATCH_NUMBER, "v1", 0)]
        );

        // At block 150 the second fork is open.
        assert_eq!(tracker.intervals_in_block_range(0, 150), vec![
            interval(1, 1, 49, "v1", 0),
            interval(2, 50, OPEN_BATCH_NUMBER, "v2", 100),
        ]);

        // The genesis fork was replaced before block 150.
        assert_eq!(tracker.intervals_in_block_range(150, 250), vec![
            interval(2, 50, 79, "v2", 100),
            interval(3, 80, OPEN_BATCH_NUMBER, "v3", 200),
        ]);

        Ok(())
    }
}
