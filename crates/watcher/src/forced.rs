use crate::DecodeError;

use alloy_primitives::B256;
use std::collections::BTreeMap;
use zkevm_sync_primitives::ForcedBatch;

/// The forced batches observed during a scan pass, keyed by forced batch number.
#[derive(Debug, Default)]
pub struct ForcedBatchIndex {
    batches: BTreeMap<u64, ForcedBatchEntry>,
}

#[derive(Debug)]
struct ForcedBatchEntry {
    transactions_hash: B256,
    forced_at: u64,
    redeemed: bool,
}

impl ForcedBatchIndex {
    /// Inserts the forced batch in the index. Forced batch numbers must increase by exactly one.
    pub fn insert(&mut self, batch: &ForcedBatch) -> Result<(), DecodeError> {
        if let Some((last, _)) = self.batches.last_key_value() {
            let expected = last.saturating_add(1);
            if batch.forced_batch_number != expected {
                return Err(DecodeError::NonSequentialForcedBatch {
                    expected,
                    got: batch.forced_batch_number,
                });
            }
        }

        self.batches.insert(
            batch.forced_batch_number,
            ForcedBatchEntry {
                transactions_hash: batch.transactions_hash(),
                forced_at: batch.forced_at,
                redeemed: false,
            },
        );
        Ok(())
    }

    /// Redeems the lowest-numbered unredeemed forced batch with the provided transactions hash.
    /// Returns the timestamp at which it was forced.
    pub fn redeem(&mut self, transactions_hash: &B256) -> Option<u64> {
        let (number, entry) = self
            .batches
            .iter_mut()
            .find(|(_, entry)| !entry.redeemed && entry.transactions_hash == *transactions_hash)?;
        entry.redeemed = true;

        tracing::trace!(target: "zkevm::watcher", forced_batch_number = number, forced_at = entry.forced_at, "redeemed forced batch");
        Some(entry.forced_at)
    }

    /// Returns the number of forced batches in the index.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns true if the index holds no forced batch.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
