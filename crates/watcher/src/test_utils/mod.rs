use crate::random;

use alloy_primitives::{Address, TxHash};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use zkevm_sync_primitives::L1Header;

/// Test utils for arbitrary.
pub mod arbitrary;

/// Returns a chain of random headers of size `len`, starting at block `start`.
pub fn chain(start: u64, len: usize) -> Vec<L1Header> {
    let mut chain: Vec<L1Header> = Vec::with_capacity(len);
    for i in 0..len {
        let mut next = random!(L1Header);
        match chain.last() {
            Some(parent) => {
                next.parent_hash = parent.hash;
                next.timestamp = parent.timestamp + 12;
            }
            None => next.timestamp = 1_700_000_000,
        }
        next.number = start + i as u64;
        chain.push(next);
    }
    chain
}

/// Returns the log of the event, emitted by the address in the transaction at the provided
/// position of the block.
pub fn log<E: SolEvent>(
    address: Address,
    event: &E,
    header: &L1Header,
    log_index: u64,
    tx_hash: TxHash,
) -> Log {
    Log {
        inner: alloy_primitives::Log { address, data: event.encode_log_data() },
        block_hash: Some(header.hash),
        block_number: Some(header.number),
        block_timestamp: None,
        transaction_hash: Some(tx_hash),
        transaction_index: Some(0),
        log_index: Some(log_index),
        removed: false,
    }
}
