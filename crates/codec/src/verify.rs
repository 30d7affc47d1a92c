//! The payload of a batch verification by the trusted aggregator.

use crate::{decode_proof, Proof, ProofError};
use alloy_primitives::{Bytes, B256};
use alloy_sol_types::SolCall;
use zkevm_l1::abi::calls::verifyBatchesTrustedAggregatorCall;

/// The payload of a `verifyBatchesTrustedAggregator` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedVerifyBatchesPayload {
    /// The pending state to consolidate, zero to verify from the last consolidated state.
    pub pending_state_num: u64,
    /// The last verified batch number.
    pub init_num_batch: u64,
    /// The last batch number to verify.
    pub final_new_batch: u64,
    /// The local exit root after the batches.
    pub new_local_exit_root: B256,
    /// The state root after the batches.
    pub new_state_root: B256,
    /// The proof of the state transition.
    pub proof: Proof,
}

impl TrustedVerifyBatchesPayload {
    /// Returns a new payload, decoding the hexadecimal proof.
    pub fn new(
        pending_state_num: u64,
        init_num_batch: u64,
        final_new_batch: u64,
        new_local_exit_root: B256,
        new_state_root: B256,
        proof: &str,
    ) -> Result<Self, ProofError> {
        Ok(Self {
            pending_state_num,
            init_num_batch,
            final_new_batch,
            new_local_exit_root,
            new_state_root,
            proof: decode_proof(proof)?,
        })
    }

    /// Returns the ABI encoded `verifyBatchesTrustedAggregator` calldata.
    pub fn calldata(&self) -> Bytes {
        verifyBatchesTrustedAggregatorCall {
            pendingStateNum: self.pending_state_num,
            initNumBatch: self.init_num_batch,
            finalNewBatch: self.final_new_batch,
            newLocalExitRoot: self.new_local_exit_root,
            newStateRoot: self.new_state_root,
            proof: self.proof,
        }
        .abi_encode()
        .into()
    }
}
