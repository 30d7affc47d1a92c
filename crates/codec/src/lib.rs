//! Encoders for the payloads submitted to the zkEVM rollup contract: the fixed-width proof codec,
//! the batch sequencing payload and the trusted verification payload.

pub use error::{ProofError, SequenceError};
mod error;

pub use proof::{decode_proof, encode_proof, Proof, PROOF_CHUNKS, PROOF_LENGTH};
pub mod proof;

pub use sequence::{build_sequence_payload, Sequence, SequencePayload};
pub mod sequence;

pub use verify::TrustedVerifyBatchesPayload;
pub mod verify;
