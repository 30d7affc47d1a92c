use alloy_primitives::hex::FromHexError;

/// An error occurring while decoding a proof.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// The proof is not valid hexadecimal.
    #[error("invalid proof hex: {0}")]
    InvalidHex(#[from] FromHexError),
    /// The proof does not decode to the expected number of bytes.
    #[error("invalid proof length: expected 768 bytes, got {0}")]
    InvalidLength(usize),
}

/// An error occurring while building a sequencing payload.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// No sequence was provided.
    #[error("empty sequence list")]
    Empty,
    /// The timestamps of the sequences are decreasing.
    #[error("sequence {index} has timestamp {current} lower than the previous timestamp {previous}")]
    OutOfOrderTimestamp {
        /// The index of the offending sequence.
        index: usize,
        /// The timestamp of the previous sequence.
        previous: u64,
        /// The timestamp of the offending sequence.
        current: u64,
    },
}
