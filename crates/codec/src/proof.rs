//! A bit-exact codec between the hexadecimal proof produced by the prover and the fixed array of
//! words expected by the rollup contract.

use crate::ProofError;
use alloy_primitives::{hex, B256};

/// The number of 32-byte words in a proof.
pub const PROOF_CHUNKS: usize = 24;

/// The length of a proof in bytes.
pub const PROOF_LENGTH: usize = PROOF_CHUNKS * 32;

/// A proof as expected by the rollup contract.
pub type Proof = [B256; PROOF_CHUNKS];

/// Decodes the hexadecimal proof, with or without `0x` prefix, into its words. Word `i` holds the
/// bytes `[32 * i, 32 * i + 32)` of the proof.
pub fn decode_proof(proof: &str) -> Result<Proof, ProofError> {
    let bytes = hex::decode(proof)?;
    if bytes.len() != PROOF_LENGTH {
        return Err(ProofError::InvalidLength(bytes.len()));
    }

    let mut words = [B256::ZERO; PROOF_CHUNKS];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(32)) {
        *word = B256::from_slice(chunk);
    }
    Ok(words)
}

/// Encodes the proof words into a `0x` prefixed lowercase hexadecimal string.
pub fn encode_proof(proof: &Proof) -> String {
    hex::encode_prefixed(proof.iter().flat_map(|word| word.0).collect::<Vec<u8>>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proof_hex() -> String {
        (0..PROOF_LENGTH).map(|i| format!("{:02x}", i % 256)).collect()
    }

    #[test]
    fn test_should_decode_proof_words() -> eyre::Result<()> {
        let hex = proof_hex();
        let proof = decode_proof(&hex)?;

        assert_eq!(proof[0][0], 0x00);
        assert_eq!(proof[0][31], 0x1f);
        assert_eq!(proof[1][0], 0x20);
        assert_eq!(proof[23][31], ((PROOF_LENGTH - 1) % 256) as u8);

        Ok(())
    }

    #[test]
    fn test_should_normalize_on_encode() -> eyre::Result<()> {
        let hex = proof_hex().to_uppercase();
        let prefixed = format!("0x{hex}");

        let from_bare = decode_proof(&hex)?;
        let from_prefixed = decode_proof(&prefixed)?;
        assert_eq!(from_bare, from_prefixed);
        assert_eq!(encode_proof(&from_bare), format!("0x{}", hex.to_lowercase()));

        Ok(())
    }

    #[test]
    fn test_should_reject_invalid_length() {
        let short = "ab".repeat(PROOF_LENGTH - 1);
        let long = "ab".repeat(PROOF_LENGTH + 1);

        assert!(matches!(decode_proof(&short), Err(ProofError::InvalidLength(767))));
        assert!(matches!(decode_proof(&long), Err(ProofError::InvalidLength(769))));
        assert!(matches!(decode_proof("0x"), Err(ProofError::InvalidLength(0))));
    }

    #[test]
    fn test_should_reject_invalid_hex() {
        let invalid = format!("zz{}", "ab".repeat(PROOF_LENGTH - 1));
        assert!(matches!(decode_proof(&invalid), Err(ProofError::InvalidHex(_))));
    }
}
