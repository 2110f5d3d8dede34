use alloy_primitives::B256;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MerkleError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("leaves cannot be empty")]
    EmptyLeaves,

    #[error("too many leaves: {count} > {max}")]
    TooManyLeaves { count: usize, max: usize },

    #[error("proof needs {total_hashes} hashes, at most {max} are allowed")]
    TooManyHashes { total_hashes: usize, max: usize },

    #[error("proof length mismatch for {leaves} leaves and {proofs} proof hashes: {reason}")]
    ProofLengthMismatch {
        leaves: usize,
        proofs: usize,
        reason: &'static str,
    },

    #[error("invalid proof: {0}")]
    InvalidProof(&'static str),

    #[error("leaf index {index} out of range for {leaves} leaves")]
    IndexOutOfRange { index: usize, leaves: usize },

    #[error("leaf indices must be strictly increasing")]
    UnsortedIndices,

    #[error("root mismatch: expected {expected}, computed {computed}")]
    RootMismatch { expected: B256, computed: B256 },
}
