//! Merkle multi-proofs over CCIP message leaves.
//!
//! [`Tree`] builds the commit root and multi-proofs for any subset of its
//! leaves; [`compute_root`] and [`verify_compute_root`] re-derive a root from a
//! proof the way the destination offramp does.

pub mod error;
pub mod proof;
pub mod tree;

pub use error::{MerkleError, Result};
pub use proof::{
    MAX_NUM_HASHES, Proof, bits_to_proof_flags, compute_root, ensure_root, proof_flags_to_bits, verify_compute_root,
};
pub use tree::{
    INTERNAL_DOMAIN_SEPARATOR, LEAF_DOMAIN_SEPARATOR, MAX_NUMBER_TREE_LEAVES, Tree, ZERO_HASH, hash_internal,
};
