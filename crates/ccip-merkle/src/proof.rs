//! Multi-proof verification, a port of the offramp's `MerkleMultiProof._merkleRoot`.

use alloy_primitives::{B256, U256};

use crate::error::{MerkleError, Result};
use crate::tree::hash_internal;

/// The verifier combines at most this many pairs.
pub const MAX_NUM_HASHES: usize = 256;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proof {
    pub hashes: Vec<B256>,
    /// `true` takes the next computed node, `false` the next proof hash.
    pub source_flags: Vec<bool>,
}

impl Proof {
    pub fn flag_bits(&self) -> Result<U256> {
        proof_flags_to_bits(&self.source_flags)
    }

    /// Recomputes the root over `leaves`, checking the flag count first.
    pub fn compute_root(&self, leaves: &[B256]) -> Result<B256> {
        let expected = (leaves.len() + self.hashes.len()).saturating_sub(1);
        if self.source_flags.len() != expected {
            return Err(MerkleError::ProofLengthMismatch {
                leaves: leaves.len(),
                proofs: self.hashes.len(),
                reason: "one flag is needed per combine step",
            });
        }
        compute_root(leaves, &self.hashes, self.flag_bits()?)
    }
}

/// Packs flags into an integer, flag `i` at bit `i`.
pub fn proof_flags_to_bits(flags: &[bool]) -> Result<U256> {
    if flags.len() > MAX_NUM_HASHES {
        return Err(MerkleError::TooManyHashes {
            total_hashes: flags.len(),
            max: MAX_NUM_HASHES,
        });
    }
    let mut bits = U256::ZERO;
    for (i, flag) in flags.iter().enumerate() {
        if *flag {
            bits.set_bit(i, true);
        }
    }
    Ok(bits)
}

pub fn bits_to_proof_flags(bits: U256, len: usize) -> Vec<bool> {
    (0..len).map(|i| i < MAX_NUM_HASHES && bits.bit(i)).collect()
}

/// Computes the root committed to by `leaves` and a packed multi-proof.
///
/// Leaves must be in tree order. Each step takes `a` from the proof queue or,
/// when its flag is set, from the leaf-then-computed queue; `b` always comes
/// from the leaf-then-computed queue.
pub fn compute_root(leaves: &[B256], proofs: &[B256], proof_flag_bits: U256) -> Result<B256> {
    let leaves_len = leaves.len();
    let proofs_len = proofs.len();
    if leaves_len == 0 {
        return Err(MerkleError::EmptyLeaves);
    }
    let total_hashes = leaves_len + proofs_len - 1;
    if total_hashes > MAX_NUM_HASHES {
        return Err(MerkleError::TooManyHashes {
            total_hashes,
            max: MAX_NUM_HASHES,
        });
    }
    if total_hashes == 0 {
        return Ok(leaves[0]);
    }

    let mut hashes: Vec<B256> = Vec::with_capacity(total_hashes);
    let (mut leaf_pos, mut hash_pos, mut proof_pos) = (0usize, 0usize, 0usize);

    let next_node = |hashes: &[B256], leaf_pos: &mut usize, hash_pos: &mut usize| -> Result<B256> {
        if *leaf_pos < leaves_len {
            *leaf_pos += 1;
            Ok(leaves[*leaf_pos - 1])
        } else if *hash_pos < hashes.len() {
            *hash_pos += 1;
            Ok(hashes[*hash_pos - 1])
        } else {
            Err(MerkleError::InvalidProof("node consumed before it was computed"))
        }
    };

    for i in 0..total_hashes {
        let a = if proof_flag_bits.bit(i) {
            next_node(&hashes, &mut leaf_pos, &mut hash_pos)?
        } else {
            let proof = proofs.get(proof_pos).ok_or(MerkleError::ProofLengthMismatch {
                leaves: leaves_len,
                proofs: proofs_len,
                reason: "flags request more proof hashes than supplied",
            })?;
            proof_pos += 1;
            *proof
        };
        let b = next_node(&hashes, &mut leaf_pos, &mut hash_pos)?;
        hashes.push(hash_internal(a, b));
    }

    if hash_pos != total_hashes - 1 || leaf_pos != leaves_len || proof_pos != proofs_len {
        return Err(MerkleError::ProofLengthMismatch {
            leaves: leaves_len,
            proofs: proofs_len,
            reason: "proof does not consume every leaf and proof hash",
        });
    }
    Ok(hashes[total_hashes - 1])
}

/// Returns whether the proof reproduces `expected_root`.
///
/// A different root is an ordinary negative answer; only a structurally
/// broken proof is an error.
pub fn verify_compute_root(
    leaves: &[B256],
    proofs: &[B256],
    proof_flag_bits: U256,
    expected_root: B256,
) -> Result<bool> {
    Ok(compute_root(leaves, proofs, proof_flag_bits)? == expected_root)
}

/// Like [`verify_compute_root`] but reports a different root as [`MerkleError::RootMismatch`].
pub fn ensure_root(leaves: &[B256], proofs: &[B256], proof_flag_bits: U256, expected_root: B256) -> Result<()> {
    let computed = compute_root(leaves, proofs, proof_flag_bits)?;
    if computed != expected_root {
        return Err(MerkleError::RootMismatch {
            expected: expected_root,
            computed,
        });
    }
    Ok(())
}
