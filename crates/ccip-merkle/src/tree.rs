//! Binary Merkle tree over message leaves.
//!
//! Mirrors the tree the commit plugin builds for a report: leaves are paired
//! left to right, an odd node is paired with [`ZERO_HASH`], and every pair is
//! hashed in sorted order so a proof never needs to know which side a sibling
//! was on.

use alloy_primitives::{B256, b256};
use sha3::{Digest, Keccak256};

use crate::error::{MerkleError, Result};
use crate::proof::Proof;

pub const MAX_NUMBER_TREE_LEAVES: usize = 256;
pub const LEAF_DOMAIN_SEPARATOR: B256 = B256::ZERO;
pub const INTERNAL_DOMAIN_SEPARATOR: B256 =
    b256!("0000000000000000000000000000000000000000000000000000000000000001");
pub const ZERO_HASH: B256 = B256::ZERO;

/// Hash two nodes together, smaller value first.
pub fn hash_internal(a: B256, b: B256) -> B256 {
    let (left, right) = if a < b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(INTERNAL_DOMAIN_SEPARATOR);
    hasher.update(left);
    hasher.update(right);
    let digest: [u8; 32] = hasher.finalize().into();
    B256::from(digest)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// Every layer from the leaves up, odd layers already padded.
    layers: Vec<Vec<B256>>,
    leaf_count: usize,
    root: B256,
}

impl Tree {
    pub fn new(leaves: Vec<B256>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyLeaves);
        }
        if leaves.len() > MAX_NUMBER_TREE_LEAVES {
            return Err(MerkleError::TooManyLeaves {
                count: leaves.len(),
                max: MAX_NUMBER_TREE_LEAVES,
            });
        }

        let leaf_count = leaves.len();
        let mut layers = Vec::new();
        let mut layer = leaves;
        while layer.len() > 1 {
            if layer.len() % 2 == 1 {
                layer.push(ZERO_HASH);
            }
            let next: Vec<B256> = layer
                .chunks_exact(2)
                .map(|pair| hash_internal(pair[0], pair[1]))
                .collect();
            layers.push(layer);
            layer = next;
        }
        let root = layer[0];
        layers.push(layer);

        Ok(Self {
            layers,
            leaf_count,
            root,
        })
    }

    pub fn root(&self) -> B256 {
        self.root
    }

    /// The leaves the tree was built from, without padding.
    pub fn leaves(&self) -> &[B256] {
        &self.layers[0][..self.leaf_count]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of hashing layers above the leaves.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Builds a multi-proof for the leaves at `indices`.
    ///
    /// Indices must be strictly increasing. Per layer, a node whose sibling is
    /// also being proven consumes a computed hash (flag `true`); otherwise the
    /// sibling goes into the proof (flag `false`).
    pub fn prove(&self, indices: &[usize]) -> Result<Proof> {
        if indices.is_empty() {
            return Err(MerkleError::EmptyLeaves);
        }
        for window in indices.windows(2) {
            if window[0] >= window[1] {
                return Err(MerkleError::UnsortedIndices);
            }
        }
        if let Some(&index) = indices.iter().find(|&&index| index >= self.leaf_count) {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaves: self.leaf_count,
            });
        }

        let mut proof = Proof::default();
        let mut current = indices.to_vec();
        for layer in &self.layers[..self.depth()] {
            let mut next = Vec::with_capacity(current.len());
            let mut j = 0;
            while j < current.len() {
                let index = current[j];
                let sibling = index ^ 1;
                if j + 1 < current.len() && current[j + 1] == sibling {
                    proof.source_flags.push(true);
                    j += 1;
                } else {
                    proof.hashes.push(layer[sibling]);
                    proof.source_flags.push(false);
                }
                next.push(index / 2);
                j += 1;
            }
            current = next;
        }
        Ok(proof)
    }
}
