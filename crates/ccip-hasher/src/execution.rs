//! Assembly of the proof material for manually executing committed messages.

use std::collections::BTreeMap;

use alloy_primitives::{B256, U256};
use ccip_merkle::{MAX_NUMBER_TREE_LEAVES, MerkleError, Tree, verify_compute_root};
use ccip_types::{CcipMessage, Lane};
use rayon::ThreadPool;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{HasherError, Result};
use crate::hasher::ResolvedHasher;
use crate::registry::HasherRegistry;

/// A committed batch: the sequence number range and the root posted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitInterval {
    pub min_seq_nr: u64,
    pub max_seq_nr: u64,
    pub merkle_root: B256,
}

impl CommitInterval {
    pub fn contains(&self, sequence_number: u64) -> bool {
        (self.min_seq_nr..=self.max_seq_nr).contains(&sequence_number)
    }

    fn validate(&self) -> Result<usize> {
        if self.min_seq_nr > self.max_seq_nr {
            return Err(HasherError::InvalidInterval {
                min_seq_nr: self.min_seq_nr,
                max_seq_nr: self.max_seq_nr,
            });
        }
        let span = self.max_seq_nr - self.min_seq_nr;
        match usize::try_from(span) {
            Ok(span) if span < MAX_NUMBER_TREE_LEAVES => Ok(span + 1),
            _ => Err(HasherError::Merkle(MerkleError::TooManyLeaves {
                count: usize::try_from(span).map_or(usize::MAX, |span| span.saturating_add(1)),
                max: MAX_NUMBER_TREE_LEAVES,
            })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionProof {
    pub proofs: Vec<B256>,
    pub proof_flag_bits: U256,
    pub merkle_root: B256,
}

impl ExecutionProof {
    /// Checks the proof against `leaves`, the proven subset in tree order.
    pub fn verify(&self, leaves: &[B256]) -> Result<bool> {
        Ok(verify_compute_root(leaves, &self.proofs, self.proof_flag_bits, self.merkle_root)?)
    }
}

/// Everything the offramp's manual execution needs besides the messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualExecProof {
    pub proofs: Vec<B256>,
    pub proof_flag_bits: U256,
    pub merkle_root: B256,
    /// Leaves of the executed messages, in sequence number order.
    pub leaves: Vec<B256>,
    /// Positions of those leaves in the committed batch.
    pub indices: Vec<usize>,
}

/// Builds the tree over `all_leaves` and proves the leaves at `target_indices`.
///
/// Target order and repeats do not matter; the proof always covers the
/// distinct targets in tree order.
pub fn compute_execution_proof(all_leaves: &[B256], target_indices: &[usize]) -> Result<ExecutionProof> {
    let mut indices = target_indices.to_vec();
    indices.sort_unstable();
    indices.dedup();
    if indices.is_empty() {
        return Err(HasherError::NoTargets);
    }

    let tree = Tree::new(all_leaves.to_vec())?;
    let proof = tree.prove(&indices)?;
    Ok(ExecutionProof {
        proof_flag_bits: proof.flag_bits()?,
        proofs: proof.hashes,
        merkle_root: tree.root(),
    })
}

pub struct ProofAssembler<'c> {
    registry: HasherRegistry<'c>,
    pool: ThreadPool,
    parallel_threshold: usize,
}

impl<'c> ProofAssembler<'c> {
    pub fn new(registry: HasherRegistry<'c>, config: &Config) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.concurrency)
            .thread_name(|i| format!("ccip-leaf-hasher-{i}"))
            .build()
            .map_err(|e| HasherError::Config(e.to_string()))?;
        Ok(Self {
            registry,
            pool,
            parallel_threshold: config.parallel_threshold,
        })
    }

    pub fn registry(&self) -> &HasherRegistry<'c> {
        &self.registry
    }

    /// Hashes `messages` in the given order, on the pool for large batches.
    pub fn hash_leaves(&self, hasher: &ResolvedHasher, messages: &[&CcipMessage]) -> Result<Vec<B256>> {
        if messages.len() >= self.parallel_threshold {
            debug!(messages = messages.len(), "hashing leaves on worker pool");
            self.pool
                .install(|| messages.par_iter().map(|message| hasher.hash_leaf(message)).collect())
        } else {
            messages.iter().map(|message| hasher.hash_leaf(message)).collect()
        }
    }

    /// Proves the messages with sequence numbers `targets` against the committed `interval`.
    ///
    /// `messages` must hold every message of the interval; anything outside
    /// it is ignored.
    pub fn manual_exec_proof(
        &self,
        lane: &Lane,
        messages: &[CcipMessage],
        interval: &CommitInterval,
        targets: &[u64],
    ) -> Result<ManualExecProof> {
        if targets.is_empty() {
            return Err(HasherError::NoTargets);
        }
        let leaf_count = interval.validate()?;
        let hasher = self.registry.resolve(lane)?;

        let mut batch = BTreeMap::new();
        for message in messages {
            let sequence_number = message.sequence_number();
            if !interval.contains(sequence_number) {
                debug!(sequence_number, "skipping message outside commit interval");
                continue;
            }
            if batch.insert(sequence_number, message).is_some() {
                return Err(HasherError::DuplicateSequenceNumber(sequence_number));
            }
        }
        if batch.len() != leaf_count {
            let missing = (interval.min_seq_nr..=interval.max_seq_nr)
                .filter(|sequence_number| !batch.contains_key(sequence_number))
                .collect();
            return Err(HasherError::IncompleteLeafSet {
                min_seq_nr: interval.min_seq_nr,
                max_seq_nr: interval.max_seq_nr,
                missing,
            });
        }

        let mut indices = targets
            .iter()
            .map(|&sequence_number| {
                if !interval.contains(sequence_number) {
                    return Err(HasherError::TargetNotInInterval {
                        sequence_number,
                        min_seq_nr: interval.min_seq_nr,
                        max_seq_nr: interval.max_seq_nr,
                    });
                }
                // validate() bounds the span by the tree size
                Ok((sequence_number - interval.min_seq_nr) as usize)
            })
            .collect::<Result<Vec<_>>>()?;
        indices.sort_unstable();
        indices.dedup();

        let ordered: Vec<&CcipMessage> = batch.into_values().collect();
        let all_leaves = self.hash_leaves(&hasher, &ordered)?;

        if lane.version.is_legacy() {
            for (message, leaf) in ordered.iter().zip(&all_leaves) {
                if message.message_id() != *leaf {
                    return Err(HasherError::MessageIdMismatch {
                        sequence_number: message.sequence_number(),
                        message_id: message.message_id(),
                        leaf: *leaf,
                    });
                }
            }
        }

        let proof = compute_execution_proof(&all_leaves, &indices)?;
        if proof.merkle_root != interval.merkle_root {
            return Err(HasherError::Merkle(MerkleError::RootMismatch {
                expected: interval.merkle_root,
                computed: proof.merkle_root,
            }));
        }

        info!(
            min_seq_nr = interval.min_seq_nr,
            max_seq_nr = interval.max_seq_nr,
            targets = indices.len(),
            proofs = proof.proofs.len(),
            root = %proof.merkle_root,
            "assembled manual execution proof"
        );

        Ok(ManualExecProof {
            proofs: proof.proofs,
            proof_flag_bits: proof.proof_flag_bits,
            merkle_root: proof.merkle_root,
            leaves: indices.iter().map(|&index| all_leaves[index]).collect(),
            indices,
        })
    }

    /// Like [`ProofAssembler::manual_exec_proof`], with targets named by message id.
    pub fn manual_exec_proof_by_ids(
        &self,
        lane: &Lane,
        messages: &[CcipMessage],
        interval: &CommitInterval,
        message_ids: &[B256],
    ) -> Result<ManualExecProof> {
        let targets = message_ids
            .iter()
            .map(|id| {
                messages
                    .iter()
                    .find(|message| message.message_id() == *id)
                    .map(CcipMessage::sequence_number)
                    .ok_or(HasherError::UnknownMessageId(*id))
            })
            .collect::<Result<Vec<_>>>()?;
        self.manual_exec_proof(lane, messages, interval, &targets)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;

    use super::*;

    fn leaves(n: usize) -> Vec<B256> {
        (0..n).map(|i| keccak256(i.to_be_bytes())).collect()
    }

    #[test]
    fn test_execution_proof_verifies_for_any_target_order() {
        let all = leaves(7);
        let proof = compute_execution_proof(&all, &[5, 1, 5]).unwrap();
        assert_eq!(proof.merkle_root, Tree::new(all.clone()).unwrap().root());
        assert!(proof.verify(&[all[1], all[5]]).unwrap());
        assert!(!proof.verify(&[all[1], all[4]]).unwrap());
    }

    #[test]
    fn test_empty_targets_are_rejected() {
        assert_eq!(compute_execution_proof(&leaves(4), &[]).unwrap_err(), HasherError::NoTargets);
    }

    #[test]
    fn test_whole_batch_needs_no_proof_hashes() {
        let all = leaves(4);
        let proof = compute_execution_proof(&all, &[0, 1, 2, 3]).unwrap();
        assert!(proof.proofs.is_empty());
        assert!(proof.verify(&all).unwrap());
    }

    #[test]
    fn test_interval_validation() {
        let interval = CommitInterval {
            min_seq_nr: 10,
            max_seq_nr: 9,
            merkle_root: B256::ZERO,
        };
        assert!(matches!(interval.validate(), Err(HasherError::InvalidInterval { .. })));

        let interval = CommitInterval {
            min_seq_nr: 1,
            max_seq_nr: 256,
            merkle_root: B256::ZERO,
        };
        assert_eq!(interval.validate().unwrap(), 256);

        let interval = CommitInterval {
            min_seq_nr: 0,
            max_seq_nr: u64::MAX,
            merkle_root: B256::ZERO,
        };
        assert!(matches!(
            interval.validate(),
            Err(HasherError::Merkle(MerkleError::TooManyLeaves { .. }))
        ));
    }
}
