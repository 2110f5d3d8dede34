//! The leaf hasher interface and the resolved per-lane hasher.

use alloy_primitives::B256;
use ccip_types::{CcipMessage, ChainFamily};

use crate::encoding::aptos::AptosLeafHasher;
use crate::encoding::evm::{Evm2EvmLeafHasher, EvmLeafHasher};
use crate::encoding::solana::SolanaLeafHasher;
use crate::encoding::sui::SuiLeafHasher;
use crate::error::Result;

/// Hashes messages of one lane into Merkle leaves.
///
/// Hashing is split in two: [`LeafHasher::normalize`] decodes addresses and
/// extra args into a new immutable value, and [`LeafHasher::hash_normalized`]
/// turns that value into the leaf. Neither step touches its input.
pub trait LeafHasher {
    type Normalized;

    /// Per-lane digest mixed into every leaf.
    fn metadata_hash(&self) -> B256;

    fn normalize(&self, message: &CcipMessage) -> Result<Self::Normalized>;

    fn hash_normalized(&self, message: &Self::Normalized) -> Result<B256>;

    fn hash_leaf(&self, message: &CcipMessage) -> Result<B256> {
        let normalized = self.normalize(message)?;
        self.hash_normalized(&normalized)
    }
}

/// A lane's hasher, resolved once and reused for every message of the lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedHasher {
    Evm2Evm(Evm2EvmLeafHasher),
    Evm(EvmLeafHasher),
    Solana(SolanaLeafHasher),
    Aptos(AptosLeafHasher),
    Sui(SuiLeafHasher),
}

impl ResolvedHasher {
    pub fn dest_family(&self) -> ChainFamily {
        match self {
            ResolvedHasher::Evm2Evm(_) | ResolvedHasher::Evm(_) => ChainFamily::Evm,
            ResolvedHasher::Solana(_) => ChainFamily::Solana,
            ResolvedHasher::Aptos(_) => ChainFamily::Aptos,
            ResolvedHasher::Sui(_) => ChainFamily::Sui,
        }
    }

    pub fn metadata_hash(&self) -> B256 {
        match self {
            ResolvedHasher::Evm2Evm(hasher) => hasher.metadata_hash(),
            ResolvedHasher::Evm(hasher) => hasher.metadata_hash(),
            ResolvedHasher::Solana(hasher) => hasher.metadata_hash(),
            ResolvedHasher::Aptos(hasher) => hasher.metadata_hash(),
            ResolvedHasher::Sui(hasher) => hasher.metadata_hash(),
        }
    }

    pub fn hash_leaf(&self, message: &CcipMessage) -> Result<B256> {
        match self {
            ResolvedHasher::Evm2Evm(hasher) => hasher.hash_leaf(message),
            ResolvedHasher::Evm(hasher) => hasher.hash_leaf(message),
            ResolvedHasher::Solana(hasher) => hasher.hash_leaf(message),
            ResolvedHasher::Aptos(hasher) => hasher.hash_leaf(message),
            ResolvedHasher::Sui(hasher) => hasher.hash_leaf(message),
        }
    }
}
