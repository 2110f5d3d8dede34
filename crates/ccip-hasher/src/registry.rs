//! Resolution of a lane to the hasher its destination verifies with.

use alloy_primitives::B256;
use ccip_types::{BUILTIN_CHAINS, CcipVersion, ChainFamily, ChainRegistry, Lane};
use tracing::debug;

use crate::encoding::aptos::AptosLeafHasher;
use crate::encoding::evm::{Evm2EvmLeafHasher, EvmLeafHasher};
use crate::encoding::solana::SolanaLeafHasher;
use crate::encoding::sui::SuiLeafHasher;
use crate::error::{HasherError, Result};
use crate::hasher::ResolvedHasher;

/// Maps lanes to hashers using a chain-selector table.
#[derive(Debug, Clone, Copy)]
pub struct HasherRegistry<'c> {
    chains: &'c ChainRegistry,
}

impl Default for HasherRegistry<'static> {
    fn default() -> Self {
        Self::new(&BUILTIN_CHAINS)
    }
}

impl<'c> HasherRegistry<'c> {
    pub fn new(chains: &'c ChainRegistry) -> Self {
        Self { chains }
    }

    pub fn chains(&self) -> &'c ChainRegistry {
        self.chains
    }

    /// Picks the hasher for `lane` and precomputes its metadata hash.
    ///
    /// 1.2 and 1.5 only exist between EVM chains. 1.6 is keyed on the
    /// destination family; the source family decides how senders, pool
    /// addresses and the onramp are decoded.
    pub fn resolve(&self, lane: &Lane) -> Result<ResolvedHasher> {
        let source_family = self.chains.family(lane.source_chain_selector)?;
        let dest_family = self.chains.family(lane.dest_chain_selector)?;

        let hasher = match (lane.version, source_family, dest_family) {
            (CcipVersion::V1_2 | CcipVersion::V1_5, ChainFamily::Evm, ChainFamily::Evm) => {
                ResolvedHasher::Evm2Evm(Evm2EvmLeafHasher::new(lane)?)
            }
            (CcipVersion::V1_6, _, ChainFamily::Evm) => ResolvedHasher::Evm(EvmLeafHasher::new(lane, source_family)?),
            (CcipVersion::V1_6, _, ChainFamily::Solana) => {
                ResolvedHasher::Solana(SolanaLeafHasher::new(lane, source_family)?)
            }
            (CcipVersion::V1_6, _, ChainFamily::Aptos) => {
                ResolvedHasher::Aptos(AptosLeafHasher::new(lane, source_family)?)
            }
            (CcipVersion::V1_6, _, ChainFamily::Sui) => ResolvedHasher::Sui(SuiLeafHasher::new(lane, source_family)?),
            (version, source_family, dest_family) => {
                return Err(HasherError::UnsupportedLane {
                    version,
                    source_family,
                    dest_family,
                });
            }
        };

        debug!(
            source = lane.source_chain_selector,
            dest = lane.dest_chain_selector,
            version = %lane.version,
            %source_family,
            %dest_family,
            metadata_hash = %hasher.metadata_hash(),
            "resolved leaf hasher"
        );
        Ok(hasher)
    }
}

/// Resolves `lane` against the builtin chain table.
pub fn resolve_hasher(lane: &Lane) -> Result<ResolvedHasher> {
    HasherRegistry::default().resolve(lane)
}

/// The metadata hash mixed into every leaf of `lane`.
pub fn hash_metadata(lane: &Lane) -> Result<B256> {
    resolve_hasher(lane).map(|hasher| hasher.metadata_hash())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHEREUM: u64 = 5009297550715157269;
    const ARBITRUM: u64 = 4949039107694359620;
    const SOLANA: u64 = 124615329519749607;
    const APTOS: u64 = 4741433654826277614;
    const SUI: u64 = 17529533435026248318;

    fn evm_on_ramp() -> String {
        format!("0x{}", "11".repeat(20))
    }

    #[test]
    fn test_resolves_every_v1_6_destination() {
        let cases = [
            (ARBITRUM, ChainFamily::Evm),
            (SOLANA, ChainFamily::Solana),
            (APTOS, ChainFamily::Aptos),
            (SUI, ChainFamily::Sui),
        ];
        for (dest, family) in cases {
            let lane = Lane::new(ETHEREUM, dest, evm_on_ramp(), CcipVersion::V1_6);
            assert_eq!(resolve_hasher(&lane).unwrap().dest_family(), family);
        }
    }

    #[test]
    fn test_legacy_lanes_resolve_to_evm2evm() {
        for version in [CcipVersion::V1_2, CcipVersion::V1_5] {
            let lane = Lane::new(ETHEREUM, ARBITRUM, evm_on_ramp(), version);
            assert!(matches!(resolve_hasher(&lane).unwrap(), ResolvedHasher::Evm2Evm(_)));
        }
    }

    #[test]
    fn test_legacy_non_evm_lane_is_unsupported() {
        let lane = Lane::new(ETHEREUM, SOLANA, evm_on_ramp(), CcipVersion::V1_5);
        assert_eq!(
            resolve_hasher(&lane).unwrap_err(),
            HasherError::UnsupportedLane {
                version: CcipVersion::V1_5,
                source_family: ChainFamily::Evm,
                dest_family: ChainFamily::Solana,
            }
        );
    }

    #[test]
    fn test_unknown_selector() {
        let lane = Lane::new(ETHEREUM, 42, evm_on_ramp(), CcipVersion::V1_6);
        assert!(matches!(resolve_hasher(&lane), Err(HasherError::Types(_))));
    }

    #[test]
    fn test_custom_registry() {
        let chains = ChainRegistry::empty()
            .with_chain(1, "local-a", ChainFamily::Evm)
            .with_chain(2, "local-b", ChainFamily::Sui);
        let registry = HasherRegistry::new(&chains);
        let lane = Lane::new(1, 2, evm_on_ramp(), CcipVersion::V1_6);
        assert_eq!(registry.resolve(&lane).unwrap().dest_family(), ChainFamily::Sui);
    }

    #[test]
    fn test_metadata_hash_depends_on_lane() {
        let a = hash_metadata(&Lane::new(ETHEREUM, ARBITRUM, evm_on_ramp(), CcipVersion::V1_6)).unwrap();
        let b = hash_metadata(&Lane::new(ARBITRUM, ETHEREUM, evm_on_ramp(), CcipVersion::V1_6)).unwrap();
        let c = hash_metadata(&Lane::new(ETHEREUM, ARBITRUM, format!("0x{}", "22".repeat(20)), CcipVersion::V1_6))
            .unwrap();
        let legacy = hash_metadata(&Lane::new(ETHEREUM, ARBITRUM, evm_on_ramp(), CcipVersion::V1_5)).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, legacy);
    }
}
