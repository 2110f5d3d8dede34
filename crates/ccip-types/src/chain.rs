//! Chain selectors and the destination families they map to.
//!
//! The table is process-wide and immutable once built. Callers that need
//! selectors missing from [`BUILTIN_CHAINS`] build their own [`ChainRegistry`]
//! with [`ChainRegistry::with_chain`] and pass it by reference.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Evm,
    Solana,
    Aptos,
    Sui,
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainFamily::Evm => "EVM",
            ChainFamily::Solana => "Solana",
            ChainFamily::Aptos => "Aptos",
            ChainFamily::Sui => "Sui",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub selector: u64,
    pub name: String,
    pub family: ChainFamily,
}

/// Well-known CCIP chain selectors.
const KNOWN_CHAINS: &[(u64, &str, ChainFamily)] = &[
    (5009297550715157269, "ethereum-mainnet", ChainFamily::Evm),
    (16015286601757825753, "ethereum-testnet-sepolia", ChainFamily::Evm),
    (6433500567565415381, "avalanche-mainnet", ChainFamily::Evm),
    (14767482510784806043, "avalanche-testnet-fuji", ChainFamily::Evm),
    (4051577828743386545, "polygon-mainnet", ChainFamily::Evm),
    (16281711391670634445, "polygon-testnet-amoy", ChainFamily::Evm),
    (4949039107694359620, "ethereum-mainnet-arbitrum-1", ChainFamily::Evm),
    (3478487238524512106, "ethereum-testnet-sepolia-arbitrum-1", ChainFamily::Evm),
    (3734403246176062136, "ethereum-mainnet-optimism-1", ChainFamily::Evm),
    (5224473277236331295, "ethereum-testnet-sepolia-optimism-1", ChainFamily::Evm),
    (15971525489660198786, "ethereum-mainnet-base-1", ChainFamily::Evm),
    (10344971235874465080, "ethereum-testnet-sepolia-base-1", ChainFamily::Evm),
    (11344663589394136015, "binance_smart_chain-mainnet", ChainFamily::Evm),
    (124615329519749607, "solana-mainnet", ChainFamily::Solana),
    (16423721717087811551, "solana-devnet", ChainFamily::Solana),
    (6302590918974934319, "solana-testnet", ChainFamily::Solana),
    (4741433654826277614, "aptos-mainnet", ChainFamily::Aptos),
    (743186221051783445, "aptos-testnet", ChainFamily::Aptos),
    (17529533435026248318, "sui-mainnet", ChainFamily::Sui),
    (9762610643973837292, "sui-testnet", ChainFamily::Sui),
];

/// Builtin selector table, initialised on first use and read-only afterwards.
pub static BUILTIN_CHAINS: LazyLock<ChainRegistry> = LazyLock::new(ChainRegistry::builtin);

#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<u64, ChainInfo>,
}

impl ChainRegistry {
    /// An empty registry. Mostly useful for tests with synthetic selectors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry of [`KNOWN_CHAINS`].
    pub fn builtin() -> Self {
        KNOWN_CHAINS
            .iter()
            .fold(Self::empty(), |registry, (selector, name, family)| {
                registry.with_chain(*selector, *name, *family)
            })
    }

    /// Adds or replaces a selector entry.
    pub fn with_chain(mut self, selector: u64, name: impl Into<String>, family: ChainFamily) -> Self {
        self.chains.insert(
            selector,
            ChainInfo {
                selector,
                name: name.into(),
                family,
            },
        );
        self
    }

    pub fn get(&self, selector: u64) -> Result<&ChainInfo> {
        self.chains
            .get(&selector)
            .ok_or(TypesError::UnknownChainSelector(selector))
    }

    pub fn family(&self, selector: u64) -> Result<ChainFamily> {
        self.get(selector).map(|info| info.family)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
