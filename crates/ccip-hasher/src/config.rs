use std::fs;
use std::path::Path;

use ccip_types::{ChainInfo, ChainRegistry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HasherError, Result};

pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker threads used to hash large batches.
    pub concurrency: usize,

    /// Batches at least this long are hashed on the worker pool.
    pub parallel_threshold: usize,

    /// Selectors added to, or overriding, the builtin chain table.
    pub chains: Vec<ChainInfo>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            chains: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| HasherError::Config(e.to_string()))?;
        if config.concurrency == 0 {
            return Err(HasherError::Config("concurrency must be at least 1".into()));
        }
        Ok(config)
    }

    /// Reads a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| HasherError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            path = %path.display(),
            concurrency = config.concurrency,
            extra_chains = config.chains.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| HasherError::Config(e.to_string()))
    }

    /// The builtin chain table with this config's entries applied on top.
    pub fn chain_registry(&self) -> ChainRegistry {
        self.chains.iter().fold(ChainRegistry::builtin(), |registry, chain| {
            registry.with_chain(chain.selector, chain.name.clone(), chain.family)
        })
    }
}
