use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Onramp/offramp contract version of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CcipVersion {
    #[serde(rename = "1.2.0")]
    V1_2,
    #[serde(rename = "1.5.0")]
    V1_5,
    #[serde(rename = "1.6.0")]
    V1_6,
}

impl CcipVersion {
    /// Versions whose messages use the EVM2EVM layout and whose message id is the leaf.
    pub fn is_legacy(&self) -> bool {
        matches!(self, CcipVersion::V1_2 | CcipVersion::V1_5)
    }
}

impl fmt::Display for CcipVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = match self {
            CcipVersion::V1_2 => "1.2.0",
            CcipVersion::V1_5 => "1.5.0",
            CcipVersion::V1_6 => "1.6.0",
        };
        f.write_str(version)
    }
}

impl FromStr for CcipVersion {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('v') {
            "1.2" | "1.2.0" => Ok(CcipVersion::V1_2),
            "1.5" | "1.5.0" => Ok(CcipVersion::V1_5),
            "1.6" | "1.6.0" => Ok(CcipVersion::V1_6),
            other => Err(TypesError::UnsupportedVersion(other.to_string())),
        }
    }
}

/// A (source, destination, onramp, version) tuple. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub source_chain_selector: u64,
    pub dest_chain_selector: u64,
    /// OnRamp address in the source family's notation.
    pub on_ramp: String,
    pub version: CcipVersion,
}

impl Lane {
    pub fn new(
        source_chain_selector: u64,
        dest_chain_selector: u64,
        on_ramp: impl Into<String>,
        version: CcipVersion,
    ) -> Self {
        Self {
            source_chain_selector,
            dest_chain_selector,
            on_ramp: on_ramp.into(),
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!("1.6.0".parse::<CcipVersion>().unwrap(), CcipVersion::V1_6);
        assert_eq!("v1.5".parse::<CcipVersion>().unwrap(), CcipVersion::V1_5);
        assert!("1.4.0".parse::<CcipVersion>().is_err());
        assert!(CcipVersion::V1_2.is_legacy());
        assert!(!CcipVersion::V1_6.is_legacy());
    }

    #[test]
    fn test_lane_serde() {
        let lane = Lane::new(1, 2, "0x0000000000000000000000000000000000000001", CcipVersion::V1_6);
        let json = serde_json::to_string(&lane).unwrap();
        assert!(json.contains("\"version\":\"1.6.0\""));
        assert!(json.contains("\"onRamp\""));
        assert_eq!(serde_json::from_str::<Lane>(&json).unwrap(), lane);
    }
}
