use thiserror::Error;

use crate::chain::ChainFamily;

/// Result type for decoding and lookups in this crate.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Failure to decode an address string into a chain family's native width.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid hex address {input:?}: {reason}")]
    Hex { input: String, reason: String },

    #[error("invalid base58 address {input:?}: {reason}")]
    Base58 { input: String, reason: String },

    #[error("{family} address {input:?} decodes to {len} bytes, expected {expected}")]
    Width {
        family: ChainFamily,
        input: String,
        len: usize,
        expected: usize,
    },
}

/// Failure to decode a selector-tagged extra-args byte string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtraArgsError {
    #[error("extra args too short: {0} bytes")]
    TooShort(usize),

    #[error("unknown extra args tag 0x{}", hex::encode(.0))]
    UnknownTag([u8; 4]),

    #[error("cannot decode {variant} body: {reason}")]
    Body { variant: &'static str, reason: String },

    #[error("extra args {found} not accepted for {family} destinations")]
    UnexpectedVariant { family: ChainFamily, found: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address encoding: {0}")]
    InvalidAddressEncoding(#[from] AddressError),

    #[error("malformed extra args: {0}")]
    MalformedExtraArgs(#[from] ExtraArgsError),

    #[error("unknown chain selector {0}")]
    UnknownChainSelector(u64),

    #[error("unsupported CCIP version {0:?}")]
    UnsupportedVersion(String),
}
