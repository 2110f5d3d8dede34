use alloy_primitives::B256;
use ccip_merkle::MerkleError;
use ccip_types::{AddressError, CcipVersion, ChainFamily, ExtraArgsError, TypesError};
use thiserror::Error;

/// Result type for hashing and proof assembly.
pub type Result<T> = std::result::Result<T, HasherError>;

/// Every variant is a deterministic consequence of the input; none is retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HasherError {
    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("malformed extra args: {0}")]
    MalformedExtraArgs(#[from] ExtraArgsError),

    #[error("invalid address encoding: {0}")]
    InvalidAddressEncoding(#[from] AddressError),

    #[error("unsupported lane: no {version} hasher for {source_family} -> {dest_family}")]
    UnsupportedLane {
        version: CcipVersion,
        source_family: ChainFamily,
        dest_family: ChainFamily,
    },

    #[error("{version} lane cannot hash a {shape} message")]
    MessageShapeMismatch { version: CcipVersion, shape: &'static str },

    #[error(
        "message {sequence_number} is for {source_chain_selector} -> {dest_chain_selector}, lane is {lane_source} -> {lane_dest}"
    )]
    LaneMismatch {
        sequence_number: u64,
        source_chain_selector: u64,
        dest_chain_selector: u64,
        lane_source: u64,
        lane_dest: u64,
    },

    #[error("invalid interval [{min_seq_nr}, {max_seq_nr}]")]
    InvalidInterval { min_seq_nr: u64, max_seq_nr: u64 },

    #[error("incomplete leaf set for [{min_seq_nr}, {max_seq_nr}]: missing {missing:?}")]
    IncompleteLeafSet {
        min_seq_nr: u64,
        max_seq_nr: u64,
        missing: Vec<u64>,
    },

    #[error("no target messages to prove")]
    NoTargets,

    #[error("duplicate sequence number {0}")]
    DuplicateSequenceNumber(u64),

    #[error("sequence number {sequence_number} is outside [{min_seq_nr}, {max_seq_nr}]")]
    TargetNotInInterval {
        sequence_number: u64,
        min_seq_nr: u64,
        max_seq_nr: u64,
    },

    #[error("message id {0} is not in the batch")]
    UnknownMessageId(B256),

    #[error("message {sequence_number} has id {message_id} but hashes to {leaf}")]
    MessageIdMismatch {
        sequence_number: u64,
        message_id: B256,
        leaf: B256,
    },

    #[error(transparent)]
    Merkle(#[from] MerkleError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}
