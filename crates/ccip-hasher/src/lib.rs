//! CCIP leaf hashing for every destination family, and assembly of the
//! Merkle multi-proofs used to manually execute committed messages.
//!
//! Resolve a lane once with [`HasherRegistry::resolve`] (or [`resolve_hasher`]
//! for the builtin chain table), then hash each of its messages with
//! [`ResolvedHasher::hash_leaf`]. [`ProofAssembler`] does the whole
//! round trip from fetched messages to proof material.

pub mod config;
pub mod encoding;
pub mod error;
pub mod execution;
pub mod hasher;
pub mod registry;

pub use config::Config;
pub use error::{HasherError, Result};
pub use execution::{CommitInterval, ExecutionProof, ManualExecProof, ProofAssembler, compute_execution_proof};
pub use hasher::{LeafHasher, ResolvedHasher};
pub use registry::{HasherRegistry, hash_metadata, resolve_hasher};
