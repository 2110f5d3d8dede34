//! Shared data model for hashing CCIP messages: messages, lanes, chain
//! families and the decoders for the address strings and extra args they carry.

pub mod address;
pub mod chain;
pub mod error;
pub mod extra_args;
pub mod lane;
pub mod message;

pub use address::{decode_address, decode_address_word, decode_evm_address};
pub use chain::{BUILTIN_CHAINS, ChainFamily, ChainInfo, ChainRegistry};
pub use error::{AddressError, ExtraArgsError, Result, TypesError};
pub use extra_args::ExtraArgs;
pub use lane::{CcipVersion, Lane};
pub use message::{CcipMessage, Evm2EvmMessage, EvmTokenAmount, RampMessage, RampMessageHeader, TokenTransfer};
