//! Canonical byte layouts, one module per destination family.
//!
//! Every family hashes the same logical pieces (metadata, fixed fields,
//! sender, data, token transfers) but lays them out the way its own offramp
//! does. The helpers here are shared by the layouts that use 32-byte words.

use alloy_primitives::{B256, Bytes, U256, keccak256};
use ccip_types::{
    CcipMessage, CcipVersion, ChainFamily, ExtraArgs, ExtraArgsError, Lane, RampMessage, RampMessageHeader,
    TokenTransfer, decode_address_word,
};

use crate::error::{HasherError, Result};

pub mod aptos;
pub mod evm;
pub mod solana;
pub mod sui;

/// Word-aligned writer matching the `eth_abi` helpers of the Move offramps.
///
/// Unlike Solidity's `abi.encode` there are no offset words: dynamic values
/// are written inline where they occur.
#[derive(Debug, Default, Clone)]
pub struct AbiWords {
    buf: Vec<u8>,
}

impl AbiWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes32(&mut self, value: &B256) -> &mut Self {
        self.buf.extend_from_slice(value.as_slice());
        self
    }

    pub fn uint256(&mut self, value: U256) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes::<32>());
        self
    }

    pub fn uint64(&mut self, value: u64) -> &mut Self {
        self.uint256(U256::from(value))
    }

    pub fn uint32(&mut self, value: u32) -> &mut Self {
        self.uint256(U256::from(value))
    }

    /// Appends bytes as they are, without length or padding.
    pub fn raw(&mut self, value: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Appends a 256-bit length followed by the bytes right-padded to a word boundary.
    pub fn length_prefixed(&mut self, value: &[u8]) -> &mut Self {
        self.uint256(U256::from(value.len()));
        self.buf.extend_from_slice(value);
        let padding = (32 - value.len() % 32) % 32;
        self.buf.resize(self.buf.len() + padding, 0);
        self
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Concatenates the six leaf words: separator, metadata and the four part hashes.
pub(crate) fn leaf_preimage(words: [B256; 6]) -> Vec<u8> {
    words.iter().flat_map(|word| word.0).collect()
}

/// Returns the 1.6 ramp message or a shape error for legacy messages.
pub(crate) fn ramp_message<'a>(message: &'a CcipMessage, version: CcipVersion) -> Result<&'a RampMessage> {
    match message {
        CcipMessage::Ramp(ramp) => Ok(ramp),
        other => Err(HasherError::MessageShapeMismatch {
            version,
            shape: other.shape(),
        }),
    }
}

/// Rejects messages whose header names a different source or destination than the lane.
pub(crate) fn check_lane(header: &RampMessageHeader, lane: &LaneSelectors) -> Result<()> {
    if header.source_chain_selector != lane.source || header.dest_chain_selector != lane.dest {
        return Err(HasherError::LaneMismatch {
            sequence_number: header.sequence_number,
            source_chain_selector: header.source_chain_selector,
            dest_chain_selector: header.dest_chain_selector,
            lane_source: lane.source,
            lane_dest: lane.dest,
        });
    }
    Ok(())
}

/// Gas limit of gas-metered destinations, taken from the parsed extra args.
pub(crate) fn gas_limit_from(args: &ExtraArgs, family: ChainFamily) -> Result<U256> {
    args.gas_limit().ok_or_else(|| {
        HasherError::MalformedExtraArgs(ExtraArgsError::UnexpectedVariant {
            family,
            found: args.variant_name(),
        })
    })
}

/// Metadata hash of the Move offramps: the same words Solidity's `abi.encode` produces.
pub(crate) fn word_metadata_hash(tag: &str, lane: &Lane, source_family: ChainFamily) -> Result<B256> {
    let on_ramp = decode_address_word(&lane.on_ramp, source_family)?;
    let mut words = AbiWords::new();
    words
        .bytes32(&keccak256(tag))
        .uint64(lane.source_chain_selector)
        .uint64(lane.dest_chain_selector)
        .bytes32(&keccak256(on_ramp));
    Ok(keccak256(words.as_slice()))
}

/// A token transfer with every address resolved to a 32-byte word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordTokenTransfer {
    pub source_pool_address: B256,
    pub dest_token_address: B256,
    pub dest_gas_amount: u32,
    pub extra_data: Bytes,
    pub amount: U256,
}

pub(crate) fn word_token_transfers(
    tokens: &[TokenTransfer],
    source_family: ChainFamily,
    dest_family: ChainFamily,
) -> Result<Vec<WordTokenTransfer>> {
    tokens
        .iter()
        .map(|token| -> Result<WordTokenTransfer> {
            Ok(WordTokenTransfer {
                source_pool_address: decode_address_word(&token.source_pool_address, source_family)?,
                dest_token_address: decode_address_word(&token.dest_token_address, dest_family)?,
                dest_gas_amount: token.dest_gas_amount,
                extra_data: token.extra_data.clone(),
                amount: token.amount,
            })
        })
        .collect()
}

/// The selector pair every hasher checks incoming messages against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSelectors {
    pub source: u64,
    pub dest: u64,
}

impl From<&Lane> for LaneSelectors {
    fn from(lane: &Lane) -> Self {
        Self {
            source: lane.source_chain_selector,
            dest: lane.dest_chain_selector,
        }
    }
}
