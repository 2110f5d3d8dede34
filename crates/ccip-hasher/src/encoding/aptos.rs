//! Aptos offramp layout.
//!
//! Same field composition as the EVM 1.6 leaf, but Move's `vector<u8>` has
//! no ABI length word, so dynamic bytes are hashed exactly as they are.

use alloy_primitives::{B256, Bytes, U256, keccak256};
use ccip_merkle::LEAF_DOMAIN_SEPARATOR;
use ccip_types::{CcipMessage, CcipVersion, ChainFamily, ExtraArgs, Lane, RampMessageHeader, decode_address_word};

use crate::encoding::{
    AbiWords, LaneSelectors, WordTokenTransfer, check_lane, gas_limit_from, leaf_preimage, ramp_message,
    word_metadata_hash, word_token_transfers,
};
use crate::error::Result;
use crate::hasher::LeafHasher;

pub const ANY2APTOS_MESSAGE_HASH_TAG: &str = "Any2AptosMessageHashV1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptosLeafHasher {
    lane: LaneSelectors,
    source_family: ChainFamily,
    metadata_hash: B256,
}

impl AptosLeafHasher {
    pub fn new(lane: &Lane, source_family: ChainFamily) -> Result<Self> {
        Ok(Self {
            lane: LaneSelectors::from(lane),
            source_family,
            metadata_hash: word_metadata_hash(ANY2APTOS_MESSAGE_HASH_TAG, lane, source_family)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Any2AptosRampMessage {
    pub header: RampMessageHeader,
    pub sender: B256,
    pub data: Bytes,
    pub receiver: B256,
    pub gas_limit: U256,
    pub token_amounts: Vec<WordTokenTransfer>,
}

impl LeafHasher for AptosLeafHasher {
    type Normalized = Any2AptosRampMessage;

    fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    fn normalize(&self, message: &CcipMessage) -> Result<Any2AptosRampMessage> {
        let message = ramp_message(message, CcipVersion::V1_6)?;
        check_lane(&message.header, &self.lane)?;
        let extra_args = ExtraArgs::decode_for(&message.extra_args, ChainFamily::Aptos)?;

        Ok(Any2AptosRampMessage {
            header: message.header.clone(),
            sender: decode_address_word(&message.sender, self.source_family)?,
            data: message.data.clone(),
            receiver: decode_address_word(&message.receiver, ChainFamily::Aptos)?,
            gas_limit: gas_limit_from(&extra_args, ChainFamily::Aptos)?,
            token_amounts: word_token_transfers(&message.token_amounts, self.source_family, ChainFamily::Aptos)?,
        })
    }

    fn hash_normalized(&self, message: &Any2AptosRampMessage) -> Result<B256> {
        let mut fixed = AbiWords::new();
        fixed
            .bytes32(&message.header.message_id)
            .bytes32(&message.receiver)
            .uint64(message.header.sequence_number)
            .uint256(message.gas_limit)
            .uint64(message.header.nonce);

        let mut tokens = AbiWords::new();
        tokens.uint256(U256::from(message.token_amounts.len()));
        for token in &message.token_amounts {
            tokens
                .raw(token.source_pool_address.as_slice())
                .bytes32(&token.dest_token_address)
                .uint32(token.dest_gas_amount)
                .raw(&token.extra_data)
                .uint256(token.amount);
        }

        Ok(keccak256(leaf_preimage([
            LEAF_DOMAIN_SEPARATOR,
            self.metadata_hash,
            keccak256(fixed.as_slice()),
            keccak256(message.sender),
            keccak256(&message.data),
            keccak256(tokens.as_slice()),
        ])))
    }
}
