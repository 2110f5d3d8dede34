//! Sui offramp layout.
//!
//! Dynamic bytes are written as a 256-bit length followed by the bytes padded
//! to a word, with no offset words. The fixed block carries the token
//! receiver from `SuiExtraArgsV1` between the gas limit and the nonce.

use alloy_primitives::{B256, Bytes, U256, keccak256};
use ccip_merkle::LEAF_DOMAIN_SEPARATOR;
use ccip_types::{
    CcipMessage, CcipVersion, ChainFamily, ExtraArgs, ExtraArgsError, Lane, RampMessageHeader, decode_address_word,
};

use crate::encoding::{
    AbiWords, LaneSelectors, WordTokenTransfer, check_lane, leaf_preimage, ramp_message, word_metadata_hash,
    word_token_transfers,
};
use crate::error::{HasherError, Result};
use crate::hasher::LeafHasher;

pub const ANY2SUI_MESSAGE_HASH_TAG: &str = "Any2SuiMessageHashV1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiLeafHasher {
    lane: LaneSelectors,
    source_family: ChainFamily,
    metadata_hash: B256,
}

impl SuiLeafHasher {
    pub fn new(lane: &Lane, source_family: ChainFamily) -> Result<Self> {
        Ok(Self {
            lane: LaneSelectors::from(lane),
            source_family,
            metadata_hash: word_metadata_hash(ANY2SUI_MESSAGE_HASH_TAG, lane, source_family)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Any2SuiRampMessage {
    pub header: RampMessageHeader,
    pub sender: B256,
    pub data: Bytes,
    pub receiver: B256,
    pub gas_limit: U256,
    pub token_receiver: B256,
    pub token_amounts: Vec<WordTokenTransfer>,
}

impl LeafHasher for SuiLeafHasher {
    type Normalized = Any2SuiRampMessage;

    fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    fn normalize(&self, message: &CcipMessage) -> Result<Any2SuiRampMessage> {
        let message = ramp_message(message, CcipVersion::V1_6)?;
        check_lane(&message.header, &self.lane)?;

        let (gas_limit, token_receiver) = match ExtraArgs::decode_for(&message.extra_args, ChainFamily::Sui)? {
            ExtraArgs::SuiV1 {
                gas_limit,
                token_receiver,
                ..
            } => (gas_limit, token_receiver),
            other => {
                return Err(HasherError::MalformedExtraArgs(ExtraArgsError::UnexpectedVariant {
                    family: ChainFamily::Sui,
                    found: other.variant_name(),
                }));
            }
        };

        Ok(Any2SuiRampMessage {
            header: message.header.clone(),
            sender: decode_address_word(&message.sender, self.source_family)?,
            data: message.data.clone(),
            receiver: decode_address_word(&message.receiver, ChainFamily::Sui)?,
            gas_limit,
            token_receiver,
            token_amounts: word_token_transfers(&message.token_amounts, self.source_family, ChainFamily::Sui)?,
        })
    }

    fn hash_normalized(&self, message: &Any2SuiRampMessage) -> Result<B256> {
        let mut fixed = AbiWords::new();
        fixed
            .bytes32(&message.header.message_id)
            .bytes32(&message.receiver)
            .uint64(message.header.sequence_number)
            .uint256(message.gas_limit)
            .bytes32(&message.token_receiver)
            .uint64(message.header.nonce);

        let mut sender = AbiWords::new();
        sender.length_prefixed(message.sender.as_slice());

        let mut data = AbiWords::new();
        data.length_prefixed(&message.data);

        let mut tokens = AbiWords::new();
        tokens.uint256(U256::from(message.token_amounts.len()));
        for token in &message.token_amounts {
            tokens
                .length_prefixed(token.source_pool_address.as_slice())
                .bytes32(&token.dest_token_address)
                .uint32(token.dest_gas_amount)
                .length_prefixed(&token.extra_data)
                .uint256(token.amount);
        }

        Ok(keccak256(leaf_preimage([
            LEAF_DOMAIN_SEPARATOR,
            self.metadata_hash,
            keccak256(fixed.as_slice()),
            keccak256(sender.as_slice()),
            keccak256(data.as_slice()),
            keccak256(tokens.as_slice()),
        ])))
    }
}
