//! EVM offramp layouts: the 1.2/1.5 `EVM2EVMMessage` and the 1.6 `Any2EVMRampMessage`.
//!
//! Both are Solidity `abi.encode` of the structs `Internal._hash` hashes, so
//! they are written as `sol!` types and encoded with `alloy-sol-types`.

use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use alloy_sol_types::{SolType, sol, sol_data};
use ccip_merkle::LEAF_DOMAIN_SEPARATOR;
use ccip_types::{
    CcipMessage, CcipVersion, ChainFamily, ExtraArgs, Lane, RampMessageHeader, decode_address_word, decode_evm_address,
};

use crate::encoding::{LaneSelectors, check_lane, gas_limit_from, leaf_preimage, ramp_message};
use crate::error::{HasherError, Result};
use crate::hasher::LeafHasher;

pub const EVM2EVM_MESSAGE_HASH_TAG: &str = "EVM2EVMMessageHashV2";
pub const ANY2EVM_MESSAGE_HASH_TAG: &str = "Any2EVMMessageHashV1";

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct EVMTokenAmount {
        address token;
        uint256 amount;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Evm2EvmFixedValues {
        address sender;
        address receiver;
        uint64 sequenceNumber;
        uint256 gasLimit;
        bool strict;
        uint64 nonce;
        address feeToken;
        uint256 feeTokenAmount;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Evm2EvmMetadata {
        bytes32 prefix;
        uint64 sourceChainSelector;
        uint64 destChainSelector;
        address onRamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Any2EVMTokenTransfer {
        bytes sourcePoolAddress;
        address destTokenAddress;
        uint32 destGasAmount;
        bytes extraData;
        uint256 amount;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Any2EvmFixedValues {
        bytes32 messageId;
        address receiver;
        uint64 sequenceNumber;
        uint256 gasLimit;
        uint64 nonce;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Any2EvmMetadata {
        bytes32 prefix;
        uint64 sourceChainSelector;
        uint64 destChainSelector;
        bytes32 onRampHash;
    }
}

/// Hasher for 1.2 and 1.5 lanes, where the onramp's message id is this leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evm2EvmLeafHasher {
    lane: LaneSelectors,
    version: CcipVersion,
    metadata_hash: B256,
}

impl Evm2EvmLeafHasher {
    pub fn new(lane: &Lane) -> Result<Self> {
        let metadata = Evm2EvmMetadata {
            prefix: keccak256(EVM2EVM_MESSAGE_HASH_TAG),
            sourceChainSelector: lane.source_chain_selector,
            destChainSelector: lane.dest_chain_selector,
            onRamp: decode_evm_address(&lane.on_ramp)?,
        };
        Ok(Self {
            lane: LaneSelectors::from(lane),
            version: lane.version,
            metadata_hash: keccak256(Evm2EvmMetadata::abi_encode(&metadata)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvm2EvmMessage {
    pub fixed: Evm2EvmFixedValues,
    pub data: Bytes,
    pub token_amounts: Vec<EVMTokenAmount>,
    pub source_token_data: Vec<Bytes>,
}

impl LeafHasher for Evm2EvmLeafHasher {
    type Normalized = NormalizedEvm2EvmMessage;

    fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    fn normalize(&self, message: &CcipMessage) -> Result<NormalizedEvm2EvmMessage> {
        let CcipMessage::Evm2Evm(message) = message else {
            return Err(HasherError::MessageShapeMismatch {
                version: self.version,
                shape: message.shape(),
            });
        };
        if message.source_chain_selector != self.lane.source {
            return Err(HasherError::LaneMismatch {
                sequence_number: message.sequence_number,
                source_chain_selector: message.source_chain_selector,
                dest_chain_selector: self.lane.dest,
                lane_source: self.lane.source,
                lane_dest: self.lane.dest,
            });
        }

        let token_amounts = message
            .token_amounts
            .iter()
            .map(|token_amount| -> Result<EVMTokenAmount> {
                Ok(EVMTokenAmount {
                    token: decode_evm_address(&token_amount.token)?,
                    amount: token_amount.amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(NormalizedEvm2EvmMessage {
            fixed: Evm2EvmFixedValues {
                sender: decode_evm_address(&message.sender)?,
                receiver: decode_evm_address(&message.receiver)?,
                sequenceNumber: message.sequence_number,
                gasLimit: message.gas_limit,
                strict: message.strict,
                nonce: message.nonce,
                feeToken: decode_evm_address(&message.fee_token)?,
                feeTokenAmount: message.fee_token_amount,
            },
            data: message.data.clone(),
            token_amounts,
            source_token_data: message.source_token_data.clone(),
        })
    }

    fn hash_normalized(&self, message: &NormalizedEvm2EvmMessage) -> Result<B256> {
        let fixed_hash = keccak256(Evm2EvmFixedValues::abi_encode(&message.fixed));
        let tokens_hash = keccak256(sol_data::Array::<EVMTokenAmount>::abi_encode(&message.token_amounts));
        let source_token_data_hash =
            keccak256(sol_data::Array::<sol_data::Bytes>::abi_encode(&message.source_token_data));

        Ok(keccak256(leaf_preimage([
            LEAF_DOMAIN_SEPARATOR,
            self.metadata_hash,
            fixed_hash,
            keccak256(&message.data),
            tokens_hash,
            source_token_data_hash,
        ])))
    }
}

/// Hasher for 1.6 lanes into an EVM chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmLeafHasher {
    lane: LaneSelectors,
    source_family: ChainFamily,
    metadata_hash: B256,
}

impl EvmLeafHasher {
    pub fn new(lane: &Lane, source_family: ChainFamily) -> Result<Self> {
        let on_ramp = decode_address_word(&lane.on_ramp, source_family)?;
        let metadata = Any2EvmMetadata {
            prefix: keccak256(ANY2EVM_MESSAGE_HASH_TAG),
            sourceChainSelector: lane.source_chain_selector,
            destChainSelector: lane.dest_chain_selector,
            onRampHash: keccak256(on_ramp),
        };
        Ok(Self {
            lane: LaneSelectors::from(lane),
            source_family,
            metadata_hash: keccak256(Any2EvmMetadata::abi_encode(&metadata)),
        })
    }
}

/// `Internal.Any2EVMRampMessage` with the sender as the 32-byte word the onramp emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Any2EvmRampMessage {
    pub header: RampMessageHeader,
    pub sender: B256,
    pub data: Bytes,
    pub receiver: Address,
    pub gas_limit: U256,
    pub token_amounts: Vec<Any2EVMTokenTransfer>,
}

impl LeafHasher for EvmLeafHasher {
    type Normalized = Any2EvmRampMessage;

    fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    fn normalize(&self, message: &CcipMessage) -> Result<Any2EvmRampMessage> {
        let message = ramp_message(message, CcipVersion::V1_6)?;
        check_lane(&message.header, &self.lane)?;
        let extra_args = ExtraArgs::decode_for(&message.extra_args, ChainFamily::Evm)?;

        let token_amounts = message
            .token_amounts
            .iter()
            .map(|token| -> Result<Any2EVMTokenTransfer> {
                Ok(Any2EVMTokenTransfer {
                    sourcePoolAddress: Bytes::copy_from_slice(
                        decode_address_word(&token.source_pool_address, self.source_family)?.as_slice(),
                    ),
                    destTokenAddress: decode_evm_address(&token.dest_token_address)?,
                    destGasAmount: token.dest_gas_amount,
                    extraData: token.extra_data.clone(),
                    amount: token.amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Any2EvmRampMessage {
            header: message.header.clone(),
            sender: decode_address_word(&message.sender, self.source_family)?,
            data: message.data.clone(),
            receiver: decode_evm_address(&message.receiver)?,
            gas_limit: gas_limit_from(&extra_args, ChainFamily::Evm)?,
            token_amounts,
        })
    }

    fn hash_normalized(&self, message: &Any2EvmRampMessage) -> Result<B256> {
        let fixed = Any2EvmFixedValues {
            messageId: message.header.message_id,
            receiver: message.receiver,
            sequenceNumber: message.header.sequence_number,
            gasLimit: message.gas_limit,
            nonce: message.header.nonce,
        };
        let tokens = sol_data::Array::<Any2EVMTokenTransfer>::abi_encode(&message.token_amounts);

        Ok(keccak256(leaf_preimage([
            LEAF_DOMAIN_SEPARATOR,
            self.metadata_hash,
            keccak256(Any2EvmFixedValues::abi_encode(&fixed)),
            keccak256(message.sender),
            keccak256(&message.data),
            keccak256(tokens),
        ])))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_fixed_values_are_static_words() {
        let fixed = Any2EvmFixedValues {
            messageId: B256::repeat_byte(0xf2),
            receiver: address!("00000000000000000000000000000000000000bb"),
            sequenceNumber: 7,
            gasLimit: U256::from(500_000u64),
            nonce: 1,
        };
        let encoded = Any2EvmFixedValues::abi_encode(&fixed);
        assert_eq!(encoded.len(), 5 * 32);
        assert_eq!(&encoded[..32], &[0xf2; 32]);
        assert_eq!(encoded[63], 0xbb);
        assert_eq!(encoded[95], 7);
    }

    #[test]
    fn test_token_array_has_offsets() {
        let tokens = vec![Any2EVMTokenTransfer {
            sourcePoolAddress: Bytes::from(vec![1u8; 32]),
            destTokenAddress: Address::repeat_byte(2),
            destGasAmount: 90_000,
            extraData: Bytes::new(),
            amount: U256::from(1u64),
        }];
        let encoded = sol_data::Array::<Any2EVMTokenTransfer>::abi_encode(&tokens);
        // outer offset, length, element offset, 5 head words, pool bytes (len + word), extra data (len)
        assert_eq!(encoded.len(), 32 * (3 + 5 + 2 + 1));
        assert_eq!(encoded[31], 0x20);
        assert_eq!(encoded[63], 1);
    }
}
