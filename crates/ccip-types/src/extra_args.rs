//! Selector-tagged extra args attached to every v1.6 message.
//!
//! The byte string is a 4-byte tag followed by the ABI encoding of the tagged
//! struct, exactly as `Client._argsToBytes` produces it on the source chain.

use alloy_primitives::{B256, FixedBytes, U256};
use alloy_sol_types::{SolType, sol};

use crate::chain::ChainFamily;
use crate::error::ExtraArgsError;

pub const EVM_EXTRA_ARGS_V1_TAG: [u8; 4] = [0x97, 0xa6, 0x57, 0xc9];
pub const GENERIC_EXTRA_ARGS_V2_TAG: [u8; 4] = [0x18, 0x1d, 0xcf, 0x10];
pub const SVM_EXTRA_ARGS_V1_TAG: [u8; 4] = [0x1f, 0x3b, 0x3a, 0xba];
pub const SUI_EXTRA_ARGS_V1_TAG: [u8; 4] = [0x21, 0xea, 0x4c, 0xa9];

sol! {
    struct EVMExtraArgsV1 {
        uint256 gasLimit;
    }

    struct GenericExtraArgsV2 {
        uint256 gasLimit;
        bool allowOutOfOrderExecution;
    }

    struct SVMExtraArgsV1 {
        uint32 computeUnits;
        uint64 accountIsWritableBitmap;
        bool allowOutOfOrderExecution;
        bytes32 tokenReceiver;
        bytes32[] accounts;
    }

    struct SuiExtraArgsV1 {
        uint256 gasLimit;
        bool allowOutOfOrderExecution;
        bytes32 tokenReceiver;
        bytes32[] receiverObjectIds;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraArgs {
    EvmV1 {
        gas_limit: U256,
    },
    GenericV2 {
        gas_limit: U256,
        allow_out_of_order_execution: bool,
    },
    SvmV1 {
        compute_units: u32,
        account_is_writable_bitmap: u64,
        allow_out_of_order_execution: bool,
        token_receiver: B256,
        accounts: Vec<B256>,
    },
    SuiV1 {
        gas_limit: U256,
        allow_out_of_order_execution: bool,
        token_receiver: B256,
        receiver_object_ids: Vec<B256>,
    },
}

impl ExtraArgs {
    pub fn decode(bytes: &[u8]) -> Result<Self, ExtraArgsError> {
        if bytes.len() < 4 {
            return Err(ExtraArgsError::TooShort(bytes.len()));
        }
        let (tag, body) = bytes.split_at(4);
        let tag: [u8; 4] = [tag[0], tag[1], tag[2], tag[3]];

        match tag {
            EVM_EXTRA_ARGS_V1_TAG => {
                let args = EVMExtraArgsV1::abi_decode(body).map_err(|e| body_error("EVMExtraArgsV1", e))?;
                Ok(ExtraArgs::EvmV1 {
                    gas_limit: args.gasLimit,
                })
            }
            GENERIC_EXTRA_ARGS_V2_TAG => {
                let args =
                    GenericExtraArgsV2::abi_decode(body).map_err(|e| body_error("GenericExtraArgsV2", e))?;
                Ok(ExtraArgs::GenericV2 {
                    gas_limit: args.gasLimit,
                    allow_out_of_order_execution: args.allowOutOfOrderExecution,
                })
            }
            SVM_EXTRA_ARGS_V1_TAG => {
                let args = SVMExtraArgsV1::abi_decode(body).map_err(|e| body_error("SVMExtraArgsV1", e))?;
                Ok(ExtraArgs::SvmV1 {
                    compute_units: args.computeUnits,
                    account_is_writable_bitmap: args.accountIsWritableBitmap,
                    allow_out_of_order_execution: args.allowOutOfOrderExecution,
                    token_receiver: args.tokenReceiver,
                    accounts: args.accounts,
                })
            }
            SUI_EXTRA_ARGS_V1_TAG => {
                let args = SuiExtraArgsV1::abi_decode(body).map_err(|e| body_error("SuiExtraArgsV1", e))?;
                Ok(ExtraArgs::SuiV1 {
                    gas_limit: args.gasLimit,
                    allow_out_of_order_execution: args.allowOutOfOrderExecution,
                    token_receiver: args.tokenReceiver,
                    receiver_object_ids: args.receiverObjectIds,
                })
            }
            unknown => Err(ExtraArgsError::UnknownTag(unknown)),
        }
    }

    /// Decodes `bytes` and checks the variant is one a `family` destination accepts.
    pub fn decode_for(bytes: &[u8], family: ChainFamily) -> Result<Self, ExtraArgsError> {
        let args = Self::decode(bytes)?;
        let accepted = match family {
            ChainFamily::Evm | ChainFamily::Aptos => {
                matches!(args, ExtraArgs::EvmV1 { .. } | ExtraArgs::GenericV2 { .. })
            }
            ChainFamily::Solana => matches!(args, ExtraArgs::SvmV1 { .. }),
            ChainFamily::Sui => matches!(args, ExtraArgs::SuiV1 { .. }),
        };
        if !accepted {
            return Err(ExtraArgsError::UnexpectedVariant {
                family,
                found: args.variant_name(),
            });
        }
        Ok(args)
    }

    pub fn encode(&self) -> Vec<u8> {
        let (tag, body) = match self {
            ExtraArgs::EvmV1 { gas_limit } => (
                EVM_EXTRA_ARGS_V1_TAG,
                EVMExtraArgsV1::abi_encode(&EVMExtraArgsV1 { gasLimit: *gas_limit }),
            ),
            ExtraArgs::GenericV2 {
                gas_limit,
                allow_out_of_order_execution,
            } => (
                GENERIC_EXTRA_ARGS_V2_TAG,
                GenericExtraArgsV2::abi_encode(&GenericExtraArgsV2 {
                    gasLimit: *gas_limit,
                    allowOutOfOrderExecution: *allow_out_of_order_execution,
                }),
            ),
            ExtraArgs::SvmV1 {
                compute_units,
                account_is_writable_bitmap,
                allow_out_of_order_execution,
                token_receiver,
                accounts,
            } => (
                SVM_EXTRA_ARGS_V1_TAG,
                SVMExtraArgsV1::abi_encode(&SVMExtraArgsV1 {
                    computeUnits: *compute_units,
                    accountIsWritableBitmap: *account_is_writable_bitmap,
                    allowOutOfOrderExecution: *allow_out_of_order_execution,
                    tokenReceiver: *token_receiver,
                    accounts: accounts.clone(),
                }),
            ),
            ExtraArgs::SuiV1 {
                gas_limit,
                allow_out_of_order_execution,
                token_receiver,
                receiver_object_ids,
            } => (
                SUI_EXTRA_ARGS_V1_TAG,
                SuiExtraArgsV1::abi_encode(&SuiExtraArgsV1 {
                    gasLimit: *gas_limit,
                    allowOutOfOrderExecution: *allow_out_of_order_execution,
                    tokenReceiver: *token_receiver,
                    receiverObjectIds: receiver_object_ids.clone(),
                }),
            ),
        };
        let mut encoded = tag.to_vec();
        encoded.extend_from_slice(&body);
        encoded
    }

    /// Execution gas limit for gas-metered destinations. `None` for Solana.
    pub fn gas_limit(&self) -> Option<U256> {
        match self {
            ExtraArgs::EvmV1 { gas_limit } | ExtraArgs::GenericV2 { gas_limit, .. } | ExtraArgs::SuiV1 { gas_limit, .. } => {
                Some(*gas_limit)
            }
            ExtraArgs::SvmV1 { .. } => None,
        }
    }

    pub fn allow_out_of_order_execution(&self) -> bool {
        match self {
            ExtraArgs::EvmV1 { .. } => false,
            ExtraArgs::GenericV2 {
                allow_out_of_order_execution,
                ..
            }
            | ExtraArgs::SvmV1 {
                allow_out_of_order_execution,
                ..
            }
            | ExtraArgs::SuiV1 {
                allow_out_of_order_execution,
                ..
            } => *allow_out_of_order_execution,
        }
    }

    /// Token receiver for families that separate it from the logic receiver.
    pub fn token_receiver(&self) -> Option<FixedBytes<32>> {
        match self {
            ExtraArgs::SvmV1 { token_receiver, .. } | ExtraArgs::SuiV1 { token_receiver, .. } => Some(*token_receiver),
            _ => None,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            ExtraArgs::EvmV1 { .. } => "EVMExtraArgsV1",
            ExtraArgs::GenericV2 { .. } => "GenericExtraArgsV2",
            ExtraArgs::SvmV1 { .. } => "SVMExtraArgsV1",
            ExtraArgs::SuiV1 { .. } => "SuiExtraArgsV1",
        }
    }
}

fn body_error(variant: &'static str, err: alloy_sol_types::Error) -> ExtraArgsError {
    ExtraArgsError::Body {
        variant,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{b256, hex};

    use super::*;

    #[test]
    fn test_decode_evm_v1() {
        // abi.encodeWithSelector(EVM_EXTRA_ARGS_V1_TAG, EVMExtraArgsV1({gasLimit: 200000}))
        let bytes = hex::decode("97a657c90000000000000000000000000000000000000000000000000000000000030d40").unwrap();
        let args = ExtraArgs::decode(&bytes).unwrap();
        assert_eq!(
            args,
            ExtraArgs::EvmV1 {
                gas_limit: U256::from(200_000u64)
            }
        );
        assert_eq!(args.encode(), bytes);
        assert!(!args.allow_out_of_order_execution());
    }

    #[test]
    fn test_decode_generic_v2() {
        let bytes = hex::decode(
            "181dcf10\
             000000000000000000000000000000000000000000000000000000000007a120\
             0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        let args = ExtraArgs::decode(&bytes).unwrap();
        assert_eq!(args.gas_limit(), Some(U256::from(500_000u64)));
        assert!(args.allow_out_of_order_execution());
        assert_eq!(args.encode(), bytes);
    }

    #[test]
    fn test_svm_round_trip_keeps_accounts() {
        let args = ExtraArgs::SvmV1 {
            compute_units: 1_000,
            account_is_writable_bitmap: 0b10,
            allow_out_of_order_execution: true,
            token_receiver: b256!("0101010101010101010101010101010101010101010101010101010101010101"),
            accounts: vec![B256::repeat_byte(2), B256::repeat_byte(3)],
        };
        let encoded = args.encode();
        assert_eq!(&encoded[..4], &SVM_EXTRA_ARGS_V1_TAG);
        // struct offset head, then five fields, then the account array
        assert_eq!(encoded.len(), 4 + 32 + 5 * 32 + 32 + 2 * 32);
        assert_eq!(ExtraArgs::decode(&encoded).unwrap(), args);
        assert_eq!(args.gas_limit(), None);
        assert_eq!(args.token_receiver(), Some(B256::repeat_byte(1)));
    }

    #[test]
    fn test_decode_for_rejects_other_family() {
        let evm = ExtraArgs::EvmV1 {
            gas_limit: U256::from(1u64),
        }
        .encode();
        assert!(ExtraArgs::decode_for(&evm, ChainFamily::Aptos).is_ok());
        assert_eq!(
            ExtraArgs::decode_for(&evm, ChainFamily::Sui).unwrap_err(),
            ExtraArgsError::UnexpectedVariant {
                family: ChainFamily::Sui,
                found: "EVMExtraArgsV1"
            }
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(ExtraArgs::decode(&[0x97, 0xa6]).unwrap_err(), ExtraArgsError::TooShort(2));
        assert_eq!(
            ExtraArgs::decode(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err(),
            ExtraArgsError::UnknownTag([0xde, 0xad, 0xbe, 0xef])
        );
        assert!(matches!(
            ExtraArgs::decode(&EVM_EXTRA_ARGS_V1_TAG).unwrap_err(),
            ExtraArgsError::Body { variant: "EVMExtraArgsV1", .. }
        ));
    }
}
