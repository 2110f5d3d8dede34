//! Decoded CCIP messages as they are emitted by the source onramp.
//!
//! Two on-chain shapes exist: the EVM2EVM message of the 1.2/1.5 lanes and the
//! family-agnostic ramp message of 1.6. Both are immutable once decoded; the
//! hashers build their own normalised copies instead of rewriting fields.

use alloy_primitives::{B256, Bytes, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampMessageHeader {
    pub message_id: B256,
    pub source_chain_selector: u64,
    pub dest_chain_selector: u64,
    pub sequence_number: u64,
    pub nonce: u64,
}

/// Token transfer of a 1.6 message. Addresses are in the family notation of
/// the chain they live on: the pool on the source, the token on the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub source_pool_address: String,
    pub dest_token_address: String,
    pub dest_gas_amount: u32,
    #[serde(default)]
    pub extra_data: Bytes,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampMessage {
    pub header: RampMessageHeader,
    /// Sender in the source family's notation.
    pub sender: String,
    /// Receiver in the destination family's notation.
    pub receiver: String,
    #[serde(default)]
    pub data: Bytes,
    pub extra_args: Bytes,
    #[serde(default)]
    pub fee_token: String,
    #[serde(default)]
    pub fee_token_amount: U256,
    #[serde(default)]
    pub token_amounts: Vec<TokenTransfer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmTokenAmount {
    pub token: String,
    pub amount: U256,
}

/// The `EVM2EVMMessage` struct of 1.2 and 1.5 onramps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evm2EvmMessage {
    pub source_chain_selector: u64,
    pub sender: String,
    pub receiver: String,
    pub sequence_number: u64,
    pub gas_limit: U256,
    pub strict: bool,
    pub nonce: u64,
    pub fee_token: String,
    pub fee_token_amount: U256,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub token_amounts: Vec<EvmTokenAmount>,
    #[serde(default)]
    pub source_token_data: Vec<Bytes>,
    pub message_id: B256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CcipMessage {
    Ramp(RampMessage),
    Evm2Evm(Evm2EvmMessage),
}

impl CcipMessage {
    pub fn sequence_number(&self) -> u64 {
        match self {
            CcipMessage::Ramp(message) => message.header.sequence_number,
            CcipMessage::Evm2Evm(message) => message.sequence_number,
        }
    }

    pub fn message_id(&self) -> B256 {
        match self {
            CcipMessage::Ramp(message) => message.header.message_id,
            CcipMessage::Evm2Evm(message) => message.message_id,
        }
    }

    pub fn source_chain_selector(&self) -> u64 {
        match self {
            CcipMessage::Ramp(message) => message.header.source_chain_selector,
            CcipMessage::Evm2Evm(message) => message.source_chain_selector,
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            CcipMessage::Ramp(_) => "ramp",
            CcipMessage::Evm2Evm(_) => "EVM2EVM",
        }
    }
}

impl From<RampMessage> for CcipMessage {
    fn from(message: RampMessage) -> Self {
        CcipMessage::Ramp(message)
    }
}

impl From<Evm2EvmMessage> for CcipMessage {
    fn from(message: Evm2EvmMessage) -> Self {
        CcipMessage::Evm2Evm(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_shapes() {
        let ramp = r#"{
            "header": {
                "messageId": "0x1111111111111111111111111111111111111111111111111111111111111111",
                "sourceChainSelector": 1,
                "destChainSelector": 2,
                "sequenceNumber": 7,
                "nonce": 0
            },
            "sender": "0x00000000000000000000000000000000000000aa",
            "receiver": "0x00000000000000000000000000000000000000bb",
            "data": "0x",
            "extraArgs": "0x97a657c90000000000000000000000000000000000000000000000000000000000030d40"
        }"#;
        let message: CcipMessage = serde_json::from_str(ramp).unwrap();
        assert_eq!(message.shape(), "ramp");
        assert_eq!(message.sequence_number(), 7);
        assert_eq!(message.message_id(), B256::repeat_byte(0x11));

        let legacy = r#"{
            "sourceChainSelector": 1,
            "sender": "0x00000000000000000000000000000000000000aa",
            "receiver": "0x00000000000000000000000000000000000000bb",
            "sequenceNumber": 9,
            "gasLimit": "0x30d40",
            "strict": false,
            "nonce": 3,
            "feeToken": "0x00000000000000000000000000000000000000cc",
            "feeTokenAmount": "0x0",
            "messageId": "0x2222222222222222222222222222222222222222222222222222222222222222"
        }"#;
        let message: CcipMessage = serde_json::from_str(legacy).unwrap();
        assert_eq!(message.shape(), "EVM2EVM");
        assert_eq!(message.sequence_number(), 9);
        assert_eq!(message.source_chain_selector(), 1);
    }
}
