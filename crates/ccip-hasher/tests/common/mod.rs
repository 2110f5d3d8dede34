//! Message fixtures shared by the integration tests. The expected digests
//! next to them were computed independently from the offramp layouts.

#![allow(dead_code)]

use alloy_primitives::{B256, Bytes, U256, b256};
use ccip_types::{
    CcipMessage, CcipVersion, Evm2EvmMessage, EvmTokenAmount, ExtraArgs, Lane, RampMessage, RampMessageHeader,
    TokenTransfer,
};

pub const ETHEREUM: u64 = 5009297550715157269;
pub const ARBITRUM: u64 = 4949039107694359620;
pub const SOLANA: u64 = 124615329519749607;
pub const APTOS: u64 = 4741433654826277614;
pub const SUI: u64 = 17529533435026248318;

pub const ON_RAMP: &str = "0x1111111111111111111111111111111111111111";
pub const SENDER: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

pub const EVM_V1_6_METADATA: B256 = b256!("1a03f1440a5f1a4ccc571743296cd9631d9b83d423c2bfad2f36749617dbe87f");
pub const EVM_V1_6_LEAF: B256 = b256!("27ed39f2b0389825af2abb970013c0850c3d71dfde2051207d0f1ed76e599913");
pub const EVM_V1_5_METADATA: B256 = b256!("0cabd8d429c971a2195461d63f347fdbfcfa59d6400fa7b82ca0fdbb3afd492c");
pub const EVM_V1_5_LEAF: B256 = b256!("e1384b3106a2cfa33eb282271fb8920b6971859d29e6c16fcea470f5f7dd0bba");
pub const SOLANA_METADATA: B256 = b256!("feb66c4fc6483b2bf26b69118e6c5b597f7849708833266b770b527ad20b6bd0");
pub const SOLANA_LEAF: B256 = b256!("2c8b47f4c37aa8b9cd8b8da151e4634161a8da23268183078a26538edaa57ab8");
pub const APTOS_METADATA: B256 = b256!("862f437d2a9cbf506aee2dcc7c9ab4abf775cba59cd0466504ba46f525d75fe2");
pub const APTOS_LEAF: B256 = b256!("7479f201a5f2a236c4bb02118fe2e9c120c2fe9056879b93c2cef3ed940e7d3b");
pub const SUI_METADATA: B256 = b256!("860fac855b13502215c742e2a925fd5f99bc2e188f612336b6e323d4c1084e46");
pub const SUI_LEAF: B256 = b256!("ca45e62aa7e15fda80629351a515d8a585ce00e4bceceda4996dc2fb1dc0a6ff");

pub fn lane(dest: u64, version: CcipVersion) -> Lane {
    Lane::new(ETHEREUM, dest, ON_RAMP, version)
}

fn evm_address(byte: u8) -> String {
    format!("0x{}", hex::encode([byte; 20]))
}

fn word(byte: u8) -> String {
    format!("0x{}", hex::encode([byte; 32]))
}

fn header(message_id: B256, dest: u64, sequence_number: u64, nonce: u64) -> RampMessageHeader {
    RampMessageHeader {
        message_id,
        source_chain_selector: ETHEREUM,
        dest_chain_selector: dest,
        sequence_number,
        nonce,
    }
}

pub fn evm_v1_6_message() -> RampMessage {
    RampMessage {
        header: header(B256::repeat_byte(0xf2), ARBITRUM, 42, 7),
        sender: SENDER.to_string(),
        receiver: evm_address(0xbb),
        data: Bytes::from_static(b"hello ccip"),
        extra_args: ExtraArgs::GenericV2 {
            gas_limit: U256::from(500_000u64),
            allow_out_of_order_execution: true,
        }
        .encode()
        .into(),
        fee_token: evm_address(0xee),
        fee_token_amount: U256::from(1_000u64),
        token_amounts: vec![
            TokenTransfer {
                source_pool_address: evm_address(0xc1),
                dest_token_address: evm_address(0xd1),
                dest_gas_amount: 90_000,
                extra_data: Bytes::new(),
                amount: U256::from(10u64).pow(U256::from(18u64)),
            },
            TokenTransfer {
                source_pool_address: evm_address(0xc2),
                dest_token_address: evm_address(0xd2),
                dest_gas_amount: 120_000,
                extra_data: (0u8..40).collect::<Vec<_>>().into(),
                amount: U256::from(12_345u64),
            },
        ],
    }
}

/// A 1.5 message whose id is its leaf, as the legacy onramp assigns it.
pub fn evm_v1_5_message(sequence_number: u64, message_id: B256) -> Evm2EvmMessage {
    Evm2EvmMessage {
        source_chain_selector: ETHEREUM,
        sender: SENDER.to_string(),
        receiver: evm_address(0xbb),
        sequence_number,
        gas_limit: U256::from(200_000u64),
        strict: false,
        nonce: 3,
        fee_token: evm_address(0xee),
        fee_token_amount: U256::from(1_000u64),
        data: Bytes::from_static(b"legacy"),
        token_amounts: vec![EvmTokenAmount {
            token: evm_address(0xd1),
            amount: U256::from(5u64),
        }],
        source_token_data: vec![Bytes::from_static(&[1, 2])],
        message_id,
    }
}

pub const SOLANA_RECEIVER_BASE58: &str = "3JF3sEqM796hk5WFqA6EtmEwJQ9quALszsfJyvXNQKy3";

pub fn solana_message() -> RampMessage {
    RampMessage {
        header: header(B256::repeat_byte(0x5a), SOLANA, 11, 0),
        sender: SENDER.to_string(),
        receiver: SOLANA_RECEIVER_BASE58.to_string(),
        data: Bytes::from_static(&[1, 2, 3]),
        extra_args: ExtraArgs::SvmV1 {
            compute_units: 200_000,
            account_is_writable_bitmap: 3,
            allow_out_of_order_execution: true,
            token_receiver: B256::repeat_byte(0x33),
            accounts: vec![B256::repeat_byte(0x44), B256::repeat_byte(0x55)],
        }
        .encode()
        .into(),
        fee_token: String::new(),
        fee_token_amount: U256::ZERO,
        token_amounts: vec![TokenTransfer {
            source_pool_address: evm_address(0xc1),
            dest_token_address: word(0xd3),
            dest_gas_amount: 5_000,
            extra_data: Bytes::from_static(&[0xca, 0xfe]),
            amount: U256::from(1_000_000_000u64),
        }],
    }
}

pub fn aptos_message() -> RampMessage {
    RampMessage {
        header: header(B256::repeat_byte(0xa1), APTOS, 5, 2),
        sender: SENDER.to_string(),
        receiver: "0x1234".to_string(),
        data: Bytes::from_static(b"aptos payload"),
        extra_args: ExtraArgs::EvmV1 {
            gas_limit: U256::from(100_000u64),
        }
        .encode()
        .into(),
        fee_token: String::new(),
        fee_token_amount: U256::ZERO,
        token_amounts: vec![TokenTransfer {
            source_pool_address: evm_address(0xc1),
            dest_token_address: word(0x0a),
            dest_gas_amount: 0,
            extra_data: Bytes::from_static(&[0xbe, 0xef]),
            amount: U256::from(77u64),
        }],
    }
}

pub fn sui_message() -> RampMessage {
    RampMessage {
        header: header(B256::repeat_byte(0x5b), SUI, 8, 4),
        sender: SENDER.to_string(),
        receiver: word(0x5e),
        data: Bytes::from_static(b"sui payload"),
        extra_args: ExtraArgs::SuiV1 {
            gas_limit: U256::from(300_000u64),
            allow_out_of_order_execution: false,
            token_receiver: B256::repeat_byte(0x66),
            receiver_object_ids: vec![B256::repeat_byte(0x77)],
        }
        .encode()
        .into(),
        fee_token: String::new(),
        fee_token_amount: U256::ZERO,
        token_amounts: vec![TokenTransfer {
            source_pool_address: evm_address(0xc1),
            dest_token_address: word(0x0b),
            dest_gas_amount: 25_000,
            extra_data: vec![0x99u8; 33].into(),
            amount: U256::from(42u64),
        }],
    }
}

/// `count` EVM 1.6 messages numbered from `first`, all distinct.
pub fn evm_batch(first: u64, count: u64) -> Vec<CcipMessage> {
    (first..first + count)
        .map(|sequence_number| {
            let mut message = evm_v1_6_message();
            message.header.sequence_number = sequence_number;
            message.header.message_id = B256::left_padding_from(&sequence_number.to_be_bytes());
            CcipMessage::Ramp(message)
        })
        .collect()
}
