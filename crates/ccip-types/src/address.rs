//! Decoding of address strings into each family's native byte width.

use alloy_primitives::{Address, B256};

use crate::chain::ChainFamily;
use crate::error::AddressError;

pub const EVM_ADDRESS_LENGTH: usize = 20;
pub const WORD_ADDRESS_LENGTH: usize = 32;

/// Decodes `input` into the family's native address bytes.
///
/// EVM addresses are 20 bytes; the 32-byte ABI form with twelve leading zero
/// bytes is accepted and trimmed. Aptos and Sui accept short hex (`0x1`) and
/// are left-padded to 32 bytes. Solana keys are base58 or 0x-hex, 32 bytes.
pub fn decode_address(input: &str, family: ChainFamily) -> Result<Vec<u8>, AddressError> {
    match family {
        ChainFamily::Evm => decode_evm_address(input).map(|address| address.to_vec()),
        ChainFamily::Solana => {
            let bytes = if has_hex_prefix(input) {
                decode_hex(input, false)?
            } else {
                bs58::decode(input).into_vec().map_err(|e| AddressError::Base58 {
                    input: input.to_string(),
                    reason: e.to_string(),
                })?
            };
            expect_width(input, family, bytes, WORD_ADDRESS_LENGTH)
        }
        ChainFamily::Aptos | ChainFamily::Sui => {
            let bytes = decode_hex(input, true)?;
            if bytes.is_empty() || bytes.len() > WORD_ADDRESS_LENGTH {
                return Err(width_error(input, family, bytes.len(), WORD_ADDRESS_LENGTH));
            }
            Ok(B256::left_padding_from(&bytes).to_vec())
        }
    }
}

/// Decodes `input` and left-pads it to a 32-byte word, the form every
/// destination hashes for cross-family addresses.
pub fn decode_address_word(input: &str, family: ChainFamily) -> Result<B256, AddressError> {
    let bytes = decode_address(input, family)?;
    Ok(B256::left_padding_from(&bytes))
}

pub fn decode_evm_address(input: &str) -> Result<Address, AddressError> {
    let bytes = decode_hex(input, false)?;
    match bytes.len() {
        EVM_ADDRESS_LENGTH => Ok(Address::from_slice(&bytes)),
        WORD_ADDRESS_LENGTH if bytes[..12].iter().all(|b| *b == 0) => Ok(Address::from_slice(&bytes[12..])),
        len => Err(width_error(input, ChainFamily::Evm, len, EVM_ADDRESS_LENGTH)),
    }
}

fn has_hex_prefix(input: &str) -> bool {
    input.starts_with("0x") || input.starts_with("0X")
}

fn decode_hex(input: &str, allow_odd: bool) -> Result<Vec<u8>, AddressError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let decoded = if allow_odd && digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };
    decoded.map_err(|e| AddressError::Hex {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

fn expect_width(input: &str, family: ChainFamily, bytes: Vec<u8>, expected: usize) -> Result<Vec<u8>, AddressError> {
    if bytes.len() != expected {
        return Err(width_error(input, family, bytes.len(), expected));
    }
    Ok(bytes)
}

fn width_error(input: &str, family: ChainFamily, len: usize, expected: usize) -> AddressError {
    AddressError::Width {
        family,
        input: input.to_string(),
        len,
        expected,
    }
}
