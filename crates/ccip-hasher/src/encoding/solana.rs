//! Solana offramp layout.
//!
//! The program hashes Borsh-serialized pieces of its `Any2SVMRampMessage`
//! with SHA-256: little-endian integers, `u32`-length-prefixed vectors and
//! token amounts as 32-byte little-endian words.

use alloy_primitives::{B256, U256};
use borsh::{BorshDeserialize, BorshSerialize};
use ccip_merkle::LEAF_DOMAIN_SEPARATOR;
use ccip_types::{CcipMessage, CcipVersion, ChainFamily, ExtraArgs, ExtraArgsError, Lane, decode_address};
use sha2::{Digest, Sha256};

use crate::encoding::{LaneSelectors, check_lane, leaf_preimage, ramp_message};
use crate::error::{HasherError, Result};
use crate::hasher::LeafHasher;

pub const ANY2SVM_MESSAGE_HASH_TAG: &str = "Any2SVMMessageHashV1";

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SvmRampMessageHeader {
    pub message_id: [u8; 32],
    pub source_chain_selector: u64,
    pub dest_chain_selector: u64,
    pub sequence_number: u64,
    pub nonce: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Any2SvmRampExtraArgs {
    pub compute_units: u32,
    pub is_writable_bitmap: u64,
}

/// A token amount as the program stores it: 256 bits, little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CrossChainAmount {
    pub le_bytes: [u8; 32],
}

impl From<U256> for CrossChainAmount {
    fn from(amount: U256) -> Self {
        Self {
            le_bytes: amount.to_le_bytes::<32>(),
        }
    }
}

impl From<CrossChainAmount> for U256 {
    fn from(amount: CrossChainAmount) -> Self {
        U256::from_le_bytes(amount.le_bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SvmTokenAmount {
    pub source_pool_address: Vec<u8>,
    pub dest_token_address: [u8; 32],
    pub dest_gas_amount: u32,
    pub extra_data: Vec<u8>,
    pub amount: CrossChainAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Any2SvmRampMessage {
    pub header: SvmRampMessageHeader,
    pub sender: Vec<u8>,
    pub data: Vec<u8>,
    pub logic_receiver: [u8; 32],
    pub token_receiver: [u8; 32],
    pub token_amounts: Vec<SvmTokenAmount>,
    pub extra_args: Any2SvmRampExtraArgs,
    pub accounts: Vec<[u8; 32]>,
}

#[derive(Debug, BorshSerialize)]
struct SvmMetadata {
    prefix: [u8; 32],
    source_chain_selector: u64,
    dest_chain_selector: u64,
    on_ramp_hash: [u8; 32],
}

/// The report passed to the offramp's `execute` instruction.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ExecutionReportSingleChain {
    pub source_chain_selector: u64,
    pub message: Any2SvmRampMessage,
    pub offchain_token_data: Vec<Vec<u8>>,
    pub proofs: Vec<[u8; 32]>,
}

impl ExecutionReportSingleChain {
    /// A report with no proofs or offchain token data, the message on its own.
    pub fn standalone(message: Any2SvmRampMessage) -> Self {
        Self {
            source_chain_selector: message.header.source_chain_selector,
            message,
            offchain_token_data: Vec::new(),
            proofs: Vec::new(),
        }
    }

    pub fn with_proofs(mut self, proofs: &[B256]) -> Self {
        self.proofs = proofs.iter().map(|proof| proof.0).collect();
        self
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        to_borsh(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        borsh::from_slice(bytes).map_err(serialization)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolanaLeafHasher {
    lane: LaneSelectors,
    source_family: ChainFamily,
    metadata_hash: B256,
}

impl SolanaLeafHasher {
    pub fn new(lane: &Lane, source_family: ChainFamily) -> Result<Self> {
        let on_ramp = decode_address(&lane.on_ramp, source_family)?;
        let metadata = SvmMetadata {
            prefix: sha256(ANY2SVM_MESSAGE_HASH_TAG).0,
            source_chain_selector: lane.source_chain_selector,
            dest_chain_selector: lane.dest_chain_selector,
            on_ramp_hash: sha256(&on_ramp).0,
        };
        Ok(Self {
            lane: LaneSelectors::from(lane),
            source_family,
            metadata_hash: sha256(to_borsh(&metadata)?),
        })
    }
}

impl LeafHasher for SolanaLeafHasher {
    type Normalized = Any2SvmRampMessage;

    fn metadata_hash(&self) -> B256 {
        self.metadata_hash
    }

    fn normalize(&self, message: &CcipMessage) -> Result<Any2SvmRampMessage> {
        let message = ramp_message(message, CcipVersion::V1_6)?;
        check_lane(&message.header, &self.lane)?;

        let (compute_units, account_is_writable_bitmap, token_receiver, accounts) =
            match ExtraArgs::decode_for(&message.extra_args, ChainFamily::Solana)? {
                ExtraArgs::SvmV1 {
                    compute_units,
                    account_is_writable_bitmap,
                    token_receiver,
                    accounts,
                    ..
                } => (compute_units, account_is_writable_bitmap, token_receiver, accounts),
                other => {
                    return Err(HasherError::MalformedExtraArgs(ExtraArgsError::UnexpectedVariant {
                        family: ChainFamily::Solana,
                        found: other.variant_name(),
                    }));
                }
            };

        let token_amounts = message
            .token_amounts
            .iter()
            .map(|token| -> Result<SvmTokenAmount> {
                Ok(SvmTokenAmount {
                    source_pool_address: decode_address(&token.source_pool_address, self.source_family)?,
                    dest_token_address: solana_key(&token.dest_token_address)?,
                    dest_gas_amount: token.dest_gas_amount,
                    extra_data: token.extra_data.to_vec(),
                    amount: CrossChainAmount::from(token.amount),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let header = &message.header;
        Ok(Any2SvmRampMessage {
            header: SvmRampMessageHeader {
                message_id: header.message_id.0,
                source_chain_selector: header.source_chain_selector,
                dest_chain_selector: header.dest_chain_selector,
                sequence_number: header.sequence_number,
                nonce: header.nonce,
            },
            sender: decode_address(&message.sender, self.source_family)?,
            data: message.data.to_vec(),
            logic_receiver: solana_key(&message.receiver)?,
            token_receiver: token_receiver.0,
            token_amounts,
            extra_args: Any2SvmRampExtraArgs {
                compute_units,
                is_writable_bitmap: account_is_writable_bitmap,
            },
            accounts: accounts.into_iter().map(|account| account.0).collect(),
        })
    }

    fn hash_normalized(&self, message: &Any2SvmRampMessage) -> Result<B256> {
        Ok(sha256(leaf_preimage([
            LEAF_DOMAIN_SEPARATOR,
            self.metadata_hash,
            sha256(fixed_fields(message)?),
            sha256(to_borsh(&message.sender)?),
            sha256(to_borsh(&message.data)?),
            sha256(to_borsh(&message.token_amounts)?),
        ])))
    }
}

/// Header, receivers, extra args and accounts: the fields hashed as one block.
fn fixed_fields(message: &Any2SvmRampMessage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    message.header.serialize(&mut buf).map_err(serialization)?;
    message.logic_receiver.serialize(&mut buf).map_err(serialization)?;
    message.token_receiver.serialize(&mut buf).map_err(serialization)?;
    message.extra_args.serialize(&mut buf).map_err(serialization)?;
    message.accounts.serialize(&mut buf).map_err(serialization)?;
    Ok(buf)
}

fn solana_key(input: &str) -> Result<[u8; 32]> {
    let bytes = decode_address(input, ChainFamily::Solana)?;
    Ok(B256::from_slice(&bytes).0)
}

fn sha256(data: impl AsRef<[u8]>) -> B256 {
    B256::from_slice(&Sha256::digest(data))
}

fn to_borsh<T: BorshSerialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    borsh::to_vec(value).map_err(serialization)
}

fn serialization(err: std::io::Error) -> HasherError {
    HasherError::Serialization(err.to_string())
}
