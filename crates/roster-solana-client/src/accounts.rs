//! Registry account layouts.
//!
//! Every account starts with an 8-byte discriminator, the first eight bytes of
//! `sha256("account:<TypeName>")`, followed by the bincode-encoded body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;
use thiserror::Error;

use roster_core::model::Record;

use crate::constants::{ACCOUNT_REGISTRY, ACCOUNT_STUDENT_INDEX, ACCOUNT_STUDENT_SLOT};

pub const DISCRIMINATOR_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("account data too short: {len} bytes")]
    TooShort { len: usize },

    #[error("discriminator mismatch for {account}: expected {expected}, found {found}")]
    Discriminator { account: &'static str, expected: String, found: String },

    #[error("invalid {account} body: {reason}")]
    Body { account: &'static str, reason: String },
}

/// Root registry state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryAccount {
    pub admin: Pubkey,
    pub student_count: u64,
}

/// One student slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSlotAccount {
    pub id: u64,
    pub name: String,
    pub is_registered: bool,
}

impl From<StudentSlotAccount> for Record {
    fn from(a: StudentSlotAccount) -> Self {
        Record::new(a.id, a.name, a.is_registered)
    }
}

/// Lookup from student id to slot index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIndexAccount {
    pub index: u64,
}

pub fn account_discriminator(account: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("account:{account}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

fn decode<T: DeserializeOwned>(account: &'static str, data: &[u8]) -> Result<T, DecodeError> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(DecodeError::TooShort { len: data.len() });
    }
    let expected = account_discriminator(account);
    let (disc, body) = data.split_at(DISCRIMINATOR_LEN);
    if disc != expected.as_slice() {
        return Err(DecodeError::Discriminator {
            account,
            expected: hex::encode(expected),
            found: hex::encode(disc),
        });
    }
    bincode::deserialize(body).map_err(|e| DecodeError::Body { account, reason: e.to_string() })
}

/// Encode an account body with its discriminator, as the program writes it.
pub fn encode_account<T: Serialize>(account: &str, value: &T) -> anyhow::Result<Vec<u8>> {
    let mut out = account_discriminator(account).to_vec();
    out.extend_from_slice(&bincode::serialize(value)?);
    Ok(out)
}

pub fn decode_registry(data: &[u8]) -> Result<RegistryAccount, DecodeError> {
    decode(ACCOUNT_REGISTRY, data)
}

pub fn decode_student_slot(data: &[u8]) -> Result<StudentSlotAccount, DecodeError> {
    decode(ACCOUNT_STUDENT_SLOT, data)
}

pub fn decode_student_index(data: &[u8]) -> Result<StudentIndexAccount, DecodeError> {
    decode(ACCOUNT_STUDENT_INDEX, data)
}
