//! Instruction builder for the roster registry program.
//!
//! The builder is pure: it derives PDAs and encodes instructions. Submission
//! and account reads live in [`crate::store`].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use crate::constants::CLIENT_VERSION;
use crate::pda;

#[derive(Debug, Clone)]
pub struct RegistryClient {
    pub program_id: Pubkey,
}

impl RegistryClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn registry_address(&self) -> Pubkey {
        pda::derive_registry(&self.program_id).0
    }

    pub fn slot_address(&self, index: u64) -> Pubkey {
        pda::derive_student_slot(&self.program_id, index).0
    }

    pub fn id_index_address(&self, id: u64) -> Pubkey {
        pda::derive_student_id(&self.program_id, id).0
    }

    /// Build instruction to register `id` into the next free slot.
    ///
    /// `next_index` is the registry's current `student_count`. If another
    /// registration lands first the program rejects the stale slot.
    pub fn ix_register_student(&self, admin: Pubkey, id: u64, name: &str, next_index: u64) -> Result<Instruction> {
        if name.trim().is_empty() {
            return Err(anyhow!("student name must not be empty"));
        }
        let (registry_pda, registry_bump) = pda::derive_registry(&self.program_id);
        let pdas = pda::pdas_for_student(&self.program_id, id, next_index);

        let data = RegistryIx::RegisterStudent {
            version: CLIENT_VERSION.to_string(),
            id,
            name: name.to_string(),
            slot_index: next_index,
            registry_bump,
            slot_bump: pdas.slot.1,
            id_bump: pdas.id_index.1,
        }
        .to_vec()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(admin, true),
                AccountMeta::new(registry_pda, false),
                AccountMeta::new(pdas.slot.0, false),
                AccountMeta::new(pdas.id_index.0, false),
                AccountMeta::new_readonly(solana_program::system_program::id(), false),
            ],
            data,
        })
    }

    /// Build instruction to delete `id`, stored at `slot_index`.
    pub fn ix_delete_student(&self, admin: Pubkey, id: u64, slot_index: u64) -> Result<Instruction> {
        let (registry_pda, registry_bump) = pda::derive_registry(&self.program_id);
        let pdas = pda::pdas_for_student(&self.program_id, id, slot_index);

        let data = RegistryIx::DeleteStudent {
            version: CLIENT_VERSION.to_string(),
            id,
            slot_index,
            registry_bump,
            slot_bump: pdas.slot.1,
            id_bump: pdas.id_index.1,
        }
        .to_vec()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(admin, true),
                AccountMeta::new_readonly(registry_pda, false),
                AccountMeta::new(pdas.slot.0, false),
                AccountMeta::new(pdas.id_index.0, false),
                AccountMeta::new_readonly(solana_program::system_program::id(), false),
            ],
            data,
        })
    }
}

/// Registry program instruction encoding.
///
/// A tag byte followed by the bincode-encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum RegistryIx {
    RegisterStudent {
        version: String,
        id: u64,
        name: String,
        slot_index: u64,
        registry_bump: u8,
        slot_bump: u8,
        id_bump: u8,
    },
    DeleteStudent {
        version: String,
        id: u64,
        slot_index: u64,
        registry_bump: u8,
        slot_bump: u8,
        id_bump: u8,
    },
}

impl RegistryIx {
    pub(crate) fn tag(&self) -> u8 {
        match self {
            RegistryIx::RegisterStudent { .. } => 1,
            RegistryIx::DeleteStudent { .. } => 2,
        }
    }

    fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = vec![self.tag()];
        let payload = bincode::serialize(self).map_err(|e| anyhow!("serialize: {e}"))?;
        out.extend_from_slice(&payload);
        Ok(out)
    }

    #[cfg(test)]
    fn from_slice(data: &[u8]) -> Result<Self> {
        let (&tag, payload) = data.split_first().ok_or_else(|| anyhow!("empty instruction data"))?;
        let ix: RegistryIx = bincode::deserialize(payload).map_err(|e| anyhow!("deserialize: {e}"))?;
        if ix.tag() != tag {
            return Err(anyhow!("tag {tag} does not match payload"));
        }
        Ok(ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RegistryClient {
        RegistryClient::new(Pubkey::new_from_array([9u8; 32]))
    }

    #[test]
    fn register_instruction_layout() {
        let c = client();
        let admin = Pubkey::new_from_array([1u8; 32]);
        let ix = c.ix_register_student(admin, 3, "C", 5).unwrap();

        assert_eq!(ix.program_id, c.program_id);
        assert_eq!(ix.data[0], 1);
        assert_eq!(ix.accounts.len(), 5);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, c.registry_address());
        assert_eq!(ix.accounts[2].pubkey, c.slot_address(5));
        assert_eq!(ix.accounts[3].pubkey, c.id_index_address(3));

        match RegistryIx::from_slice(&ix.data).unwrap() {
            RegistryIx::RegisterStudent { id, name, slot_index, version, .. } => {
                assert_eq!((id, name.as_str(), slot_index, version.as_str()), (3, "C", 5, CLIENT_VERSION));
            }
            other => panic!("unexpected instruction: {other:?}"),
        }
    }

    #[test]
    fn delete_instruction_targets_slot_and_index() {
        let c = client();
        let admin = Pubkey::new_from_array([1u8; 32]);
        let ix = c.ix_delete_student(admin, 8, 2).unwrap();

        assert_eq!(ix.data[0], 2);
        assert!(!ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, c.slot_address(2));
        assert_eq!(ix.accounts[3].pubkey, c.id_index_address(8));
    }

    #[test]
    fn blank_name_is_refused_before_encoding() {
        let admin = Pubkey::new_from_array([1u8; 32]);
        assert!(client().ix_register_student(admin, 1, "  ", 0).is_err());
    }

    #[test]
    fn mismatched_tag_is_rejected() {
        let admin = Pubkey::new_from_array([1u8; 32]);
        let mut data = client().ix_delete_student(admin, 1, 0).unwrap().data;
        data[0] = 1;
        assert!(RegistryIx::from_slice(&data).is_err());
    }
}
