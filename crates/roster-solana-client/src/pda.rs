//! PDA derivation helpers for the roster registry program.
//!
//! These helpers implement deterministic address derivation and must match the
//! on-chain program's seeds.

use solana_program::pubkey::Pubkey;

use crate::constants::{SEED_REGISTRY, SEED_STUDENT, SEED_STUDENT_ID};

#[derive(Debug, Clone)]
pub struct StudentPdas {
    pub slot: (Pubkey, u8),
    pub id_index: (Pubkey, u8),
}

/// Derive the registry root PDA.
pub fn derive_registry(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_REGISTRY], program_id)
}

/// Derive the PDA of the student slot at `index`.
///
/// Slots are allocated in order and never reused, so `0..student_count` covers
/// every record ever registered.
pub fn derive_student_slot(program_id: &Pubkey, index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_STUDENT, &index.to_le_bytes()], program_id)
}

/// Derive the PDA mapping a student id to its slot index.
pub fn derive_student_id(program_id: &Pubkey, id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_STUDENT_ID, &id.to_le_bytes()], program_id)
}

/// Collect the PDAs a mutation on `id` at slot `index` touches.
pub fn pdas_for_student(program_id: &Pubkey, id: u64, index: u64) -> StudentPdas {
    StudentPdas {
        slot: derive_student_slot(program_id, index),
        id_index: derive_student_id(program_id, id),
    }
}

/// Slot PDAs for `start..end`, in index order.
pub fn slot_addresses(program_id: &Pubkey, start: u64, end: u64) -> Vec<Pubkey> {
    (start..end).map(|i| derive_student_slot(program_id, i).0).collect()
}

/// Slot PDAs for `start..end` in chunks of at most `chunk` keys, each tagged
/// with its first index. Chunks are derived lazily.
pub fn slot_address_chunks(
    program_id: &Pubkey,
    start: u64,
    end: u64,
    chunk: usize,
) -> impl Iterator<Item = (u64, Vec<Pubkey>)> + '_ {
    let step = chunk.max(1) as u64;
    let mut next = start;
    std::iter::from_fn(move || {
        if next >= end {
            return None;
        }
        let first = next;
        let last = end.min(first.saturating_add(step));
        next = last;
        Some((first, slot_addresses(program_id, first, last)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Pubkey {
        Pubkey::new_from_array([7u8; 32])
    }

    #[test]
    fn derivation_is_stable() {
        assert_eq!(derive_registry(&program()), derive_registry(&program()));
        assert_eq!(derive_student_slot(&program(), 3), derive_student_slot(&program(), 3));
    }

    #[test]
    fn slot_and_id_seeds_do_not_collide() {
        let p = program();
        assert_ne!(derive_student_slot(&p, 1).0, derive_student_id(&p, 1).0);
        assert_ne!(derive_student_slot(&p, 1).0, derive_student_slot(&p, 2).0);
    }

    #[test]
    fn slot_addresses_follow_index_order() {
        let p = program();
        let keys = slot_addresses(&p, 2, 5);
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0], derive_student_slot(&p, 2).0);
        assert_eq!(keys[2], derive_student_slot(&p, 4).0);
        assert!(slot_addresses(&p, 5, 5).is_empty());
    }

    #[test]
    fn chunks_cover_the_range_in_order() {
        let p = program();
        let chunks: Vec<_> = slot_address_chunks(&p, 3, 10, 4).collect();
        assert_eq!(chunks.iter().map(|(first, keys)| (*first, keys.len())).collect::<Vec<_>>(), vec![(3, 4), (7, 3)]);
        assert_eq!(chunks[1].1[0], derive_student_slot(&p, 7).0);
    }

    #[test]
    fn huge_ranges_are_derived_lazily() {
        let p = program();
        let (first, keys) = slot_address_chunks(&p, 0, u64::MAX, 100).next().unwrap();
        assert_eq!((first, keys.len()), (0, 100));
    }
}
