//! Constants shared between the on-chain registry program and clients.
//!
//! Keep these stable because they affect PDA derivation and account decoding.

use solana_program::pubkey::Pubkey;

/// PDA seed for the registry root account.
pub const SEED_REGISTRY: &[u8] = b"roster:registry";

/// PDA seed for student slots, followed by the little-endian slot index.
pub const SEED_STUDENT: &[u8] = b"roster:student";

/// PDA seed for the id -> slot index lookup, followed by the little-endian id.
pub const SEED_STUDENT_ID: &[u8] = b"roster:student-id";

/// Account type names hashed into the 8-byte data discriminator.
pub const ACCOUNT_REGISTRY: &str = "StudentRegistry";
pub const ACCOUNT_STUDENT_SLOT: &str = "StudentSlot";
pub const ACCOUNT_STUDENT_INDEX: &str = "StudentIndex";

/// Default program id (placeholder).
///
/// Replace this with the deployed program id when available.
pub const DEFAULT_PROGRAM_ID: &str = "RosterRegistry11111111111111111111111111111";

pub fn default_program_id() -> Pubkey {
    DEFAULT_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}

/// Version string embedded into instruction payloads.
pub const CLIENT_VERSION: &str = "v1";

/// Upper bound on keys per `getMultipleAccounts` request.
pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;
