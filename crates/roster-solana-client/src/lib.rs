//! roster-solana-client
//!
//! Binds the `roster-core` store and wallet seams to the on-chain student
//! registry program on Solana.
//!
//! It includes:
//! - PDA derivation helpers and constant seeds
//! - account layouts and decoders
//! - an instruction builder for register/delete
//! - an RPC-backed `RecordStore` with confirmation polling
//! - a keypair-file `WalletProvider`
//!
//! Note: The on-chain program id is expected to be provided by the consumer.
//! The default here is a placeholder constant for local development.

pub mod accounts;
pub mod constants;
pub mod pda;
pub mod registry_client;
pub mod store;
pub mod wallet;

pub use constants::*;
pub use pda::*;
pub use registry_client::*;
pub use store::{classify_rpc_error, commitment_config, PendingTransaction, RpcRecordStore, RpcStoreConnector};
pub use wallet::KeypairWallet;

use anyhow::{anyhow, Result};
use solana_program::pubkey::Pubkey;

/// Parse a configured program id, falling back to [`default_program_id`].
pub fn resolve_program_id(configured: Option<&str>) -> Result<Pubkey> {
    match configured {
        Some(s) => s.trim().parse().map_err(|_| anyhow!("invalid program id: {s}")),
        None => Ok(default_program_id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_id_resolution() {
        let id = Pubkey::new_unique();
        assert_eq!(resolve_program_id(Some(&id.to_string())).unwrap(), id);
        assert_eq!(resolve_program_id(None).unwrap(), default_program_id());
        assert!(resolve_program_id(Some("not-base58-0OIl")).is_err());
    }
}
