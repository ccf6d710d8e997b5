//! Keypair-file wallet provider.
//!
//! The wallet is "present in the environment" when its keypair file exists.
//! A missing file means there is no provider; an unreadable one means the
//! provider is broken.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use tracing::debug;

use roster_core::model::Identity;
use roster_core::wallet::WalletProvider;
use roster_core::{WalletError, WalletResult};

pub struct KeypairWallet {
    keypair: Arc<Keypair>,
    source: Option<PathBuf>,
}

impl std::fmt::Debug for KeypairWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeypairWallet")
            .field("pubkey", &self.keypair.pubkey())
            .field("source", &self.source)
            .finish()
    }
}

impl KeypairWallet {
    pub fn from_keypair(keypair: Keypair) -> Self {
        Self { keypair: Arc::new(keypair), source: None }
    }

    /// Load the wallet at `path`, or `None` if no keypair file exists there.
    pub fn discover(path: &Path) -> WalletResult<Option<Self>> {
        if !path.is_file() {
            debug!(path = %path.display(), "no keypair file");
            return Ok(None);
        }
        let keypair = read_keypair_file(path)
            .map_err(|e| WalletError::Unavailable(format!("cannot read keypair {}: {e}", path.display())))?;
        Ok(Some(Self { keypair: Arc::new(keypair), source: Some(path.to_path_buf()) }))
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    type Signer = Arc<Keypair>;

    async fn request_accounts(&self) -> WalletResult<Vec<Identity>> {
        Ok(vec![Identity::new(self.pubkey().to_string())])
    }

    fn signer(&self, identity: &Identity) -> WalletResult<Arc<Keypair>> {
        if identity.as_str() != self.pubkey().to_string() {
            return Err(WalletError::Unavailable(format!("wallet does not hold account {identity}")));
        }
        Ok(self.keypair.clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use solana_sdk::signature::write_keypair_file;

    use super::*;

    #[test]
    fn missing_file_means_no_provider() {
        let dir = tempfile::tempdir().unwrap();
        let found = KeypairWallet::discover(&dir.path().join("id.json")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn garbage_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        std::fs::write(&path, "not a keypair").unwrap();
        assert_matches!(KeypairWallet::discover(&path), Err(WalletError::Unavailable(_)));
    }

    #[tokio::test]
    async fn keypair_file_exposes_its_pubkey() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let kp = Keypair::new();
        write_keypair_file(&kp, &path).unwrap();

        let wallet = KeypairWallet::discover(&path).unwrap().unwrap();
        let accounts = wallet.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![Identity::new(kp.pubkey().to_string())]);
        assert_eq!(wallet.signer(&accounts[0]).unwrap().pubkey(), kp.pubkey());
        assert!(wallet.signer(&Identity::new("someone-else")).is_err());
    }
}
