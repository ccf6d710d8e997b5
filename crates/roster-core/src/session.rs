//! Session manager.
//!
//! `connect` asks the wallet for an account, takes its signer and binds a store
//! handle to it. The resulting [`Session`] lives as long as the client; it is
//! never persisted.

use std::fmt;

use tracing::{debug, info};

use crate::errors::{ClientError, ClientResult, StoreError, WalletError};
use crate::model::Identity;
use crate::store::StoreHandle;
use crate::wallet::{StoreConnector, WalletProvider};

/// Active wallet identity plus the store handle signing as it.
#[derive(Clone)]
pub struct Session {
    identity: Identity,
    store: StoreHandle,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("identity", &self.identity).finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(identity: Identity, store: StoreHandle) -> Self {
        Self { identity, store }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }
}

/// Establish a session.
///
/// `wallet` is `None` when the environment has no provider at all.
pub async fn connect<W, C>(wallet: Option<&W>, connector: &C) -> ClientResult<Session>
where
    W: WalletProvider,
    C: StoreConnector<W::Signer>,
{
    let Some(wallet) = wallet else {
        return Err(ClientError::no_provider("no wallet provider found in this environment"));
    };

    let accounts = wallet.request_accounts().await?;
    let identity = accounts.into_iter().next().ok_or_else(|| ClientError::from(WalletError::NoAccounts))?;
    debug!(identity = %identity, "wallet granted account access");

    let signer = wallet.signer(&identity)?;
    let store = connector.connect(&identity, signer).await.map_err(|e| match e {
        StoreError::Rejected(msg) => ClientError::NoProvider(msg),
        StoreError::Unavailable(msg) | StoreError::Malformed(msg) => ClientError::RemoteUnavailable(msg),
    })?;

    info!(identity = %identity, "session established");
    Ok(Session::new(identity, store))
}
