//! The wallet provider seam.
//!
//! A wallet hands out accounts and an opaque signer. A [`StoreConnector`] takes
//! that signer and produces a [`StoreHandle`] whose mutations are signed by it.
//! The client never inspects the signer.

use async_trait::async_trait;

use crate::errors::{StoreResult, WalletResult};
use crate::model::Identity;
use crate::store::StoreHandle;

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Signing capability handed to the store connector.
    type Signer: Send + Sync + 'static;

    /// Ask the wallet for account access. The first account is used.
    async fn request_accounts(&self) -> WalletResult<Vec<Identity>>;

    /// Signer for an account previously returned by `request_accounts`.
    fn signer(&self, identity: &Identity) -> WalletResult<Self::Signer>;
}

/// Builds a store handle bound to a signing identity.
#[async_trait]
pub trait StoreConnector<S>: Send + Sync
where
    S: Send + Sync + 'static,
{
    async fn connect(&self, identity: &Identity, signer: S) -> StoreResult<StoreHandle>;
}
