//! roster-core
//!
//! Client logic for a student roster kept in an on-chain registry:
//! - data model (identity, record, roster)
//! - error taxonomy surfaced to users
//! - store and wallet seams implemented by chain adapters
//! - session manager, record fetcher, record mutator
//! - presentation state published to renderers
//!
//! Nothing here performs network or filesystem I/O. Adapters (see
//! `roster-solana-client`) implement [`store::RecordStore`] and
//! [`wallet::WalletProvider`]; the CLI drives [`client::RegistrationClient`].

pub mod client;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod model;
pub mod mutate;
pub mod session;
pub mod state;
pub mod store;
pub mod wallet;

pub use crate::errors::{ClientError, ClientResult, StoreError, StoreResult, WalletError, WalletResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::client::{Action, RegistrationClient};
    pub use crate::config::{validate_config, ClientConfig, Commitment};
    pub use crate::model::{Identity, Record, Roster, RosterEntry};
    pub use crate::mutate::RegistrationForm;
    pub use crate::session::Session;
    pub use crate::state::{Notice, NoticeLevel, Phase, PresentationState, ViewState};
    pub use crate::store::{Confirmed, PendingOperation, RecordStore, StoreHandle};
    pub use crate::wallet::{StoreConnector, WalletProvider};
    pub use crate::{ClientError, ClientResult, StoreError, StoreResult, WalletError, WalletResult};
}
