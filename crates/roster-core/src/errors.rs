//! Error taxonomy for the roster client.
//!
//! Three layers report errors:
//! - store adapters return [`StoreError`]
//! - wallet providers return [`WalletError`]
//! - user-facing actions return [`ClientError`], which is what the UI surfaces
//!
//! The mapping from adapter errors into [`ClientError`] depends on the action
//! that observed them (a store rejection during a mutation means the caller is
//! not authorized; the same rejection during a read means the store is not
//! usable). That mapping lives in the fetch and mutate modules, not here.

use thiserror::Error;

/// Result alias for user-facing actions.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result alias for store adapters.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for wallet providers.
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors surfaced to the user at the boundary of each action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No wallet provider is present in the environment.
    #[error("no wallet provider available: {0}")]
    NoProvider(String),

    /// The wallet refused to expose an account.
    #[error("wallet access rejected: {0}")]
    UserRejected(String),

    /// The remote store refused a mutation.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// The remote store could not be reached or returned unusable data.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// User input failed local validation before any remote call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An action that needs a session ran before `connect`.
    #[error("not connected: connect a wallet first")]
    NotConnected,
}

impl ClientError {
    pub fn no_provider(msg: impl Into<String>) -> Self {
        Self::NoProvider(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn remote_unavailable(msg: impl Into<String>) -> Self {
        Self::RemoteUnavailable(msg.into())
    }

    /// Stable short code, used in JSON output and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoProvider(_) => "no_provider",
            Self::UserRejected(_) => "user_rejected",
            Self::NotAuthorized(_) => "not_authorized",
            Self::RemoteUnavailable(_) => "remote_unavailable",
            Self::InvalidInput(_) => "invalid_input",
            Self::NotConnected => "not_connected",
        }
    }
}

/// Errors reported by a [`crate::store::RecordStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store processed the request and refused it.
    #[error("rejected by remote store: {0}")]
    Rejected(String),

    /// The store could not be reached, or an operation never reached a terminal status.
    #[error("remote store unreachable: {0}")]
    Unavailable(String),

    /// The store answered with data this client cannot decode.
    #[error("malformed remote data: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Errors reported by a [`crate::wallet::WalletProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The user declined the account request.
    #[error("account request rejected by user")]
    Rejected,

    /// The provider answered but exposed no account.
    #[error("wallet exposed no accounts")]
    NoAccounts,

    /// The provider exists but cannot serve the request.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

impl From<WalletError> for ClientError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Rejected | WalletError::NoAccounts => Self::UserRejected(err.to_string()),
            WalletError::Unavailable(msg) => Self::NoProvider(msg),
        }
    }
}
