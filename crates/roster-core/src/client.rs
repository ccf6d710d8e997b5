//! `RegistrationClient`: the composed connect / fetch / mutate flow.
//!
//! Each public method is one user action. Errors are caught here, logged,
//! turned into a notice on the presentation state, and returned to the caller.
//! The busy flag is held for the duration of every fetch and mutation.

use tracing::{error, info, warn};

use crate::errors::{ClientError, ClientResult};
use crate::fetch;
use crate::model::{Identity, Roster};
use crate::mutate::{self, RegistrationForm};
use crate::session::{self, Session};
use crate::state::{Notice, PresentationState};
use crate::store::Confirmed;
use crate::wallet::{StoreConnector, WalletProvider};

/// The action a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Fetch,
    Register,
    Remove,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Fetch => "fetch",
            Self::Register => "register",
            Self::Remove => "remove",
        }
    }
}

/// User-facing text for a failed action.
pub fn failure_notice(action: Action, err: &ClientError) -> Notice {
    let message = match (action, err) {
        (_, ClientError::NoProvider(_)) => "Please install a wallet provider!".to_string(),
        (_, ClientError::UserRejected(_)) => "Wallet access was rejected.".to_string(),
        (_, ClientError::NotConnected) => "Connect a wallet first.".to_string(),
        (_, ClientError::InvalidInput(msg)) => format!("Invalid input: {msg}"),
        (Action::Register, ClientError::NotAuthorized(_)) => {
            "You cannot register a student, you are not an admin".to_string()
        }
        (Action::Remove, _) => "Error deleting student!".to_string(),
        (Action::Register, _) => "Error registering student!".to_string(),
        (Action::Fetch, _) => "Error fetching students!".to_string(),
        (Action::Connect, _) => "Error connecting wallet!".to_string(),
    };
    Notice::error(message)
}

#[derive(Debug, Default)]
pub struct RegistrationClient {
    state: PresentationState,
    session: Option<Session>,
    /// Error of the most recent fetch, `None` once a fetch succeeds.
    fetch_error: Option<ClientError>,
}

impl RegistrationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing state container, e.g. one a renderer already subscribed to.
    pub fn with_state(state: PresentationState) -> Self {
        Self { state, session: None, fetch_error: None }
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn roster(&self) -> Roster {
        self.state.snapshot().roster
    }

    /// Why the displayed roster may be stale: the error of the last fetch, if
    /// it failed. Covers the fetch run by `connect`.
    pub fn fetch_error(&self) -> Option<&ClientError> {
        self.fetch_error.as_ref()
    }

    /// Connect the wallet, then fetch the roster.
    ///
    /// A fetch failure after a successful connect is surfaced as a notice but
    /// does not fail the connect.
    pub async fn connect<W, C>(&mut self, wallet: Option<&W>, connector: &C) -> ClientResult<()>
    where
        W: WalletProvider,
        C: StoreConnector<W::Signer>,
    {
        self.state.clear_notice();
        self.fetch_error = None;
        self.state.set_phase(crate::state::Phase::Connecting);

        let session = match session::connect(wallet, connector).await {
            Ok(session) => session,
            Err(e) => {
                self.session = None;
                self.state.reset();
                return Err(self.surface(Action::Connect, e));
            }
        };

        self.state.set_connected(session.identity().clone());
        self.session = Some(session);

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "initial roster fetch failed");
        }
        Ok(())
    }

    /// Refetch the roster. On failure the displayed roster is left as is.
    pub async fn refresh(&mut self) -> ClientResult<Roster> {
        let session = self.require_session(Action::Fetch)?;
        let _busy = self.state.busy();

        match fetch::fetch_all(&session).await {
            Ok(roster) => {
                info!(registered = roster.len(), "roster refreshed");
                self.fetch_error = None;
                self.state.set_roster(roster.clone());
                Ok(roster)
            }
            Err(e) => {
                let err = self.surface(Action::Fetch, e);
                self.fetch_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Register a student, then refresh the roster.
    pub async fn register(&mut self, form: &RegistrationForm) -> ClientResult<Confirmed> {
        self.state.clear_notice();
        let session = self.require_session(Action::Register)?;
        let _busy = self.state.busy();

        let confirmed = match mutate::register(&session, form).await {
            Ok(confirmed) => confirmed,
            Err(e) => return Err(self.surface(Action::Register, e)),
        };

        self.state.notify(Notice::success("Student registered successfully!"));
        self.refresh_after_mutation().await;
        Ok(confirmed)
    }

    /// Delete a student, then refresh the roster.
    pub async fn remove(&mut self, id: u64) -> ClientResult<Confirmed> {
        self.state.clear_notice();
        let session = self.require_session(Action::Remove)?;
        let _busy = self.state.busy();

        let confirmed = match mutate::remove(&session, id).await {
            Ok(confirmed) => confirmed,
            Err(e) => return Err(self.surface(Action::Remove, e)),
        };

        self.state.notify(Notice::success("Student deleted successfully!"));
        self.refresh_after_mutation().await;
        Ok(confirmed)
    }

    /// The identity the store accepts mutations from.
    pub async fn admin(&self) -> ClientResult<Identity> {
        let session = self.session.as_ref().ok_or(ClientError::NotConnected)?;
        session
            .store()
            .admin()
            .await
            .map_err(|e| ClientError::RemoteUnavailable(e.to_string()))
    }

    /// Whether the connected identity looks like the store admin.
    ///
    /// Advisory only; the store decides. `None` when not connected or when the
    /// admin could not be read.
    pub async fn admin_hint(&self) -> Option<bool> {
        let session = self.session.as_ref()?;
        match self.admin().await {
            Ok(admin) => Some(admin.same_as(session.identity())),
            Err(e) => {
                warn!(error = %e, "admin lookup failed");
                None
            }
        }
    }

    async fn refresh_after_mutation(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match fetch::fetch_all(&session).await {
            Ok(roster) => {
                self.fetch_error = None;
                self.state.set_roster(roster);
            }
            Err(e) => {
                error!(error = %e, "roster refresh after mutation failed");
                self.fetch_error = Some(e);
                self.state.notify(Notice::warning(
                    "Change confirmed, but the student list could not be refreshed.",
                ));
            }
        }
    }

    fn require_session(&self, action: Action) -> ClientResult<Session> {
        match &self.session {
            Some(session) => Ok(session.clone()),
            None => Err(self.surface(action, ClientError::NotConnected)),
        }
    }

    fn surface(&self, action: Action, err: ClientError) -> ClientError {
        error!(action = action.as_str(), code = err.code(), error = %err, "action failed");
        self.state.notify(failure_notice(action, &err));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NoticeLevel;

    #[test]
    fn register_rejection_reads_as_not_admin() {
        let n = failure_notice(Action::Register, &ClientError::NotAuthorized("0x1".into()));
        assert_eq!(n.level, NoticeLevel::Error);
        assert_eq!(n.message, "You cannot register a student, you are not an admin");
    }

    #[test]
    fn missing_provider_asks_for_install() {
        let n = failure_notice(Action::Connect, &ClientError::no_provider("none"));
        assert_eq!(n.message, "Please install a wallet provider!");
    }

    #[test]
    fn remove_failure_is_generic() {
        let n = failure_notice(Action::Remove, &ClientError::NotAuthorized("x".into()));
        assert_eq!(n.message, "Error deleting student!");
    }

    #[tokio::test]
    async fn actions_before_connect_fail_without_busy() {
        let mut client = RegistrationClient::new();
        let form = RegistrationForm::new(1, "A").unwrap();

        assert_eq!(client.register(&form).await, Err(ClientError::NotConnected));
        assert_eq!(client.remove(1).await, Err(ClientError::NotConnected));
        assert_eq!(client.refresh().await, Err(ClientError::NotConnected));
        assert!(!client.state().is_busy());
        assert!(client.state().snapshot().notice.is_some());
    }
}
