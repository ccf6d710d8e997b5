use anyhow::Result;
use serde::Serialize;

use roster_core::client::{failure_notice, Action, RegistrationClient};
use roster_core::config::ClientConfig;
use roster_core::model::{Identity, Roster, NOT_CONNECTED};
use roster_core::state::{Notice, PresentationState, ViewState};
use roster_core::ClientError;
use roster_solana_client::{resolve_program_id, KeypairWallet, RpcStoreConnector};

use crate::args::{Cli, Command};
use crate::output;
use crate::prompt::PromptingWallet;
use crate::render::Renderer;

mod admin;
mod doctor;
mod list;
mod register;
mod remove;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command.clone() {
        Command::Connect => list::run(&cli, true).await,
        Command::List => list::run(&cli, false).await,
        Command::Register { id, name } => register::run(&cli, &id, &name).await,
        Command::Remove { id } => remove::run(&cli, &id).await,
        Command::Admin => admin::run(&cli).await,
        Command::Doctor => doctor::run(&cli).await,
    }
}

#[derive(Debug, Serialize)]
struct ErrorOut<'a> {
    ok: bool,
    code: &'a str,
    error: String,
}

/// Print the diagnostic for a failed command.
pub fn report_error(err: &anyhow::Error) {
    let code = err.downcast_ref::<ClientError>().map(ClientError::code).unwrap_or("error");
    if output::is_json() {
        let _ = output::print_json(&ErrorOut { ok: false, code, error: format!("{err:#}") });
    } else {
        output::notice(&Notice::error(format!("error: {err:#}")));
    }
}

/// One client lifetime: a connected `RegistrationClient` plus its renderer.
pub struct Page {
    pub client: RegistrationClient,
    renderer: Renderer,
}

impl Page {
    /// Discover the wallet and connect. Fails if the connect action fails; the
    /// notice has been shown by then.
    pub async fn open(cfg: &ClientConfig) -> Result<Self> {
        let program_id = resolve_program_id(cfg.program_id.as_deref())?;
        let connector = RpcStoreConnector::new(cfg.rpc_url.clone(), program_id, cfg.commitment);

        let state = PresentationState::new();
        let renderer = Renderer::spawn(state.subscribe());
        let mut page = Self { client: RegistrationClient::with_state(state), renderer };

        let wallet = match KeypairWallet::discover(&cfg.keypair_path) {
            Ok(found) => found.map(|w| PromptingWallet::new(w, cfg.assume_yes)),
            Err(e) => {
                let err = ClientError::from(e);
                page.client.state().notify(failure_notice(Action::Connect, &err));
                page.close().await;
                return Err(err.into());
            }
        };

        let connected = page.client.connect(wallet.as_ref(), &connector).await;
        if let Err(e) = connected {
            page.close().await;
            return Err(e.into());
        }
        Ok(page)
    }

    /// Stop rendering, show the last notice, return the final state.
    pub async fn close(self) -> ViewState {
        self.renderer.finish().await;
        let snap = self.client.state().snapshot();
        if !output::is_json() {
            if let Some(n) = &snap.notice {
                output::notice(n);
            }
        }
        snap
    }
}

#[derive(Debug, Serialize)]
pub struct RosterOut {
    pub ok: bool,
    pub account: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub students: Roster,
    pub notice: Option<Notice>,
}

impl RosterOut {
    pub fn from_state(ok: bool, snap: ViewState) -> Self {
        Self {
            ok,
            account: snap.identity,
            admin: None,
            reference: None,
            students: snap.roster,
            notice: snap.notice,
        }
    }
}

/// Print account and roster.
pub fn print_roster(out: &RosterOut) -> Result<()> {
    if output::is_json() {
        return output::print_json(out);
    }

    let account = out.account.as_ref().map(Identity::short).unwrap_or_else(|| NOT_CONNECTED.to_string());
    output::line(&format!("Connected Account: {account}"));
    if let Some(reference) = &out.reference {
        output::line(&format!("Transaction: {reference}"));
    }
    output::line("");
    output::line("Registered Students");
    if out.students.is_empty() {
        output::line("No students registered yet.");
    }
    for s in &out.students {
        output::line(&format!("  ID: {:<8} Name: {}", s.id, s.name));
    }
    Ok(())
}
