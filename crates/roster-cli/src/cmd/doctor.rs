use anyhow::Result;
use serde::Serialize;

use roster_core::config::ClientConfig;
use roster_solana_client::accounts::decode_registry;
use roster_solana_client::{resolve_program_id, KeypairWallet, RegistryClient, RpcStoreConnector};

use crate::args::Cli;
use crate::{config, output};

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

impl Check {
    fn new(name: &str, ok: bool, detail: impl Into<String>) -> Self {
        Self { name: name.to_string(), ok, detail: detail.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let mut checks = Vec::new();

    let cfg = match config::load(cli) {
        Ok(cfg) => {
            checks.push(Check::new("config", true, format!("rpc {} ({})", cfg.rpc_url, cfg.commitment.as_str())));
            Some(cfg)
        }
        Err(e) => {
            checks.push(Check::new("config", false, format!("{e:#}")));
            None
        }
    };

    if let Some(cfg) = &cfg {
        checks.push(keypair_check(cfg));
        checks.extend(remote_checks(cfg).await);
    }

    let ok = checks.iter().all(|c| c.ok);
    let out = DoctorOut { ok, checks };
    if output::is_json() {
        output::print_json(&out)?;
    } else {
        for c in &out.checks {
            output::line(&format!("[{}] {}: {}", if c.ok { "ok" } else { "!!" }, c.name, c.detail));
        }
    }
    if !ok {
        anyhow::bail!("doctor found problems");
    }
    Ok(())
}

fn keypair_check(cfg: &ClientConfig) -> Check {
    let path = cfg.keypair_path.display();
    match KeypairWallet::discover(&cfg.keypair_path) {
        Ok(Some(w)) => Check::new("keypair", true, format!("{path} ({})", w.pubkey())),
        Ok(None) => Check::new("keypair", false, format!("{path} not found; create one with `solana-keygen new`")),
        Err(e) => Check::new("keypair", false, e.to_string()),
    }
}

async fn remote_checks(cfg: &ClientConfig) -> Vec<Check> {
    let program_id = match resolve_program_id(cfg.program_id.as_deref()) {
        Ok(id) => id,
        Err(e) => return vec![Check::new("program", false, e.to_string())],
    };
    let connector = RpcStoreConnector::new(cfg.rpc_url.clone(), program_id, cfg.commitment);
    let rpc = connector.rpc_client();

    let mut checks = Vec::new();
    match rpc.get_version().await {
        Ok(v) => checks.push(Check::new("rpc", true, format!("solana-core {}", v.solana_core))),
        Err(e) => {
            checks.push(Check::new("rpc", false, e.to_string()));
            return checks;
        }
    }

    let registry = RegistryClient::new(program_id).registry_address();
    let check = match rpc.get_account_data(&registry).await {
        Ok(data) => match decode_registry(&data) {
            Ok(acc) => Check::new(
                "registry",
                true,
                format!("{registry}: admin {}, {} slot(s)", acc.admin, acc.student_count),
            ),
            Err(e) => Check::new("registry", false, format!("{registry}: {e}")),
        },
        Err(e) => Check::new("registry", false, format!("{registry} (program {program_id}): {e}")),
    };
    checks.push(check);
    checks
}
