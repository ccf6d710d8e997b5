use anyhow::Result;
use serde::Serialize;

use roster_core::model::Identity;

use crate::args::Cli;
use crate::cmd::Page;
use crate::{config, output};

#[derive(Debug, Serialize)]
pub struct AdminOut {
    pub admin: Identity,
    pub account: Option<Identity>,
    pub is_admin: bool,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let cfg = config::load(cli)?;
    let page = Page::open(&cfg).await?;

    let admin = page.client.admin().await;
    let account = page.client.session().map(|s| s.identity().clone());
    page.close().await;

    let admin = admin?;
    let is_admin = account.as_ref().is_some_and(|a| a.same_as(&admin));
    let out = AdminOut { admin, account, is_admin };

    if output::is_json() {
        return output::print_json(&out);
    }
    output::line(&format!("Registry admin: {}", out.admin));
    output::line(if out.is_admin { "Connected account is the admin." } else { "Connected account is not the admin." });
    Ok(())
}
