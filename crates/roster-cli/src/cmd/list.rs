use anyhow::Result;

use crate::args::Cli;
use crate::cmd::{print_roster, Page, RosterOut};
use crate::config;

/// `connect` and `list`: connect, fetch, show. `connect` also reports whether
/// the account is the registry admin.
///
/// The roster is the whole output, so a failed fetch fails the command even
/// though the connection itself stands.
pub async fn run(cli: &Cli, with_admin: bool) -> Result<()> {
    let cfg = config::load(cli)?;
    let page = Page::open(&cfg).await?;

    if let Some(err) = page.client.fetch_error().cloned() {
        page.close().await;
        return Err(err.into());
    }

    let admin = if with_admin { page.client.admin_hint().await } else { None };
    let snap = page.close().await;

    let mut out = RosterOut::from_state(true, snap);
    out.admin = admin;
    print_roster(&out)
}
