use anyhow::Result;

use roster_core::mutate::parse_student_id;

use crate::args::Cli;
use crate::cmd::{print_roster, Page, RosterOut};
use crate::config;

pub async fn run(cli: &Cli, id: &str) -> Result<()> {
    let id = parse_student_id(id)?;
    let cfg = config::load(cli)?;
    let mut page = Page::open(&cfg).await?;

    let result = page.client.remove(id).await;
    let snap = page.close().await;

    let mut out = RosterOut::from_state(result.is_ok(), snap);
    out.reference = result.as_ref().ok().map(|c| c.reference.clone());
    print_roster(&out)?;
    result?;
    Ok(())
}
