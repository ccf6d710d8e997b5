use anyhow::Result;

use roster_core::mutate::RegistrationForm;
use roster_core::state::Notice;

use crate::args::Cli;
use crate::cmd::{print_roster, Page, RosterOut};
use crate::{config, output};

pub async fn run(cli: &Cli, id: &str, name: &str) -> Result<()> {
    let form = RegistrationForm::parse(id, name)?;
    let cfg = config::load(cli)?;
    let mut page = Page::open(&cfg).await?;

    if page.client.admin_hint().await == Some(false) && !output::is_json() {
        output::notice(&Notice::warning(
            "Connected account is not the registry admin; the registry will likely refuse this.",
        ));
    }

    let result = page.client.register(&form).await;
    let snap = page.close().await;

    let mut out = RosterOut::from_state(result.is_ok(), snap);
    out.reference = result.as_ref().ok().map(|c| c.reference.clone());
    print_roster(&out)?;
    result?;
    Ok(())
}
