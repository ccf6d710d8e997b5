use std::process::ExitCode;

use clap::Parser;

mod args;
mod cmd;
mod config;
mod logging;
mod output;
mod prompt;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = args::Cli::parse();
    output::init(cli.json);
    logging::init(&cli.log_level, cli.json);

    match cmd::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            cmd::report_error(&e);
            ExitCode::FAILURE
        }
    }
}
