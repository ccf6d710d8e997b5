//! Config layering: defaults < TOML file < environment < flags.
//!
//! clap already folds the environment into the flag values, so only two
//! overlays happen here.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use roster_core::config::{validate_config, ClientConfig, Commitment};

use crate::args::Cli;

pub fn load(cli: &Cli) -> Result<ClientConfig> {
    let mut cfg = match &cli.config {
        Some(path) => read_file(path)?,
        None => ClientConfig::default(),
    };

    if let Some(url) = &cli.rpc_url {
        cfg.rpc_url = url.clone();
    }
    if let Some(program_id) = &cli.program_id {
        cfg.program_id = Some(program_id.clone());
    }
    if let Some(path) = &cli.keypair {
        cfg.keypair_path = path.clone();
    }
    if let Some(c) = &cli.commitment {
        cfg.commitment = Commitment::parse(c)?;
    }
    if cli.yes {
        cfg.assume_yes = true;
    }

    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn read_file(path: &Path) -> Result<ClientConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).map_err(|e| anyhow!("invalid config {}: {e}", path.display()))
}
