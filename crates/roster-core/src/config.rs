//! Configuration structures for the roster client.
//!
//! The core crate does not read files or environment variables. The CLI layers
//! defaults, a config file, environment and flags, then hands the result here
//! for validation.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{ClientError, ClientResult};

/// Default JSON-RPC endpoint (a local validator).
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the chain hosting the registry.
    pub rpc_url: String,
    /// Address of the registry program. `None` uses the adapter's default.
    pub program_id: Option<String>,
    /// Wallet keypair location.
    pub keypair_path: PathBuf,
    /// How final a transaction must be before it counts as confirmed.
    pub commitment: Commitment,
    /// Grant account access without prompting.
    pub assume_yes: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            program_id: None,
            keypair_path: default_keypair_path(),
            commitment: Commitment::Confirmed,
            assume_yes: false,
        }
    }
}

/// `$HOME/.config/solana/id.json`, or a relative `id.json` without a home directory.
pub fn default_keypair_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config").join("solana").join("id.json"),
        None => PathBuf::from("id.json"),
    }
}

/// Confirmation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn parse(s: &str) -> ClientResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(ClientError::invalid_input(format!(
                "unsupported commitment: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> ClientResult<()> {
    let url = url::Url::parse(&cfg.rpc_url)
        .map_err(|e| ClientError::invalid_input(format!("invalid rpc_url {}: {e}", cfg.rpc_url)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::invalid_input(format!(
            "rpc_url must use http or https, got {}",
            url.scheme()
        )));
    }

    if let Some(program_id) = &cfg.program_id {
        if program_id.trim().is_empty() {
            return Err(ClientError::invalid_input("program_id must not be empty"));
        }
    }

    if cfg.keypair_path.as_os_str().is_empty() {
        return Err(ClientError::invalid_input("keypair_path must not be empty"));
    }

    Ok(())
}
