use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "roster", version, about = "Student roster registry client")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML config file.
    #[arg(long, global = true, env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint.
    #[arg(long, global = true, env = "ROSTER_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Registry program id.
    #[arg(long, global = true, env = "ROSTER_PROGRAM_ID")]
    pub program_id: Option<String>,

    /// Wallet keypair file (default: ~/.config/solana/id.json).
    #[arg(long, global = true, env = "ROSTER_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Confirmation level: processed|confirmed|finalized
    #[arg(long, global = true)]
    pub commitment: Option<String>,

    /// Grant wallet account access without prompting.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Connect the wallet and show the account and roster.
    Connect,

    /// List registered students.
    List,

    /// Register a new student (admin only).
    Register {
        /// Student id, a positive integer.
        #[arg(long)]
        id: String,

        /// Student name.
        #[arg(long)]
        name: String,
    },

    /// Delete a student by id (admin only).
    #[command(visible_alias = "delete")]
    Remove {
        id: String,
    },

    /// Show the registry admin and whether the wallet matches it.
    Admin,

    /// Run environment checks.
    Doctor,
}
