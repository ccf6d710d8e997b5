//! localnet_flow.rs
//!
//! Optional flow test against a running validator with the registry program
//! deployed. Skipped by default. To enable, set:
//! - ROSTER_RUN_LOCALNET_TESTS=1
//! - ROSTER_RPC_URL (optional): defaults to http://127.0.0.1:8899
//! - ROSTER_PROGRAM_ID: deployed registry program id
//! - ROSTER_KEYPAIR: admin keypair file
//!
//! The test connects, registers a student, checks the roster, deletes it again.

use std::env;
use std::path::PathBuf;

use roster_core::prelude::*;
use roster_solana_client::{resolve_program_id, KeypairWallet, RpcStoreConnector};

#[tokio::test]
async fn register_then_delete_on_localnet() {
    if env::var("ROSTER_RUN_LOCALNET_TESTS").ok().as_deref() != Some("1") {
        eprintln!("skip: set ROSTER_RUN_LOCALNET_TESTS=1 to enable localnet flow test");
        return;
    }
    let rpc_url = env::var("ROSTER_RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8899".to_string());
    let program_id = resolve_program_id(env::var("ROSTER_PROGRAM_ID").ok().as_deref()).unwrap();
    let keypair = PathBuf::from(env::var("ROSTER_KEYPAIR").expect("ROSTER_KEYPAIR must be set"));

    let wallet = KeypairWallet::discover(&keypair).unwrap().expect("keypair file not found");
    let connector = RpcStoreConnector::new(rpc_url, program_id, Commitment::Confirmed);

    let mut client = RegistrationClient::new();
    client.connect(Some(&wallet), &connector).await.unwrap();
    assert_eq!(client.admin_hint().await, Some(true), "ROSTER_KEYPAIR must be the registry admin");

    let id = 900_000 + u64::from(std::process::id() % 1000);
    client.register(&RegistrationForm::new(id, "Localnet Student").unwrap()).await.unwrap();
    assert!(client.roster().contains_id(id));

    client.remove(id).await.unwrap();
    assert!(!client.roster().contains_id(id));
}
