//! RPC-backed [`RecordStore`] for the roster registry program.
//!
//! Reads decode program accounts directly; writes build an instruction, sign it
//! with the session keypair and submit it. Submission returns a
//! [`PendingTransaction`] that polls the signature status until the cluster
//! reports a terminal result at the configured commitment, or until the
//! transaction's blockhash expires.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use solana_client::client_error::{ClientError as RpcClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use tracing::debug;

use roster_core::config::Commitment;
use roster_core::model::{Identity, Record};
use roster_core::store::{Confirmed, PendingOperation, RecordStore, StoreHandle};
use roster_core::wallet::StoreConnector;
use roster_core::{StoreError, StoreResult};

use crate::accounts::{decode_registry, decode_student_index, decode_student_slot, RegistryAccount};
use crate::constants::MAX_MULTIPLE_ACCOUNTS;
use crate::registry_client::RegistryClient;

/// Delay between signature status polls.
pub const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub fn commitment_config(c: Commitment) -> CommitmentConfig {
    match c {
        Commitment::Processed => CommitmentConfig::processed(),
        Commitment::Confirmed => CommitmentConfig::confirmed(),
        Commitment::Finalized => CommitmentConfig::finalized(),
    }
}

/// Map an RPC error into the store taxonomy.
///
/// Transport failures are `Unavailable`. Anything the cluster evaluated and
/// refused (a failed transaction, a failed preflight simulation) is `Rejected`.
pub fn classify_rpc_error(err: &RpcClientError) -> StoreError {
    match err.kind() {
        ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => StoreError::unavailable(err.to_string()),
        ClientErrorKind::TransactionError(_) => StoreError::rejected(err.to_string()),
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(_),
            ..
        }) => StoreError::rejected(err.to_string()),
        _ => StoreError::unavailable(err.to_string()),
    }
}

fn rpc_error(err: RpcClientError) -> StoreError {
    classify_rpc_error(&err)
}

/// Local instruction-building failure; the program never saw the request.
fn instruction_error(err: anyhow::Error) -> StoreError {
    StoreError::malformed(format!("could not build instruction: {err}"))
}

pub struct RpcRecordStore {
    rpc: Arc<RpcClient>,
    registry: RegistryClient,
    payer: Arc<Keypair>,
}

impl RpcRecordStore {
    pub fn new(rpc: Arc<RpcClient>, program_id: Pubkey, payer: Arc<Keypair>) -> Self {
        Self { rpc, registry: RegistryClient::new(program_id), payer }
    }

    pub fn registry_client(&self) -> &RegistryClient {
        &self.registry
    }

    async fn account_data(&self, address: &Pubkey) -> StoreResult<Option<Vec<u8>>> {
        let resp = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .map_err(rpc_error)?;
        Ok(resp.value.map(|a| a.data))
    }

    /// Read the registry root account.
    pub async fn registry_account(&self) -> StoreResult<RegistryAccount> {
        let address = self.registry.registry_address();
        let data = self
            .account_data(&address)
            .await?
            .ok_or_else(|| StoreError::unavailable(format!("registry account {address} not found")))?;
        decode_registry(&data).map_err(|e| StoreError::malformed(e.to_string()))
    }

    async fn submit(&self, ix: Instruction) -> StoreResult<Box<dyn PendingOperation>> {
        let blockhash = self.rpc.get_latest_blockhash().await.map_err(rpc_error)?;
        let payer: &Keypair = &self.payer;
        let tx = Transaction::new_signed_with_payer(&[ix], Some(&payer.pubkey()), &[payer], blockhash);
        let signature = self.rpc.send_transaction(&tx).await.map_err(rpc_error)?;
        debug!(%signature, "transaction submitted");

        Ok(Box::new(PendingTransaction { rpc: self.rpc.clone(), signature, blockhash }))
    }
}

#[async_trait]
impl RecordStore for RpcRecordStore {
    async fn student_count(&self) -> StoreResult<u64> {
        Ok(self.registry_account().await?.student_count)
    }

    async fn student(&self, index: u64) -> StoreResult<Record> {
        let address = self.registry.slot_address(index);
        let data = self
            .account_data(&address)
            .await?
            .ok_or_else(|| StoreError::malformed(format!("student slot {index} ({address}) missing")))?;
        let slot = decode_student_slot(&data).map_err(|e| StoreError::malformed(e.to_string()))?;
        Ok(slot.into())
    }

    async fn students_range(&self, start: u64, end: u64) -> StoreResult<Vec<Record>> {
        // Derived one request at a time; reading stops at the first missing slot.
        let chunks = crate::pda::slot_address_chunks(&self.registry.program_id, start, end, MAX_MULTIPLE_ACCOUNTS);
        let mut out = Vec::new();

        for (chunk_start, chunk) in chunks {
            let resp = self
                .rpc
                .get_multiple_accounts_with_commitment(&chunk, self.rpc.commitment())
                .await
                .map_err(rpc_error)?;

            for (offset, account) in resp.value.into_iter().enumerate() {
                let index = chunk_start + offset as u64;
                let account = account.ok_or_else(|| StoreError::malformed(format!("student slot {index} missing")))?;
                let slot = decode_student_slot(&account.data).map_err(|e| StoreError::malformed(e.to_string()))?;
                out.push(slot.into());
            }
        }
        Ok(out)
    }

    async fn register_student(&self, id: u64, name: &str) -> StoreResult<Box<dyn PendingOperation>> {
        let next_index = self.student_count().await?;
        let ix = self
            .registry
            .ix_register_student(self.payer.pubkey(), id, name, next_index)
            .map_err(instruction_error)?;
        self.submit(ix).await
    }

    async fn delete_student(&self, id: u64) -> StoreResult<Box<dyn PendingOperation>> {
        let address = self.registry.id_index_address(id);
        let data = self
            .account_data(&address)
            .await?
            .ok_or_else(|| StoreError::rejected(format!("no student with id {id}")))?;
        let index = decode_student_index(&data).map_err(|e| StoreError::malformed(e.to_string()))?.index;

        let ix = self
            .registry
            .ix_delete_student(self.payer.pubkey(), id, index)
            .map_err(instruction_error)?;
        self.submit(ix).await
    }

    async fn admin(&self) -> StoreResult<Identity> {
        Ok(Identity::new(self.registry_account().await?.admin.to_string()))
    }
}

/// A submitted transaction awaiting confirmation.
pub struct PendingTransaction {
    rpc: Arc<RpcClient>,
    signature: Signature,
    blockhash: Hash,
}

impl PendingTransaction {
    async fn status(&self) -> StoreResult<Option<Confirmed>> {
        let status = self
            .rpc
            .get_signature_status_with_commitment(&self.signature, self.rpc.commitment())
            .await
            .map_err(rpc_error)?;
        match status {
            Some(Ok(())) => Ok(Some(Confirmed { reference: self.signature.to_string() })),
            Some(Err(e)) => Err(StoreError::rejected(format!("transaction {} failed: {e}", self.signature))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PendingOperation for PendingTransaction {
    fn reference(&self) -> String {
        self.signature.to_string()
    }

    async fn wait(self: Box<Self>) -> StoreResult<Confirmed> {
        loop {
            if let Some(confirmed) = self.status().await? {
                return Ok(confirmed);
            }

            let live = self
                .rpc
                .is_blockhash_valid(&self.blockhash, self.rpc.commitment())
                .await
                .map_err(rpc_error)?;
            if !live {
                // It may have landed between the two calls.
                if let Some(confirmed) = self.status().await? {
                    return Ok(confirmed);
                }
                return Err(StoreError::unavailable(format!(
                    "transaction {} expired before confirmation",
                    self.signature
                )));
            }

            tokio::time::sleep(CONFIRM_POLL_INTERVAL).await;
        }
    }
}

/// Binds a keypair signer to an RPC-backed store.
#[derive(Debug, Clone)]
pub struct RpcStoreConnector {
    pub rpc_url: String,
    pub program_id: Pubkey,
    pub commitment: CommitmentConfig,
}

impl RpcStoreConnector {
    pub fn new(rpc_url: impl Into<String>, program_id: Pubkey, commitment: Commitment) -> Self {
        Self { rpc_url: rpc_url.into(), program_id, commitment: commitment_config(commitment) }
    }

    pub fn rpc_client(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), self.commitment)
    }
}

#[async_trait]
impl StoreConnector<Arc<Keypair>> for RpcStoreConnector {
    async fn connect(&self, identity: &Identity, signer: Arc<Keypair>) -> StoreResult<StoreHandle> {
        if signer.pubkey().to_string() != identity.as_str() {
            return Err(StoreError::rejected(format!("signer does not match account {identity}")));
        }
        debug!(rpc_url = %self.rpc_url, program_id = %self.program_id, "opening registry store");
        let rpc = Arc::new(self.rpc_client());
        Ok(Arc::new(RpcRecordStore::new(rpc, self.program_id, signer)))
    }
}
