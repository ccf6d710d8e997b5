//! In-memory store and wallet used by the integration tests.
//!
//! `MemoryChain` behaves like the registry program: slots are append-only,
//! deletion clears the registered flag, only the admin may mutate.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use roster_core::prelude::*;

#[derive(Debug)]
pub struct MemoryChain {
    admin: Identity,
    slots: Mutex<Vec<Record>>,
    next_ref: AtomicU64,
    /// Reads of slot indexes at or above this value fail.
    fail_reads_from: Mutex<Option<u64>>,
    fail_count: AtomicBool,
    fail_confirmations: AtomicBool,
    /// Slot count reported instead of the real one.
    reported_count: Mutex<Option<u64>>,
    /// `busy` as seen by the store at each mutation, confirmation and read.
    busy_probe: Mutex<Option<(PresentationState, Vec<bool>)>>,
}

impl MemoryChain {
    pub fn new(admin: &str) -> Arc<Self> {
        Arc::new(Self {
            admin: Identity::new(admin),
            slots: Mutex::new(Vec::new()),
            next_ref: AtomicU64::new(1),
            fail_reads_from: Mutex::new(None),
            fail_count: AtomicBool::new(false),
            fail_confirmations: AtomicBool::new(false),
            reported_count: Mutex::new(None),
            busy_probe: Mutex::new(None),
        })
    }

    pub fn with_slots(admin: &str, slots: Vec<Record>) -> Arc<Self> {
        let chain = Self::new(admin);
        *chain.slots.lock().unwrap() = slots;
        chain
    }

    pub fn fail_reads_from(&self, index: Option<u64>) {
        *self.fail_reads_from.lock().unwrap() = index;
    }

    pub fn fail_count(&self, fail: bool) {
        self.fail_count.store(fail, Ordering::SeqCst);
    }

    pub fn fail_confirmations(&self, fail: bool) {
        self.fail_confirmations.store(fail, Ordering::SeqCst);
    }

    pub fn report_count(&self, count: Option<u64>) {
        *self.reported_count.lock().unwrap() = count;
    }

    /// Start recording `state.busy` whenever the store is called.
    pub fn watch_busy(&self, state: &PresentationState) {
        *self.busy_probe.lock().unwrap() = Some((state.clone(), Vec::new()));
    }

    pub fn busy_seen(&self) -> Vec<bool> {
        self.busy_probe.lock().unwrap().as_ref().map(|(_, seen)| seen.clone()).unwrap_or_default()
    }

    fn record_busy(&self) {
        if let Some((state, seen)) = self.busy_probe.lock().unwrap().as_mut() {
            seen.push(state.is_busy());
        }
    }

    pub fn slots(&self) -> Vec<Record> {
        self.slots.lock().unwrap().clone()
    }

    fn next_reference(&self) -> String {
        format!("op-{}", self.next_ref.fetch_add(1, Ordering::SeqCst))
    }
}

/// Store handle bound to the calling identity.
#[derive(Debug)]
pub struct MemoryStore {
    chain: Arc<MemoryChain>,
    caller: Identity,
}

#[derive(Debug)]
struct MemoryPending {
    chain: Arc<MemoryChain>,
    reference: String,
    fail: bool,
}

#[async_trait]
impl PendingOperation for MemoryPending {
    fn reference(&self) -> String {
        self.reference.clone()
    }

    async fn wait(self: Box<Self>) -> StoreResult<Confirmed> {
        self.chain.record_busy();
        if self.fail {
            return Err(StoreError::unavailable("node dropped the transaction"));
        }
        Ok(Confirmed { reference: self.reference })
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn student_count(&self) -> StoreResult<u64> {
        if self.chain.fail_count.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("rpc timed out"));
        }
        self.chain.record_busy();
        if let Some(count) = *self.chain.reported_count.lock().unwrap() {
            return Ok(count);
        }
        Ok(self.chain.slots.lock().unwrap().len() as u64)
    }

    async fn student(&self, index: u64) -> StoreResult<Record> {
        if let Some(from) = *self.chain.fail_reads_from.lock().unwrap() {
            if index >= from {
                return Err(StoreError::unavailable(format!("read of slot {index} failed")));
            }
        }
        self.chain
            .slots
            .lock()
            .unwrap()
            .get(index as usize)
            .cloned()
            .ok_or_else(|| StoreError::malformed(format!("slot {index} missing")))
    }

    async fn register_student(&self, id: u64, name: &str) -> StoreResult<Box<dyn PendingOperation>> {
        self.chain.record_busy();
        if !self.caller.same_as(&self.chain.admin) {
            return Err(StoreError::rejected("Only admin can perform this action"));
        }
        let mut slots = self.chain.slots.lock().unwrap();
        if slots.iter().any(|r| r.registered && r.id == id) {
            return Err(StoreError::rejected("Student already registered"));
        }
        slots.push(Record::new(id, name, true));
        Ok(Box::new(MemoryPending {
            chain: self.chain.clone(),
            reference: self.chain.next_reference(),
            fail: self.chain.fail_confirmations.load(Ordering::SeqCst),
        }))
    }

    async fn delete_student(&self, id: u64) -> StoreResult<Box<dyn PendingOperation>> {
        if !self.caller.same_as(&self.chain.admin) {
            return Err(StoreError::rejected("Only admin can perform this action"));
        }
        let mut slots = self.chain.slots.lock().unwrap();
        let slot = slots
            .iter_mut()
            .find(|r| r.registered && r.id == id)
            .ok_or_else(|| StoreError::rejected("Student not found"))?;
        slot.registered = false;
        Ok(Box::new(MemoryPending {
            chain: self.chain.clone(),
            reference: self.chain.next_reference(),
            fail: self.chain.fail_confirmations.load(Ordering::SeqCst),
        }))
    }

    async fn admin(&self) -> StoreResult<Identity> {
        Ok(self.chain.admin.clone())
    }
}

#[derive(Debug, Clone)]
pub struct MemoryConnector {
    pub chain: Arc<MemoryChain>,
}

#[async_trait]
impl StoreConnector<Identity> for MemoryConnector {
    async fn connect(&self, _identity: &Identity, signer: Identity) -> StoreResult<StoreHandle> {
        Ok(Arc::new(MemoryStore { chain: self.chain.clone(), caller: signer }))
    }
}

/// Wallet exposing a fixed account list, optionally refusing access.
#[derive(Debug, Clone)]
pub struct FakeWallet {
    pub accounts: Vec<Identity>,
    pub reject: bool,
}

impl FakeWallet {
    pub fn with_account(address: &str) -> Self {
        Self { accounts: vec![Identity::new(address)], reject: false }
    }

    pub fn rejecting() -> Self {
        Self { accounts: vec![], reject: true }
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    type Signer = Identity;

    async fn request_accounts(&self) -> WalletResult<Vec<Identity>> {
        if self.reject {
            return Err(WalletError::Rejected);
        }
        Ok(self.accounts.clone())
    }

    fn signer(&self, identity: &Identity) -> WalletResult<Identity> {
        Ok(identity.clone())
    }
}

pub const ADMIN: &str = "0xA7A642932D7D8bdf18b7cF9d27Fe612bFc84CFE3";
pub const STRANGER: &str = "0x1111111111111111111111111111111111111111";

/// A client connected as `address` against `chain`.
pub async fn connected_client(chain: &Arc<MemoryChain>, address: &str) -> RegistrationClient {
    let mut client = RegistrationClient::new();
    let wallet = FakeWallet::with_account(address);
    let connector = MemoryConnector { chain: chain.clone() };
    client.connect(Some(&wallet), &connector).await.unwrap();
    client
}

pub fn form(id: u64, name: &str) -> RegistrationForm {
    RegistrationForm::new(id, name).unwrap()
}
