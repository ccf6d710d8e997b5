//! The remote store seam.
//!
//! A [`RecordStore`] is a handle to the system of record, already bound to the
//! session's signing identity. Reads return records as stored; writes return a
//! [`PendingOperation`] that must be awaited before the change counts as durable.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreResult;
use crate::model::{Identity, Record};

/// Proof that a submitted operation reached the requested confirmation level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Confirmed {
    /// Store-specific operation reference (e.g. a transaction signature).
    pub reference: String,
}

/// A submitted mutation that has not been confirmed yet.
#[async_trait]
pub trait PendingOperation: Send {
    /// Store-specific reference, available before confirmation.
    fn reference(&self) -> String;

    /// Suspend until the operation is finalized or definitively failed.
    async fn wait(self: Box<Self>) -> StoreResult<Confirmed>;
}

/// Remote record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Number of slots ever allocated, including deleted ones.
    async fn student_count(&self) -> StoreResult<u64>;

    /// Slot at `index`, `0 <= index < student_count()`.
    async fn student(&self, index: u64) -> StoreResult<Record>;

    /// Slots `start..end` in index order.
    ///
    /// Defaults to one `student` call per index. Stores with a bulk read
    /// should override this; the result must be the same. Nothing is
    /// preallocated from `end`.
    async fn students_range(&self, start: u64, end: u64) -> StoreResult<Vec<Record>> {
        let mut out = Vec::new();
        for index in start..end {
            out.push(self.student(index).await?);
        }
        Ok(out)
    }

    async fn register_student(&self, id: u64, name: &str) -> StoreResult<Box<dyn PendingOperation>>;

    async fn delete_student(&self, id: u64) -> StoreResult<Box<dyn PendingOperation>>;

    /// The identity the store accepts mutations from.
    async fn admin(&self) -> StoreResult<Identity>;
}

/// Shared store handle held by a session.
pub type StoreHandle = Arc<dyn RecordStore>;
