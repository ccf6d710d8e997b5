//! Record fetcher.
//!
//! Reads the slot count, then every slot in order, and keeps the registered
//! ones. One failed read fails the whole fetch; the caller keeps whatever
//! roster it had.

use tracing::debug;

use crate::errors::{ClientError, ClientResult, StoreError};
use crate::model::Roster;
use crate::session::Session;

/// Rebuild the roster from the remote store.
pub async fn fetch_all(session: &Session) -> ClientResult<Roster> {
    let store = session.store();
    let count = store.student_count().await.map_err(read_error)?;
    debug!(count, "reading student slots");

    let records = store.students_range(0, count).await.map_err(read_error)?;
    if records.len() as u64 != count {
        return Err(ClientError::remote_unavailable(format!(
            "store returned {} slots, expected {count}",
            records.len()
        )));
    }

    Ok(Roster::from_records(records))
}

/// Any failure while reading means the store is unusable for this fetch.
fn read_error(err: StoreError) -> ClientError {
    ClientError::RemoteUnavailable(err.to_string())
}
