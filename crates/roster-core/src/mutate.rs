//! Record mutator.
//!
//! Submits register/delete operations and suspends until the store confirms
//! them. Authorization is the store's call: any rejection is reported as
//! `NotAuthorized` regardless of its text. Only transport problems become
//! `RemoteUnavailable`.

use tracing::{debug, info};

use crate::errors::{ClientError, ClientResult, StoreError};
use crate::session::Session;
use crate::store::Confirmed;

/// A validated registration form.
///
/// Only constructible through [`RegistrationForm::new`] or
/// [`RegistrationForm::parse`], so `id` is positive and `name` is non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    id: u64,
    name: String,
}

impl RegistrationForm {
    /// Validate already typed fields. The name is trimmed.
    pub fn new(id: u64, name: &str) -> ClientResult<Self> {
        if id == 0 {
            return Err(ClientError::invalid_input("student id must be a positive integer, got 0"));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::invalid_input("student name is required"));
        }
        Ok(Self { id, name: name.to_string() })
    }

    /// Validate raw form fields: `id` a positive integer, `name` non-empty.
    pub fn parse(id: &str, name: &str) -> ClientResult<Self> {
        Self::new(parse_student_id(id)?, name)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parse a student id field. Zero, negatives and non-numbers are rejected.
pub fn parse_student_id(raw: &str) -> ClientResult<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ClientError::invalid_input("student id is required"));
    }
    let id: u64 = raw
        .parse()
        .map_err(|_| ClientError::invalid_input(format!("student id must be a positive integer, got {raw:?}")))?;
    if id == 0 {
        return Err(ClientError::invalid_input("student id must be a positive integer, got 0"));
    }
    Ok(id)
}

/// Register a student and wait for confirmation.
pub async fn register(session: &Session, form: &RegistrationForm) -> ClientResult<Confirmed> {
    let id = form.id();
    let pending = session.store().register_student(id, form.name()).await.map_err(write_error)?;
    debug!(id, reference = %pending.reference(), "register submitted");

    let confirmed = pending.wait().await.map_err(write_error)?;
    info!(id, reference = %confirmed.reference, "register confirmed");
    Ok(confirmed)
}

/// Delete a student and wait for confirmation.
pub async fn remove(session: &Session, id: u64) -> ClientResult<Confirmed> {
    let pending = session.store().delete_student(id).await.map_err(write_error)?;
    debug!(id, reference = %pending.reference(), "delete submitted");

    let confirmed = pending.wait().await.map_err(write_error)?;
    info!(id, reference = %confirmed.reference, "delete confirmed");
    Ok(confirmed)
}

fn write_error(err: StoreError) -> ClientError {
    match err {
        StoreError::Rejected(msg) => ClientError::NotAuthorized(msg),
        StoreError::Unavailable(msg) | StoreError::Malformed(msg) => ClientError::RemoteUnavailable(msg),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn form_accepts_positive_id_and_name() {
        let form = RegistrationForm::parse(" 42 ", "  Ada Lovelace ").unwrap();
        assert_eq!((form.id(), form.name()), (42, "Ada Lovelace"));
    }

    #[test]
    fn form_rejects_bad_ids() {
        for raw in ["", "0", "-3", "1.5", "abc", "99999999999999999999999"] {
            assert_matches!(RegistrationForm::parse(raw, "A"), Err(ClientError::InvalidInput(_)), "{raw:?}");
        }
    }

    #[test]
    fn form_rejects_blank_name() {
        assert_matches!(RegistrationForm::parse("1", "   "), Err(ClientError::InvalidInput(_)));
    }

    #[test]
    fn typed_form_is_validated_too() {
        assert_matches!(RegistrationForm::new(0, "A"), Err(ClientError::InvalidInput(_)));
        assert_matches!(RegistrationForm::new(1, " \t"), Err(ClientError::InvalidInput(_)));
        assert_eq!(RegistrationForm::new(1, " A ").unwrap().name(), "A");
    }

    #[test]
    fn rejection_is_not_authorized_whatever_the_text() {
        let e = write_error(StoreError::rejected("custom program error: 0x1771"));
        assert_matches!(e, ClientError::NotAuthorized(_));

        let e = write_error(StoreError::unavailable("connection refused"));
        assert_matches!(e, ClientError::RemoteUnavailable(_));
    }
}
