//! Request manager - lifecycle operations over the path store.
//!
//! Every operation here follows the same shape: validate input, re-read the
//! `requests` collection from the store, compute the new value, write it
//! back. The manager holds no state of its own beyond the store handle, and
//! never caches the collection across calls; the store's lock is the
//! single-writer serialization point.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::request::{NewRequest, RequestDetails, RequestRecord, RequestState};
use crate::error::{Result, TicketdError};
use crate::store::PathStore;

/// Dotted path of the request collection inside the store.
const REQUESTS_PATH: &str = "requests";

const ERR_MISSING_COLLECTION: &str = "No \"requests\" key found in DB";
const ERR_INVALID_ID: &str = "ID must be a non-empty string";
const ERR_NOT_FOUND: &str = "Request not found";
const ERR_NOT_FOUND_IN_DB: &str = "Request not found in database";
const ERR_BAD_FORMAT: &str = "Data must be of expected format";

/// Domain operations for requests, implemented purely in terms of
/// [`PathStore`] calls.
///
/// Cloning shares the underlying store; construct a manager around a fresh
/// `PathStore` for an isolated instance.
#[derive(Debug, Clone)]
pub struct RequestManager {
    store: PathStore,
}

impl RequestManager {
    pub fn new(store: PathStore) -> Self {
        Self { store }
    }

    /// The store this manager operates on.
    pub fn store(&self) -> &PathStore {
        &self.store
    }

    /// All requests whose state equals `state`.
    ///
    /// Zero matches is a normal, empty result.
    ///
    /// # Errors
    /// `NotFound` if the store has no `requests` collection at all.
    #[tracing::instrument(skip(self))]
    pub fn list_by_state(&self, state: RequestState) -> Result<Vec<RequestRecord>> {
        let records = self.read_requests(ERR_MISSING_COLLECTION)?;
        Ok(records.into_iter().filter(|r| r.state == state).collect())
    }

    /// A single request by id, augmented with the actions its current state
    /// allows.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty id, `NotFound` if no record matches.
    #[tracing::instrument(skip(self))]
    pub fn get_by_id(&self, id: &str) -> Result<RequestDetails> {
        validate_id(id)?;

        let records = self.read_requests(ERR_MISSING_COLLECTION)?;
        let record = records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| TicketdError::NotFound(ERR_NOT_FOUND.to_string()))?;

        Ok(RequestDetails::from_record(record))
    }

    /// Move a pending request to `validated`.
    pub fn validate(&self, id: &str) -> Result<()> {
        self.set_state(id, RequestState::Validated)
    }

    /// Move a validated request back to `pending`.
    pub fn invalidate(&self, id: &str) -> Result<()> {
        self.set_state(id, RequestState::Pending)
    }

    /// Move a validated request to `archived`.
    pub fn archive(&self, id: &str) -> Result<()> {
        self.set_state(id, RequestState::Archived)
    }

    /// Return an archived request to `pending`, mirroring `invalidate`.
    pub fn reopen(&self, id: &str) -> Result<()> {
        self.set_state(id, RequestState::Pending)
    }

    /// Remove a request, preserving the order of the remaining records.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty id, `NotFound` if no record matches.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<()> {
        validate_id(id)?;

        let records = self.read_requests(ERR_MISSING_COLLECTION)?;
        if !records.iter().any(|r| r.id == id) {
            return Err(TicketdError::NotFound(ERR_NOT_FOUND_IN_DB.to_string()));
        }

        let remaining: Vec<RequestRecord> = records.into_iter().filter(|r| r.id != id).collect();
        self.write_requests(&remaining)?;

        tracing::info!(id, "request deleted");
        Ok(())
    }

    /// Create a request from an untyped payload and return its fresh id.
    ///
    /// The payload must be an object of exactly
    /// `{state, message, user: {fullName, email, age, role}}` with a valid
    /// state enum and a non-empty message. The new record is stamped with
    /// the current time and appended to the collection (which is created if
    /// it does not exist yet).
    ///
    /// # Errors
    /// `InvalidArgument("Data required")` for a non-object payload,
    /// `InvalidArgument("Data must be of expected format")` for any shape
    /// violation.
    #[tracing::instrument(skip_all)]
    pub fn add(&self, data: &Value) -> Result<String> {
        if !data.is_object() {
            return Err(TicketdError::InvalidArgument("Data required".to_string()));
        }

        let new_request: NewRequest = serde_json::from_value(data.clone())
            .map_err(|_| TicketdError::InvalidArgument(ERR_BAD_FORMAT.to_string()))?;
        if new_request.message.is_empty() {
            return Err(TicketdError::InvalidArgument(ERR_BAD_FORMAT.to_string()));
        }

        let record = RequestRecord {
            id: Uuid::new_v4().to_string(),
            message: new_request.message,
            user: new_request.user,
            created_at: Utc::now().timestamp_millis(),
            state: new_request.state,
        };

        // First write creates the collection.
        let mut records = match self.store.get_path(REQUESTS_PATH)? {
            Some(value) => parse_records(value)?,
            None => Vec::new(),
        };
        let id = record.id.clone();
        records.push(record);
        self.write_requests(&records)?;

        tracing::info!(id, "request created");
        Ok(id)
    }

    /// Replace the state of the record with `id`, leaving every other field
    /// untouched, and persist the collection.
    #[tracing::instrument(skip(self))]
    fn set_state(&self, id: &str, target: RequestState) -> Result<()> {
        validate_id(id)?;

        let mut records = self.read_requests(ERR_MISSING_COLLECTION)?;
        if !records.iter().any(|r| r.id == id) {
            return Err(TicketdError::NotFound(ERR_NOT_FOUND_IN_DB.to_string()));
        }

        for record in records.iter_mut().filter(|r| r.id == id) {
            record.state = target;
        }
        self.write_requests(&records)?;

        tracing::info!(id, state = %target, "request state changed");
        Ok(())
    }

    fn read_requests(&self, missing_message: &str) -> Result<Vec<RequestRecord>> {
        match self.store.get_path(REQUESTS_PATH)? {
            Some(value) => parse_records(value),
            None => Err(TicketdError::NotFound(missing_message.to_string())),
        }
    }

    fn write_requests(&self, records: &[RequestRecord]) -> Result<()> {
        self.store.set(REQUESTS_PATH, serde_json::to_value(records)?)
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(TicketdError::InvalidArgument(ERR_INVALID_ID.to_string()));
    }
    Ok(())
}

fn parse_records(value: Value) -> Result<Vec<RequestRecord>> {
    Ok(serde_json::from_value(value)?)
}
