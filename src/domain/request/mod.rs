//! Request aggregate - record model and state transitions.
//!
//! This module contains the core domain types for support requests:
//! - Record shape as it lives in the store (camelCase wire format)
//! - Lifecycle states and requester roles
//! - The action table driving allowed state transitions

pub mod transitions;

pub use transitions::{allowed_actions, Action};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::TicketdError;

/// Lifecycle state of a request.
///
/// Transitions between states are restricted to the action table in
/// [`transitions`]; the state field itself is just data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Pending,
    Validated,
    Archived,
}

impl RequestState {
    /// All states, in lifecycle order.
    pub const ALL: [RequestState; 3] = [
        RequestState::Pending,
        RequestState::Validated,
        RequestState::Archived,
    ];

    /// Lowercase wire name, as stored and as used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Pending => "pending",
            RequestState::Validated => "validated",
            RequestState::Archived => "archived",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestState {
    type Err = TicketdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestState::Pending),
            "validated" => Ok(RequestState::Validated),
            "archived" => Ok(RequestState::Archived),
            other => Err(TicketdError::InvalidArgument(format!(
                "Invalid state: {other}"
            ))),
        }
    }
}

/// Role of the person who filed a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Dev,
    Sales,
    Ops,
    Marketing,
}

/// The requester attached to a record.
///
/// `deny_unknown_fields` plus all-required fields pins the shape to exactly
/// `{fullName, email, age, role}` - no more, no fewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Requester {
    pub full_name: String,
    pub email: String,
    /// Raw JSON number; the original tolerates fractional ages.
    pub age: Number,
    pub role: Role,
}

/// A single request/ticket as persisted in the store's `requests` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Opaque unique identifier.
    pub id: String,
    pub message: String,
    pub user: Requester,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    pub state: RequestState,
}

/// Payload shape for creating a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewRequest {
    pub state: RequestState,
    pub message: String,
    pub user: Requester,
}

/// A record augmented with the actions its current state allows.
///
/// This is the read model served by `GET /request/action/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetails {
    #[serde(flatten)]
    pub record: RequestRecord,
    pub actions: Vec<Action>,
}

impl RequestDetails {
    pub fn from_record(record: RequestRecord) -> Self {
        let actions = allowed_actions(record.state).to_vec();
        Self { record, actions }
    }
}
