//! State transition rules for requests.
//!
//! The lifecycle is a small fixed machine:
//!
//! ```text
//! pending ──validate──> validated ──archive──> archived
//!    ^                      │                     │
//!    └─────invalidate───────┘                     │
//!    └────────────────reopen──────────────────────┘
//!
//! delete is allowed from every state.
//! ```
//!
//! `reopen` has no dedicated route in the external interface; it is exposed
//! through the action list of archived records and returns them to
//! `pending`, mirroring `invalidate`.

use serde::{Deserialize, Serialize};

use super::RequestState;

/// An operation a caller may perform on a request in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Validate,
    Archive,
    Invalidate,
    Delete,
    Reopen,
}

impl Action {
    /// The state a request ends up in after this action, or `None` for
    /// `delete` (which removes the record instead of moving it).
    pub fn target_state(&self) -> Option<RequestState> {
        match self {
            Action::Validate => Some(RequestState::Validated),
            Action::Archive => Some(RequestState::Archived),
            Action::Invalidate => Some(RequestState::Pending),
            Action::Reopen => Some(RequestState::Pending),
            Action::Delete => None,
        }
    }
}

/// Actions allowed for a request in `state`.
pub fn allowed_actions(state: RequestState) -> &'static [Action] {
    match state {
        RequestState::Pending => &[Action::Validate, Action::Delete],
        RequestState::Validated => &[Action::Archive, Action::Invalidate, Action::Delete],
        RequestState::Archived => &[Action::Delete, Action::Reopen],
    }
}
