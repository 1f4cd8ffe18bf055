//! Small record-management service for support tickets.
//!
//! Requests move through a fixed lifecycle (pending -> validated ->
//! archived, with reopen/invalidate/delete transitions) and are persisted in
//! an in-process, path-addressable key/value store. The HTTP layer maps each
//! manager operation to a route and a status code.

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod manager;
pub mod store;

// Re-export commonly used types
pub use config::ServerConfig;
pub use domain::request::{Action, RequestDetails, RequestRecord, RequestState, Requester, Role};
pub use error::{Result, TicketdError};
pub use manager::RequestManager;
pub use store::PathStore;
