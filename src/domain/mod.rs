//! Domain models for the ticket service.
//!
//! Organized around the request aggregate:
//! - `request`: record model, lifecycle states and transition rules

pub mod request;

pub use request::*;
