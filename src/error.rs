//! Error types for the ticket service.

use thiserror::Error;

/// Result type alias using the ticketd error type.
pub type Result<T> = std::result::Result<T, TicketdError>;

/// Main error type for the ticket service.
///
/// Every failure here is either a caller contract violation
/// (`InvalidArgument`) or a legitimate absence (`NotFound`); nothing is
/// transient, so nothing is retried internally. The HTTP layer translates
/// `NotFound` to 404 and everything else to 400.
#[derive(Error, Debug)]
pub enum TicketdError {
    /// Bad input shape: missing/empty id, malformed path, malformed payload.
    #[error("{0}")]
    InvalidArgument(String),

    /// Missing collection or missing record.
    #[error("{0}")]
    NotFound(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TicketdError {
    /// True for the `NotFound` kind, regardless of message.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TicketdError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_predicate_matches_only_not_found() {
        assert!(TicketdError::NotFound("Request not found".into()).is_not_found());
        assert!(!TicketdError::InvalidArgument("Data required".into()).is_not_found());
    }

    #[test]
    fn messages_surface_verbatim() {
        let err = TicketdError::InvalidArgument("ID must be a non-empty string".into());
        assert_eq!(err.to_string(), "ID must be a non-empty string");
    }
}
