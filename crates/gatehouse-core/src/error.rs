//! Store error types.
//!
//! A failed login due to a wrong password is NOT an error: `login` returns
//! `Ok(false)`. Errors are reserved for rejected registrations, malformed
//! boundary strings, unauthenticated secret access, and backend failures.

use thiserror::Error;

use crate::backend::BackendError;
use crate::credential::UserId;

/// Errors from credential store operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration for an identifier that already exists.
    #[error("already registered: {user}")]
    AlreadyRegistered {
        /// The identifier that was already taken.
        user: UserId,
    },

    /// Boundary string could not be parsed into credentials.
    #[error("malformed credentials: {reason}")]
    MalformedCredentials {
        /// Description of the parse failure.
        reason: String,
    },

    /// Secret access without a live session.
    #[error("not authenticated: {user}")]
    NotAuthenticated {
        /// The identifier that has no session.
        user: UserId,
    },

    /// Backend operation failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let user = UserId::parse("alice").unwrap();
        let err = AuthError::AlreadyRegistered { user };
        assert_eq!(err.to_string(), "already registered: alice");
    }

    #[test]
    fn malformed_display_names_reason() {
        let err = AuthError::MalformedCredentials { reason: "empty identifier".to_string() };
        assert_eq!(err.to_string(), "malformed credentials: empty identifier");
    }
}
