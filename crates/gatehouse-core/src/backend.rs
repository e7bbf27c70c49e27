//! Storage seam for the credential store.
//!
//! [`CredentialBackend`] is the narrow interface the store drives. Every
//! primitive is fallible so instrumented backends (fault injection in the
//! test harness) can fail any single call; the in-memory backend never
//! does.
//!
//! The call sequences the store makes against this trait are part of its
//! contract (a reference model predicts injected faults from them):
//!
//! | operation       | backend calls, in order                    |
//! |-----------------|--------------------------------------------|
//! | `register`      | `fetch_user`, then `insert_user` if absent |
//! | `login`         | `fetch_user`, then `add_session` on match  |
//! | `logout`        | `remove_session`                           |
//! | `access_secret` | `has_session`                              |

use thiserror::Error;

use crate::credential::{EncodedPassword, UserId};

/// The backend primitives, named so failures can identify their origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    /// Store an encoded password under an identifier.
    InsertUser,
    /// Look up an identifier's encoded password.
    FetchUser,
    /// Mark an identifier as logged in.
    AddSession,
    /// Remove an identifier's session, if any.
    RemoveSession,
    /// Check whether an identifier has a live session.
    HasSession,
}

impl std::fmt::Display for BackendOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InsertUser => "insert_user",
            Self::FetchUser => "fetch_user",
            Self::AddSession => "add_session",
            Self::RemoveSession => "remove_session",
            Self::HasSession => "has_session",
        };
        f.write_str(name)
    }
}

/// A backend primitive failed. State is left unchanged by the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("backend failure in {op}")]
pub struct BackendError {
    /// Which primitive failed.
    pub op: BackendOp,
}

/// Storage interface for registered users and live sessions.
///
/// Implementations must key strictly by the given [`UserId`], never by
/// position or iteration order, so that registering one user can never
/// disturb another user's stored password.
pub trait CredentialBackend {
    /// Store `password` under `user`. The store only calls this for
    /// identifiers it has confirmed absent.
    fn insert_user(&mut self, user: UserId, password: EncodedPassword)
    -> Result<(), BackendError>;

    /// Encoded password for `user`, if registered.
    fn fetch_user(&self, user: &UserId) -> Result<Option<EncodedPassword>, BackendError>;

    /// Establish a session for `user`. Idempotent.
    fn add_session(&mut self, user: UserId) -> Result<(), BackendError>;

    /// Drop `user`'s session. Idempotent; unknown users are fine.
    fn remove_session(&mut self, user: &UserId) -> Result<(), BackendError>;

    /// Whether `user` currently has a session.
    fn has_session(&self, user: &UserId) -> Result<bool, BackendError>;
}
