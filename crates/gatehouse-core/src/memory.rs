//! In-memory backend.
//!
//! The only production backend: a user map plus a session set, re-created
//! empty per run. Nothing here can fail; the fallible trait surface exists
//! for instrumented test backends.

use std::collections::{HashMap, HashSet};

use crate::backend::{BackendError, CredentialBackend};
use crate::credential::{EncodedPassword, UserId};

/// In-memory credential storage.
///
/// Invariant: an identifier appears in `sessions` only if it appears in
/// `users`; the store only establishes sessions after a successful
/// password check against a registered user.
#[derive(Default)]
#[cfg_attr(test, derive(Debug))]
pub struct MemoryBackend {
    users: HashMap<UserId, EncodedPassword>,
    sessions: HashSet<UserId>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl CredentialBackend for MemoryBackend {
    fn insert_user(
        &mut self,
        user: UserId,
        password: EncodedPassword,
    ) -> Result<(), BackendError> {
        // Keyed strictly by the given identifier; other entries untouched.
        self.users.insert(user, password);
        Ok(())
    }

    fn fetch_user(&self, user: &UserId) -> Result<Option<EncodedPassword>, BackendError> {
        Ok(self.users.get(user).cloned())
    }

    fn add_session(&mut self, user: UserId) -> Result<(), BackendError> {
        self.sessions.insert(user);
        Ok(())
    }

    fn remove_session(&mut self, user: &UserId) -> Result<(), BackendError> {
        self.sessions.remove(user);
        Ok(())
    }

    fn has_session(&self, user: &UserId) -> Result<bool, BackendError> {
        Ok(self.sessions.contains(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::EnteredPassword;

    #[test]
    fn fetch_returns_what_insert_stored() {
        let mut backend = MemoryBackend::new();
        let user = UserId::parse("alice").unwrap();
        let encoded = EnteredPassword::new("pw1").encode();

        backend.insert_user(user.clone(), encoded.clone()).unwrap();
        assert_eq!(backend.fetch_user(&user).unwrap(), Some(encoded));
    }

    #[test]
    fn sessions_are_independent_of_users() {
        let mut backend = MemoryBackend::new();
        let user = UserId::parse("alice").unwrap();

        assert!(!backend.has_session(&user).unwrap());
        backend.add_session(user.clone()).unwrap();
        assert!(backend.has_session(&user).unwrap());
        backend.remove_session(&user).unwrap();
        assert!(!backend.has_session(&user).unwrap());
        // Removal of an absent session is a no-op.
        backend.remove_session(&user).unwrap();
    }
}
