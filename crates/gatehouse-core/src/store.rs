//! The four store operations.
//!
//! All operations parse their boundary input first; a parse failure mutates
//! nothing. Backend failures propagate as [`AuthError::Backend`] and leave
//! state exactly as the failing backend call left it (the backend contract
//! says: unchanged).

use crate::backend::CredentialBackend;
use crate::credential::{Credentials, EnteredPassword, Secret, UserId};
use crate::error::AuthError;
use crate::memory::MemoryBackend;

/// Credential store driving a [`CredentialBackend`].
pub struct CredentialStore<B> {
    backend: B,
}

impl CredentialStore<MemoryBackend> {
    /// Store over a fresh, empty in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: CredentialBackend> CredentialStore<B> {
    /// Store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the underlying backend (test instrumentation).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Register a new user.
    ///
    /// Fails with [`AuthError::AlreadyRegistered`] if the identifier
    /// exists. On success the password is one-way encoded and stored keyed
    /// strictly by the identifier.
    pub fn register(
        &mut self,
        user_id: &str,
        password: &EnteredPassword,
    ) -> Result<(), AuthError> {
        let user = UserId::parse(user_id)?;
        if self.backend.fetch_user(&user)?.is_some() {
            tracing::debug!("register rejected, identifier taken: {}", user);
            return Err(AuthError::AlreadyRegistered { user });
        }
        self.backend.insert_user(user.clone(), password.encode())?;
        tracing::debug!("registered: {}", user);
        Ok(())
    }

    /// Attempt a login with a combined `identifier:secret` credential.
    ///
    /// Returns `Ok(true)` and establishes a session iff the identifier is
    /// registered and the password verifies against the stored hash.
    /// Unknown identifiers and wrong passwords are `Ok(false)`, a denial
    /// rather than an error, and leave any existing session untouched.
    pub fn login(&mut self, credentials: &str) -> Result<bool, AuthError> {
        let (user, password) = Credentials::parse(credentials)?.into_parts();
        let Some(stored) = self.backend.fetch_user(&user)? else {
            tracing::trace!("login denied, not registered: {}", user);
            return Ok(false);
        };
        if !stored.verify(&password) {
            tracing::trace!("login denied, password mismatch: {}", user);
            return Ok(false);
        }
        self.backend.add_session(user.clone())?;
        tracing::debug!("login accepted: {}", user);
        Ok(true)
    }

    /// Drop the user's session, if any. Idempotent; logging out an
    /// unknown or logged-out user is not an error.
    pub fn logout(&mut self, user_id: &str) -> Result<(), AuthError> {
        let user = UserId::parse(user_id)?;
        self.backend.remove_session(&user)?;
        tracing::debug!("logged out: {}", user);
        Ok(())
    }

    /// The user's secret, available only while a session is live.
    pub fn access_secret(&self, user_id: &str) -> Result<Secret, AuthError> {
        let user = UserId::parse(user_id)?;
        if self.backend.has_session(&user)? {
            Ok(Secret::for_user(&user))
        } else {
            tracing::trace!("secret access denied: {}", user);
            Err(AuthError::NotAuthenticated { user })
        }
    }
}
