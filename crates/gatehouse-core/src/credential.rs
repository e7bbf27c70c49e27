//! Credential types and boundary parsing.
//!
//! The combined credential form at the boundary is `identifier:secret`
//! (Basic-Auth shape). Parsing splits on the FIRST colon; identifiers may
//! therefore never contain one, and [`UserId::parse`] rejects them before
//! any lookup or mutation happens.
//!
//! # Password forms
//!
//! - [`EnteredPassword`]: plaintext as received from the caller. Transient,
//!   never persisted, never printable in non-test builds.
//! - [`EncodedPassword`]: salted one-way hash. The only form a backend ever
//!   sees. Verification re-hashes the entered password; plaintext is never
//!   compared to plaintext.

use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// Reserved separator between identifier and secret in the combined form.
pub const CREDENTIAL_SEPARATOR: char = ':';

/// Opaque user identifier, unique within a store.
///
/// Constructed only through [`UserId::parse`], which enforces the boundary
/// rules (non-empty, no reserved separator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// Parse an identifier from its boundary representation.
    ///
    /// Rejects empty identifiers and identifiers containing the reserved
    /// `:` separator with [`AuthError::MalformedCredentials`].
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        if raw.is_empty() {
            return Err(AuthError::MalformedCredentials {
                reason: "empty identifier".to_string(),
            });
        }
        if raw.contains(CREDENTIAL_SEPARATOR) {
            return Err(AuthError::MalformedCredentials {
                reason: format!("identifier contains reserved '{CREDENTIAL_SEPARATOR}'"),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password as received from a caller.
///
/// Exists only transiently during `register`/`login`. Deliberately has no
/// `Debug`/`Display` outside test builds so it cannot leak through logs or
/// error messages.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
pub struct EnteredPassword(String);

impl EnteredPassword {
    /// Wrap a plaintext password.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// One-way conversion to the stored form.
    ///
    /// This is the only path from entered to encoded; there is no inverse.
    pub fn encode(&self) -> EncodedPassword {
        let salt: [u8; SALT_LEN] = rand::random();
        EncodedPassword { salt, digest: digest(&salt, &self.0) }
    }
}

const SALT_LEN: usize = 16;

fn digest(salt: &[u8; SALT_LEN], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Salted one-way hash of a password. The only persisted password form.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
pub struct EncodedPassword {
    salt: [u8; SALT_LEN],
    digest: [u8; 32],
}

impl EncodedPassword {
    /// Check an entered password against this stored hash.
    pub fn verify(&self, entered: &EnteredPassword) -> bool {
        digest(&self.salt, &entered.0) == self.digest
    }
}

/// Parsed form of the combined `identifier:secret` boundary string.
#[cfg_attr(test, derive(Debug))]
pub struct Credentials {
    user: UserId,
    password: EnteredPassword,
}

impl Credentials {
    /// Parse a combined credential string, splitting on the first colon.
    ///
    /// Strings without a separator are rejected before any state is
    /// touched; the secret portion may contain further colons.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let Some((identifier, secret)) = raw.split_once(CREDENTIAL_SEPARATOR) else {
            return Err(AuthError::MalformedCredentials {
                reason: format!("missing '{CREDENTIAL_SEPARATOR}' separator"),
            });
        };
        Ok(Self { user: UserId::parse(identifier)?, password: EnteredPassword::new(secret) })
    }

    /// Split into identifier and entered password.
    pub fn into_parts(self) -> (UserId, EnteredPassword) {
        (self.user, self.password)
    }
}

/// Per-user secret returned by a successful `access_secret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// The secret belonging to `user`.
    pub fn for_user(user: &UserId) -> Self {
        Self(format!("secrets for user {user}"))
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_separator() {
        let err = UserId::parse("alice:bob").unwrap_err();
        assert!(matches!(err, AuthError::MalformedCredentials { .. }));
    }

    #[test]
    fn user_id_rejects_empty() {
        let err = UserId::parse("").unwrap_err();
        assert!(matches!(err, AuthError::MalformedCredentials { .. }));
    }

    #[test]
    fn credentials_split_on_first_colon() {
        let (user, password) = Credentials::parse("alice:pw:with:colons").unwrap().into_parts();
        assert_eq!(user.as_str(), "alice");
        assert_eq!(password, EnteredPassword::new("pw:with:colons"));
    }

    #[test]
    fn credentials_without_separator_are_malformed() {
        let err = Credentials::parse("alice").unwrap_err();
        assert!(matches!(err, AuthError::MalformedCredentials { .. }));
    }

    #[test]
    fn credentials_with_empty_identifier_are_malformed() {
        let err = Credentials::parse(":pw").unwrap_err();
        assert!(matches!(err, AuthError::MalformedCredentials { .. }));
    }

    #[test]
    fn encode_then_verify_accepts_same_password() {
        let entered = EnteredPassword::new("pw1");
        let encoded = entered.encode();
        assert!(encoded.verify(&entered));
    }

    #[test]
    fn verify_rejects_different_password() {
        let encoded = EnteredPassword::new("pw1").encode();
        assert!(!encoded.verify(&EnteredPassword::new("pw2")));
    }

    #[test]
    fn encoding_is_salted() {
        let entered = EnteredPassword::new("pw1");
        // Two encodings of the same password differ in salt and digest.
        assert_ne!(entered.encode(), entered.encode());
    }
}
