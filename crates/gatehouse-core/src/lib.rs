//! Gatehouse credential store.
//!
//! An in-memory user-credential store with four operations: `register`,
//! `login`, `logout`, and `access_secret`. Passwords exist in two
//! non-interchangeable forms: [`EnteredPassword`] (plaintext, transient,
//! never displayed outside test builds) and [`EncodedPassword`] (salted
//! one-way hash, the only form ever stored). Conversion is one-way through
//! [`EnteredPassword::encode`].
//!
//! Storage sits behind the [`CredentialBackend`] trait so the test harness
//! can substitute instrumented backends (fault injection, deliberately
//! buggy variants) without touching the operation logic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod credential;
pub mod error;
pub mod memory;
pub mod store;

pub use backend::{BackendError, BackendOp, CredentialBackend};
pub use credential::{Credentials, EncodedPassword, EnteredPassword, Secret, UserId};
pub use error::AuthError;
pub use memory::MemoryBackend;
pub use store::CredentialStore;
