//! Instrumented backends for the harness.
//!
//! [`FaultyBackend`] injects deterministic one-shot faults at any backend
//! primitive; the model oracle keeps its own copy of the armed points and
//! predicts exactly which call fails. [`OverwritingBackend`] reproduces a
//! known cross-user-overwrite bug and exists so the harness can demonstrate
//! divergence detection and shrinking on a real failure.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use gatehouse_core::{BackendError, BackendOp, CredentialBackend, EncodedPassword, UserId};

/// Wrapper that fails the next call to an armed backend primitive.
///
/// Faults are one-shot: an armed point is consumed by the first call that
/// hits it, which then returns [`BackendError`] without touching the inner
/// backend. Read-only primitives take `&self`, so the armed set lives in a
/// `RefCell` (the harness is single-threaded).
pub struct FaultyBackend<B> {
    inner: B,
    armed: RefCell<HashSet<BackendOp>>,
}

impl<B> FaultyBackend<B> {
    /// Wrap a backend with no faults armed.
    pub fn new(inner: B) -> Self {
        Self { inner, armed: RefCell::new(HashSet::new()) }
    }

    /// Arm a one-shot fault for the given primitive.
    pub fn arm(&mut self, op: BackendOp) {
        self.armed.borrow_mut().insert(op);
    }

    /// The wrapped backend, bypassing fault injection. Used for state
    /// probes that must not consume armed points.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    fn trip(&self, op: BackendOp) -> Result<(), BackendError> {
        if self.armed.borrow_mut().remove(&op) {
            return Err(BackendError { op });
        }
        Ok(())
    }
}

impl<B: CredentialBackend> CredentialBackend for FaultyBackend<B> {
    fn insert_user(
        &mut self,
        user: UserId,
        password: EncodedPassword,
    ) -> Result<(), BackendError> {
        self.trip(BackendOp::InsertUser)?;
        self.inner.insert_user(user, password)
    }

    fn fetch_user(&self, user: &UserId) -> Result<Option<EncodedPassword>, BackendError> {
        self.trip(BackendOp::FetchUser)?;
        self.inner.fetch_user(user)
    }

    fn add_session(&mut self, user: UserId) -> Result<(), BackendError> {
        self.trip(BackendOp::AddSession)?;
        self.inner.add_session(user)
    }

    fn remove_session(&mut self, user: &UserId) -> Result<(), BackendError> {
        self.trip(BackendOp::RemoveSession)?;
        self.inner.remove_session(user)
    }

    fn has_session(&self, user: &UserId) -> Result<bool, BackendError> {
        self.trip(BackendOp::HasSession)?;
        self.inner.has_session(user)
    }
}

/// How many registered users the buggy backend tolerates before a new
/// insertion also clobbers an existing entry.
pub const OVERWRITE_THRESHOLD: usize = 4;

/// Backend with a deliberate cross-user-overwrite bug.
///
/// Once [`OVERWRITE_THRESHOLD`] users are registered, each further
/// insertion additionally overwrites the FIRST existing entry (in
/// identifier order, so replays are deterministic) with the new user's
/// password. A correct backend keys strictly by identifier; this one is
/// used by tests to prove that the paired run diverges and that the
/// shrinker reduces the divergence to a minimal sequence.
#[derive(Default)]
pub struct OverwritingBackend {
    users: BTreeMap<UserId, EncodedPassword>,
    sessions: HashSet<UserId>,
}

impl OverwritingBackend {
    /// Create an empty buggy backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialBackend for OverwritingBackend {
    fn insert_user(
        &mut self,
        user: UserId,
        password: EncodedPassword,
    ) -> Result<(), BackendError> {
        if self.users.len() >= OVERWRITE_THRESHOLD {
            if let Some(victim) = self.users.keys().next().cloned() {
                self.users.insert(victim, password.clone());
            }
        }
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
    use gatehouse_core::MemoryBackend;

    fn user(name: &str) -> UserId {
        UserId::parse(name).unwrap()
    }

    fn encoded(raw: &str) -> EncodedPassword {
        gatehouse_core::EnteredPassword::new(raw).encode()
    }

    #[test]
    fn armed_fault_fires_once_then_clears() {
        let mut backend = FaultyBackend::new(MemoryBackend::new());
        backend.arm(BackendOp::HasSession);

        let err = backend.has_session(&user("Alice")).unwrap_err();
        assert_eq!(err.op, BackendOp::HasSession);
        assert!(!backend.has_session(&user("Alice")).unwrap());
    }

    #[test]
    fn faults_do_not_reach_the_inner_backend() {
        let mut backend = FaultyBackend::new(MemoryBackend::new());
        backend.arm(BackendOp::InsertUser);

        assert!(backend.insert_user(user("Alice"), encoded("pw")).is_err());
        assert_eq!(backend.inner().user_count(), 0);
    }

    #[test]
    fn overwriting_backend_clobbers_first_user_at_threshold() {
        let mut backend = OverwritingBackend::new();
        let names = ["Alice", "Bob", "Carol", "David"];
        for name in names {
            backend.insert_user(user(name), encoded(name)).unwrap();
        }
        let alice_pw = gatehouse_core::EnteredPassword::new("Alice");
        let stored = backend.fetch_user(&user("Alice")).unwrap().unwrap();
        assert!(stored.verify(&alice_pw));

        backend.insert_user(user("Erin"), encoded("Erin")).unwrap();
        let stored = backend.fetch_user(&user("Alice")).unwrap().unwrap();
        assert!(!stored.verify(&alice_pw), "Alice's stored password should have been clobbered");
        assert!(stored.verify(&gatehouse_core::EnteredPassword::new("Erin")));
    }
}
