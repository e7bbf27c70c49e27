//! Paired execution of real store and model oracle.
//!
//! [`StoreRunner`] drives a real [`CredentialStore`] through the abstract
//! operation alphabet, translating typed results into [`OpOutcome`]s.
//! [`run_paired_with`] applies a sequence to both the runner and a fresh
//! [`ModelOracle`] and reports the first pointwise disagreement.

use std::collections::HashMap;

use gatehouse_core::{
    AuthError, CredentialBackend, CredentialStore, EnteredPassword, MemoryBackend,
};

use crate::fault::FaultyBackend;
use crate::model::{ModelOracle, ModelUserId, Op, OpError, OpOutcome};
use crate::model::operation::{WRONG_PASSWORD, password_text, user_name};

/// Drives the real credential store through abstract operations.
///
/// Tracks the plaintext of successful registrations so that
/// `LoginCorrectPassword` can present the right credential. Users that
/// never registered get the placeholder password, mirroring the oracle.
pub struct StoreRunner<B: CredentialBackend> {
    store: CredentialStore<FaultyBackend<B>>,
    passwords: HashMap<&'static str, String>,
}

impl StoreRunner<MemoryBackend> {
    /// Runner over the correct in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: CredentialBackend> StoreRunner<B> {
    /// Runner over the given backend, wrapped for fault injection.
    pub fn new(backend: B) -> Self {
        Self { store: CredentialStore::new(FaultyBackend::new(backend)), passwords: HashMap::new() }
    }

    /// Apply one operation to the real store.
    pub fn apply(&mut self, op: &Op) -> OpOutcome {
        match op {
            Op::Register { user, password } => {
                let name = user_name(*user);
                let plaintext = password_text(*password);
                match self.store.register(name, &EnteredPassword::new(plaintext.clone())) {
                    Ok(()) => {
                        self.passwords.insert(name, plaintext);
                        OpOutcome::Ok
                    },
                    Err(err) => outcome_from_err(err),
                }
            },
            Op::LoginCorrectPassword { user } => {
                let name = user_name(*user);
                let plaintext =
                    self.passwords.get(name).cloned().unwrap_or_else(|| WRONG_PASSWORD.to_string());
                self.login(name, &plaintext)
            },
            Op::LoginWrongPassword { user } => self.login(user_name(*user), WRONG_PASSWORD),
            Op::Logout { user } => match self.store.logout(user_name(*user)) {
                Ok(()) => OpOutcome::Ok,
                Err(err) => outcome_from_err(err),
            },
            Op::AccessSecret { user } => match self.store.access_secret(user_name(*user)) {
                Ok(secret) => OpOutcome::Granted(secret.to_string()),
                Err(err) => outcome_from_err(err),
            },
            Op::Fail { point } => {
                self.store.backend_mut().arm(point.backend_op());
                OpOutcome::Armed
            },
        }
    }

    fn login(&mut self, name: &str, plaintext: &str) -> OpOutcome {
        match self.store.login(&format!("{name}:{plaintext}")) {
            Ok(true) => OpOutcome::Accepted,
            Ok(false) => OpOutcome::Denied,
            Err(err) => outcome_from_err(err),
        }
    }

    /// Whether the real store currently holds a session for this user.
    ///
    /// Probes the inner backend directly so the check can never consume an
    /// armed fault point.
    pub fn has_live_session(&self, user: ModelUserId) -> bool {
        gatehouse_core::UserId::parse(user_name(user))
            .ok()
            .and_then(|id| self.store.backend().inner().has_session(&id).ok())
            .unwrap_or(false)
    }
}

fn outcome_from_err(err: AuthError) -> OpOutcome {
    let kind = match err {
        AuthError::AlreadyRegistered { .. } => OpError::AlreadyRegistered,
        AuthError::NotAuthenticated { .. } => OpError::NotAuthenticated,
        AuthError::MalformedCredentials { .. } => OpError::Malformed,
        AuthError::Backend(_) => OpError::BackendFault,
    };
    OpOutcome::Error(kind)
}

/// First disagreement between model and real store in a paired run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the diverging operation.
    pub index: usize,
    /// The operation at that index.
    pub op: Op,
    /// What the model produced.
    pub model: OpOutcome,
    /// What the real store produced.
    pub store: OpOutcome,
}

/// Replay a sequence against the correct in-memory store and the oracle.
pub fn run_paired(ops: &[Op]) -> Option<Divergence> {
    run_paired_with(MemoryBackend::new(), ops)
}

/// Replay a sequence against a store over `backend` and a fresh oracle,
/// returning the first pointwise disagreement.
pub fn run_paired_with<B: CredentialBackend>(backend: B, ops: &[Op]) -> Option<Divergence> {
    let mut runner = StoreRunner::new(backend);
    let mut model = ModelOracle::new();

    for (index, op) in ops.iter().enumerate() {
        let store_outcome = runner.apply(op);
        let model_outcome = model.apply(op);
        if store_outcome != model_outcome {
            return Some(Divergence {
                index,
                op: op.clone(),
                model: model_outcome,
                store: store_outcome,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FaultPoint;

    #[test]
    fn correct_store_agrees_on_a_simple_run() {
        let ops = vec![
            Op::Register { user: 0, password: 1 },
            Op::LoginCorrectPassword { user: 0 },
            Op::AccessSecret { user: 0 },
            Op::LoginWrongPassword { user: 0 },
            Op::AccessSecret { user: 0 },
            Op::Logout { user: 0 },
            Op::AccessSecret { user: 0 },
        ];
        assert_eq!(run_paired(&ops), None);
    }

    #[test]
    fn correct_store_agrees_under_faults() {
        let ops = vec![
            Op::Fail { point: FaultPoint::FetchUser },
            Op::Register { user: 0, password: 1 },
            Op::Register { user: 0, password: 1 },
            Op::Fail { point: FaultPoint::AddSession },
            Op::LoginCorrectPassword { user: 0 },
            Op::AccessSecret { user: 0 },
            Op::LoginCorrectPassword { user: 0 },
            Op::AccessSecret { user: 0 },
        ];
        assert_eq!(run_paired(&ops), None);
    }

    #[test]
    fn session_probe_matches_model() {
        let mut runner = StoreRunner::in_memory();
        let mut model = ModelOracle::new();
        let ops = [
            Op::Register { user: 2, password: 9 },
            Op::LoginCorrectPassword { user: 2 },
        ];
        for op in &ops {
            runner.apply(op);
            model.apply(op);
        }
        assert!(runner.has_live_session(2));
        assert_eq!(runner.has_live_session(2), model.is_logged_in(2));
    }
}
