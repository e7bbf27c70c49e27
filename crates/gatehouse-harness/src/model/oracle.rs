//! Reference model for the credential store.
//!
//! A deliberately simple implementation of the same four operations,
//! independent of the store's hashing internals: it stores and compares
//! PLAINTEXT passwords. That is acceptable only because the model never
//! leaves the harness. It serves as the oracle against which the real
//! store is verified.
//!
//! Per user the model walks the state machine
//! `Unregistered -> Registered -> {LoggedOut, LoggedIn}`; `AccessSecret`
//! is an observation, not a transition.
//!
//! The oracle also predicts injected backend faults: it keeps its own copy
//! of the armed one-shot fault points and replays the store's documented
//! backend call sequences (see `gatehouse_core::backend`) to decide which
//! call consumes which point.

use std::collections::{BTreeMap, HashSet};

use gatehouse_core::{Secret, UserId};

use super::operation::{
    FaultPoint, ModelUserId, Op, OpError, OpOutcome, WRONG_PASSWORD, password_text, user_name,
};

/// Per-user model state. Presence in the map means "registered".
#[derive(Debug, Clone)]
struct ModelUser {
    /// Registered plaintext password (test-only, never exposed).
    password: String,
    /// Whether a session is live.
    logged_in: bool,
}

/// The reference implementation.
///
/// Keyed by identifier string, not by raw `ModelUserId`: distinct ids that
/// alias the same name table entry are the same user, exactly as the real
/// store sees them.
#[derive(Debug, Clone, Default)]
pub struct ModelOracle {
    users: BTreeMap<&'static str, ModelUser>,
    armed: HashSet<FaultPoint>,
}

impl ModelOracle {
    /// Fresh, empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one operation, returning the outcome the real store must
    /// match.
    pub fn apply(&mut self, op: &Op) -> OpOutcome {
        match op {
            Op::Register { user, password } => self.register(user_name(*user), *password),
            Op::LoginCorrectPassword { user } => {
                let name = user_name(*user);
                // The registered password, or the placeholder for users
                // that never registered (the runner does the same).
                let entered = self
                    .users
                    .get(name)
                    .map_or_else(|| WRONG_PASSWORD.to_string(), |u| u.password.clone());
                self.login(name, &entered)
            },
            Op::LoginWrongPassword { user } => {
                self.login(user_name(*user), WRONG_PASSWORD)
            },
            Op::Logout { user } => self.logout(user_name(*user)),
            Op::AccessSecret { user } => self.access_secret(user_name(*user)),
            Op::Fail { point } => {
                self.armed.insert(*point);
                OpOutcome::Armed
            },
        }
    }

    fn register(&mut self, name: &'static str, password: u8) -> OpOutcome {
        if self.trip(FaultPoint::FetchUser) {
            return OpOutcome::Error(OpError::BackendFault);
        }
        if self.users.contains_key(name) {
            return OpOutcome::Error(OpError::AlreadyRegistered);
        }
        if self.trip(FaultPoint::InsertUser) {
            return OpOutcome::Error(OpError::BackendFault);
        }
        self.users
            .insert(name, ModelUser { password: password_text(password), logged_in: false });
        OpOutcome::Ok
    }

    fn login(&mut self, name: &'static str, entered: &str) -> OpOutcome {
        if self.trip(FaultPoint::FetchUser) {
            return OpOutcome::Error(OpError::BackendFault);
        }
        let Some(user) = self.users.get(name) else {
            return OpOutcome::Denied;
        };
        if user.password != entered {
            // Denial must not disturb an existing session.
            return OpOutcome::Denied;
        }
        if self.trip(FaultPoint::AddSession) {
            return OpOutcome::Error(OpError::BackendFault);
        }
        if let Some(user) = self.users.get_mut(name) {
            user.logged_in = true;
        }
        OpOutcome::Accepted
    }

    fn logout(&mut self, name: &'static str) -> OpOutcome {
        if self.trip(FaultPoint::RemoveSession) {
            return OpOutcome::Error(OpError::BackendFault);
        }
        if let Some(user) = self.users.get_mut(name) {
            user.logged_in = false;
        }
        OpOutcome::Ok
    }

    fn access_secret(&mut self, name: &'static str) -> OpOutcome {
        if self.trip(FaultPoint::HasSession) {
            return OpOutcome::Error(OpError::BackendFault);
        }
        if self.users.get(name).is_some_and(|u| u.logged_in) {
            // `UserId::parse` cannot fail for the fixed name table.
            match UserId::parse(name) {
                Ok(user) => OpOutcome::Granted(Secret::for_user(&user).to_string()),
                Err(_) => OpOutcome::Error(OpError::Malformed),
            }
        } else {
            OpOutcome::Error(OpError::NotAuthenticated)
        }
    }

    /// Consume an armed fault point, if present.
    fn trip(&mut self, point: FaultPoint) -> bool {
        self.armed.remove(&point)
    }

    /// Whether the model considers this user registered.
    pub fn is_registered(&self, user: ModelUserId) -> bool {
        self.users.contains_key(user_name(user))
    }

    /// Whether the model considers this user logged in.
    pub fn is_logged_in(&self, user: ModelUserId) -> bool {
        self.users.get(user_name(user)).is_some_and(|u| u.logged_in)
    }

    /// Number of registered users.
    pub fn registered_count(&self) -> usize {
        self.users.len()
    }

    /// Number of live sessions. Always bounded by `registered_count`;
    /// sessions exist only for registered users by construction.
    pub fn session_count(&self) -> usize {
        self.users.values().filter(|u| u.logged_in).count()
    }
}
