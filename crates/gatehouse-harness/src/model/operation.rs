//! Operations for model-based testing.
//!
//! Operations represent all possible actions against the credential store.
//! They are generated randomly and applied to both the model oracle and
//! the real store, whose per-step outcomes must agree pointwise.
//!
//! Users are small indices into a fixed name table and passwords are
//! compact seeds expanded deterministically. This keeps generated cases
//! small and readable while still exercising the store; identifiers in the
//! table never contain the reserved colon, so generated runs stay on the
//! well-formed path (boundary rejection has its own direct tests).

use arbitrary::Arbitrary;
use gatehouse_core::BackendOp;

/// User identifier in the model: an index into [`TEST_USERS`].
pub type ModelUserId = u8;

/// Compact password seed, expanded by [`password_text`].
pub type PasswordSeed = u8;

/// Fixed pool of test identifiers (no colons, no control characters).
pub const TEST_USERS: &[&str] = &[
    "Alice", "Bob", "Carol", "David", "Erin", "Frank", "Greta", "Holger", "Isabelle", "Jacob",
    "Kate", "Larry", "Margaret", "Noah", "Olivia", "Paul", "Quinn", "Robert", "Susan", "Thomas",
    "Ursula", "Vincent", "Wanda", "Xavier", "Yvonne", "Zachary",
];

/// Password used by `LoginWrongPassword` and as the placeholder for
/// "correct" logins of users that were never registered.
pub const WRONG_PASSWORD: &str = "hunter2";

/// Map a model user id onto its identifier string.
pub fn user_name(user: ModelUserId) -> &'static str {
    TEST_USERS[user as usize % TEST_USERS.len()]
}

/// Expand a password seed to its deterministic plaintext.
///
/// Never collides with [`WRONG_PASSWORD`].
pub fn password_text(seed: PasswordSeed) -> String {
    format!("pw-{seed:03}")
}

/// Backend fault points the generator can arm.
///
/// Mirrors [`BackendOp`]; a separate enum so it can derive `Arbitrary`
/// without the core crate knowing about generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Arbitrary)]
pub enum FaultPoint {
    /// Fail the next `insert_user` call.
    InsertUser,
    /// Fail the next `fetch_user` call.
    FetchUser,
    /// Fail the next `add_session` call.
    AddSession,
    /// Fail the next `remove_session` call.
    RemoveSession,
    /// Fail the next `has_session` call.
    HasSession,
}

impl FaultPoint {
    /// The backend primitive this point fails.
    pub fn backend_op(self) -> BackendOp {
        match self {
            Self::InsertUser => BackendOp::InsertUser,
            Self::FetchUser => BackendOp::FetchUser,
            Self::AddSession => BackendOp::AddSession,
            Self::RemoveSession => BackendOp::RemoveSession,
            Self::HasSession => BackendOp::HasSession,
        }
    }
}

/// Abstract operations applied to both model and real store.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Op {
    /// Register a user with a fresh password.
    Register {
        /// User performing the registration.
        user: ModelUserId,
        /// Seed for the registered password.
        password: PasswordSeed,
    },

    /// Attempt a login with the user's registered password.
    ///
    /// For users that were never registered this degrades to a login with
    /// the placeholder password and must be denied.
    LoginCorrectPassword {
        /// User logging in.
        user: ModelUserId,
    },

    /// Attempt a login with a password that is not the user's.
    LoginWrongPassword {
        /// User whose identifier is presented.
        user: ModelUserId,
    },

    /// Log a user out. Idempotent, even for unregistered users.
    Logout {
        /// User logging out.
        user: ModelUserId,
    },

    /// Observe whether the user may read their secret. Not a transition.
    AccessSecret {
        /// User requesting the secret.
        user: ModelUserId,
    },

    /// Arm a one-shot backend fault at the given point.
    Fail {
        /// Which backend primitive fails next.
        point: FaultPoint,
    },
}

/// Pointwise-comparable outcome of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutcome {
    /// Register or logout succeeded.
    Ok,
    /// Login accepted; a session is live.
    Accepted,
    /// Login denied (unknown user or wrong password). Not an error.
    Denied,
    /// Secret access granted; carries the secret's display form.
    Granted(String),
    /// A fault point was armed.
    Armed,
    /// The operation failed with a typed error.
    Error(OpError),
}

/// Error category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    /// Registration of an identifier that already exists.
    AlreadyRegistered,
    /// Secret access without a live session.
    NotAuthenticated,
    /// Boundary string rejected before any state change.
    Malformed,
    /// An armed backend fault fired.
    BackendFault,
}

impl OpOutcome {
    /// Whether this outcome is an error (as opposed to a denial).
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
