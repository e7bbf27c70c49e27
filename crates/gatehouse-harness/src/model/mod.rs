//! Reference model for model-based testing.
//!
//! The model is a simplified implementation that captures the
//! SPECIFICATION of the credential store without the real hashing
//! internals. It serves as the oracle against which the real store is
//! verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Specification not implementation: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

mod oracle;
pub mod operation;

pub use operation::{FaultPoint, ModelUserId, Op, OpError, OpOutcome, PasswordSeed};
pub use oracle::ModelOracle;
