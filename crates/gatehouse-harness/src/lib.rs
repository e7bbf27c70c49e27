//! Model-based testing harness for the gatehouse credential store.
//!
//! The harness generates finite sequences of abstract operations, applies
//! each to both the real store and a simplified reference model, and
//! checks that their outcomes agree pointwise after every step. On
//! disagreement, the shrinker reduces the sequence to a minimal failing
//! case.
//!
//! Fault injection is part of the alphabet: `Op::Fail` arms a one-shot
//! backend fault that both sides must account for identically.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fault;
pub mod generator;
pub mod model;
pub mod runner;
pub mod shrink;

pub use fault::{FaultyBackend, OVERWRITE_THRESHOLD, OverwritingBackend};
pub use generator::{SequenceConfig, generate};
pub use model::{FaultPoint, ModelOracle, ModelUserId, Op, OpError, OpOutcome, PasswordSeed};
pub use runner::{Divergence, StoreRunner, run_paired, run_paired_with};
pub use shrink::{EXHAUSTIVE_BOUND, minimize};
