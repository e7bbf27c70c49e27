//! Fuzz target for model/store agreement
//!
//! Applies arbitrary operation sequences to both the real credential store
//! and the reference model and requires pointwise-equal outcomes.
//!
//! # Invariants
//!
//! - Real store and model NEVER diverge for any operation sequence
//! - Sessions only ever exist for registered users
//! - NEVER panic on any operation sequence

#![no_main]

use libfuzzer_sys::fuzz_target;

use gatehouse_harness::{Op, run_paired};

fuzz_target!(|ops: Vec<Op>| {
    if let Some(divergence) = run_paired(&ops) {
        panic!("model/store divergence: {divergence:?}");
    }
});
