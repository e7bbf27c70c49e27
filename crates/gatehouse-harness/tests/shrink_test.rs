//! Divergence detection and shrinking against a known-buggy store.
//!
//! The buggy backend clobbers an existing user's stored password once a
//! fifth user registers. The paired run must catch the resulting
//! divergence, and the shrinker must reduce a padded failing sequence to
//! the minimal reproduction: five registrations plus one login of the
//! clobbered user.

use gatehouse_harness::{
    FaultPoint, Op, OpOutcome, OverwritingBackend, minimize, run_paired_with,
};

fn register(user: u8) -> Op {
    Op::Register { user, password: user }
}

/// The minimal failing case: four registrations reach the buggy backend's
/// threshold, the fifth clobbers user 0 ("Alice", first in identifier
/// order), and Alice's own login is then denied.
fn minimal_failure() -> Vec<Op> {
    vec![
        register(0),
        register(1),
        register(2),
        register(3),
        register(4),
        Op::LoginCorrectPassword { user: 0 },
    ]
}

fn reproduces(ops: &[Op]) -> bool {
    run_paired_with(OverwritingBackend::new(), ops).is_some()
}

#[test]
fn paired_run_catches_the_overwrite_bug() {
    let divergence = run_paired_with(OverwritingBackend::new(), &minimal_failure())
        .expect("the buggy backend must diverge from the model");

    assert_eq!(divergence.index, 5);
    assert_eq!(divergence.op, Op::LoginCorrectPassword { user: 0 });
    assert_eq!(divergence.model, OpOutcome::Accepted);
    assert_eq!(divergence.store, OpOutcome::Denied);
}

#[test]
fn correct_runs_below_threshold_do_not_diverge() {
    // The bug only fires at the fifth registration; up to four users the
    // buggy backend is indistinguishable from a correct one.
    let ops = vec![
        register(0),
        register(1),
        register(2),
        register(3),
        Op::LoginCorrectPassword { user: 0 },
        Op::AccessSecret { user: 0 },
    ];
    assert_eq!(run_paired_with(OverwritingBackend::new(), &ops), None);
}

#[test]
fn shrinker_reduces_padded_failure_to_the_minimal_case() {
    // Interleave garbage that contributes nothing to the failure.
    let ops = vec![
        Op::AccessSecret { user: 6 },
        register(0),
        Op::LoginWrongPassword { user: 1 },
        register(1),
        Op::Logout { user: 0 },
        register(2),
        Op::Fail { point: FaultPoint::RemoveSession },
        Op::Logout { user: 5 },
        register(3),
        Op::LoginWrongPassword { user: 3 },
        register(4),
        Op::LoginCorrectPassword { user: 0 },
    ];
    assert!(reproduces(&ops));

    let minimal = minimize(ops, reproduces);
    assert_eq!(minimal, minimal_failure());
}

#[test]
fn shrunk_sequence_is_one_minimal() {
    let minimal = minimize(minimal_failure(), reproduces);
    assert!(reproduces(&minimal));

    for index in 0..minimal.len() {
        let mut candidate = minimal.clone();
        candidate.remove(index);
        assert!(
            !reproduces(&candidate),
            "element {index} of the shrunk sequence does not contribute to the failure"
        );
    }
}
