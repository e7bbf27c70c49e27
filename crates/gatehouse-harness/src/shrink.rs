//! Counterexample shrinking.
//!
//! Given a failing operation sequence and a replayable predicate, reduce
//! the sequence while the failure still reproduces. Naive per-element
//! shrinking can leave garbage elements that do not contribute to the
//! failure, so short sequences get an exhaustive pass over all sublists in
//! increasing-size order, which guarantees a smallest reproducing sublist.
//! Longer sequences fall back to the heuristic (chunk removal, then
//! per-element removal to a fixpoint), which guarantees 1-minimality only.
//!
//! The predicate must be pure: it is handed a candidate sublist and has to
//! rebuild whatever state it replays against from scratch.

use crate::model::Op;

/// Longest sequence for which the exhaustive sublist pass runs.
///
/// Enumeration visits every sublist, so the bound keeps the candidate
/// count at 2^16. Beyond it only the heuristic passes apply.
pub const EXHAUSTIVE_BOUND: usize = 16;

/// Shrink a failing sequence to a locally-minimal reproducing sublist.
///
/// The result still reproduces and no single element can be removed from
/// it; at or below [`EXHAUSTIVE_BOUND`] (after heuristic shrinking) it is
/// a globally smallest reproducing sublist of the heuristic result.
pub fn minimize<F>(ops: Vec<Op>, mut reproduces: F) -> Vec<Op>
where
    F: FnMut(&[Op]) -> bool,
{
    let mut current = shrink_chunks(ops, &mut reproduces);
    current = shrink_elements(current, &mut reproduces);

    if current.len() <= EXHAUSTIVE_BOUND {
        if let Some(minimal) = smallest_sublist(&current, &mut reproduces) {
            return minimal;
        }
    }
    current
}

/// Remove progressively smaller chunks while the failure reproduces.
fn shrink_chunks<F>(mut ops: Vec<Op>, reproduces: &mut F) -> Vec<Op>
where
    F: FnMut(&[Op]) -> bool,
{
    let mut chunk = ops.len() / 2;
    while chunk >= 1 {
        let mut start = 0;
        while start + chunk <= ops.len() {
            let mut candidate = ops.clone();
            candidate.drain(start..start + chunk);
            if reproduces(&candidate) {
                ops = candidate;
                // Same position now holds the next chunk; retry it.
            } else {
                start += chunk;
            }
        }
        chunk /= 2;
    }
    ops
}

/// Remove single elements until no removal reproduces (1-minimal).
fn shrink_elements<F>(mut ops: Vec<Op>, reproduces: &mut F) -> Vec<Op>
where
    F: FnMut(&[Op]) -> bool,
{
    loop {
        let mut removed_any = false;
        let mut index = 0;
        while index < ops.len() {
            let mut candidate = ops.clone();
            candidate.remove(index);
            if reproduces(&candidate) {
                ops = candidate;
                removed_any = true;
            } else {
                index += 1;
            }
        }
        if !removed_any {
            return ops;
        }
    }
}

/// Smallest reproducing sublist, by exhaustive enumeration.
///
/// Sublists are visited in increasing-size order, ties broken by
/// enumeration order, so the result is deterministic.
fn smallest_sublist<F>(ops: &[Op], reproduces: &mut F) -> Option<Vec<Op>>
where
    F: FnMut(&[Op]) -> bool,
{
    debug_assert!(ops.len() <= EXHAUSTIVE_BOUND);
    let len = ops.len();

    for size in 0..len {
        for mask in 0u32..(1u32 << len) {
            if mask.count_ones() as usize != size {
                continue;
            }
            let candidate: Vec<Op> = (0..len)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| ops[i].clone())
                .collect();
            if reproduces(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}
