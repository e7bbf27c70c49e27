//! Seeded operation-sequence generation.
//!
//! Produces finite, bounded sequences of abstract operations from a seeded
//! `ChaCha8Rng`. The same seed always yields the same sequence, so any
//! failing run can be replayed exactly from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::{FaultPoint, Op};

/// Tunables for sequence generation.
#[derive(Debug, Clone, Copy)]
pub struct SequenceConfig {
    /// Maximum sequence length (inclusive).
    pub max_len: usize,
    /// How many distinct users operations draw from.
    pub num_users: u8,
    /// Percent chance (0-100) that a step arms a fault point.
    pub fault_percent: u8,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self { max_len: 48, num_users: 8, fault_percent: 8 }
    }
}

/// Generate a finite operation sequence from a seed.
pub fn generate(seed: u64, config: SequenceConfig) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let len = rng.gen_range(0..=config.max_len);

    (0..len).map(|_| next_op(&mut rng, config)).collect()
}

fn next_op(rng: &mut ChaCha8Rng, config: SequenceConfig) -> Op {
    if rng.gen_range(0..100u8) < config.fault_percent {
        let point = match rng.gen_range(0..5u8) {
            0 => FaultPoint::InsertUser,
            1 => FaultPoint::FetchUser,
            2 => FaultPoint::AddSession,
            3 => FaultPoint::RemoveSession,
            _ => FaultPoint::HasSession,
        };
        return Op::Fail { point };
    }

    let user = rng.gen_range(0..config.num_users);
    match rng.gen_range(0..5u8) {
        0 => Op::Register { user, password: rng.r#gen() },
        1 => Op::LoginCorrectPassword { user },
        2 => Op::LoginWrongPassword { user },
        3 => Op::Logout { user },
        _ => Op::AccessSecret { user },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let config = SequenceConfig::default();
        assert_eq!(generate(42, config), generate(42, config));
    }

    #[test]
    fn length_is_bounded() {
        let config = SequenceConfig { max_len: 10, ..SequenceConfig::default() };
        for seed in 0..50 {
            assert!(generate(seed, config).len() <= 10);
        }
    }

    #[test]
    fn different_seeds_eventually_differ() {
        let config = SequenceConfig::default();
        let first = generate(1, config);
        assert!((2..20).any(|seed| generate(seed, config) != first));
    }
}
