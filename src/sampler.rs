use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

// Odd multiplier, so distinct ranks always map to distinct seeds
const RANK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Where the run-level seed comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedStrategy {
    /// Read the wall clock once per run
    #[default]
    Clock,
    /// Reproducible runs
    Fixed(u64),
}

impl SeedStrategy {
    pub fn run_seed(self) -> u64 {
        match self {
            SeedStrategy::Fixed(seed) => seed,
            SeedStrategy::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default(),
        }
    }
}

/// Seed for one participant, derived from the run seed and its rank
pub fn participant_seed(run_seed: u64, rank: usize) -> u64 {
    run_seed.wrapping_add((rank as u64).wrapping_add(1).wrapping_mul(RANK_STRIDE))
}

pub fn participant_rng(run_seed: u64, rank: usize) -> StdRng {
    StdRng::seed_from_u64(participant_seed(run_seed, rank))
}

/// Throw `tosses` darts at the [-1, 1) square and count those landing on or inside the unit circle
pub fn play_darts<R: Rng + ?Sized>(tosses: u64, rng: &mut R) -> u64 {
    let mut inside = 0;

    for _ in 0..tosses {
        let x = rng.gen::<f64>() * 2.0 - 1.0;
        let y = rng.gen::<f64>() * 2.0 - 1.0;
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }

    inside
}
