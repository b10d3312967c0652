//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible tournaments. A generator built from
//! a history depends only on the tournament seed, the drawing strategy, its
//! seat and the moves played so far, which keeps `next_move` a pure function.

use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::history::HistoryView;
use crate::Move;

const GOLDEN_GAMMA: u64 = 0x9e3779b97f4a7c15;
const STREAM_MIX: u64 = 0x517cc1b727220a95;

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a seed and stream index
    pub fn new(seed: u64, stream: u32) -> Self {
        let state = seed ^ (stream as u64).wrapping_mul(STREAM_MIX);

        // xorshift never leaves the all-zero state
        let state = if state == 0 { GOLDEN_GAMMA } else { state };

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Create an RNG on `stream` whose seed folds in the tournament seed
    /// and every move in `view`
    pub fn from_history(seed: u64, stream: u32, view: HistoryView<'_>) -> Self {
        let mut state = mix(seed ^ view.len() as u64);
        for round in view.rounds() {
            let code = move_code(round.mine) << 1 | move_code(round.theirs);
            state = mix(state ^ code.wrapping_add(1).wrapping_mul(GOLDEN_GAMMA));
        }
        Self::new(state, stream)
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value 0-99 (for percentage checks)
    pub fn next_percent(&mut self) -> u8 {
        (self.next_u32() % 100) as u8
    }
}

fn move_code(m: Move) -> u64 {
    match m {
        Move::Cooperate => 0,
        Move::Defect => 1,
    }
}

// splitmix64 finaliser
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Where randomised strategies draw from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomness {
    /// Re-seeded on every call from the seed and the full history
    Reproducible { seed: u64 },
    /// Thread-local OS-seeded generator; runs are not repeatable
    Entropy,
}

impl Default for Randomness {
    fn default() -> Self {
        Randomness::Reproducible { seed: 0 }
    }
}

impl Randomness {
    /// Draw a percentage in 0..100 on `stream`, which identifies the
    /// drawing strategy and its seat
    pub fn draw_percent(&self, stream: u32, view: HistoryView<'_>) -> u8 {
        match self {
            Randomness::Reproducible { seed } => {
                SeededRng::from_history(*seed, stream, view).next_percent()
            }
            Randomness::Entropy => rand::rng().random_range(0..100u8),
        }
    }

    pub fn is_reproducible(&self) -> bool {
        matches!(self, Randomness::Reproducible { .. })
    }
}
