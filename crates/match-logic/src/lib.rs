//! Match Logic for the Iterated Prisoner's Dilemma
//!
//! Core game logic for a round-robin tournament among a fixed roster of
//! strategies: moves and payoffs, per-player history, the strategy
//! catalogue, the game engine and the tournament report.

mod error;
mod history;
mod random;
mod strategy;
mod game;
mod pairing;
mod tournament;

pub use error::{MatchError, Result};
pub use history::{History, HistoryView, Round};
pub use random::{Randomness, SeededRng};
pub use strategy::{default_roster, Strategy};
pub use game::{play, run_match, GameContext, MatchResult, RoundResult, Seat};
pub use pairing::{calculate_match_count, round_robin_pairings};
pub use tournament::{Report, Standing, Tournament, TournamentConfig, DEFAULT_GAME_LENGTH};

use serde::{Deserialize, Serialize};

/// A move in the Prisoner's Dilemma
///
/// Lookback queries that fall outside the recorded history return `None`
/// instead of a move, so the "no move" case never equals either variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    pub fn opposite(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }
}

/// Smallest combined payoff of one round (mutual defection)
pub const MIN_ROUND_SUM: u64 = 2;
/// Largest combined payoff of one round (mutual cooperation)
pub const MAX_ROUND_SUM: u64 = 6;

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u8, u8) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (3, 3),
        (Move::Cooperate, Move::Defect) => (0, 5),
        (Move::Defect, Move::Cooperate) => (5, 0),
        (Move::Defect, Move::Defect) => (1, 1),
    }
}

/// Payoff for `mine` against a possibly absent opposing move.
/// An absent move scores nothing.
pub fn payoff_against(mine: Move, theirs: Option<Move>) -> u8 {
    theirs.map_or(0, |theirs| payoff(mine, theirs).0)
}
