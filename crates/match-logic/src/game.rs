//! Match execution engine

use serde::{Deserialize, Serialize};
use crate::history::History;
use crate::random::Randomness;
use crate::strategy::Strategy;
use crate::{payoff, Move, MAX_ROUND_SUM, MIN_ROUND_SUM};

/// Side of the game a strategy is playing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    #[default]
    A,
    B,
}

impl Seat {
    pub fn index(self) -> u32 {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }
}

/// Settings every strategy can see while deciding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContext {
    /// Rounds per game
    pub game_length: u32,
    pub randomness: Randomness,
    /// Keeps the two players' random draws apart
    pub seat: Seat,
}

impl GameContext {
    pub fn new(game_length: u32) -> Self {
        Self {
            game_length,
            randomness: Randomness::default(),
            seat: Seat::default(),
        }
    }

    pub fn with_randomness(mut self, randomness: Randomness) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn for_seat(mut self, seat: Seat) -> Self {
        self.seat = seat;
        self
    }
}

/// Result of a single round
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    pub score_a: u8,
    pub score_b: u8,
    pub cumulative_a: u64,
    pub cumulative_b: u64,
}

/// Result of a complete match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundResult>,
    pub total_score_a: u64,
    pub total_score_b: u64,
    pub round_count: u32,
}

impl MatchResult {
    /// Combined score of any game lies between all-defect and
    /// all-cooperate totals
    pub fn within_combined_bounds(&self) -> bool {
        let rounds = self.round_count as u64;
        let combined = self.total_score_a + self.total_score_b;
        (MIN_ROUND_SUM * rounds..=MAX_ROUND_SUM * rounds).contains(&combined)
    }
}

/// Play `ctx.game_length` rounds and return the history from A's side.
///
/// Each strategy only sees rounds strictly before the one being decided.
/// B sees the same history with the roles swapped.
pub fn play(strategy_a: &Strategy, strategy_b: &Strategy, ctx: &GameContext) -> History {
    let mut history = History::with_capacity(ctx.game_length as usize);
    let ctx_a = ctx.for_seat(Seat::A);
    let ctx_b = ctx.for_seat(Seat::B);

    for _ in 0..ctx.game_length {
        let view = history.view();
        let move_a = strategy_a.next_move(view, &ctx_a);
        let move_b = strategy_b.next_move(view.swap(), &ctx_b);
        history.record(move_a, move_b);
    }

    history
}

/// Run a complete match between two strategies
///
/// # Returns
/// Complete match result with round-by-round details
pub fn run_match(strategy_a: &Strategy, strategy_b: &Strategy, ctx: &GameContext) -> MatchResult {
    let history = play(strategy_a, strategy_b, ctx);

    let mut rounds = Vec::with_capacity(history.len());
    let mut total_a = 0u64;
    let mut total_b = 0u64;

    for (round, played) in (1..).zip(history.rounds()) {
        let (score_a, score_b) = payoff(played.mine, played.theirs);
        total_a += score_a as u64;
        total_b += score_b as u64;

        rounds.push(RoundResult {
            round,
            move_a: played.mine,
            move_b: played.theirs,
            score_a,
            score_b,
            cumulative_a: total_a,
            cumulative_b: total_b,
        });
    }

    MatchResult {
        round_count: ctx.game_length,
        rounds,
        total_score_a: total_a,
        total_score_b: total_b,
    }
}
