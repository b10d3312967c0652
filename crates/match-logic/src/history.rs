//! Per-player move history
//!
//! A `History` records a game in progress from one player's point of view.
//! Moves are stored oldest first; every lookback is counted back from the
//! latest round, so `i = 1` is the most recent move.

use serde::{Deserialize, Serialize};
use crate::{payoff, Move};

/// One simultaneous exchange, seen by the owner of the history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub mine: Move,
    pub theirs: Move,
}

impl Round {
    pub fn new(mine: Move, theirs: Move) -> Self {
        Self { mine, theirs }
    }

    /// The same exchange from the other player's side
    pub fn swapped(self) -> Self {
        Self { mine: self.theirs, theirs: self.mine }
    }

    /// Owner's payoff for this round
    pub fn payoff(self) -> u8 {
        payoff(self.mine, self.theirs).0
    }
}

/// Owned record of both players' moves
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    mine: Vec<Move>,
    theirs: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self {
            mine: Vec::with_capacity(rounds),
            theirs: Vec::with_capacity(rounds),
        }
    }

    /// Append one round. Both sequences grow together.
    pub fn record(&mut self, mine: Move, theirs: Move) {
        self.mine.push(mine);
        self.theirs.push(theirs);
    }

    pub fn len(&self) -> usize {
        self.mine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mine.is_empty()
    }

    pub fn my_moves(&self) -> &[Move] {
        &self.mine
    }

    pub fn opponent_moves(&self) -> &[Move] {
        &self.theirs
    }

    pub fn view(&self) -> HistoryView<'_> {
        HistoryView { mine: &self.mine, theirs: &self.theirs }
    }

    /// Take the opponent's perspective without copying any moves
    pub fn swapped(mut self) -> Self {
        std::mem::swap(&mut self.mine, &mut self.theirs);
        self
    }

    pub fn my_move_at(&self, i: usize) -> Option<Move> {
        self.view().my_move_at(i)
    }

    pub fn opponent_move_at(&self, i: usize) -> Option<Move> {
        self.view().opponent_move_at(i)
    }

    /// Rounds in the order they were played
    pub fn rounds(&self) -> impl Iterator<Item = Round> + '_ {
        self.view().rounds()
    }

    /// Total payoff for the owner of this history
    pub fn score(&self) -> u64 {
        self.view().score()
    }
}

/// Borrowed history as seen by one of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryView<'a> {
    mine: &'a [Move],
    theirs: &'a [Move],
}

impl<'a> HistoryView<'a> {
    /// Empty view, as seen before the first round
    pub fn empty() -> Self {
        Self { mine: &[], theirs: &[] }
    }

    pub fn swap(self) -> Self {
        Self { mine: self.theirs, theirs: self.mine }
    }

    pub fn len(&self) -> usize {
        self.mine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mine.is_empty()
    }

    pub fn my_moves(&self) -> &'a [Move] {
        self.mine
    }

    pub fn opponent_moves(&self) -> &'a [Move] {
        self.theirs
    }

    pub fn my_move_at(&self, i: usize) -> Option<Move> {
        lookback(self.mine, i)
    }

    /// Opponent's move `i` rounds ago (`1` = most recent).
    /// `None` when `i` is zero or reaches past the first round.
    pub fn opponent_move_at(&self, i: usize) -> Option<Move> {
        lookback(self.theirs, i)
    }

    pub fn rounds(self) -> impl Iterator<Item = Round> + 'a {
        self.mine
            .iter()
            .zip(self.theirs.iter())
            .map(|(mine, theirs)| Round::new(*mine, *theirs))
    }

    pub fn score(self) -> u64 {
        self.rounds().map(|round| round.payoff() as u64).sum()
    }
}

fn lookback(moves: &[Move], i: usize) -> Option<Move> {
    if i == 0 || i > moves.len() {
        return None;
    }
    moves.get(moves.len() - i).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn history_of(rounds: &[(Move, Move)]) -> History {
        let mut history = History::new();
        for (mine, theirs) in rounds {
            history.record(*mine, *theirs);
        }
        history
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert_eq!(history.score(), 0);
    }

    #[test]
    fn test_lookback_is_most_recent_first() {
        let history = history_of(&[
            (Move::Cooperate, Move::Defect),
            (Move::Defect, Move::Cooperate),
        ]);

        assert_eq!(history.opponent_move_at(1), Some(Move::Cooperate));
        assert_eq!(history.opponent_move_at(2), Some(Move::Defect));
        assert_eq!(history.my_move_at(1), Some(Move::Defect));
        assert_eq!(history.my_move_at(2), Some(Move::Cooperate));
    }

    #[test]
    fn test_lookback_out_of_range() {
        let history = history_of(&[(Move::Defect, Move::Defect)]);

        assert_eq!(history.opponent_move_at(0), None);
        assert_eq!(history.opponent_move_at(2), None);
        assert_eq!(History::new().opponent_move_at(1), None);

        // The missing move matches neither real move
        assert_ne!(history.opponent_move_at(2), Some(Move::Defect));
        assert_ne!(history.opponent_move_at(2), Some(Move::Cooperate));
    }

    #[test]
    fn test_view_swap_exchanges_roles() {
        let history = history_of(&[(Move::Cooperate, Move::Defect)]);
        let swapped = history.view().swap();

        assert_eq!(swapped.my_moves(), &[Move::Defect]);
        assert_eq!(swapped.opponent_moves(), &[Move::Cooperate]);
        assert_eq!(swapped.swap(), history.view());
    }

    #[test]
    fn test_score_sums_payoffs() {
        let history = history_of(&[
            (Move::Cooperate, Move::Cooperate), // 3
            (Move::Defect, Move::Cooperate),    // 5
            (Move::Cooperate, Move::Defect),    // 0
            (Move::Defect, Move::Defect),       // 1
        ]);

        assert_eq!(history.score(), 9);
        assert_eq!(history.clone().swapped().score(), 9);
    }

    #[test]
    fn test_rounds_in_play_order() {
        let history = history_of(&[
            (Move::Cooperate, Move::Defect),
            (Move::Defect, Move::Defect),
        ]);
        let rounds: Vec<_> = history.rounds().collect();

        assert_eq!(rounds[0], Round::new(Move::Cooperate, Move::Defect));
        assert_eq!(rounds[1], Round::new(Move::Defect, Move::Defect));
        assert_eq!(rounds[0].swapped(), Round::new(Move::Defect, Move::Cooperate));
    }

    fn any_move() -> impl Strategy<Value = Move> {
        prop_oneof![Just(Move::Cooperate), Just(Move::Defect)]
    }

    fn any_rounds() -> impl Strategy<Value = Vec<(Move, Move)>> {
        prop::collection::vec((any_move(), any_move()), 0..64)
    }

    proptest! {
        #[test]
        fn prop_swap_twice_is_identity(rounds in any_rounds()) {
            let history = history_of(&rounds);
            prop_assert_eq!(history.clone().swapped().swapped(), history);
        }

        #[test]
        fn prop_sequences_stay_aligned(rounds in any_rounds()) {
            let history = history_of(&rounds);
            prop_assert_eq!(history.my_moves().len(), rounds.len());
            prop_assert_eq!(history.opponent_moves().len(), rounds.len());
        }
    }
}
