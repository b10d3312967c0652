//! Strategy definitions and execution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::game::GameContext;
use crate::history::HistoryView;
use crate::{payoff, Move};

/// Chance (percent) that MostlyTitForTat defects regardless of history
const MOSTLY_TFT_DEFECT_PERCENT: u8 = 10;

const DEFECT_AT_END: &str = "DefectAtEnd";

/// A decision policy. Strategies hold no state between calls: every
/// decision is derived from the history view and the game context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// Always cooperate, never defect.
    AllCooperate,
    /// Always defect, never cooperate.
    AllDefect,
    /// Copy opponent's last move. Start with cooperate.
    TitForTat,
    /// Defect if the opponent defected in either of the last two rounds.
    Punisher,
    /// Defect only if opponent defected twice in a row.
    Lenient,
    /// Fair coin each round.
    Random,
    /// Tit-for-Tat with a 10% chance to defect anyway.
    MostlyTitForTat,
    /// Tit-for-Tat, but defect once `remaining` or fewer rounds are left.
    DefectAtEnd { remaining: u32 },
    /// Defect for the first two rounds, cooperate afterwards.
    Bad,
    /// Cooperate until opponent defects once, then always defect.
    GrimTrigger,
    /// Win-stay, lose-switch. Repeat move if good outcome.
    Pavlov,
    /// Tit-for-Tat but start with defect.
    SuspiciousTitForTat,
    /// Retaliate with increasing defection streaks, then forgive.
    Gradual,
}

/// Roster used when nothing else is configured
pub fn default_roster() -> Vec<Strategy> {
    vec![
        Strategy::AllCooperate,
        Strategy::AllDefect,
        Strategy::TitForTat,
        Strategy::Punisher,
        Strategy::Lenient,
        Strategy::Random,
        Strategy::MostlyTitForTat,
        Strategy::DefectAtEnd { remaining: 2 },
        Strategy::Bad,
    ]
}

impl Strategy {
    pub fn defect_at_end(remaining: u32) -> Self {
        Strategy::DefectAtEnd { remaining }
    }

    /// One instance of every variant, for listings
    pub fn catalogue() -> Vec<Strategy> {
        let mut all = default_roster();
        all.extend([
            Strategy::GrimTrigger,
            Strategy::Pavlov,
            Strategy::SuspiciousTitForTat,
            Strategy::Gradual,
        ]);
        all
    }

    /// Display name, with any parameter inline
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Decide the next move from `view`, the rounds played so far
    pub fn next_move(&self, view: HistoryView<'_>, ctx: &GameContext) -> Move {
        match self {
            Strategy::AllCooperate => Move::Cooperate,
            Strategy::AllDefect => Move::Defect,
            Strategy::TitForTat => tit_for_tat(view),
            Strategy::Punisher => execute_punisher(view),
            Strategy::Lenient => execute_lenient(view),
            Strategy::Random => {
                if ctx.randomness.draw_percent(self.stream(ctx), view) < 50 {
                    Move::Cooperate
                } else {
                    Move::Defect
                }
            }
            Strategy::MostlyTitForTat => {
                let draw = ctx.randomness.draw_percent(self.stream(ctx), view);
                if draw < MOSTLY_TFT_DEFECT_PERCENT {
                    Move::Defect
                } else {
                    tit_for_tat(view)
                }
            }
            Strategy::DefectAtEnd { remaining } => {
                execute_defect_at_end(view, *remaining, ctx.game_length)
            }
            Strategy::Bad => {
                if view.len() < 2 {
                    Move::Defect
                } else {
                    Move::Cooperate
                }
            }
            Strategy::GrimTrigger => execute_grim_trigger(view),
            Strategy::Pavlov => execute_pavlov(view),
            Strategy::SuspiciousTitForTat => {
                view.opponent_move_at(1).unwrap_or(Move::Defect)
            }
            Strategy::Gradual => execute_gradual(view),
        }
    }

    /// Get a human-readable description of a strategy
    pub fn describe(&self) -> String {
        match self {
            Strategy::AllCooperate => "Never defects. Always cooperates.".to_string(),
            Strategy::AllDefect => "Never cooperates. Always defects.".to_string(),
            Strategy::TitForTat => {
                "Copies opponent's last move. Starts by cooperating.".to_string()
            }
            Strategy::Punisher => {
                "Defects if the opponent defected in either of the last two rounds.".to_string()
            }
            Strategy::Lenient => "Only retaliates after two consecutive defections.".to_string(),
            Strategy::Random => "Randomly cooperates or defects each round.".to_string(),
            Strategy::MostlyTitForTat => format!(
                "Tit-for-Tat, but defects anyway {}% of the time.",
                MOSTLY_TFT_DEFECT_PERCENT
            ),
            Strategy::DefectAtEnd { remaining } => format!(
                "Tit-for-Tat until {} or fewer rounds remain, then defects.",
                remaining
            ),
            Strategy::Bad => "Defects for two rounds, then always cooperates.".to_string(),
            Strategy::GrimTrigger => "Cooperates until betrayed, then always defects.".to_string(),
            Strategy::Pavlov => "Repeats move if outcome was good, switches if bad.".to_string(),
            Strategy::SuspiciousTitForTat => {
                "Like Tit-for-Tat, but starts with defect.".to_string()
            }
            Strategy::Gradual => "Retaliates with increasing severity, then forgives.".to_string(),
        }
    }

    /// Separates the random streams of different strategies and seats
    fn stream(&self, ctx: &GameContext) -> u32 {
        let salt = match self {
            Strategy::Random => 1,
            Strategy::MostlyTitForTat => 2,
            _ => 0,
        };
        salt << 1 | ctx.seat.index()
    }
}

/// Tit-for-Tat: Copy opponent's last move, start with cooperate
fn tit_for_tat(view: HistoryView<'_>) -> Move {
    view.opponent_move_at(1).unwrap_or(Move::Cooperate)
}

fn execute_punisher(view: HistoryView<'_>) -> Move {
    if view.opponent_move_at(1) == Some(Move::Defect)
        || view.opponent_move_at(2) == Some(Move::Defect)
    {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn execute_lenient(view: HistoryView<'_>) -> Move {
    if view.opponent_move_at(1) == Some(Move::Defect)
        && view.opponent_move_at(2) == Some(Move::Defect)
    {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Rounds left counts the round being decided
fn execute_defect_at_end(view: HistoryView<'_>, remaining: u32, game_length: u32) -> Move {
    let played = u32::try_from(view.len()).unwrap_or(u32::MAX);
    let rounds_left = game_length.saturating_sub(played);
    if rounds_left <= remaining {
        Move::Defect
    } else {
        tit_for_tat(view)
    }
}

/// Grim Trigger: Cooperate until opponent defects, then always defect
fn execute_grim_trigger(view: HistoryView<'_>) -> Move {
    if view.opponent_moves().contains(&Move::Defect) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Pavlov: Win-stay, lose-switch
/// - If last round was good (3+ points), repeat move
/// - If last round was bad (<3 points), switch move
fn execute_pavlov(view: HistoryView<'_>) -> Move {
    let (Some(my_last), Some(opp_last)) = (view.my_move_at(1), view.opponent_move_at(1)) else {
        return Move::Cooperate;
    };

    let (my_score, _) = payoff(my_last, opp_last);
    if my_score >= 3 {
        my_last
    } else {
        my_last.opposite()
    }
}

/// Gradual: Escalating retaliation
/// After N opponent defections, player should have made N(N+1)/2 total defections
fn execute_gradual(view: HistoryView<'_>) -> Move {
    let their_defections = count_defections(view.opponent_moves());
    let my_defections = count_defections(view.my_moves());
    let expected = their_defections * (their_defections + 1) / 2;

    if my_defections < expected {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn count_defections(moves: &[Move]) -> usize {
    moves.iter().filter(|m| **m == Move::Defect).count()
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AllCooperate => f.write_str("AllCooperate"),
            Strategy::AllDefect => f.write_str("AllDefect"),
            Strategy::TitForTat => f.write_str("TitForTat"),
            Strategy::Punisher => f.write_str("Punisher"),
            Strategy::Lenient => f.write_str("Lenient"),
            Strategy::Random => f.write_str("Random"),
            Strategy::MostlyTitForTat => f.write_str("MostlyTitForTat"),
            Strategy::DefectAtEnd { remaining } => write!(f, "DefectAtEnd({})", remaining),
            Strategy::Bad => f.write_str("Bad"),
            Strategy::GrimTrigger => f.write_str("GrimTrigger"),
            Strategy::Pavlov => f.write_str("Pavlov"),
            Strategy::SuspiciousTitForTat => f.write_str("SuspiciousTitForTat"),
            Strategy::Gradual => f.write_str("Gradual"),
        }
    }
}

impl FromStr for Strategy {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MatchError::InvalidStrategy(s.to_string());
        let name = s.trim();

        let is_defect_at_end = name
            .get(..DEFECT_AT_END.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DEFECT_AT_END));
        if is_defect_at_end {
            let args = &name[DEFECT_AT_END.len()..];
            let k = args
                .strip_prefix('(')
                .and_then(|rest| rest.strip_suffix(')'))
                .ok_or_else(invalid)?;
            let remaining: u32 = k.trim().parse().map_err(|_| invalid())?;
            return Ok(Strategy::DefectAtEnd { remaining });
        }

        Strategy::catalogue()
            .into_iter()
            .filter(|candidate| !matches!(candidate, Strategy::DefectAtEnd { .. }))
            .find(|candidate| candidate.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Strategy {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.to_string()
    }
}
