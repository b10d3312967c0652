//! Round-robin tournament and ranked report

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use crate::error::{MatchError, Result};
use crate::game::{run_match, GameContext};
use crate::pairing::{calculate_match_count, round_robin_pairings};
use crate::random::Randomness;
use crate::strategy::{default_roster, Strategy};

/// Rounds per game when nothing else is configured
pub const DEFAULT_GAME_LENGTH: u32 = 200;

/// Everything a tournament needs. Loaded from JSON or built in code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Rounds per game
    pub game_length: u32,
    /// Entrants, in iteration order
    pub roster: Vec<Strategy>,
    pub randomness: Randomness,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            game_length: DEFAULT_GAME_LENGTH,
            roster: default_roster(),
            randomness: Randomness::default(),
        }
    }
}

impl TournamentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.roster.is_empty() {
            return Err(MatchError::EmptyRoster);
        }
        if self.game_length == 0 {
            return Err(MatchError::ZeroGameLength);
        }
        Ok(())
    }

    fn game_context(&self) -> GameContext {
        GameContext::new(self.game_length).with_randomness(self.randomness)
    }
}

/// One line of the ranked report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position after sorting
    pub rank: usize,
    pub name: String,
    pub total_score: u64,
    /// Score per round played
    pub average: f64,
}

/// Final tournament results
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub game_length: u32,
    pub games_played: usize,
    /// Sorted by descending score, then by name
    pub standings: Vec<Standing>,
    /// Roster names in entry order, labelling `head_to_head`
    pub entrants: Vec<String>,
    /// `head_to_head[i][j]`: entrant i's score playing against entrant j
    pub head_to_head: Vec<Vec<u64>>,
}

impl Report {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Head-to-head score table, rows are the scoring entrant
    pub fn head_to_head_table(&self) -> String {
        let width = name_width(self.entrants.iter().map(String::as_str)).max(6) + 4;
        let mut out = format!("{:<width$}", "", width = width);
        for (j, _) in self.entrants.iter().enumerate() {
            out.push_str(&format!(" {:>6}", j + 1));
        }
        out.push('\n');
        // A hand-edited report may carry fewer rows than entrants
        for (i, (name, row)) in self.entrants.iter().zip(&self.head_to_head).enumerate() {
            let label = format!("{}. {}", i + 1, name);
            out.push_str(&format!("{:<width$}", label, width = width));
            for score in row {
                out.push_str(&format!(" {:>6}", score));
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = name_width(self.standings.iter().map(|s| s.name.as_str()));
        for standing in &self.standings {
            writeln!(
                f,
                "{:<width$}  {:>8}  {:>7.3}",
                standing.name,
                standing.total_score,
                standing.average,
                width = width
            )?;
        }
        Ok(())
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0)
}

/// A full round-robin over a fixed roster
#[derive(Clone, Debug)]
pub struct Tournament {
    config: TournamentConfig,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Play every ordered pair once and rank the entrants
    pub fn run(&self) -> Report {
        let roster = &self.config.roster;
        let ctx = self.config.game_context();
        let n = roster.len();

        info!(
            "Tournament starting: {} entrants, {} games of {} rounds",
            n,
            calculate_match_count(n),
            ctx.game_length
        );

        let mut head_to_head = vec![vec![0u64; n]; n];
        let mut games_played = 0usize;

        for (a, b) in round_robin_pairings(n) {
            let result = run_match(&roster[a], &roster[b], &ctx);
            if !result.within_combined_bounds() {
                warn!(
                    "{} vs {}: combined score {} outside [{}, {}]",
                    roster[a],
                    roster[b],
                    result.total_score_a + result.total_score_b,
                    crate::MIN_ROUND_SUM * result.round_count as u64,
                    crate::MAX_ROUND_SUM * result.round_count as u64
                );
            }
            debug!(
                "{} vs {}: {} - {}",
                roster[a], roster[b], result.total_score_a, result.total_score_b
            );

            // Only A's side counts; B's side is scored in its own game as A
            head_to_head[a][b] = result.total_score_a;
            games_played += 1;
        }

        let rounds_per_entrant = ctx.game_length as f64 * n as f64;
        let mut standings: Vec<Standing> = roster
            .iter()
            .zip(&head_to_head)
            .map(|(strategy, row)| {
                let total_score: u64 = row.iter().sum();
                Standing {
                    rank: 0,
                    name: strategy.name(),
                    total_score,
                    average: total_score as f64 / rounds_per_entrant,
                }
            })
            .collect();

        standings.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| a.name.cmp(&b.name))
        });
        for (i, standing) in standings.iter_mut().enumerate() {
            standing.rank = i + 1;
        }

        if let Some(winner) = standings.first() {
            info!("Tournament complete: {} wins with {}", winner.name, winner.total_score);
        }

        Report {
            game_length: ctx.game_length,
            games_played,
            standings,
            entrants: roster.iter().map(Strategy::name).collect(),
            head_to_head,
        }
    }
}
