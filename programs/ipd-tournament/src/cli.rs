use std::path::PathBuf;

use clap::Parser;
use match_logic::{Randomness, Strategy, TournamentConfig};

/// Round-robin Iterated Prisoner's Dilemma tournament
#[derive(Debug, Parser)]
#[command(name = "ipd-tournament", version, about)]
pub struct CliOptions {
    /// Rounds per game
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: Option<u32>,

    /// Entrant by name, e.g. `TitForTat` or `DefectAtEnd(3)`. Repeat to
    /// build a roster; replaces the default roster.
    #[arg(short, long = "strategy", value_name = "NAME")]
    pub strategies: Vec<Strategy>,

    /// Seed for reproducible randomised strategies
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw randomised moves from the OS-seeded thread RNG
    #[arg(long, conflicts_with = "seed")]
    pub entropy: bool,

    /// JSON tournament config; other flags override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the head-to-head score table
    #[arg(long)]
    pub matrix: bool,

    /// List available strategies and exit
    #[arg(long)]
    pub list: bool,
}

impl CliOptions {
    /// Layer command-line overrides on top of `config`
    pub fn apply(&self, mut config: TournamentConfig) -> TournamentConfig {
        if let Some(rounds) = self.rounds {
            config.game_length = rounds;
        }
        if !self.strategies.is_empty() {
            config.roster = self.strategies.clone();
        }
        if let Some(seed) = self.seed {
            config.randomness = Randomness::Reproducible { seed };
        }
        if self.entropy {
            config.randomness = Randomness::Entropy;
        }
        config
    }
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_logic::default_roster;

    fn parse_from(args: &[&str]) -> Result<CliOptions, clap::Error> {
        CliOptions::try_parse_from(std::iter::once("ipd-tournament").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments_keeps_defaults() {
        let options = parse_from(&[]).unwrap();
        let config = options.apply(TournamentConfig::default());
        assert_eq!(config, TournamentConfig::default());
    }

    #[test]
    fn test_overrides() {
        let options = parse_from(&[
            "--rounds",
            "25",
            "-s",
            "TitForTat",
            "--strategy",
            "DefectAtEnd(3)",
            "--seed",
            "11",
        ])
        .unwrap();
        let config = options.apply(TournamentConfig::default());

        assert_eq!(config.game_length, 25);
        assert_eq!(config.roster, vec![Strategy::TitForTat, Strategy::defect_at_end(3)]);
        assert_eq!(config.randomness, Randomness::Reproducible { seed: 11 });
    }

    #[test]
    fn test_entropy_flag() {
        let config = parse_from(&["--entropy"]).unwrap().apply(TournamentConfig::default());
        assert_eq!(config.randomness, Randomness::Entropy);
        assert_eq!(config.roster, default_roster());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_from(&["--rounds", "0"]).is_err());
        assert!(parse_from(&["--strategy", "Nice"]).is_err());
        assert!(parse_from(&["--strategy", "DefectAtEnd(-2)"]).is_err());
        assert!(parse_from(&["--seed", "3", "--entropy"]).is_err());
    }
}
