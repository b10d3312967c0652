use std::fs;

use anyhow::{Context, Result};
use log::info;
use match_logic::{Strategy, Tournament, TournamentConfig};

mod cli;

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    let cli_options = cli::parse();
    info!("{:#?}", &cli_options);

    if cli_options.list {
        for strategy in Strategy::catalogue() {
            println!("{:<20} {}", strategy.name(), strategy.describe());
        }
        return Ok(());
    }

    let base = match &cli_options.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            TournamentConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => TournamentConfig::default(),
    };

    let tournament = Tournament::new(cli_options.apply(base))?;
    info!("{:#?}", tournament.config());

    let report = tournament.run();
    if cli_options.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
        if cli_options.matrix {
            println!();
            print!("{}", report.head_to_head_table());
        }
    }

    Ok(())
}
