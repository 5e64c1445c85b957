pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod rate_limiter;
pub mod records;
pub mod report;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, SeasonArgs};
use std::path::PathBuf;

use crate::cli::Command;
use crate::config::get_leagues;
use crate::config::settings::AppConfig;
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn build_config(seasons: &SeasonArgs) -> Result<AppConfig> {
    AppConfig::for_league(&seasons.league)?.with_years(seasons.start_year, seasons.end_year)
}

pub fn handle_ingest(seasons: &SeasonArgs) -> Result<()> {
    let config = build_config(seasons)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut service = IngestionService::new(config)?;
        service.run().await
    })
}

pub fn handle_process(
    seasons: &SeasonArgs,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let config = build_config(seasons)?.with_output_dir(output_dir);
    let service = ProcessingService::new(config, input);
    service.run()
}

pub fn handle_leagues() -> Result<()> {
    for league in get_leagues() {
        let source = if league.schedule.is_some() { "scraped" } else { "game file" };
        println!(
            "{}: {} ({}-{}, {} games, ties {}, {})",
            league.key,
            league.name,
            league.first_year,
            league.last_year,
            league.regular_season_games,
            if league.tie_rule.allows_ties() { "allowed" } else { "not allowed" },
            source
        );
    }
    Ok(())
}
