use anyhow::{bail, Result};
use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::config::LeagueConfig;
use crate::domain::{SeasonCollection, SeasonGames};
use crate::errors::ValidationError;
use crate::records::{self, LeagueTable, SeasonLedger, SeasonSummary};
use crate::report::{detail, ReportWriter};
use crate::services::ingestion::season_key;

/// A season that made it through tracking and aggregation
pub struct SeasonOutcome {
    pub ledger: SeasonLedger,
    pub summary: SeasonSummary,
}

/// Run one season's games through the tracker and the aggregator
pub fn process_season(
    season: &SeasonGames,
    league: &LeagueConfig,
) -> Result<SeasonOutcome, ValidationError> {
    if !season.reached_postseason {
        debug!(
            "{} games ran out before a postseason marker",
            SeasonGames::season_label(season.year)
        );
    }

    let mut ledger = records::track_season(season, league.tie_rule)?;
    let summary = records::finalize_season(&mut ledger, season.year, league.regular_season_games);
    Ok(SeasonOutcome { ledger, summary })
}

pub struct ProcessingService {
    config: AppConfig,
    input: Option<PathBuf>,
}

impl ProcessingService {
    pub fn new(config: AppConfig, input: Option<PathBuf>) -> Self {
        Self { config, input }
    }

    pub fn run(&self) -> Result<()> {
        info!("=== Starting Processing ({}) ===\n", self.config.league.name);

        let seasons = self.load_seasons()?;
        if seasons.is_empty() {
            bail!("No season data found; run ingest first or pass --input");
        }
        info!("  → Loaded {} seasons\n", seasons.len());

        let (details, table) = self.process_seasons(seasons);

        let writer = ReportWriter::new(&self.config.output);
        writer.write_detail(details)?;
        writer.write_topline(&table)?;

        info!("=== Processing Complete ===");
        Ok(())
    }

    /// Each season is isolated: a failure is logged and the rest carry on
    pub fn process_seasons(&self, seasons: SeasonCollection) -> (Map<String, Value>, LeagueTable) {
        let league = &self.config.league;
        let mut details = Map::new();
        let mut table = LeagueTable::new();

        for season in seasons.into_vec() {
            let outcome = match process_season(&season, league) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        "Skipping {} season: {}",
                        SeasonGames::season_label(season.year),
                        e
                    );
                    continue;
                }
            };

            details.insert(
                season.year.to_string(),
                detail::season_detail(&outcome.ledger, &outcome.summary),
            );
            // Seasons without a losing average are logged and left out
            let _ = table.record(&outcome.summary, league.regular_season_games);
        }

        (details, table)
    }

    fn load_seasons(&self) -> Result<SeasonCollection> {
        let mut seasons = match &self.input {
            Some(path) => {
                info!("Loading games from {}", path.display());
                SeasonCollection::from_game_file(path)?
            }
            None => self.load_cached_seasons()?,
        };
        seasons.retain_years(self.config.league.first_year, self.config.league.last_year);
        Ok(seasons)
    }

    fn load_cached_seasons(&self) -> Result<SeasonCollection> {
        let cache = Cache::new(self.config.league_cache_dir())?;
        let mut seasons = SeasonCollection::new();

        for year in self.config.league.first_year..=self.config.league.last_year {
            match cache.load_parsed::<SeasonGames>(&season_key(year))? {
                Some(season) => seasons.add(season),
                None => warn!("No cached games for {}", SeasonGames::season_label(year)),
            }
        }
        Ok(seasons)
    }
}
