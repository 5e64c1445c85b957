use anyhow::{bail, Result};
use std::path::PathBuf;

use super::leagues::{self, LeagueConfig};
use crate::domain::Year;

pub struct ScraperSettings {
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 3000, // basketball-reference asks for under 20 req/min
            user_agent: "Tankiness/0.1",
            timeout_secs: 30,
        }
    }
}

pub struct OutputSettings {
    pub output_dir: PathBuf,
    pub detail_filename: &'static str,
    pub topline_filename: &'static str,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            detail_filename: "data.json",
            topline_filename: "avgLosingTeamGamesFrom500.csv",
        }
    }
}

pub struct AppConfig {
    pub league: LeagueConfig,
    pub scraper: ScraperSettings,
    pub output: OutputSettings,
    pub cache_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            league: leagues::nba(),
            scraper: ScraperSettings::default(),
            output: OutputSettings::default(),
            cache_dir: cache_dir_from_env(),
        }
    }

    pub fn for_league(key: &str) -> Result<Self> {
        let Some(league) = leagues::find_league(key) else {
            bail!("Unknown league: {}", key);
        };
        Ok(Self {
            league,
            ..Self::new()
        })
    }

    /// Narrow the league's year range; bounds outside it are rejected
    pub fn with_years(mut self, start_year: Option<Year>, end_year: Option<Year>) -> Result<Self> {
        let start = start_year.unwrap_or(self.league.first_year);
        let end = end_year.unwrap_or(self.league.last_year);

        if start > end {
            bail!("Start year {} is after end year {}", start, end);
        }
        if start < self.league.first_year || end > self.league.last_year {
            bail!(
                "{} data is available for {}-{} only",
                self.league.key,
                self.league.first_year,
                self.league.last_year
            );
        }

        self.league.first_year = start;
        self.league.last_year = end;
        Ok(self)
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output.output_dir = dir;
        }
        self
    }

    /// Cache namespace for this league, e.g. `cache/nba`
    pub fn league_cache_dir(&self) -> PathBuf {
        self.cache_dir.join(self.league.key)
    }
}

fn cache_dir_from_env() -> PathBuf {
    std::env::var("CACHE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("cache"))
}
