use anyhow::{bail, Context, Result};
use log::{error, info};

use crate::cache::Cache;
use crate::config::leagues::ScheduleSource;
use crate::config::settings::AppConfig;
use crate::domain::{FetchProgress, SeasonGames, Year};
use crate::errors::parse_context;
use crate::fetchers::{MonthPage, ScheduleScraper};

/// Months whose pages belong to the calendar year before the season's end
const PREVIOUS_YEAR_MONTHS: &[&str] = &["september", "october", "november", "december"];

pub struct IngestionService {
    config: AppConfig,
    cache: Cache,
    scraper: ScheduleScraper,
}

impl IngestionService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache = Cache::new(config.league_cache_dir())?;
        let scraper = ScheduleScraper::new(&config.scraper)?;
        Ok(Self {
            config,
            cache,
            scraper,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let Some(source) = self.config.league.schedule.clone() else {
            bail!(
                "{} has no schedule source; process it from a game file with --input",
                self.config.league.key
            );
        };

        info!("=== Starting Data Ingestion ({}) ===\n", self.config.league.name);

        let mut failed = 0;
        for year in self.config.league.first_year..=self.config.league.last_year {
            match self.ingest_season(&source, year).await {
                Ok(season) => self.save_season(&season)?,
                Err(e) => {
                    failed += 1;
                    error!("Failed to ingest {}: {:#}", SeasonGames::season_label(year), e);
                }
            }
        }

        if failed > 0 {
            info!("  → {} seasons could not be ingested", failed);
        }
        info!("=== Ingestion Complete ===");
        Ok(())
    }

    async fn ingest_season(&mut self, source: &ScheduleSource, year: Year) -> Result<SeasonGames> {
        let mut season = SeasonGames::new(year);
        let mut progress = FetchProgress::new(SeasonGames::season_label(year));

        for &month in source.months {
            if self.config.league.skips_month(year, month) {
                continue;
            }
            if self.config.league.ends_before_month(year, month) {
                break;
            }

            let Some(html) = self.load_month(source, year, month, &mut progress).await? else {
                self.log_missing_month(year, month);
                continue;
            };

            let page = self
                .scraper
                .parse_month(&html)
                .with_context(|| parse_context(&format!("{} {} schedule", month, year)))?;

            match page {
                MonthPage::NoGames => {
                    progress.increment_missing();
                    self.log_missing_month(year, month);
                }
                MonthPage::Games {
                    games,
                    reached_postseason,
                } => {
                    season.games.extend(games);
                    if reached_postseason {
                        season.reached_postseason = true;
                        break;
                    }
                }
            }
        }

        progress.log_summary(season.games.len());
        Ok(season)
    }

    async fn load_month(
        &mut self,
        source: &ScheduleSource,
        year: Year,
        month: &str,
        progress: &mut FetchProgress,
    ) -> Result<Option<String>> {
        let key = format!("{}-{}", year, month);

        if let Some(html) = self.cache.load_raw_page(&key)? {
            progress.increment_cached();
            return Ok(Some(html));
        }

        let url = source.month_url(year, month);
        match self.scraper.fetch_month(&url).await? {
            Some(html) => {
                progress.increment_fetched();
                self.cache.save_raw_page(&key, &html)?;
                Ok(Some(html))
            }
            None => {
                progress.increment_missing();
                Ok(None)
            }
        }
    }

    fn log_missing_month(&self, year: Year, month: &str) {
        info!("No game data for {} {}", month, calendar_year(year, month));
    }

    fn save_season(&self, season: &SeasonGames) -> Result<()> {
        self.cache.save_parsed(&season_key(season.year), season)
    }
}

/// Parsed-cache key for a season's game list
pub fn season_key(year: Year) -> String {
    format!("season_{}", year)
}

fn calendar_year(season_year: Year, month: &str) -> Year {
    if PREVIOUS_YEAR_MONTHS.contains(&month) {
        season_year - 1
    } else {
        season_year
    }
}
