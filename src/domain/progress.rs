use log::info;

/// Track progress of schedule page fetching across one season
pub struct FetchProgress {
    season: String,
    fetched: usize,
    cached: usize,
    missing: usize,
}

impl FetchProgress {
    pub fn new(season: String) -> Self {
        Self {
            season,
            fetched: 0,
            cached: 0,
            missing: 0,
        }
    }

    pub fn increment_fetched(&mut self) {
        self.fetched += 1;
    }

    pub fn increment_cached(&mut self) {
        self.cached += 1;
    }

    pub fn increment_missing(&mut self) {
        self.missing += 1;
    }

    pub fn pages_seen(&self) -> usize {
        self.fetched + self.cached + self.missing
    }

    pub fn log_summary(&self, games: usize) {
        info!(
            "  → {}: {} games from {} pages ({} new, {} cached, {} without games)",
            self.season,
            games,
            self.pages_seen(),
            self.fetched,
            self.cached,
            self.missing
        );
    }
}
