pub mod aggregator;
pub mod league_table;
pub mod tracker;
pub mod types;

pub use aggregator::finalize_season;
pub use league_table::{project, LeagueTable, LeagueTableRow};
pub use tracker::{track_season, SeasonTracker, TeamRunningState};
pub use types::{GameNumberEntry, RecordKind, SeasonLedger, SeasonSummary, TeamGameEntry};
