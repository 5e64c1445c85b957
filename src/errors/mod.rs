use thiserror::Error;

use crate::domain::{TeamId, Year};

/// A game record that cannot be applied to a season's running records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("game record has an empty team identifier")]
    EmptyTeam,

    #[error("team {team} cannot play against itself")]
    SameTeam { team: TeamId },

    #[error("game between {first} and {second} is a tie, but ties are not allowed in this league")]
    TieNotAllowed { first: TeamId, second: TeamId },
}

/// Season-level conditions that prevent a summary metric from being computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeasonError {
    #[error("no team finished season {year} with a losing record")]
    NoLosingTeams { year: Year },
}

/// Problems turning a schedule page into game records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("schedule table not found")]
    MissingScheduleTable,

    #[error("missing {field} in schedule row {row}")]
    MissingField { field: &'static str, row: usize },

    #[error("invalid score {value:?} in schedule row {row}")]
    InvalidScore { value: String, row: usize },
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}
