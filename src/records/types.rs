use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{GameNumber, TeamId, Year};
use crate::errors::SeasonError;

/// Which side of .500 a team's record is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "winning")]
    Winning,
    #[serde(rename = "losing")]
    Losing,
    #[serde(rename = "500")]
    Even,
}

impl RecordKind {
    /// Classify a signed wins-minus-losses margin
    pub fn from_margin(margin: f64) -> Self {
        if margin > 0.0 {
            RecordKind::Winning
        } else if margin < 0.0 {
            RecordKind::Losing
        } else {
            RecordKind::Even
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::Winning => "winning",
            RecordKind::Losing => "losing",
            RecordKind::Even => "500",
        }
    }
}

/// A team's running record right after its `game_number`-th game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGameEntry {
    pub game_number: GameNumber,
    pub wins: f64,
    #[serde(rename = "distFrom500")]
    pub distance_from_500: f64,
    pub record_kind: RecordKind,
}

impl TeamGameEntry {
    /// Distance is measured in games: |wins - losses|
    pub fn new(game_number: GameNumber, wins: f64) -> Self {
        let losses = game_number as f64 - wins;
        let margin = wins - losses;

        Self {
            game_number,
            wins,
            distance_from_500: margin.abs(),
            record_kind: RecordKind::from_margin(margin),
        }
    }

    pub fn losses(&self) -> f64 {
        self.game_number as f64 - self.wins
    }
}

/// Every team's record at one game number, plus the running distance total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameNumberEntry {
    teams: BTreeMap<TeamId, TeamGameEntry>,
    total_distance_from_500: f64,
    average_distance_from_500: Option<f64>,
}

impl GameNumberEntry {
    /// Insert or overwrite a team's entry, keeping the total in step
    pub fn record(&mut self, team: &str, entry: TeamGameEntry) {
        self.total_distance_from_500 += entry.distance_from_500;
        if let Some(previous) = self.teams.insert(team.to_string(), entry) {
            self.total_distance_from_500 -= previous.distance_from_500;
        }
    }

    pub fn teams(&self) -> &BTreeMap<TeamId, TeamGameEntry> {
        &self.teams
    }

    pub fn team(&self, team: &str) -> Option<&TeamGameEntry> {
        self.teams.get(team)
    }

    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn total_distance_from_500(&self) -> f64 {
        self.total_distance_from_500
    }

    pub fn average_distance_from_500(&self) -> Option<f64> {
        self.average_distance_from_500
    }

    /// Sum of distances recomputed from the team entries
    pub fn recomputed_total(&self) -> f64 {
        self.teams.values().map(|e| e.distance_from_500).sum()
    }

    pub(crate) fn compute_average(&mut self) -> Option<f64> {
        if self.teams.is_empty() {
            return None;
        }
        let average = self.total_distance_from_500 / self.teams.len() as f64;
        self.average_distance_from_500 = Some(average);
        Some(average)
    }
}

/// Per-game-number table of a season's running records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonLedger {
    entries: BTreeMap<GameNumber, GameNumberEntry>,
}

impl SeasonLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, game_number: GameNumber) -> Option<&GameNumberEntry> {
        self.entries.get(&game_number)
    }

    pub(crate) fn get_mut(&mut self, game_number: GameNumber) -> Option<&mut GameNumberEntry> {
        self.entries.get_mut(&game_number)
    }

    pub(crate) fn entry_mut(&mut self, game_number: GameNumber) -> &mut GameNumberEntry {
        self.entries.entry(game_number).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameNumber, &GameNumberEntry)> {
        self.entries.iter().map(|(&number, entry)| (number, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_game_number(&self) -> GameNumber {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }
}

/// End-of-season tankiness figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub year: Year,
    pub last_complete_game_number: GameNumber,
    pub num_teams: usize,
    pub num_losing_teams: usize,
    pub pct_losing_teams: f64,
    /// Absent when no team finished with a losing record
    pub avg_losing_team_distance_from_500: Option<f64>,
    pub is_short_season: bool,
}

impl SeasonSummary {
    pub fn losing_average(&self) -> Result<f64, SeasonError> {
        self.avg_losing_team_distance_from_500
            .ok_or(SeasonError::NoLosingTeams { year: self.year })
    }
}
