use log::warn;
use std::collections::BTreeMap;

use super::types::SeasonSummary;
use crate::domain::{GameNumber, Year};
use crate::errors::SeasonError;

/// One season's row of the topline table
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueTableRow {
    pub year: Year,
    /// The real value, or its full-season projection for a short season
    pub projected_value: f64,
    /// The unprojected value, kept only for short seasons
    pub raw_short_season_value: Option<f64>,
}

/// Scale a short season's losing average up to a full-season equivalent
pub fn project(
    summary: &SeasonSummary,
    full_season_game_count: GameNumber,
) -> Result<LeagueTableRow, SeasonError> {
    let value = summary.losing_average()?;

    let row = if summary.is_short_season && summary.last_complete_game_number > 0 {
        let scale = full_season_game_count as f64 / summary.last_complete_game_number as f64;
        LeagueTableRow {
            year: summary.year,
            projected_value: scale * value,
            raw_short_season_value: Some(value),
        }
    } else {
        LeagueTableRow {
            year: summary.year,
            projected_value: value,
            raw_short_season_value: None,
        }
    };
    Ok(row)
}

/// League-wide rows keyed by year
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueTable {
    rows: BTreeMap<Year, LeagueTableRow>,
}

impl LeagueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a season summary into the table. Seasons without a losing
    /// average are left out and reported back to the caller.
    pub fn record(
        &mut self,
        summary: &SeasonSummary,
        full_season_game_count: GameNumber,
    ) -> Result<(), SeasonError> {
        let row = project(summary, full_season_game_count).inspect_err(|e| {
            warn!("Skipping {} in league table: {}", summary.year, e);
        })?;
        self.insert(row);
        Ok(())
    }

    pub fn insert(&mut self, row: LeagueTableRow) {
        self.rows.insert(row.year, row);
    }

    pub fn rows(&self) -> impl Iterator<Item = &LeagueTableRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(year: Year, last: GameNumber, avg: Option<f64>, short: bool) -> SeasonSummary {
        SeasonSummary {
            year,
            last_complete_game_number: last,
            num_teams: 30,
            num_losing_teams: if avg.is_some() { 14 } else { 0 },
            pct_losing_teams: 0.0,
            avg_losing_team_distance_from_500: avg,
            is_short_season: short,
        }
    }

    #[test]
    fn test_short_season_is_projected() {
        let row = project(&summary(2020, 10, Some(2.5), true), 16).unwrap();

        assert_eq!(row.projected_value, 4.0);
        assert_eq!(row.raw_short_season_value, Some(2.5));
    }

    #[test]
    fn test_full_season_is_unchanged() {
        let row = project(&summary(2019, 82, Some(11.2), false), 82).unwrap();

        assert_eq!(row.projected_value, 11.2);
        assert_eq!(row.raw_short_season_value, None);
    }

    #[test]
    fn test_missing_average_is_skipped() {
        let mut table = LeagueTable::new();
        table.record(&summary(1998, 82, Some(10.0), false), 82).unwrap();

        let result = table.record(&summary(1999, 50, None, true), 82);

        assert_eq!(result, Err(SeasonError::NoLosingTeams { year: 1999 }));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rows_ordered_by_year() {
        let mut table = LeagueTable::new();
        table.record(&summary(2001, 82, Some(9.0), false), 82).unwrap();

        table.record(&summary(1999, 82, Some(8.0), false), 82).unwrap();
        table.record(&summary(2000, 82, Some(7.5), false), 82).unwrap();

        let years: Vec<Year> = table.rows().map(|row| row.year).collect();
        assert_eq!(years, vec![1999, 2000, 2001]);
    }
}
