use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::models::{GameRecord, SeasonGames, Year};
use crate::errors::parse_context;

/// Season game lists indexed by year, iterated in year order
pub struct SeasonCollection {
    seasons: BTreeMap<Year, SeasonGames>,
}

impl SeasonCollection {
    pub fn new() -> Self {
        Self {
            seasons: BTreeMap::new(),
        }
    }

    /// Load an offline game file shaped as `{ "<year>": [GameRecord, ...] }`
    pub fn from_game_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read game file {}", path.display()))?;
        let by_year: BTreeMap<Year, Vec<GameRecord>> =
            serde_json::from_str(&json).with_context(|| parse_context("game file"))?;

        let mut collection = Self::new();
        for (year, games) in by_year {
            collection.add(SeasonGames {
                year,
                games,
                reached_postseason: true,
            });
        }
        Ok(collection)
    }

    pub fn add(&mut self, season: SeasonGames) {
        self.seasons.insert(season.year, season);
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn get(&self, year: Year) -> Option<&SeasonGames> {
        self.seasons.get(&year)
    }

    /// Keep only seasons inside the inclusive year range
    pub fn retain_years(&mut self, start_year: Year, end_year: Year) {
        self.seasons
            .retain(|year, _| (start_year..=end_year).contains(year));
    }

    pub fn into_vec(self) -> Vec<SeasonGames> {
        self.seasons.into_values().collect()
    }
}

impl Default for SeasonCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_file_loads_in_year_order() {
        let path = std::env::temp_dir().join("tankiness_test_game_file.json");
        fs::write(
            &path,
            r#"{
                "2003": [{"winner": "A", "loser": "B"}],
                "2001": [{"winner": "C", "loser": "D", "isTie": true}]
            }"#,
        )
        .unwrap();

        let collection = SeasonCollection::from_game_file(&path).unwrap();
        let seasons = collection.into_vec();

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].year, 2001);
        assert!(seasons[0].games[0].is_tie);
        assert_eq!(seasons[1].games[0], GameRecord::decided("A", "B"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_retain_years() {
        let mut collection = SeasonCollection::new();
        for year in 1999..=2004 {
            collection.add(SeasonGames::new(year));
        }

        collection.retain_years(2000, 2002);

        assert_eq!(collection.len(), 3);
        assert!(collection.get(1999).is_none());
        assert!(collection.get(2002).is_some());
    }
}
