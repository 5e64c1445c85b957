use log::debug;
use std::collections::HashMap;

use super::types::{SeasonLedger, TeamGameEntry};
use crate::domain::{GameNumber, GameRecord, SeasonGames, TeamId, TieRule, Year};
use crate::errors::ValidationError;

/// What the tracker remembers about a team between games
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamRunningState {
    pub games_played: GameNumber,
    pub wins: f64,
}

/// Running win/loss state for a single season.
///
/// Each game advances both participants by one game number and writes their
/// new record into the ledger. Prior records come from the per-team state map,
/// so the ledger is write-only from the tracker's point of view.
pub struct SeasonTracker {
    year: Year,
    tie_rule: TieRule,
    teams: HashMap<TeamId, TeamRunningState>,
    ledger: SeasonLedger,
    games_processed: usize,
}

impl SeasonTracker {
    pub fn new(year: Year, tie_rule: TieRule) -> Self {
        Self {
            year,
            tie_rule,
            teams: HashMap::new(),
            ledger: SeasonLedger::new(),
            games_processed: 0,
        }
    }

    /// Apply one game. An invalid record leaves the tracker untouched.
    pub fn process_game(&mut self, game: &GameRecord) -> Result<(), ValidationError> {
        game.validate(self.tie_rule)?;

        for (team, delta_win) in game.participants() {
            let state = self.teams.entry(team.to_string()).or_default();
            state.games_played += 1;
            state.wins += delta_win;

            let entry = TeamGameEntry::new(state.games_played, state.wins);
            self.ledger.entry_mut(state.games_played).record(team, entry);
        }

        self.games_processed += 1;
        Ok(())
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn games_processed(&self) -> usize {
        self.games_processed
    }

    pub fn team_state(&self, team: &str) -> Option<&TeamRunningState> {
        self.teams.get(team)
    }

    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn ledger(&self) -> &SeasonLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> SeasonLedger {
        debug!(
            "Season {}: {} games over {} teams",
            self.year,
            self.games_processed,
            self.teams.len()
        );
        self.ledger
    }
}

/// Run a whole season's games through a fresh tracker
pub fn track_season(season: &SeasonGames, tie_rule: TieRule) -> Result<SeasonLedger, ValidationError> {
    let mut tracker = SeasonTracker::new(season.year, tie_rule);
    for game in &season.games {
        tracker.process_game(game)?;
    }
    Ok(tracker.into_ledger())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::types::RecordKind;

    fn entry<'a>(tracker: &'a SeasonTracker, game_number: GameNumber, team: &str) -> &'a TeamGameEntry {
        tracker
            .ledger()
            .get(game_number)
            .and_then(|e| e.team(team))
            .unwrap()
    }

    #[test]
    fn test_alternating_results_return_to_even() {
        let mut tracker = SeasonTracker::new(2000, TieRule::Forbidden);

        tracker.process_game(&GameRecord::decided("X", "Y")).unwrap();

        let x = entry(&tracker, 1, "X");
        assert_eq!(x.wins, 1.0);
        assert_eq!(x.distance_from_500, 1.0);
        assert_eq!(x.record_kind, RecordKind::Winning);
        let y = entry(&tracker, 1, "Y");
        assert_eq!(y.wins, 0.0);
        assert_eq!(y.distance_from_500, 1.0);
        assert_eq!(y.record_kind, RecordKind::Losing);

        tracker.process_game(&GameRecord::decided("Y", "X")).unwrap();

        for team in ["X", "Y"] {
            let e = entry(&tracker, 2, team);
            assert_eq!(e.wins, 1.0);
            assert_eq!(e.game_number, 2);
            assert_eq!(e.distance_from_500, 0.0);
            assert_eq!(e.record_kind, RecordKind::Even);
        }
        assert_eq!(tracker.ledger().get(2).unwrap().total_distance_from_500(), 0.0);
    }

    #[test]
    fn test_tie_credits_half_win_to_both() {
        let mut tracker = SeasonTracker::new(1990, TieRule::HalfWin);

        tracker.process_game(&GameRecord::tie("A", "B")).unwrap();

        for team in ["A", "B"] {
            let e = entry(&tracker, 1, team);
            assert_eq!(e.wins, 0.5);
            assert_eq!(e.losses(), 0.5);
            assert_eq!(e.distance_from_500, 0.0);
            assert_eq!(e.record_kind, RecordKind::Even);
        }

        tracker.process_game(&GameRecord::decided("C", "A")).unwrap();
        let a = entry(&tracker, 2, "A");
        assert_eq!(a.wins, 0.5);
        assert_eq!(a.distance_from_500, 1.0);
        assert_eq!(a.record_kind, RecordKind::Losing);
    }

    #[test]
    fn test_invalid_game_keeps_committed_state() {
        let mut tracker = SeasonTracker::new(2000, TieRule::Forbidden);
        tracker.process_game(&GameRecord::decided("X", "Y")).unwrap();

        let result = tracker.process_game(&GameRecord::tie("X", "Y"));

        assert!(matches!(result, Err(ValidationError::TieNotAllowed { .. })));
        assert_eq!(tracker.games_processed(), 1);
        assert_eq!(tracker.team_state("X").unwrap().games_played, 1);
        assert!(tracker.ledger().get(2).is_none());
        assert_eq!(entry(&tracker, 1, "X").wins, 1.0);
    }

    #[test]
    fn test_running_state_matches_appearances() {
        let games = vec![
            GameRecord::decided("A", "B"),
            GameRecord::decided("A", "C"),
            GameRecord::tie("B", "C"),
            GameRecord::decided("C", "A"),
            GameRecord::decided("B", "A"),
        ];
        let mut tracker = SeasonTracker::new(1985, TieRule::HalfWin);
        for game in &games {
            tracker.process_game(game).unwrap();
        }

        let a = tracker.team_state("A").unwrap();
        assert_eq!(a.games_played, 4);
        assert_eq!(a.wins, 2.0);

        for (team, appearances) in [("A", 4), ("B", 3), ("C", 3)] {
            let state = tracker.team_state(team).unwrap();
            assert_eq!(state.games_played, appearances);

            let e = entry(&tracker, appearances, team);
            assert_eq!(e.wins + e.losses(), appearances as f64);
            assert!(e.distance_from_500 >= 0.0);
            assert_eq!(e.record_kind == RecordKind::Even, e.distance_from_500 == 0.0);
        }

        for (_, game_entry) in tracker.ledger().iter() {
            assert_eq!(game_entry.total_distance_from_500(), game_entry.recomputed_total());
        }
    }

    #[test]
    fn test_ledger_has_no_gaps() {
        let mut season = SeasonGames::new(2001);
        season.games = vec![
            GameRecord::decided("A", "B"),
            GameRecord::decided("A", "B"),
            GameRecord::decided("A", "C"),
        ];

        let ledger = track_season(&season, TieRule::Forbidden).unwrap();

        assert_eq!(ledger.last_game_number(), 3);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(3).unwrap().num_teams(), 1);
        assert_eq!(ledger.get(1).unwrap().num_teams(), 3);
    }

    #[test]
    fn test_track_season_stops_at_first_invalid_game() {
        let mut season = SeasonGames::new(2001);
        season.games = vec![
            GameRecord::decided("A", "B"),
            GameRecord::decided("", "B"),
        ];

        assert_eq!(
            track_season(&season, TieRule::Forbidden),
            Err(ValidationError::EmptyTeam)
        );
    }
}
