use log::{info, warn};

use super::types::{RecordKind, SeasonLedger, SeasonSummary};
use crate::domain::{GameNumber, SeasonGames, Year};

const SUMMARY_DECIMALS: i32 = 3;

/// Fill in per-game-number averages and summarize the season's final standings.
///
/// Game numbers are walked from 1 up to `expected_game_count`. A game number
/// is complete once every team of the season has an entry there; the first
/// incomplete one ends the season early. Never fails: a season without losing
/// teams has no losing average.
pub fn finalize_season(
    ledger: &mut SeasonLedger,
    year: Year,
    expected_game_count: GameNumber,
) -> SeasonSummary {
    let last_complete_game_number = fill_averages(ledger, expected_game_count);
    let is_short_season = last_complete_game_number < expected_game_count;

    if is_short_season {
        warn!(
            "{} season ends at game {}",
            SeasonGames::season_label(year),
            last_complete_game_number
        );
    }

    let losing_distances = losing_distances(ledger, last_complete_game_number);
    let num_teams = ledger
        .get(last_complete_game_number)
        .map(|entry| entry.num_teams())
        .unwrap_or(0);
    let num_losing_teams = losing_distances.len();

    let avg_losing_team_distance_from_500 = if num_losing_teams == 0 {
        warn!(
            "{} season has no losing teams at game {}",
            SeasonGames::season_label(year),
            last_complete_game_number
        );
        None
    } else {
        let total: f64 = losing_distances.iter().sum();
        Some(round_to(total / num_losing_teams as f64, SUMMARY_DECIMALS))
    };

    info!(
        "Finished {}: {} of {} teams losing after game {}",
        SeasonGames::season_label(year),
        num_losing_teams,
        num_teams,
        last_complete_game_number
    );

    SeasonSummary {
        year,
        last_complete_game_number,
        num_teams,
        num_losing_teams,
        pct_losing_teams: ratio(num_losing_teams, num_teams),
        avg_losing_team_distance_from_500,
        is_short_season,
    }
}

/// Returns the last game number every team reached
fn fill_averages(ledger: &mut SeasonLedger, expected_game_count: GameNumber) -> GameNumber {
    let season_teams = ledger.get(1).map(|entry| entry.num_teams()).unwrap_or(0);

    for game_number in 1..=expected_game_count {
        match ledger.get_mut(game_number) {
            Some(entry) if entry.num_teams() == season_teams => {
                entry.compute_average();
            }
            _ => return game_number - 1,
        }
    }
    expected_game_count
}

fn losing_distances(ledger: &SeasonLedger, game_number: GameNumber) -> Vec<f64> {
    ledger
        .get(game_number)
        .map(|snapshot| {
            snapshot
                .teams()
                .values()
                .filter(|team| team.record_kind == RecordKind::Losing)
                .map(|team| team.distance_from_500)
                .collect()
        })
        .unwrap_or_default()
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
