use serde_json::{json, Map, Value};

use crate::records::{GameNumberEntry, SeasonLedger, SeasonSummary};

/// Per-year detail document: game numbers with each team's record,
/// followed by the season-level fields
pub fn season_detail(ledger: &SeasonLedger, summary: &SeasonSummary) -> Value {
    let mut season = Map::new();

    for (game_number, entry) in ledger.iter() {
        season.insert(game_number.to_string(), game_number_detail(entry));
    }

    season.insert("lastCompleteGame".to_string(), json!(summary.last_complete_game_number));
    season.insert("isShortSeason".to_string(), json!(summary.is_short_season));
    season.insert("numTeams".to_string(), json!(summary.num_teams));
    season.insert("numLosingTeams".to_string(), json!(summary.num_losing_teams));
    season.insert("pctLosingTeams".to_string(), json!(summary.pct_losing_teams));
    season.insert(
        "avgLosingTeamGamesFrom500".to_string(),
        json!(summary.avg_losing_team_distance_from_500),
    );

    Value::Object(season)
}

fn game_number_detail(entry: &GameNumberEntry) -> Value {
    let mut detail = Map::new();

    for (team, team_entry) in entry.teams() {
        detail.insert(
            team.clone(),
            json!({
                "wins": team_entry.wins,
                "distFrom500": team_entry.distance_from_500,
                "recordKind": team_entry.record_kind.as_str(),
            }),
        );
    }

    detail.insert("totalGamesFrom500".to_string(), json!(entry.total_distance_from_500()));
    if let Some(average) = entry.average_distance_from_500() {
        detail.insert("avgGamesFrom500".to_string(), json!(average));
    }

    Value::Object(detail)
}
