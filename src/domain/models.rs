use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub type TeamId = String;
pub type Year = u16;
pub type GameNumber = u32;

/// Whether a league's games can end in a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieRule {
    Forbidden,
    HalfWin,
}

impl TieRule {
    pub fn allows_ties(&self) -> bool {
        matches!(self, TieRule::HalfWin)
    }
}

/// One regular-season game, normalized by the feed adapter.
///
/// For a tie the `winner`/`loser` fields only fix the processing order of the
/// two participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub winner: TeamId,
    pub loser: TeamId,
    #[serde(default)]
    pub is_tie: bool,
}

impl GameRecord {
    pub fn decided(winner: impl Into<TeamId>, loser: impl Into<TeamId>) -> Self {
        Self {
            winner: winner.into(),
            loser: loser.into(),
            is_tie: false,
        }
    }

    pub fn tie(first: impl Into<TeamId>, second: impl Into<TeamId>) -> Self {
        Self {
            winner: first.into(),
            loser: second.into(),
            is_tie: true,
        }
    }

    pub fn validate(&self, tie_rule: TieRule) -> Result<(), ValidationError> {
        if self.winner.trim().is_empty() || self.loser.trim().is_empty() {
            return Err(ValidationError::EmptyTeam);
        }
        if self.winner == self.loser {
            return Err(ValidationError::SameTeam {
                team: self.winner.clone(),
            });
        }
        if self.is_tie && !tie_rule.allows_ties() {
            return Err(ValidationError::TieNotAllowed {
                first: self.winner.clone(),
                second: self.loser.clone(),
            });
        }
        Ok(())
    }

    /// Participants in processing order, paired with the wins each one earns
    pub fn participants(&self) -> [(&str, f64); 2] {
        if self.is_tie {
            [(self.winner.as_str(), 0.5), (self.loser.as_str(), 0.5)]
        } else {
            [(self.winner.as_str(), 1.0), (self.loser.as_str(), 0.0)]
        }
    }
}

/// Ordered regular-season games of one season, as handed over by a feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonGames {
    pub year: Year,
    pub games: Vec<GameRecord>,
    /// False when the feed ran out before a postseason marker was seen
    #[serde(default)]
    pub reached_postseason: bool,
}

impl SeasonGames {
    pub fn new(year: Year) -> Self {
        Self {
            year,
            games: Vec::new(),
            reached_postseason: false,
        }
    }

    /// Label such as `1967-68`, used in log output
    pub fn season_label(year: Year) -> String {
        format!("{}-{:02}", year - 1, year % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_team() {
        let game = GameRecord::decided("", "Boston Celtics");
        assert_eq!(game.validate(TieRule::Forbidden), Err(ValidationError::EmptyTeam));

        let game = GameRecord::decided("Boston Celtics", "  ");
        assert_eq!(game.validate(TieRule::Forbidden), Err(ValidationError::EmptyTeam));
    }

    #[test]
    fn test_validate_rejects_same_team() {
        let game = GameRecord::tie("Detroit Lions", "Detroit Lions");
        assert!(matches!(
            game.validate(TieRule::HalfWin),
            Err(ValidationError::SameTeam { .. })
        ));
    }

    #[test]
    fn test_tie_depends_on_rule() {
        let game = GameRecord::tie("Detroit Lions", "Green Bay Packers");
        assert!(game.validate(TieRule::HalfWin).is_ok());
        assert!(matches!(
            game.validate(TieRule::Forbidden),
            Err(ValidationError::TieNotAllowed { .. })
        ));
    }

    #[test]
    fn test_participants_order_and_credit() {
        let game = GameRecord::decided("X", "Y");
        assert_eq!(game.participants(), [("X", 1.0), ("Y", 0.0)]);

        let game = GameRecord::tie("A", "B");
        assert_eq!(game.participants(), [("A", 0.5), ("B", 0.5)]);
    }

    #[test]
    fn test_game_record_json_defaults_tie_flag() {
        let game: GameRecord =
            serde_json::from_str(r#"{"winner": "X", "loser": "Y"}"#).unwrap();
        assert!(!game.is_tie);
    }

    #[test]
    fn test_season_label() {
        assert_eq!(SeasonGames::season_label(1968), "1967-68");
        assert_eq!(SeasonGames::season_label(2000), "1999-00");
    }
}
