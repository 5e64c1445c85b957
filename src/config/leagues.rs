use crate::domain::{GameNumber, TieRule, Year};

/// Where a league's schedule pages live
///
/// `url_template` takes `{year}` (the year the season ends in) and `{month}`.
#[derive(Debug, Clone)]
pub struct ScheduleSource {
    pub url_template: &'static str,
    pub months: &'static [&'static str],
}

impl ScheduleSource {
    pub fn month_url(&self, year: Year, month: &str) -> String {
        self.url_template
            .replace("{year}", &year.to_string())
            .replace("{month}", month)
    }
}

/// Known irregularities in a league's schedule pages
#[derive(Debug, Clone, PartialEq)]
pub enum SeasonQuirk {
    /// The month page is malformed and holds no usable games
    SkipMonth { year: Year, month: &'static str },
    /// No postseason marker exists; the regular season ends before this month
    EndsBeforeMonth { year: Year, month: &'static str },
}

#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub key: &'static str,
    pub name: &'static str,
    pub first_year: Year,
    pub last_year: Year,
    pub regular_season_games: GameNumber,
    pub tie_rule: TieRule,
    pub schedule: Option<ScheduleSource>,
    pub quirks: Vec<SeasonQuirk>,
}

impl LeagueConfig {
    pub fn skips_month(&self, year: Year, month: &str) -> bool {
        self.quirks.iter().any(|quirk| {
            matches!(quirk, SeasonQuirk::SkipMonth { year: y, month: m } if *y == year && *m == month)
        })
    }

    pub fn ends_before_month(&self, year: Year, month: &str) -> bool {
        self.quirks.iter().any(|quirk| {
            matches!(quirk, SeasonQuirk::EndsBeforeMonth { year: y, month: m } if *y == year && *m == month)
        })
    }
}

const NBA_MONTHS: &[&str] = &[
    "september", "october", "november", "december", "january", "february", "march", "april",
    "may", "june",
];

/// NBA since the 82-game era, scraped from basketball-reference
pub fn nba() -> LeagueConfig {
    LeagueConfig {
        key: "nba",
        name: "National Basketball Association",
        first_year: 1968,
        last_year: 2020,
        regular_season_games: 82,
        tie_rule: TieRule::Forbidden,
        schedule: Some(ScheduleSource {
            url_template: "https://www.basketball-reference.com/leagues/NBA_{year}_games-{month}.html",
            months: NBA_MONTHS,
        }),
        quirks: vec![
            SeasonQuirk::SkipMonth { year: 2019, month: "september" },
            SeasonQuirk::EndsBeforeMonth { year: 1980, month: "april" },
            SeasonQuirk::EndsBeforeMonth { year: 2020, month: "april" },
        ],
    }
}

/// NFL 16-game era; games come from an offline game file
pub fn nfl() -> LeagueConfig {
    LeagueConfig {
        key: "nfl",
        name: "National Football League",
        first_year: 1978,
        last_year: 2020,
        regular_season_games: 16,
        tie_rule: TieRule::HalfWin,
        schedule: None,
        quirks: Vec::new(),
    }
}

/// Get the list of supported league presets
pub fn get_leagues() -> Vec<LeagueConfig> {
    vec![nba(), nfl()]
}

pub fn find_league(key: &str) -> Option<LeagueConfig> {
    get_leagues()
        .into_iter()
        .find(|league| league.key.eq_ignore_ascii_case(key))
}
