use anyhow::{anyhow, Result};
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};

use crate::config::settings::ScraperSettings;
use crate::domain::GameRecord;
use crate::errors::FeedError;
use crate::http::RateLimitedClient;

const NOT_FOUND_HEADING: &str = "Page Not Found (404 error)";
const POSTSEASON_MARKER: &str = "Playoffs";

/// What one month's schedule page contributes to a season
#[derive(Debug, Clone, PartialEq)]
pub enum MonthPage {
    /// No games were played that month
    NoGames,
    Games {
        games: Vec<GameRecord>,
        /// The postseason divider was found; later rows were not read
        reached_postseason: bool,
    },
}

struct ScheduleSelectors {
    not_found: Selector,
    table_body: Selector,
    row: Selector,
    header_cell: Selector,
    visitor_team: Selector,
    visitor_pts: Selector,
    home_team: Selector,
    home_pts: Selector,
    link: Selector,
}

impl ScheduleSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            not_found: parse_selector("h1")?,
            table_body: parse_selector("table#schedule > tbody")?,
            row: parse_selector("tr")?,
            header_cell: parse_selector("th")?,
            visitor_team: parse_selector(r#"td[data-stat="visitor_team_name"]"#)?,
            visitor_pts: parse_selector(r#"td[data-stat="visitor_pts"]"#)?,
            home_team: parse_selector(r#"td[data-stat="home_team_name"]"#)?,
            home_pts: parse_selector(r#"td[data-stat="home_pts"]"#)?,
            link: parse_selector("a")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {:?}: {:?}", css, e))
}

/// Reads game results out of monthly schedule pages
pub struct ScheduleScraper {
    client: RateLimitedClient,
    selectors: ScheduleSelectors,
}

impl ScheduleScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            selectors: ScheduleSelectors::new()?,
        })
    }

    /// Fetch a month page; `None` if the site has no page for it
    pub async fn fetch_month(&mut self, url: &str) -> Result<Option<String>> {
        info!("  → Fetching {}", url);
        self.client.get_text(url).await
    }

    pub fn parse_month(&self, html: &str) -> Result<MonthPage, FeedError> {
        parse_month_page(&self.selectors, html)
    }
}

fn parse_month_page(selectors: &ScheduleSelectors, html: &str) -> Result<MonthPage, FeedError> {
    let document = Html::parse_document(html);

    let not_found = document
        .select(&selectors.not_found)
        .any(|heading| cell_text(heading) == NOT_FOUND_HEADING);
    if not_found {
        return Ok(MonthPage::NoGames);
    }

    let body = document
        .select(&selectors.table_body)
        .next()
        .ok_or(FeedError::MissingScheduleTable)?;

    let mut games = Vec::new();
    let mut reached_postseason = false;

    for (index, row) in body.select(&selectors.row).enumerate() {
        if is_postseason_divider(selectors, row) {
            reached_postseason = true;
            break;
        }
        if is_header_row(row) {
            continue;
        }
        if let Some(game) = parse_game_row(selectors, row, index)? {
            games.push(game);
        }
    }

    Ok(MonthPage::Games {
        games,
        reached_postseason,
    })
}

fn is_postseason_divider(selectors: &ScheduleSelectors, row: ElementRef) -> bool {
    row.select(&selectors.header_cell)
        .any(|cell| cell_text(cell) == POSTSEASON_MARKER)
}

fn is_header_row(row: ElementRef) -> bool {
    row.value().classes().any(|class| class == "thead")
}

/// Returns `None` for rows of games that have not been played
fn parse_game_row(
    selectors: &ScheduleSelectors,
    row: ElementRef,
    index: usize,
) -> Result<Option<GameRecord>, FeedError> {
    let visitor_pts = required_cell(selectors, row, &selectors.visitor_pts, "visitor_pts", index)?;
    let home_pts = required_cell(selectors, row, &selectors.home_pts, "home_pts", index)?;

    if visitor_pts.is_empty() || home_pts.is_empty() {
        debug!("Skipping unplayed game in schedule row {}", index);
        return Ok(None);
    }

    let visitor_pts = parse_score(&visitor_pts, index)?;
    let home_pts = parse_score(&home_pts, index)?;
    let visitor = required_cell(selectors, row, &selectors.visitor_team, "visitor_team_name", index)?;
    let home = required_cell(selectors, row, &selectors.home_team, "home_team_name", index)?;

    let game = if visitor_pts > home_pts {
        GameRecord::decided(visitor, home)
    } else if home_pts > visitor_pts {
        GameRecord::decided(home, visitor)
    } else {
        GameRecord::tie(visitor, home)
    };
    Ok(Some(game))
}

/// Text of a cell, preferring its link text the way team names are rendered
fn required_cell(
    selectors: &ScheduleSelectors,
    row: ElementRef,
    selector: &Selector,
    field: &'static str,
    index: usize,
) -> Result<String, FeedError> {
    let cell = row
        .select(selector)
        .next()
        .ok_or(FeedError::MissingField { field, row: index })?;

    let text = match cell.select(&selectors.link).next() {
        Some(link) => cell_text(link),
        None => cell_text(cell),
    };
    Ok(text)
}

fn parse_score(value: &str, index: usize) -> Result<u32, FeedError> {
    value.parse().map_err(|_| FeedError::InvalidScore {
        value: value.to_string(),
        row: index,
    })
}

fn cell_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Result<MonthPage, FeedError> {
        parse_month_page(&ScheduleSelectors::new().unwrap(), html)
    }

    fn row(visitor: &str, visitor_pts: &str, home: &str, home_pts: &str) -> String {
        format!(
            r#"<tr>
                <th data-stat="date_game"><a href="/boxscores/">Tue, Oct 17, 1967</a></th>
                <td data-stat="visitor_team_name"><a href="/teams/X/1968.html">{visitor}</a></td>
                <td data-stat="visitor_pts">{visitor_pts}</td>
                <td data-stat="home_team_name"><a href="/teams/Y/1968.html">{home}</a></td>
                <td data-stat="home_pts">{home_pts}</td>
            </tr>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body>
                <table id="schedule">
                    <thead><tr><th>Date</th></tr></thead>
                    <tbody>{}</tbody>
                </table>
            </body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_winner_and_loser_from_scores() {
        let html = page(&[
            row("Boston Celtics", "107", "Philadelphia 76ers", "120"),
            row("Los Angeles Lakers", "133", "Chicago Bulls", "101"),
        ]);

        let parsed = parse(&html).unwrap();

        assert_eq!(
            parsed,
            MonthPage::Games {
                games: vec![
                    GameRecord::decided("Philadelphia 76ers", "Boston Celtics"),
                    GameRecord::decided("Los Angeles Lakers", "Chicago Bulls"),
                ],
                reached_postseason: false,
            }
        );
    }

    #[test]
    fn test_stops_at_playoffs_divider() {
        let html = page(&[
            row("Boston Celtics", "99", "Detroit Pistons", "98"),
            r#"<tr class="thead"><th colspan="10">Playoffs</th></tr>"#.to_string(),
            row("Boston Celtics", "110", "Philadelphia 76ers", "100"),
        ]);

        let MonthPage::Games { games, reached_postseason } = parse(&html).unwrap() else {
            panic!("expected games");
        };

        assert!(reached_postseason);
        assert_eq!(games, vec![GameRecord::decided("Boston Celtics", "Detroit Pistons")]);
    }

    #[test]
    fn test_not_found_page_has_no_games() {
        let html = "<html><body><h1>Page Not Found (404 error)</h1></body></html>";

        assert_eq!(parse(html).unwrap(), MonthPage::NoGames);
    }

    #[test]
    fn test_unplayed_and_header_rows_are_skipped() {
        let html = page(&[
            r#"<tr class="thead"><th>Date</th><th>Visitor</th></tr>"#.to_string(),
            row("Boston Celtics", "", "Detroit Pistons", ""),
            row("Boston Celtics", "90", "Detroit Pistons", "91"),
        ]);

        let MonthPage::Games { games, .. } = parse(&html).unwrap() else {
            panic!("expected games");
        };

        assert_eq!(games, vec![GameRecord::decided("Detroit Pistons", "Boston Celtics")]);
    }

    #[test]
    fn test_equal_scores_become_tie() {
        let html = page(&[row("Chicago Bears", "10", "Green Bay Packers", "10")]);

        let MonthPage::Games { games, .. } = parse(&html).unwrap() else {
            panic!("expected games");
        };

        assert_eq!(games, vec![GameRecord::tie("Chicago Bears", "Green Bay Packers")]);
    }

    #[test]
    fn test_malformed_pages_are_errors() {
        assert_eq!(
            parse("<html><body><p>nothing</p></body></html>"),
            Err(FeedError::MissingScheduleTable)
        );

        let html = page(&[row("Boston Celtics", "9O", "Detroit Pistons", "91")]);
        assert!(matches!(parse(&html), Err(FeedError::InvalidScore { .. })));
    }
}
