use anyhow::{Context, Result};
use std::io::Write;

use crate::records::LeagueTable;

pub const HEADER: [&str; 3] = [
    "Year",
    "RealOrProjGamesAbove500",
    "RealGamesAbove500IfShortSeason",
];

/// Write one CSV row per season of the league table
pub fn write_topline<W: Write>(writer: W, table: &LeagueTable) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER).context("Failed to write CSV header")?;

    for row in table.rows() {
        let raw = row
            .raw_short_season_value
            .map(format_decimal)
            .unwrap_or_default();
        csv.write_record([
            row.year.to_string(),
            format_decimal(row.projected_value),
            raw,
        ])
        .with_context(|| format!("Failed to write CSV row for {}", row.year))?;
    }

    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Shortest round-trip form, always with a fractional part (`4.0`, `2.333`)
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
