pub mod leagues;
pub mod settings;

pub use leagues::{get_leagues, LeagueConfig};
