use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "How far below .500 are a league's losing teams, season by season")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch schedule pages and store each season's games in the cache
    Ingest {
        #[command(flatten)]
        seasons: SeasonArgs,
    },
    /// Compute running records and tankiness reports from cached or file-based games
    Process {
        #[command(flatten)]
        seasons: SeasonArgs,
        /// JSON game file to read instead of the cache
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory for data.json and the topline CSV
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// List the supported leagues
    Leagues,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SeasonArgs {
    /// League preset
    #[arg(short, long, default_value = "nba")]
    pub league: String,
    /// First season to include, by the year it ends in
    #[arg(long)]
    pub start_year: Option<u16>,
    /// Last season to include, by the year it ends in
    #[arg(long)]
    pub end_year: Option<u16>,
}
