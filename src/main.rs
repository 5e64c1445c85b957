use anyhow::Result;

use tankiness::cli::Command;
use tankiness::{handle_ingest, handle_leagues, handle_process, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Ingest { seasons } => handle_ingest(seasons),
        Command::Process {
            seasons,
            input,
            output_dir,
        } => handle_process(seasons, input.clone(), output_dir.clone()),
        Command::Leagues => handle_leagues(),
    }
}
