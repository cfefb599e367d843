use anyhow::Result;
use colored::Colorize;

use tourney_tracker::cli::Command;
use tourney_tracker::{
    handle_completions, handle_overview, handle_pages, handle_serve, handle_submit, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(port),
        Command::Submit { url } => handle_submit(&url),
        Command::Overview { game, tier } => handle_overview(game, tier),
        Command::Pages => handle_pages(),
        Command::Completions { shell } => handle_completions(shell),
    }
}
