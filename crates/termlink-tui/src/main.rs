mod app;
mod cli;
mod config;
mod error;
mod logging;
mod render;
mod rng;
mod stats;
mod theme;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match app::run(cli) {
        Ok(true) => {
            println!("Terminal unlocked");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("Terminal locked");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
