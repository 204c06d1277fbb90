use anyhow::Result;
use clap::Parser;
use scour::cli::Cli;
use std::env;

fn main() -> Result<()> {
    scour::init_logging();

    // Check if no arguments provided (only program name)
    if env::args().len() == 1 {
        Cli::show_interactive_menu();
        return Ok(());
    }

    let cli = Cli::parse();
    cli.run()
}
