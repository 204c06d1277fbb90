//! Interactive menu feature.
//!
//! This module owns the CLI interactive menu display.

use super::Cli;
use crate::theme::Theme;

const COMMANDS: &[(&str, &str, &str)] = &[
    ("safe", "s", "Clean caches and vacuum old journal entries"),
    ("full", "f", "Safe tasks plus system temp folders, crash dumps and old logs"),
    ("user", "u", "Clean the cache, temp and trash folders of one profile"),
];

impl Cli {
    /// Show interactive menu when no command is provided
    pub fn show_interactive_menu() {
        println!();
        println!("{}", Theme::header("Scour - Cache, Temp and Log Cleanup"));
        println!("{}", Theme::divider(60));
        println!();
        println!("{}", Theme::primary("Available Commands:"));
        println!();
        for (name, alias, about) in COMMANDS {
            println!(
                "  {}  {}  {}",
                Theme::command(name),
                Theme::muted("or"),
                Theme::command(alias),
            );
            println!("     {} {}", Theme::muted("→"), about);
            println!();
        }
        println!("  {}", Theme::command("config"));
        println!("     {} View or reset configuration", Theme::muted("→"));
        println!();
        println!(
            "{}",
            Theme::muted("Add -y to skip prompts, --dry-run to only list the tasks.")
        );
        println!(
            "{}",
            Theme::muted("Tip: Use --help with any command for detailed options")
        );
        println!();
    }
}
