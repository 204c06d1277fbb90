use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{self, Write};

use crate::output::OutputMode;
use crate::platform::{Mode, Platform};

mod commands;
mod interactive_menu;

/// Read a line from stdin after flushing any pending prompt.
pub(crate) fn read_line_from_stdin() -> io::Result<String> {
    io::stdout().flush()?;

    use std::io::BufRead;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();
    handle.read_line(&mut input)?;

    Ok(input)
}

/// Ask a yes/no question; anything but y/yes is "no"
pub(crate) fn prompt_yes_no(question: &str) -> io::Result<bool> {
    print!("{} [y/N]: ", question);
    let answer = read_line_from_stdin()?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[derive(Parser)]
#[command(name = "scour")]
#[command(version)]
#[command(about = "Run ordered cache, temp and log cleanup tasks and report the space freed")]
#[command(
    long_about = "Scour runs a fixed, ordered list of cleanup tasks for your platform, \
    one at a time, and reports how much disk space was reclaimed.\n\n\
    Examples:\n  \
    scour safe                 # Conservative cleanup with confirmation\n  \
    scour full -y              # Thorough cleanup without prompts\n  \
    scour user alice           # Clean one user profile\n  \
    scour safe --dry-run       # Show what would run\n  \
    scour full -y --json       # Machine-readable summary"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show failure details for each task
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Options shared by every cleanup command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Skip prompts and confirmation (implies verbose)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the task list and exit without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON summary instead of live output
    #[arg(long, requires = "yes")]
    pub json: bool,

    /// Preview the task list of another platform (needs --dry-run)
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Keep journal entries newer than N days
    #[arg(long, value_name = "DAYS")]
    pub journal_days: Option<u64>,

    /// Remove log files older than N days (full mode)
    #[arg(long, value_name = "DAYS")]
    pub log_days: Option<u64>,

    /// Skip the pauses between tasks
    #[arg(long)]
    pub no_pause: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean user and package caches and vacuum old journal entries
    #[command(visible_alias = "s")]
    Safe {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Everything in safe plus system temp folders, crash dumps and old logs
    #[command(visible_alias = "f")]
    Full {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Clean the cache, temp and trash folders of one user profile
    #[command(visible_alias = "u")]
    User {
        /// Profile name (prompted for when omitted)
        profile: Option<String>,

        #[command(flatten)]
        args: RunArgs,
    },

    /// View or reset the configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Reset configuration to defaults
        #[arg(long, conflicts_with_all = ["show", "path"])]
        reset: bool,

        /// Print the configuration file location
        #[arg(long, conflicts_with = "show")]
        path: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let output_mode = OutputMode::from_flags(self.quiet, self.verbose);

        match self.command {
            None => {
                Self::show_interactive_menu();
                Ok(())
            }
            Some(command) => match command {
                Commands::Safe { args } => {
                    commands::cleanup_command::handle_cleanup(Mode::Safe, None, args, output_mode)
                }
                Commands::Full { args } => {
                    commands::cleanup_command::handle_cleanup(Mode::Full, None, args, output_mode)
                }
                Commands::User { profile, args } => commands::cleanup_command::handle_cleanup(
                    Mode::User,
                    profile,
                    args,
                    output_mode,
                ),
                Commands::Config { reset, path, .. } => {
                    commands::config_command::handle_config(reset, path)
                }
            },
        }
    }
}
