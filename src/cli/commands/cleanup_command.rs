//! Cleanup command feature.
//!
//! This module owns the "scour safe", "scour full" and "scour user" commands:
//! resolve the context, build and preview the catalog, confirm, then run it.

use crate::catalog::{Catalog, CatalogBuilder, CatalogOptions, SystemPaths};
use crate::cli::{prompt_yes_no, read_line_from_stdin, RunArgs};
use crate::config::Config;
use crate::context::ExecutionContext;
use crate::disk::{format_mb, SystemDisk};
use crate::driver::{Driver, OutcomeStatus, Pacing, RunResult};
use crate::error::ConfigurationError;
use crate::output::{self, OutputMode};
use crate::platform::{Mode, Platform};
use crate::profile::{self, Profile};
use crate::progress::{ProgressIndicator, SilentIndicator, Spinner};
use crate::theme::Theme;
use anyhow::Context;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) fn handle_cleanup(
    mode: Mode,
    profile_name: Option<String>,
    args: RunArgs,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let platform = resolve_platform(args.platform, Platform::current(), args.dry_run)?;
    let live = output_mode != OutputMode::Quiet && !args.json;

    let mut config = Config::load();
    config.apply_cli_overrides(args.journal_days, args.log_days, args.no_pause || !live);

    let paths = SystemPaths::from_env();
    let interactive = !args.yes;

    let verbose = match verbose_choice(args.yes, args.dry_run, output_mode) {
        Some(choice) => choice,
        None => prompt_yes_no("Show failure details for each task?")?,
    };

    let ctx = match mode {
        Mode::User => {
            let profile = select_profile(&paths, platform, profile_name.as_deref(), interactive)?;
            ExecutionContext::user(platform, profile, verbose)
        }
        _ => ExecutionContext::system(platform, mode, verbose)?,
    };

    let catalog = CatalogBuilder::new(paths.clone(), CatalogOptions::from_config(&config))
        .build(&ctx)?;
    if catalog.is_empty() {
        return Err(ConfigurationError::EmptyCatalog.into());
    }

    if live || args.dry_run {
        print_preview(&ctx, &catalog)?;
    }
    if args.dry_run {
        return Ok(());
    }

    if !args.yes && !prompt_yes_no(&format!("Run {} tasks now?", catalog.len()))? {
        println!("{}", Theme::muted("Cancelled."));
        return Ok(());
    }

    let interrupt = install_interrupt_handler();

    let out: Box<dyn Write> = if live {
        Box::new(io::stdout())
    } else {
        Box::new(io::sink())
    };
    let spinner = live && io::stdout().is_terminal();
    let indicator: Box<dyn ProgressIndicator> = if spinner {
        Box::new(Spinner::new(config.timing.tick()))
    } else {
        Box::new(SilentIndicator)
    };

    if live {
        println!();
        println!("{}", Theme::header("Cleaning"));
        println!("{}", Theme::divider(60));
    }

    let mut driver = Driver::new(
        out,
        Box::new(SystemDisk::new(paths.volume_root(platform))),
        ctx.verbose,
    )
    .with_indicator(indicator)
    .with_pacing(Pacing::from_timing(&config.timing))
    .with_line_erase(spinner)
    .with_interrupt(interrupt);

    let result = driver.run(&catalog);

    if args.json {
        output::print_json(&ctx, &result)?;
    } else if output_mode == OutputMode::Quiet {
        print_failures(&result);
    } else {
        print_totals(&result);
    }

    Ok(())
}

/// Only the running platform may be cleaned; others can be previewed
fn resolve_platform(
    requested: Option<Platform>,
    current: Platform,
    dry_run: bool,
) -> Result<Platform, ConfigurationError> {
    match requested {
        Some(requested) if requested != current && !dry_run => {
            Err(ConfigurationError::ForeignPlatform { requested, current })
        }
        Some(requested) => Ok(requested),
        None => Ok(current),
    }
}

/// `Some` when the flags already decide verbosity, `None` to ask
fn verbose_choice(yes: bool, dry_run: bool, output_mode: OutputMode) -> Option<bool> {
    match output_mode {
        _ if dry_run => Some(false),
        OutputMode::Quiet => Some(false),
        OutputMode::Verbose => Some(true),
        OutputMode::Normal if yes => Some(true),
        OutputMode::Normal => None,
    }
}

/// Validate the named profile, or list profiles and ask for one
fn select_profile(
    paths: &SystemPaths,
    platform: Platform,
    name: Option<&str>,
    interactive: bool,
) -> anyhow::Result<Profile> {
    let available = profile::discover(&paths.profiles_root(platform))?;

    let name = match name {
        Some(name) => name.to_string(),
        None if interactive => {
            println!("{}", Theme::primary("Available profiles:"));
            for candidate in &available {
                println!("  {}", candidate);
            }
            print!("Profile to clean: ");
            read_line_from_stdin().context("Failed to read profile name")?
        }
        None => return Err(ConfigurationError::MissingProfile.into()),
    };

    Ok(Profile::select(&name, &available)?)
}

fn print_preview(ctx: &ExecutionContext, catalog: &Catalog) -> anyhow::Result<()> {
    let mut title = format!(
        "Scheduled {} tasks ({} mode, {})",
        catalog.len(),
        ctx.mode,
        ctx.platform
    );
    if let Some(profile) = ctx.profile() {
        title.push_str(&format!(" for {}", profile));
    }

    println!();
    println!("{}", Theme::header(&title));
    println!("{}", Theme::divider(60));

    let mut stdout = io::stdout();
    output::write_preview(&mut stdout, catalog).context("Failed to print task list")?;
    println!();
    Ok(())
}

fn print_totals(result: &RunResult) {
    let failed = result.failed_count();
    let line = format!(
        "{} succeeded, {} failed, {} freed",
        result.succeeded_count(),
        failed,
        format_mb(result.freed_mb())
    );
    if failed > 0 {
        println!("{}", Theme::warning(&line));
        println!("{}", Theme::muted("Run with -v to see why tasks failed."));
    } else {
        println!("{}", Theme::success(&line));
    }
    if result.interrupted {
        println!("{}", Theme::warning("Stopped early on Ctrl+C."));
    }
}

fn print_failures(result: &RunResult) {
    for outcome in &result.outcomes {
        if let OutcomeStatus::Failed(detail) = &outcome.status {
            eprintln!("{} {}: {}", Theme::error("Failed"), outcome.description, detail);
        }
    }
}

/// Ctrl+C only sets a flag; the driver stops before the next task
fn install_interrupt_handler() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("{}", Theme::warning("Stopping after the current task..."));
        handler_flag.store(true, Ordering::SeqCst);
    }) {
        log::warn!("Could not install Ctrl+C handler: {}", e);
    }
    flag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_choice() {
        assert_eq!(verbose_choice(true, false, OutputMode::Normal), Some(true));
        assert_eq!(verbose_choice(false, false, OutputMode::Normal), None);
        assert_eq!(verbose_choice(false, false, OutputMode::Verbose), Some(true));
        assert_eq!(verbose_choice(true, false, OutputMode::Quiet), Some(false));
        assert_eq!(verbose_choice(false, true, OutputMode::Normal), Some(false));
    }

    #[test]
    fn test_foreign_platform_only_for_dry_run() {
        assert!(matches!(
            resolve_platform(Some(Platform::Windows), Platform::Unix, false),
            Err(ConfigurationError::ForeignPlatform { .. })
        ));
        assert_eq!(
            resolve_platform(Some(Platform::Windows), Platform::Unix, true).unwrap(),
            Platform::Windows
        );
        assert_eq!(
            resolve_platform(Some(Platform::Unix), Platform::Unix, false).unwrap(),
            Platform::Unix
        );
        assert_eq!(resolve_platform(None, Platform::Windows, false).unwrap(), Platform::Windows);
    }

    #[test]
    fn test_select_profile_without_name_is_configuration_error() {
        let paths = SystemPaths::defaults(None);
        let err = select_profile(&paths, Platform::Windows, None, false).unwrap_err();
        assert!(err.downcast_ref::<ConfigurationError>().is_some());
    }
}
