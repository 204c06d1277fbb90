//! Config command feature.
//!
//! This module owns and handles the "scour config" command behavior.

use crate::config::Config;
use crate::theme::Theme;

/// Show the configuration unless `reset` or `path` asks for something else
pub(crate) fn handle_config(reset: bool, path: bool) -> anyhow::Result<()> {
    if reset {
        Config::default().save()?;
        println!("{} Configuration reset to defaults.", Theme::success("OK"));
    } else if path {
        println!("{}", Config::config_path()?.display());
    } else {
        print_config(&Config::load());
    }
    Ok(())
}

fn print_config(config: &Config) {
    println!("{}", Theme::header("Current Configuration"));
    println!("{}", Theme::divider(60));
    println!();
    println!("Retention:");
    println!("  Journal entries kept: {} days", config.retention.journal_days);
    println!("  Log files kept: {} days", config.retention.log_days);
    println!();
    println!("Timing:");
    println!("  Pause before first task: {} ms", config.timing.start_delay_ms);
    println!("  Pause before each task: {} ms", config.timing.task_delay_ms);
    println!("  Spinner interval: {} ms", config.timing.tick_ms);
    println!();
    println!("Excluded tasks:");
    if config.exclusions.tasks.is_empty() {
        println!("  (none)");
    } else {
        for task in &config.exclusions.tasks {
            println!("  {}", task);
        }
    }
    println!();
    println!("Tools:");
    println!("  Only clean caches of installed tools: {}", config.tools.probe);
    println!();
    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", Theme::muted(&path.display().to_string()));
    }
}
