//! Windows catalogs.
//!
//! Paths are assembled as strings with `\` separators so a preview built on
//! another OS shows the same text a Windows run would.

use super::CatalogBuilder;
use crate::error::ConfigurationError;
use crate::platform::Platform;
use crate::profile::Profile;
use crate::task::Task;
use std::path::{Path, PathBuf};

const TOOL_CACHES: &[(&str, &[&str])] = &[
    ("Pip Cache", &["pip", "cache", "purge"]),
    ("Npm Cache", &["npm", "cache", "clean", "--force"]),
    ("Yarn Cache", &["yarn", "cache", "clean"]),
    ("Go Module Cache", &["go", "clean", "-modcache"]),
    ("Docker Unused Data", &["docker", "system", "prune", "-af"]),
];

/// Join `rel` onto `base` with a Windows separator
pub(super) fn join(base: &str, rel: &str) -> PathBuf {
    PathBuf::from(format!("{}\\{}", base.trim_end_matches('\\'), rel))
}

fn join_path(base: &Path, rel: &str) -> PathBuf {
    join(&base.display().to_string(), rel)
}

pub(super) fn safe(
    builder: &CatalogBuilder,
    _profile: Option<&Profile>,
) -> Result<Vec<Task>, ConfigurationError> {
    let paths = builder.paths();
    let root = paths.system_root.as_str();
    let data = paths.program_data.as_str();

    Ok(vec![
        Task::purge_folder(
            "Windows Update Logs",
            join(data, "Microsoft\\Windows\\WindowsUpdate\\Logs"),
        )?,
        Task::purge_folder(
            "Defender Scan Cache",
            join(data, "Microsoft\\Windows Defender\\Scans\\History\\CacheManager"),
        )?,
        Task::purge_folder(
            "Delivery Optimization",
            join(root, "SoftwareDistribution\\DeliveryOptimization"),
        )?,
        Task::purge_folder(
            "Windows Update Downloads",
            join(root, "SoftwareDistribution\\Download"),
        )?,
        Task::command("DNS Cache", ["ipconfig", "/flushdns"])?,
    ])
}

pub(super) fn full(
    builder: &CatalogBuilder,
    profile: Option<&Profile>,
) -> Result<Vec<Task>, ConfigurationError> {
    let mut tasks = safe(builder, profile)?;
    let paths = builder.paths();
    let root = paths.system_root.as_str();
    let data = paths.program_data.as_str();
    let log_days = builder.options().log_days;

    tasks.push(Task::purge_folder("Temp Folder", join(root, "Temp"))?);
    tasks.push(Task::purge_folder("Prefetch Folder", join(root, "Prefetch"))?);
    tasks.push(Task::purge_folder(
        "Error Reports",
        join(data, "Microsoft\\Windows\\WER"),
    )?);
    tasks.push(Task::purge_folder(
        "Diagnostic Logs",
        join(root, "System32\\WDI\\LogFiles"),
    )?);
    tasks.push(Task::purge_older_than(
        &format!("Windows Logs (>{} days)", log_days),
        join(root, "Logs"),
        log_days,
    )?);
    tasks.push(Task::purge_folder(
        "Previous Windows Installation",
        join(&paths.system_drive, "Windows.old"),
    )?);
    tasks.push(Task::command(
        "Component Store Cleanup",
        [
            "dism",
            "/Online",
            "/Cleanup-Image",
            "/StartComponentCleanup",
            "/Quiet",
        ],
    )?);

    builder.push_tool_tasks(&mut tasks, TOOL_CACHES)?;
    Ok(tasks)
}

pub(super) fn user(
    builder: &CatalogBuilder,
    profile: Option<&Profile>,
) -> Result<Vec<Task>, ConfigurationError> {
    let profile = profile.ok_or(ConfigurationError::MissingProfile)?;
    let local = join_path(
        &builder.paths().profiles_root(Platform::Windows),
        &format!("{}\\AppData\\Local", profile.name()),
    );
    let local = local.display().to_string();

    Ok(vec![
        Task::purge_folder("Explorer Cache", join(&local, "Microsoft\\Windows\\Explorer"))?,
        Task::purge_folder("Crash Dumps", join(&local, "CrashDumps"))?,
        Task::purge_folder("Temp Folder", join(&local, "Temp"))?,
    ])
}
