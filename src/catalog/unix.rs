//! Linux and other Unix-like catalogs.

use super::CatalogBuilder;
use crate::error::ConfigurationError;
use crate::platform::Platform;
use crate::profile::Profile;
use crate::task::Task;
use std::path::PathBuf;

/// Tool caches added in full mode when the tool is installed
const TOOL_CACHES: &[(&str, &[&str])] = &[
    ("Pip Cache", &["pip", "cache", "purge"]),
    ("Npm Cache", &["npm", "cache", "clean", "--force"]),
    ("Yarn Cache", &["yarn", "cache", "clean"]),
    ("Composer Cache", &["composer", "clear-cache"]),
    ("Go Module Cache", &["go", "clean", "-modcache"]),
    ("Nix Garbage", &["nix-collect-garbage", "-d"]),
    ("Docker Unused Data", &["docker", "system", "prune", "-af"]),
    ("Podman Unused Data", &["podman", "system", "prune", "-af"]),
];

/// Folders emptied in full mode
const SCRATCH_FOLDERS: &[(&str, &str)] = &[
    ("Temp Folder", "/tmp"),
    ("Var Temp Folder", "/var/tmp"),
    ("Var Cache", "/var/cache"),
    ("Systemd Coredumps", "/var/lib/systemd/coredump"),
    ("Crash Reports", "/var/crash"),
];

pub(super) fn safe(
    builder: &CatalogBuilder,
    _profile: Option<&Profile>,
) -> Result<Vec<Task>, ConfigurationError> {
    let options = builder.options();
    let mut tasks = Vec::new();

    if let Some(home) = &builder.paths().home {
        tasks.push(Task::purge_folder(
            "Thumbnail Cache",
            home.join(".cache").join("thumbnails"),
        )?);
    }

    tasks.push(Task::command(
        &format!("Journal Logs (>{} days)", options.journal_days),
        [
            "journalctl".to_string(),
            format!("--vacuum-time={}d", options.journal_days),
        ],
    )?);
    tasks.push(Task::command("Font Cache", ["fc-cache", "-fr"])?);
    tasks.push(Task::command("Apt Cache", ["apt-get", "clean"])?);
    tasks.push(Task::command(
        "Flatpak Unused Runtimes",
        ["flatpak", "uninstall", "--unused", "-y"],
    )?);
    tasks.push(Task::command("Pacman Cache", ["pacman", "-Scc", "--noconfirm"])?);
    tasks.push(Task::command("DNF Cache", ["dnf", "clean", "all"])?);

    Ok(tasks)
}

pub(super) fn full(
    builder: &CatalogBuilder,
    profile: Option<&Profile>,
) -> Result<Vec<Task>, ConfigurationError> {
    let mut tasks = safe(builder, profile)?;

    for (description, folder) in SCRATCH_FOLDERS {
        tasks.push(Task::purge_folder(description, PathBuf::from(folder))?);
    }

    let log_days = builder.options().log_days;
    tasks.push(Task::purge_older_than(
        &format!("System Logs (>{} days)", log_days),
        PathBuf::from("/var/log"),
        log_days,
    )?);
    tasks.push(Task::command(
        "Systemd Temp Files",
        ["systemd-tmpfiles", "--clean"],
    )?);

    builder.push_tool_tasks(&mut tasks, TOOL_CACHES)?;
    Ok(tasks)
}

pub(super) fn user(
    builder: &CatalogBuilder,
    profile: Option<&Profile>,
) -> Result<Vec<Task>, ConfigurationError> {
    let profile = profile.ok_or(ConfigurationError::MissingProfile)?;
    let home = builder
        .paths()
        .profiles_root(Platform::Unix)
        .join(profile.name());

    Ok(vec![
        Task::purge_folder("Cache Folder", home.join(".cache"))?,
        Task::purge_folder("Thumbnails", home.join(".thumbnails"))?,
        Task::purge_folder("Trash", home.join(".local").join("share").join("Trash"))?,
    ])
}
