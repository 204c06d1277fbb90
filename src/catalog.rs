//! Task catalog construction.
//!
//! A catalog is chosen through a table keyed by (platform, mode). Every entry
//! is a plain function of the captured [`SystemPaths`] and
//! [`CatalogOptions`], so identical inputs give identical catalogs.

mod unix;
mod windows;

use crate::config::Config;
use crate::context::ExecutionContext;
use crate::error::ConfigurationError;
use crate::platform::{Mode, Platform};
use crate::profile::Profile;
use crate::task::Task;
use std::env;
use std::path::PathBuf;

type BuildFn = fn(&CatalogBuilder, Option<&Profile>) -> Result<Vec<Task>, ConfigurationError>;

const STRATEGIES: &[(Platform, Mode, BuildFn)] = &[
    (Platform::Windows, Mode::Safe, windows::safe),
    (Platform::Windows, Mode::Full, windows::full),
    (Platform::Windows, Mode::User, windows::user),
    (Platform::Unix, Mode::Safe, unix::safe),
    (Platform::Unix, Mode::Full, unix::full),
    (Platform::Unix, Mode::User, unix::user),
];

/// Ordered, immutable list of tasks for one run
#[derive(Debug, Default)]
pub struct Catalog {
    tasks: Vec<Task>,
}

impl Catalog {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.tasks.iter().map(Task::description).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Environment-derived roots, captured once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaths {
    /// e.g. `C:`
    pub system_drive: String,
    /// e.g. `C:\Windows`
    pub system_root: String,
    /// e.g. `C:\ProgramData`
    pub program_data: String,
    /// Home directory of the invoking user, if known
    pub home: Option<PathBuf>,
}

impl SystemPaths {
    /// Read `SystemDrive`, `SystemRoot`, `ProgramData` and `HOME`
    pub fn from_env() -> Self {
        let system_drive = env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        let system_root =
            env::var("SystemRoot").unwrap_or_else(|_| format!("{}\\Windows", system_drive));
        let program_data =
            env::var("ProgramData").unwrap_or_else(|_| format!("{}\\ProgramData", system_drive));
        let home = env::var_os("HOME").map(PathBuf::from);

        Self {
            system_drive,
            system_root,
            program_data,
            home,
        }
    }

    /// Fixed values for reproducible catalogs (previews on another OS, tests)
    pub fn defaults(home: Option<PathBuf>) -> Self {
        Self {
            system_drive: "C:".to_string(),
            system_root: "C:\\Windows".to_string(),
            program_data: "C:\\ProgramData".to_string(),
            home,
        }
    }

    /// Folder holding one directory per user profile
    pub fn profiles_root(&self, platform: Platform) -> PathBuf {
        match platform {
            Platform::Windows => windows::join(&self.system_drive, "Users"),
            Platform::Unix => PathBuf::from("/home"),
        }
    }

    /// Root of the volume whose free space is reported
    pub fn volume_root(&self, platform: Platform) -> PathBuf {
        match platform {
            Platform::Windows => PathBuf::from(format!("{}\\", self.system_drive)),
            Platform::Unix => PathBuf::from("/"),
        }
    }
}

/// Tunables that shape catalog contents
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Journal vacuum window in days
    pub journal_days: u64,
    /// Age in days after which log files are removed in full mode
    pub log_days: u64,
    /// Only add optional tool-cache tasks for tools found on PATH
    pub probe_tools: bool,
    /// Task descriptions to leave out (case-insensitive)
    pub excluded: Vec<String>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CatalogOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            journal_days: config.retention.journal_days,
            log_days: config.retention.log_days,
            probe_tools: config.tools.probe,
            excluded: config.exclusions.tasks.clone(),
        }
    }

    fn is_excluded(&self, description: &str) -> bool {
        self.excluded
            .iter()
            .any(|e| e.trim().eq_ignore_ascii_case(description))
    }
}

/// Builds catalogs for an [`ExecutionContext`]
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    paths: SystemPaths,
    options: CatalogOptions,
}

impl CatalogBuilder {
    pub fn new(paths: SystemPaths, options: CatalogOptions) -> Self {
        Self { paths, options }
    }

    pub fn paths(&self) -> &SystemPaths {
        &self.paths
    }

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Build the ordered catalog for `ctx`
    pub fn build(&self, ctx: &ExecutionContext) -> Result<Catalog, ConfigurationError> {
        let build = strategy(ctx.platform, ctx.mode);
        let tasks: Vec<Task> = build(self, ctx.profile())?
            .into_iter()
            .filter(|task| {
                let keep = !self.options.is_excluded(task.description());
                if !keep {
                    log::info!("Skipping excluded task '{}'", task.description());
                }
                keep
            })
            .collect();

        log::debug!(
            "Built {} catalog for {} with {} tasks",
            ctx.mode,
            ctx.platform,
            tasks.len()
        );
        Ok(Catalog::new(tasks))
    }

    /// False when probing is on and `program` is not on PATH
    fn has_tool(&self, program: &str) -> bool {
        !self.options.probe_tools || which::which(program).is_ok()
    }

    /// Append tool-cache tasks, skipping tools that are not installed
    fn push_tool_tasks(
        &self,
        tasks: &mut Vec<Task>,
        tools: &[(&str, &[&str])],
    ) -> Result<(), ConfigurationError> {
        for (description, argv) in tools {
            if self.has_tool(argv[0]) {
                tasks.push(Task::command(description, argv.iter().copied())?);
            } else {
                log::debug!("'{}' not found, leaving out '{}'", argv[0], description);
            }
        }
        Ok(())
    }
}

fn strategy(platform: Platform, mode: Mode) -> BuildFn {
    STRATEGIES
        .iter()
        .find(|(p, m, _)| *p == platform && *m == mode)
        .map(|(_, _, build)| *build)
        .unwrap_or(match mode {
            Mode::Safe => unix::safe,
            Mode::Full => unix::full,
            Mode::User => unix::user,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;
    use std::path::Path;

    fn builder() -> CatalogBuilder {
        let options = CatalogOptions {
            probe_tools: false,
            ..CatalogOptions::default()
        };
        CatalogBuilder::new(SystemPaths::defaults(Some(PathBuf::from("/root"))), options)
    }

    fn alice() -> Profile {
        Profile::select("alice", &["alice".to_string()]).unwrap()
    }

    fn contexts() -> Vec<ExecutionContext> {
        let mut all = Vec::new();
        for platform in [Platform::Windows, Platform::Unix] {
            for mode in [Mode::Safe, Mode::Full] {
                all.push(ExecutionContext::system(platform, mode, false).unwrap());
            }
            all.push(ExecutionContext::user(platform, alice(), false));
        }
        all
    }

    #[test]
    fn test_strategy_table_is_complete() {
        for platform in [Platform::Windows, Platform::Unix] {
            for mode in [Mode::Safe, Mode::Full, Mode::User] {
                assert!(STRATEGIES
                    .iter()
                    .any(|(p, m, _)| *p == platform && *m == mode));
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = builder();
        for ctx in contexts() {
            let first = builder.build(&ctx).unwrap();
            let second = builder.build(&ctx).unwrap();
            assert!(!first.is_empty());
            assert_eq!(first.descriptions(), second.descriptions());
            let details: Vec<String> = first.iter().map(Task::detail).collect();
            let again: Vec<String> = second.iter().map(Task::detail).collect();
            assert_eq!(details, again);
        }
    }

    #[test]
    fn test_full_is_superset_of_safe() {
        let builder = builder();
        for platform in [Platform::Windows, Platform::Unix] {
            let safe = builder
                .build(&ExecutionContext::system(platform, Mode::Safe, false).unwrap())
                .unwrap();
            let full = builder
                .build(&ExecutionContext::system(platform, Mode::Full, false).unwrap())
                .unwrap();
            let full_descriptions = full.descriptions();
            for description in safe.descriptions() {
                assert!(
                    full_descriptions.contains(&description),
                    "{} full catalog lacks '{}'",
                    platform,
                    description
                );
            }
            assert!(full.len() > safe.len());
        }
    }

    #[test]
    fn test_unix_safe_excludes_risky_tasks() {
        let catalog = builder()
            .build(&ExecutionContext::system(Platform::Unix, Mode::Safe, false).unwrap())
            .unwrap();

        for task in &catalog {
            match task.kind() {
                TaskKind::NativeOperation { path: Some(path), .. } => {
                    assert_ne!(path.as_path(), Path::new("/tmp"));
                    assert_ne!(path.as_path(), Path::new("/var/tmp"));
                }
                TaskKind::ExternalCommand { argv } => {
                    let line = argv.join(" ");
                    assert!(!line.contains("/tmp"), "{}", line);
                    assert!(!line.contains("systemctl"), "{}", line);
                    assert!(!line.contains("stop"), "{}", line);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_windows_safe_has_no_temp_root_or_service_stop() {
        let catalog = builder()
            .build(&ExecutionContext::system(Platform::Windows, Mode::Safe, false).unwrap())
            .unwrap();
        for task in &catalog {
            let detail = task.detail();
            assert_ne!(detail, "C:\\Windows\\Temp");
            assert!(!detail.contains("Stop-Service"));
        }
    }

    #[test]
    fn test_unix_user_paths_rooted_at_home() {
        let ctx = ExecutionContext::user(Platform::Unix, alice(), false);
        let catalog = builder().build(&ctx).unwrap();
        assert!(!catalog.is_empty());
        for task in &catalog {
            match task.kind() {
                TaskKind::NativeOperation { path: Some(path), .. } => {
                    assert!(path.starts_with("/home/alice"), "{}", path.display());
                }
                _ => panic!("user tasks are native folder purges, got {:?}", task.detail()),
            }
        }
    }

    #[test]
    fn test_windows_user_paths_rooted_at_profile() {
        let ctx = ExecutionContext::user(Platform::Windows, alice(), false);
        let catalog = builder().build(&ctx).unwrap();
        for task in &catalog {
            assert!(
                task.detail().starts_with("C:\\Users\\alice\\AppData\\Local\\"),
                "{}",
                task.detail()
            );
        }
    }

    #[test]
    fn test_retention_windows_in_descriptions() {
        let options = CatalogOptions {
            journal_days: 42,
            log_days: 7,
            probe_tools: false,
            excluded: Vec::new(),
        };
        let builder = CatalogBuilder::new(SystemPaths::defaults(None), options);
        let full = builder
            .build(&ExecutionContext::system(Platform::Unix, Mode::Full, false).unwrap())
            .unwrap();
        let descriptions = full.descriptions();
        assert!(descriptions.contains(&"Journal Logs (>42 days)"));
        assert!(descriptions.contains(&"System Logs (>7 days)"));
        assert!(full
            .iter()
            .any(|t| t.detail() == "journalctl --vacuum-time=42d"));
    }

    #[test]
    fn test_out_of_range_log_window_is_rejected() {
        let options = CatalogOptions {
            log_days: u64::MAX,
            probe_tools: false,
            ..CatalogOptions::default()
        };
        let builder = CatalogBuilder::new(SystemPaths::defaults(None), options);
        for platform in [Platform::Windows, Platform::Unix] {
            let ctx = ExecutionContext::system(platform, Mode::Full, false).unwrap();
            assert!(matches!(
                builder.build(&ctx),
                Err(ConfigurationError::RetentionOutOfRange { days: u64::MAX })
            ));
        }
    }

    #[test]
    fn test_exclusions_are_case_insensitive() {
        let options = CatalogOptions {
            probe_tools: false,
            excluded: vec!["apt cache".to_string()],
            ..CatalogOptions::default()
        };
        let builder = CatalogBuilder::new(SystemPaths::defaults(None), options);
        let catalog = builder
            .build(&ExecutionContext::system(Platform::Unix, Mode::Safe, false).unwrap())
            .unwrap();
        assert!(!catalog.descriptions().contains(&"Apt Cache"));
    }

    #[test]
    fn test_unix_safe_without_home_skips_thumbnails() {
        let options = CatalogOptions {
            probe_tools: false,
            ..CatalogOptions::default()
        };
        let with_home = CatalogBuilder::new(SystemPaths::defaults(Some(PathBuf::from("/root"))), options.clone());
        let without_home = CatalogBuilder::new(SystemPaths::defaults(None), options);
        let ctx = ExecutionContext::system(Platform::Unix, Mode::Safe, false).unwrap();

        assert!(with_home.build(&ctx).unwrap().descriptions().contains(&"Thumbnail Cache"));
        assert!(!without_home.build(&ctx).unwrap().descriptions().contains(&"Thumbnail Cache"));
    }

    #[test]
    fn test_profiles_root_per_platform() {
        let paths = SystemPaths::defaults(None);
        assert_eq!(paths.profiles_root(Platform::Unix), PathBuf::from("/home"));
        assert_eq!(
            paths.profiles_root(Platform::Windows),
            PathBuf::from("C:\\Users")
        );
        assert_eq!(paths.volume_root(Platform::Windows), PathBuf::from("C:\\"));
    }
}
