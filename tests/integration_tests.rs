//! Integration tests for scour
//!
//! These tests verify end-to-end workflows and interactions between modules

use scour::catalog::{Catalog, CatalogBuilder, CatalogOptions, SystemPaths};
use scour::config::Config;
use scour::context::ExecutionContext;
use scour::disk::FreeSpace;
use scour::driver::{Driver, OutcomeStatus};
use scour::error::ConfigurationError;
use scour::platform::{Mode, Platform};
use scour::profile::{self, Profile};
use scour::task::Task;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

struct FixedDisk(Option<u64>);

impl FreeSpace for FixedDisk {
    fn free_mb(&self) -> Option<u64> {
        self.0
    }
}

fn offline_builder(config: &Config) -> CatalogBuilder {
    let mut options = CatalogOptions::from_config(config);
    options.probe_tools = false;
    CatalogBuilder::new(SystemPaths::defaults(Some(PathBuf::from("/home/alice"))), options)
}

#[test]
fn test_every_catalog_is_deterministic() {
    let builder = offline_builder(&Config::default());
    let alice = Profile::select("alice", &["alice".to_string()]).unwrap();

    for platform in [Platform::Windows, Platform::Unix] {
        let mut contexts = vec![
            ExecutionContext::system(platform, Mode::Safe, false).unwrap(),
            ExecutionContext::system(platform, Mode::Full, false).unwrap(),
        ];
        contexts.push(ExecutionContext::user(platform, alice.clone(), false));

        for ctx in contexts {
            let first = builder.build(&ctx).unwrap();
            let second = builder.build(&ctx).unwrap();
            assert_eq!(first.descriptions(), second.descriptions());
        }
    }
}

#[test]
fn test_unknown_os_uses_unix_catalog() {
    let builder = offline_builder(&Config::default());
    let platform = Platform::from_os("plan9");
    let ctx = ExecutionContext::system(platform, Mode::Safe, false).unwrap();
    let unix = ExecutionContext::system(Platform::Unix, Mode::Safe, false).unwrap();

    assert_eq!(
        builder.build(&ctx).unwrap().descriptions(),
        builder.build(&unix).unwrap().descriptions()
    );
}

#[test]
fn test_user_mode_rejects_unknown_profile_before_running() {
    let root = create_test_dir();
    fs::create_dir(root.path().join("alice")).unwrap();
    fs::write(root.path().join("not-a-profile.txt"), "x").unwrap();

    let available = profile::discover(root.path()).unwrap();
    assert_eq!(available, vec!["alice".to_string()]);

    let err = Profile::select("mallory", &available).unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownProfile { .. }));
    assert!(err.to_string().contains("mallory"));
}

#[test]
fn test_user_catalog_targets_selected_profile() {
    let builder = offline_builder(&Config::default());
    let alice = Profile::select("alice", &["alice".to_string(), "bob".to_string()]).unwrap();
    let catalog = builder
        .build(&ExecutionContext::user(Platform::Unix, alice, false))
        .unwrap();

    for task in &catalog {
        let detail = PathBuf::from(task.detail());
        assert!(detail.starts_with("/home/alice"), "{}", task.detail());
    }
}

#[test]
fn test_config_exclusions_shape_catalog() {
    let mut config = Config::default();
    config.exclusions.tasks = vec!["DNS CACHE".to_string()];
    let builder = offline_builder(&config);

    let catalog = builder
        .build(&ExecutionContext::system(Platform::Windows, Mode::Safe, false).unwrap())
        .unwrap();

    assert!(!catalog.descriptions().contains(&"DNS Cache"));
    assert!(catalog.descriptions().contains(&"Windows Update Logs"));
}

#[test]
fn test_driver_runs_purges_and_survives_failures() {
    let cache = create_test_dir();
    let trash = create_test_dir();
    fs::write(cache.path().join("thumb.png"), "png").unwrap();
    fs::create_dir_all(cache.path().join("fonts").join("v2")).unwrap();
    fs::write(trash.path().join("old.doc"), "doc").unwrap();

    let catalog = Catalog::new(vec![
        Task::purge_folder("Cache Folder", cache.path().to_path_buf()).unwrap(),
        Task::purge_folder("Missing Folder", cache.path().join("does-not-exist")).unwrap(),
        Task::command(
            "Missing Tool",
            ["scour-test-no-such-program-4f2a", "clean"],
        )
        .unwrap(),
        Task::purge_folder("Trash", trash.path().to_path_buf()).unwrap(),
    ]);

    let mut driver = Driver::new(Vec::new(), Box::new(FixedDisk(Some(2048))), true);
    let result = driver.run(&catalog);

    let statuses: Vec<bool> = result.outcomes.iter().map(|o| o.is_failure()).collect();
    assert_eq!(statuses, vec![false, true, true, false]);
    assert_eq!(result.outcomes[0].status, OutcomeStatus::Succeeded);
    assert_eq!(result.freed_mb(), 0);
    assert!(!result.interrupted);

    assert!(cache.path().is_dir());
    assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 0);
    assert_eq!(fs::read_dir(trash.path()).unwrap().count(), 0);

    let out = String::from_utf8(driver.into_inner()).unwrap();
    assert!(out.contains("Cleaning: Missing Tool FINISHED\n  └─ failed to start"));
    assert!(out.contains("Cleaning: Trash FINISHED"));
    assert!(out.trim_end().ends_with("Cleaned approx: 0 MB disk space"));
}

#[test]
fn test_empty_catalog_run_is_silent() {
    let mut driver = Driver::new(Vec::new(), Box::new(FixedDisk(Some(1))), true);
    let result = driver.run(&Catalog::default());

    assert!(result.outcomes.is_empty());
    assert_eq!(result.freed_mb(), 0);
    assert!(driver.into_inner().is_empty());
}

#[cfg(unix)]
#[test]
fn test_command_failure_detail_includes_output() {
    let catalog = Catalog::new(vec![Task::command(
        "Noisy Failure",
        ["sh", "-c", "echo disk locked 1>&2; exit 2"],
    )
    .unwrap()]);

    let mut driver = Driver::new(Vec::new(), Box::new(FixedDisk(None)), false);
    let result = driver.run(&catalog);

    match &result.outcomes[0].status {
        OutcomeStatus::Failed(detail) => {
            assert!(detail.contains("disk locked"), "{}", detail);
            assert!(detail.contains("sh -c"), "{}", detail);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}
