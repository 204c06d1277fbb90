//! Free-space measurement for the volume being cleaned.

use std::path::{Path, PathBuf};

const MB: u64 = 1024 * 1024;

/// Source of free-space snapshots, in MB
pub trait FreeSpace {
    /// `None` when the volume cannot be measured
    fn free_mb(&self) -> Option<u64>;
}

/// Free space of the disk mounted at (or above) `root`
#[derive(Debug, Clone)]
pub struct SystemDisk {
    root: PathBuf,
}

impl SystemDisk {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl FreeSpace for SystemDisk {
    fn free_mb(&self) -> Option<u64> {
        available_bytes(&self.root).map(|bytes| bytes / MB)
    }
}

/// Available bytes on the disk holding `path`
pub fn available_bytes(path: &Path) -> Option<u64> {
    use sysinfo::Disks;

    let mut disks = Disks::new_with_refreshed_list();
    disks.refresh();

    // Choose disk with the longest mount-point prefix match.
    let mut best: Option<(usize, u64)> = None; // (match_len, avail)
    for disk in disks.list() {
        let mount = disk.mount_point();
        if path.starts_with(mount) {
            let len = mount.as_os_str().len();
            if best.map(|b| len > b.0).unwrap_or(true) {
                best = Some((len, disk.available_space()));
            }
        }
    }

    best.map(|(_, avail)| avail)
}

/// Human-readable form of a size given in MB
pub fn format_mb(mb: u64) -> String {
    bytesize::to_string(mb.saturating_mul(MB), true)
}
