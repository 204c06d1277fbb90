//! User profile discovery and validation.
//!
//! A profile is the name of a home directory under the platform's profile
//! root (`/home` on Unix-family, `<SystemDrive>\Users` on Windows-family).
//! Only names that were actually discovered can become a [`Profile`].

use crate::error::ConfigurationError;
use std::fmt;
use std::fs;
use std::path::Path;

/// A validated profile name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile(String);

impl Profile {
    /// Validate `name` against the discovered profile list
    pub fn select(name: &str, available: &[String]) -> Result<Self, ConfigurationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigurationError::MissingProfile);
        }
        if available.iter().any(|p| p == name) {
            Ok(Profile(name.to_string()))
        } else {
            Err(ConfigurationError::unknown_profile(name))
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// List profile names (subdirectories) under `root`, sorted by name.
///
/// An empty root is an error, since user mode has nothing to offer then.
pub fn discover(root: &Path) -> Result<Vec<String>, ConfigurationError> {
    let entries = fs::read_dir(root).map_err(|source| ConfigurationError::ProfilesUnreadable {
        root: root.to_path_buf(),
        source,
    })?;

    let mut profiles: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    if profiles.is_empty() {
        return Err(ConfigurationError::NoProfiles(root.to_path_buf()));
    }

    profiles.sort();
    Ok(profiles)
}
