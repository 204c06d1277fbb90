//! Per-run execution context.

use crate::error::ConfigurationError;
use crate::platform::{Mode, Platform};
use crate::profile::Profile;

/// Everything a run needs to know about how it was invoked.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub platform: Platform,
    pub mode: Mode,
    pub verbose: bool,
    profile: Option<Profile>,
}

impl ExecutionContext {
    /// Context for `safe` or `full` mode
    pub fn system(platform: Platform, mode: Mode, verbose: bool) -> Result<Self, ConfigurationError> {
        if mode == Mode::User {
            return Err(ConfigurationError::MissingProfile);
        }
        Ok(Self {
            platform,
            mode,
            verbose,
            profile: None,
        })
    }

    /// Context for `user` mode with an already validated profile
    pub fn user(platform: Platform, profile: Profile, verbose: bool) -> Self {
        Self {
            platform,
            mode: Mode::User,
            verbose,
            profile: Some(profile),
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }
}
