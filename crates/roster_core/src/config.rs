//! Session configuration.
//!
//! # Invariants
//! - A validated config always carries a supported log level.
//! - `log_dir`, when set, is an absolute path.

use crate::logging::{default_log_level, init_logging, normalize_level, LoggingError};
use crate::notify::notice_board::DEFAULT_DISMISS_AFTER;
use std::time::Duration;

/// Knobs for building a `RosterSession` and its logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub log_level: String,
    /// File logging is skipped when `None`.
    pub log_dir: Option<String>,
    /// Notice lifetime; `None` keeps notices until replaced.
    pub notice_dismiss_after: Option<Duration>,
    /// Start from the demo roster instead of an empty store.
    pub seed_demo_roster: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            notice_dismiss_after: Some(DEFAULT_DISMISS_AFTER),
            seed_demo_roster: true,
        }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<(), LoggingError> {
        normalize_level(&self.log_level)?;
        if let Some(dir) = &self.log_dir {
            if dir.trim().is_empty() {
                return Err(LoggingError::EmptyLogDir);
            }
            if !std::path::Path::new(dir.trim()).is_absolute() {
                return Err(LoggingError::RelativeLogDir(dir.trim().to_string()));
            }
        }
        Ok(())
    }

    /// Starts file logging when a directory is configured.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        self.validate()?;
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir),
            None => Ok(()),
        }
    }
}
