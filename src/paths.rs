//! Default on-disk locations. Every path can be overridden from the command
//! line or the matching `TASKDAY_*` environment variable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DB_FILE: &str = "tasks.db";
pub const STREAK_FILE: &str = "streak.json";
pub const LOG_FILE: &str = "taskday.log";

/// `$HOME`, if set.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// `$HOME/.taskday`
pub fn data_dir(home: Option<&Path>) -> Result<PathBuf> {
    let home = home.context("HOME environment variable not set")?;
    Ok(home.join(".taskday"))
}

/// Where each file lives for one invocation. Defaults under the data
/// directory are only looked up when a command asks for them.
#[derive(Debug, Clone, Default)]
pub struct Locations {
    pub db: Option<PathBuf>,
    pub streak_file: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl Locations {
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db {
            Some(p) => Ok(p.clone()),
            None => Ok(data_dir(self.home.as_deref())?.join(DB_FILE)),
        }
    }

    pub fn streak_path(&self) -> Result<PathBuf> {
        match &self.streak_file {
            Some(p) => Ok(p.clone()),
            None => Ok(data_dir(self.home.as_deref())?.join(STREAK_FILE)),
        }
    }

    /// Default log file for the interactive page, `None` without a home.
    pub fn page_log_path(&self) -> Option<PathBuf> {
        data_dir(self.home.as_deref())
            .ok()
            .map(|dir| dir.join(LOG_FILE))
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}
