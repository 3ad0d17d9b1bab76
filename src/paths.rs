//! Where the editor keeps its settings and logs.
//!
//! Development runs (cargo run / cargo test) keep everything in the working
//! directory. Installed builds use the platform locations:
//! - Linux: `~/.config/rustboard/` for settings, `~/.local/share/rustboard/` for logs
//! - Windows/macOS: one per-user data directory for both

use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILE_NAME;

const APP_DIR_NAME: &str = "rustboard";

/// Returns true for cargo runs and debug builds.
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Resolved settings and data roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Roots for the current build: local in dev mode, platform dirs otherwise
    pub fn resolve() -> Self {
        if is_dev_mode() {
            return Self::rooted_at(".");
        }
        Self::installed().unwrap_or_else(|| Self::rooted_at("."))
    }

    /// Keep settings and data together under `root`
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config_dir: root.clone(),
            data_dir: root,
        }
    }

    /// Platform locations, `None` when the platform reports no home directory
    pub fn installed() -> Option<Self> {
        let data_dir = dirs::data_dir()?.join(APP_DIR_NAME);

        #[cfg(target_os = "linux")]
        let config_dir = dirs::config_dir()?.join(APP_DIR_NAME);
        #[cfg(not(target_os = "linux"))]
        let config_dir = data_dir.clone();

        Some(Self {
            config_dir,
            data_dir,
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Settings file for the current build
pub fn config_file() -> PathBuf {
    AppPaths::resolve().config_file()
}

/// Log directory for the current build
pub fn logs_dir() -> PathBuf {
    AppPaths::resolve().logs_dir()
}
