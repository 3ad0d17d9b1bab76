use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_MAX_HISTORY_SIZE, DEFAULT_MAX_LAYERS};

/// System set for config loading (host startup systems can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// History settings persisted to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfigData {
    /// Maximum number of timeline entries kept (oldest are trimmed)
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,

    /// Maximum number of layers a document may hold
    #[serde(default = "default_max_layers")]
    pub max_layers: usize,

    /// Capture full before/after states for every recorded edit
    #[serde(default = "default_capture_snapshots")]
    pub capture_snapshots: bool,
}

fn default_max_history_size() -> usize {
    DEFAULT_MAX_HISTORY_SIZE
}

fn default_max_layers() -> usize {
    DEFAULT_MAX_LAYERS
}

fn default_capture_snapshots() -> bool {
    true
}

impl Default for HistoryConfigData {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            max_layers: DEFAULT_MAX_LAYERS,
            capture_snapshots: true,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct HistoryConfig {
    /// The persisted configuration data
    pub data: HistoryConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            data: HistoryConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to replace the history settings; they are applied and persisted
#[derive(Message, Debug, Clone)]
pub struct UpdateConfigRequest(pub HistoryConfigData);

/// Result of loading config from disk
pub struct LoadConfigResult {
    pub config: HistoryConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from `config_path`, falling back to defaults
pub fn load_config(config_path: &Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded history config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        HistoryConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    HistoryConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (HistoryConfigData::default(), None)
    };

    LoadConfigResult {
        config: HistoryConfig {
            data,
            config_path: config_path.to_path_buf(),
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk. Returns whether the file was written.
pub fn save_config(config: &HistoryConfig) -> bool {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
                false
            } else {
                info!("Config saved to {:?}", config.config_path);
                true
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
            false
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(mut config: ResMut<HistoryConfig>) {
    let result = load_config(&config.config_path);
    config.data = result.config.data;
    config.dirty = result.config.dirty;

    if let Some(reason) = result.reset_reason {
        warn!("History settings reset to defaults: {}", reason);
    }
}

/// System to take new settings, mark them dirty and ask for a save
fn update_config_system(
    mut requests: MessageReader<UpdateConfigRequest>,
    mut config: ResMut<HistoryConfig>,
    mut save_requests: MessageWriter<SaveConfigRequest>,
) {
    for UpdateConfigRequest(data) in requests.read() {
        if &config.data == data {
            continue;
        }
        config.data = data.clone();
        config.dirty = true;
        save_requests.write(SaveConfigRequest);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<HistoryConfig>,
) {
    for _ in events.read() {
        if config.dirty && save_config(&config) {
            config.dirty = false;
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HistoryConfig>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateConfigRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    update_config_system.run_if(on_message::<UpdateConfigRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
