//! Centralized constants used across the crate.
//!
//! Limits that can be overridden at runtime live in [`crate::config`]; the
//! values here are the defaults those settings fall back to.

/// Default number of timeline entries kept before the oldest are trimmed
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Default maximum number of layers a document may hold
pub const DEFAULT_MAX_LAYERS: usize = 50;

/// Id of the layer every fresh document starts with
pub const DEFAULT_LAYER_ID: &str = "layer-default";

/// Display name of the layer every fresh document starts with
pub const DEFAULT_LAYER_NAME: &str = "Layer 1";

/// Description of the bootstrap timeline entry
pub const INITIAL_STATE_DESCRIPTION: &str = "Initial state";

/// Name of the persisted settings file
pub const CONFIG_FILE_NAME: &str = "rustboard.json";

/// Name of the log file written by [`crate::logging::setup_logging`]
pub const LOG_FILE_NAME: &str = "rustboard.log";
