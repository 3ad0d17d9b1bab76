//! Whiteboard editor core.
//!
//! Every mutation to the board (elements, layers) is recorded as a command on
//! a bounded history timeline and can be undone and redone while elements,
//! layers and selection stay consistent with each other.
//!
//! Rendering, pointer handling and per-tool behaviour live in the host
//! application; it feeds edits into an [`EditorSession`] and listens to the
//! reconciler callbacks to refresh its views.

pub mod config;
pub mod constants;
pub mod history;
pub mod logging;
pub mod paths;
pub mod scene;
pub mod session;

pub use config::{ConfigPlugin, HistoryConfig, HistoryConfigData};
pub use history::{
    CommandKind, HistoryPlugin, HistoryTimeline, OperationCommand, Reversal, StateReconciler,
    factory,
};
pub use scene::{Element, ElementKind, ElementStyle, ElementTransform, LayerData, SceneSnapshot};
pub use session::{EditorSession, SessionError};

use bevy::prelude::*;

/// Adds config loading and the undo/redo history to an app
pub struct RustboardPlugin;

impl Plugin for RustboardPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(config::ConfigPlugin)
            .add_plugins(history::HistoryPlugin);
    }
}
