//! Undo/Redo history engine.
//!
//! Every reversible edit to the board is described by an [`OperationCommand`]
//! built through the [`factory`], applied to the live scene by the
//! [`StateReconciler`], and recorded on the [`HistoryTimeline`]. Undo and redo
//! move the timeline cursor and hand the affected entry back to the
//! reconciler through the [`ReplayHandler`] seam.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action
//!
//! ## Module Structure
//!
//! - [`commands`] - Command kinds, payloads and reversal strategy
//! - [`factory`] - Builders that deep-clone their inputs into commands
//! - [`reconciler`] - Working scene state and command application
//! - [`callbacks`] - Change notifications for renderer and layer panel
//! - [`timeline`] - Entry log, cursor and undo/redo state machine
//! - [`systems`] - Bevy systems for shortcuts and undo/redo requests

pub mod callbacks;
pub mod commands;
mod element_ops;
pub mod factory;
mod layer_ops;
pub mod reconciler;
pub mod systems;
pub mod timeline;

#[cfg(test)]
mod tests;

pub use callbacks::ReconcilerCallbacks;
pub use commands::{CommandKind, OperationCommand, Reversal};
pub use reconciler::StateReconciler;
pub use systems::{HistoryChanged, RedoRequest, UndoRequest};
pub use timeline::{EntryPayload, HistoryTimeline, ReplayHandler, ReplayState, TimelineEntry};

use bevy::prelude::*;

use crate::config::HistoryConfig;
use crate::session::EditorSession;

pub struct HistoryPlugin;

impl Plugin for HistoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorSession>()
            .add_message::<UndoRequest>()
            .add_message::<RedoRequest>()
            .add_message::<HistoryChanged>()
            .add_systems(
                Update,
                (
                    systems::apply_history_config
                        .run_if(resource_exists_and_changed::<HistoryConfig>),
                    systems::handle_history_shortcuts,
                    systems::handle_undo_requests.run_if(on_message::<UndoRequest>),
                    systems::handle_redo_requests.run_if(on_message::<RedoRequest>),
                )
                    .chain(),
            )
            .add_systems(
                PostUpdate,
                systems::publish_history_state.run_if(resource_changed::<EditorSession>),
            );
    }
}
