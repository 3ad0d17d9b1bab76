//! Bevy systems for undo/redo shortcuts and requests.

use bevy::prelude::*;

use crate::config::HistoryConfig;
use crate::session::EditorSession;

/// Message to undo the most recent edit
#[derive(Message, Debug, Clone, Copy)]
pub struct UndoRequest;

/// Message to redo the most recently undone edit
#[derive(Message, Debug, Clone, Copy)]
pub struct RedoRequest;

/// Written whenever the session changed so toolbars can refresh their buttons
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryChanged {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// System to turn Ctrl+Z / Ctrl+Y / Ctrl+Shift+Z into undo/redo requests
pub fn handle_history_shortcuts(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut undo_requests: MessageWriter<UndoRequest>,
    mut redo_requests: MessageWriter<RedoRequest>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if !ctrl {
        return;
    }

    if !shift && keyboard.just_pressed(KeyCode::KeyZ) {
        undo_requests.write(UndoRequest);
    } else if keyboard.just_pressed(KeyCode::KeyY)
        || (shift && keyboard.just_pressed(KeyCode::KeyZ))
    {
        redo_requests.write(RedoRequest);
    }
}

/// System to apply pending undo requests
pub fn handle_undo_requests(
    mut requests: MessageReader<UndoRequest>,
    mut session: ResMut<EditorSession>,
) {
    for _ in requests.read() {
        if !session.undo() {
            debug!("Nothing to undo");
        }
    }
}

/// System to apply pending redo requests
pub fn handle_redo_requests(
    mut requests: MessageReader<RedoRequest>,
    mut session: ResMut<EditorSession>,
) {
    for _ in requests.read() {
        if !session.redo() {
            debug!("Nothing to redo");
        }
    }
}

/// System to report the undo/redo state after any edit, undo or redo
pub fn publish_history_state(
    session: Res<EditorSession>,
    mut changed: MessageWriter<HistoryChanged>,
) {
    changed.write(HistoryChanged {
        can_undo: session.can_undo(),
        can_redo: session.can_redo(),
    });
}

/// System to apply the history limits whenever the config resource changes
pub fn apply_history_config(config: Res<HistoryConfig>, mut session: ResMut<EditorSession>) {
    if session.settings() == &config.data {
        return;
    }
    session.apply_config(&config.data);
    info!(
        "History limited to {} entries, {} layers",
        config.data.max_history_size, config.data.max_layers
    );
}
