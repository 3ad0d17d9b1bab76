use bevy::prelude::*;

use rustboard::history::systems::publish_history_state;
use rustboard::history::{HistoryChanged, RedoRequest, UndoRequest};
use rustboard::{EditorSession, Element, ElementKind, RustboardPlugin, logging, paths};

/// Log what each processed undo/redo left behind
fn report_history(mut changes: MessageReader<HistoryChanged>, session: Res<EditorSession>) {
    for change in changes.read() {
        info!(
            "History at {}/{} (undo: {}, redo: {}), {} element(s) on the board",
            session.timeline().current(),
            session.timeline().len() - 1,
            change.can_undo,
            change.can_redo,
            session.reconciler().elements().len()
        );
    }
}

/// Scripted edits on a headless board
fn seed_board(session: &mut EditorSession) {
    let layer_id = session
        .reconciler()
        .current_layer_id()
        .unwrap_or_default()
        .to_string();

    for (i, kind) in [ElementKind::Rectangle, ElementKind::Ellipse, ElementKind::Text]
        .into_iter()
        .enumerate()
    {
        let offset = i as f32 * 40.0;
        let element = Element::new(
            session.next_element_id(),
            kind,
            layer_id.clone(),
            Vec2::new(offset, offset),
        );
        if let Err(e) = session.add_element(element) {
            warn!("Demo edit rejected: {}", e);
        }
    }

    match session.create_layer("Annotations") {
        Ok(id) => info!("Created layer {}", id),
        Err(e) => warn!("Demo edit rejected: {}", e),
    }
}

fn main() {
    // Keep the guard alive for the duration of the program
    let _log_guard = logging::setup_logging(&paths::logs_dir());

    let mut app = App::new();
    app.add_plugins(RustboardPlugin)
        .add_systems(PostUpdate, report_history.after(publish_history_state));
    app.update();

    seed_board(&mut app.world_mut().resource_mut::<EditorSession>());

    for _ in 0..2 {
        app.world_mut().write_message(UndoRequest);
        app.update();
    }
    app.world_mut().write_message(RedoRequest);
    app.update();

    let session = app.world().resource::<EditorSession>();
    for entry in session.timeline().entries() {
        info!("{} {}", entry.timestamp.format("%H:%M:%S%.3f"), entry.description);
    }
}
