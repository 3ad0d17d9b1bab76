//! Editor session: one open document's timeline and working scene.
//!
//! The session is the scene owner described by the history engine: each edit
//! captures the state before it, builds a command, applies it through the
//! reconciler, captures the state after it and records the result. Undo and
//! redo are delegated to the timeline with the reconciler as replay handler.

mod element_edits;
mod error;
mod layer_edits;


pub use error::SessionError;

use bevy::log::debug;
use bevy::prelude::Resource;

use crate::config::HistoryConfigData;
use crate::constants::DEFAULT_LAYER_ID;
use crate::history::{HistoryTimeline, OperationCommand, StateReconciler, factory};
use crate::scene::{IdGenerator, LayerData};

#[derive(Resource)]
pub struct EditorSession {
    timeline: HistoryTimeline,
    reconciler: StateReconciler,
    settings: HistoryConfigData,
    ids: IdGenerator,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(HistoryConfigData::default())
    }
}

impl EditorSession {
    /// Fresh document with a single default layer
    pub fn new(settings: HistoryConfigData) -> Self {
        let mut reconciler = StateReconciler::new();
        reconciler.set_layers(vec![LayerData::default_layer()]);
        reconciler.set_current_layer_id(Some(DEFAULT_LAYER_ID.to_string()));

        Self {
            timeline: HistoryTimeline::new(settings.max_history_size),
            reconciler,
            settings,
            ids: IdGenerator::new(),
        }
    }

    pub fn timeline(&self) -> &HistoryTimeline {
        &self.timeline
    }

    /// Mutable timeline access, for registering history listeners
    pub fn timeline_mut(&mut self) -> &mut HistoryTimeline {
        &mut self.timeline
    }

    pub fn reconciler(&self) -> &StateReconciler {
        &self.reconciler
    }

    /// Mutable reconciler access, for registering callbacks and seeding state
    pub fn reconciler_mut(&mut self) -> &mut StateReconciler {
        &mut self.reconciler
    }

    pub fn settings(&self) -> &HistoryConfigData {
        &self.settings
    }

    pub fn apply_config(&mut self, settings: &HistoryConfigData) {
        self.timeline.set_max_size(settings.max_history_size);
        self.settings = settings.clone();
    }

    /// Generate a fresh element id
    pub fn next_element_id(&self) -> String {
        self.ids.next_id("element")
    }

    pub fn undo(&mut self) -> bool {
        self.timeline.undo(&mut self.reconciler)
    }

    pub fn redo(&mut self) -> bool {
        self.timeline.redo(&mut self.reconciler)
    }

    pub fn can_undo(&self) -> bool {
        self.timeline.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.timeline.can_redo()
    }

    /// Jump to a timeline entry, e.g. from a history panel
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.timeline.jump_to(index, &mut self.reconciler)
    }

    /// Reset for a new document: empty board, default layer, fresh history
    pub fn clear(&mut self) {
        self.timeline.clear();
        self.reconciler.set_selected_elements(Vec::<String>::new());
        self.reconciler.set_elements(Vec::new());
        self.reconciler.set_layers(vec![LayerData::default_layer()]);
        self.reconciler
            .set_current_layer_id(Some(DEFAULT_LAYER_ID.to_string()));
    }

    /// Replace the selection. Selection changes are not recorded.
    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reconciler.set_selected_elements(ids);
    }

    /// Apply `command` to the working scene and record it
    fn commit(&mut self, command: OperationCommand, description: impl Into<String>) {
        let before = self
            .settings
            .capture_snapshots
            .then(|| self.reconciler.capture_snapshot());

        self.reconciler.execute_command(&command);

        let command = match before {
            Some(before) => {
                let after = self.reconciler.capture_snapshot();
                factory::with_states(&command, Some(&before), Some(&after))
            }
            None => command,
        };

        let description = description.into();
        debug!("Recording '{}'", description);
        self.timeline.record_command(command, description);
    }
}
