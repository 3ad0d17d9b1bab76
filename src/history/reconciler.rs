//! State reconciler: the working copy of the scene that commands are applied
//! to, inverted against and replayed on.
//!
//! Lookups that miss (an element or layer deleted since the command was
//! built) are silent no-ops. Inside a batch this means a partially applied
//! batch produces no error; the miss is logged at debug level.

use std::collections::BTreeSet;

use bevy::log::debug;

use crate::scene::{Element, LayerData, SceneSnapshot, normalize_layer_order};

use super::callbacks::ReconcilerCallbacks;
use super::commands::{CommandKind, OperationCommand, Reversal};
use super::timeline::{HistoryTimeline, ReplayHandler};

#[derive(Default)]
pub struct StateReconciler {
    /// Insertion order is z-order
    pub(super) elements: Vec<Element>,
    pub(super) layers: Vec<LayerData>,
    pub(super) selected_ids: BTreeSet<String>,
    pub(super) current_layer_id: Option<String>,
    pub(super) callbacks: ReconcilerCallbacks,
}

impl StateReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callbacks_mut(&mut self) -> &mut ReconcilerCallbacks {
        &mut self.callbacks
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn layers(&self) -> &[LayerData] {
        &self.layers
    }

    pub fn selected_ids(&self) -> &BTreeSet<String> {
        &self.selected_ids
    }

    pub fn current_layer_id(&self) -> Option<&str> {
        self.current_layer_id.as_deref()
    }

    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn find_layer(&self, id: &str) -> Option<&LayerData> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.id == id)
    }

    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    /// Replace the working elements wholesale
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.callbacks.elements_changed(&self.elements);
    }

    pub fn set_selected_elements<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_ids = ids.into_iter().map(Into::into).collect();
        self.callbacks.selection_changed(&self.selected_ids);
    }

    /// Replace the working layer stack wholesale
    pub fn set_layers(&mut self, layers: Vec<LayerData>) {
        self.layers = layers;
        normalize_layer_order(&mut self.layers);
        self.callbacks.layers_changed(&self.layers);
    }

    pub fn set_current_layer_id(&mut self, layer_id: Option<String>) {
        if self.current_layer_id == layer_id {
            return;
        }
        self.current_layer_id = layer_id;
        self.callbacks
            .current_layer_changed(self.current_layer_id.as_deref());
    }

    /// Deep copy of elements, layers and selection
    pub fn capture_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::full(&self.elements, &self.layers, &self.selected_ids)
    }

    /// Restore each part of `snapshot` that is present, leaving the rest untouched
    pub fn restore_snapshot(&mut self, snapshot: &SceneSnapshot) {
        if let Some(elements) = &snapshot.elements {
            self.set_elements(elements.clone());
        }
        if let Some(layers) = &snapshot.layers {
            self.set_layers(layers.clone());
            self.callbacks.layer_state_sync(&self.layers);
            self.ensure_current_layer();
        }
        if let Some(selected) = &snapshot.selected_ids {
            self.set_selected_elements(selected.iter().cloned());
        }
        if snapshot.elements.is_some() || snapshot.layers.is_some() {
            for layer in &self.layers {
                self.callbacks.thumbnail_dirty(&layer.id);
            }
        }
    }

    /// Forward-apply a command's kind-specific semantics
    pub fn execute_command(&mut self, command: &OperationCommand) {
        debug!("Executing {}", command.label());
        self.apply_kind(&command.kind);
    }

    /// Reverse a command: captured `before` state wins, otherwise the kind inverse
    pub fn undo_command(&mut self, command: &OperationCommand) {
        match &command.reversal {
            Reversal::Snapshot { before, .. } => {
                debug!("Undo {} from captured state", command.label());
                self.restore_snapshot(before);
            }
            Reversal::Inverse => {
                debug!("Undo {} by inverse", command.label());
                self.invert_kind(&command.kind);
            }
        }
    }

    /// Replay a command: captured `after` state wins, otherwise the kind forward path
    pub fn redo_command(&mut self, command: &OperationCommand) {
        match &command.reversal {
            Reversal::Snapshot { after, .. } => {
                debug!("Redo {} from captured state", command.label());
                self.restore_snapshot(after);
                self.follow_created_layer(&command.kind);
            }
            Reversal::Inverse => {
                debug!("Redo {} by replay", command.label());
                self.apply_kind(&command.kind);
            }
        }
    }

    fn apply_kind(&mut self, kind: &CommandKind) {
        match kind {
            CommandKind::CreateElement { element } => self.insert_element(element),
            CommandKind::DeleteElement { element, .. } => {
                self.remove_element(&element.id);
            }
            CommandKind::MoveElement {
                element_id,
                new_position,
                ..
            } => self.set_element_position(element_id, *new_position),
            CommandKind::TransformElement {
                element_id,
                new_transform,
                ..
            } => self.set_element_transform(element_id, *new_transform),
            CommandKind::UpdateStyle {
                element_id,
                new_style,
                ..
            } => self.set_element_style(element_id, new_style),
            CommandKind::BatchOperation { commands } => {
                for command in commands {
                    self.redo_command(command);
                }
            }
            CommandKind::CreateLayer { layer } => self.insert_layer(layer, None, true),
            CommandKind::DeleteLayer { layer, .. } => self.remove_layer(&layer.id),
            CommandKind::RenameLayer {
                layer_id, new_name, ..
            } => self.set_layer_name(layer_id, new_name),
            CommandKind::ToggleLayerVisibility {
                layer_id,
                new_visible,
                ..
            } => self.set_layer_visible(layer_id, *new_visible),
            CommandKind::ToggleLayerLock {
                layer_id,
                new_locked,
                ..
            } => self.set_layer_locked(layer_id, *new_locked),
            CommandKind::MoveLayer {
                layer_id,
                new_index,
                ..
            } => self.reorder_layer(layer_id, *new_index),
            CommandKind::SetLayerColor {
                layer_id,
                new_color,
                ..
            } => self.set_layer_color(layer_id, *new_color),
            CommandKind::DuplicateLayer {
                source_layer_id,
                layer,
                elements,
            } => self.insert_duplicate_layer(source_layer_id, layer, elements),
            CommandKind::CopyElements { element_ids } => {
                debug!("Copy of {} element(s) leaves the scene unchanged", element_ids.len());
            }
            CommandKind::PasteElements { elements, .. } => self.insert_pasted(elements),
        }
    }

    fn invert_kind(&mut self, kind: &CommandKind) {
        match kind {
            CommandKind::CreateElement { element } => {
                self.remove_element(&element.id);
            }
            // Re-insertion appends; the original z position is not restored
            CommandKind::DeleteElement {
                element,
                selected_before,
            } => {
                self.insert_element(element);
                self.restore_selection(selected_before);
            }
            CommandKind::MoveElement {
                element_id,
                old_position,
                ..
            } => self.set_element_position(element_id, *old_position),
            CommandKind::TransformElement {
                element_id,
                old_transform,
                ..
            } => self.set_element_transform(element_id, *old_transform),
            CommandKind::UpdateStyle {
                element_id,
                old_style,
                ..
            } => self.set_element_style(element_id, old_style),
            CommandKind::BatchOperation { commands } => {
                for command in commands.iter().rev() {
                    self.undo_command(command);
                }
            }
            CommandKind::CreateLayer { layer } => self.remove_layer(&layer.id),
            CommandKind::DeleteLayer {
                layer,
                index,
                elements,
                selected_before,
            } => {
                self.restore_layer(layer, *index, elements);
                self.restore_selection(selected_before);
            }
            CommandKind::RenameLayer {
                layer_id, old_name, ..
            } => self.set_layer_name(layer_id, old_name),
            CommandKind::ToggleLayerVisibility {
                layer_id,
                old_visible,
                ..
            } => self.set_layer_visible(layer_id, *old_visible),
            CommandKind::ToggleLayerLock {
                layer_id,
                old_locked,
                ..
            } => self.set_layer_locked(layer_id, *old_locked),
            CommandKind::MoveLayer {
                layer_id,
                old_index,
                ..
            } => self.reorder_layer(layer_id, *old_index),
            CommandKind::SetLayerColor {
                layer_id,
                old_color,
                ..
            } => self.set_layer_color(layer_id, *old_color),
            CommandKind::DuplicateLayer { layer, .. } => self.remove_layer(&layer.id),
            CommandKind::CopyElements { .. } => {}
            CommandKind::PasteElements {
                elements,
                selected_before,
            } => {
                self.remove_pasted(elements);
                self.restore_selection(selected_before);
            }
        }
    }

    /// Make a replayed layer creation current, as the forward path does.
    /// Snapshots carry no current layer, so a restore alone would keep the old one.
    fn follow_created_layer(&mut self, kind: &CommandKind) {
        match kind {
            CommandKind::CreateLayer { layer } | CommandKind::DuplicateLayer { layer, .. } => {
                if self.layer_index(&layer.id).is_some() {
                    self.set_current_layer_id(Some(layer.id.clone()));
                }
            }
            CommandKind::BatchOperation { commands } => {
                for command in commands {
                    self.follow_created_layer(&command.kind);
                }
            }
            _ => {}
        }
    }

    fn restore_selection(&mut self, selected: &BTreeSet<String>) {
        if &self.selected_ids != selected {
            self.set_selected_elements(selected.iter().cloned());
        }
    }

    /// Point the current layer at an existing layer if it no longer exists
    pub(super) fn ensure_current_layer(&mut self) {
        let still_exists = self
            .current_layer_id
            .as_deref()
            .is_some_and(|id| self.layers.iter().any(|layer| layer.id == id));
        if !still_exists {
            let fallback = self.layers.first().map(|layer| layer.id.clone());
            self.set_current_layer_id(fallback);
        }
    }
}

impl ReplayHandler for StateReconciler {
    fn replay_undo(&mut self, command: &OperationCommand, _history: &mut HistoryTimeline) {
        self.undo_command(command);
    }

    fn replay_redo(&mut self, command: &OperationCommand, _history: &mut HistoryTimeline) {
        self.redo_command(command);
    }

    fn restore_state(&mut self, snapshot: &SceneSnapshot, _history: &mut HistoryTimeline) {
        self.restore_snapshot(snapshot);
    }
}
