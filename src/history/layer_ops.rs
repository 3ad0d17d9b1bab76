//! Layer-level mutations applied by the reconciler.

use bevy::log::debug;

use crate::scene::{Element, LayerData, normalize_layer_order};

use super::reconciler::StateReconciler;

impl StateReconciler {
    /// Insert a clone of `layer` at `index` (appended when `None`)
    pub(super) fn insert_layer(
        &mut self,
        layer: &LayerData,
        index: Option<usize>,
        make_current: bool,
    ) {
        if self.layer_index(&layer.id).is_some() {
            debug!("Layer {} already present, skipping insert", layer.id);
            return;
        }

        let index = index.unwrap_or(self.layers.len()).min(self.layers.len());
        self.layers.insert(index, layer.clone());
        normalize_layer_order(&mut self.layers);

        self.callbacks.layer_created(&self.layers[index]);
        self.callbacks.layers_changed(&self.layers);
        if make_current {
            self.set_current_layer_id(Some(layer.id.clone()));
        }
    }

    /// Remove a layer together with every element on it
    pub(super) fn remove_layer(&mut self, layer_id: &str) {
        if self.layer_index(layer_id).is_none() {
            debug!("Layer {} not found, nothing to remove", layer_id);
            return;
        }

        let member_ids: Vec<String> = self
            .elements
            .iter()
            .filter(|element| element.layer_id == layer_id)
            .map(|element| element.id.clone())
            .collect();
        for element_id in &member_ids {
            self.remove_element(element_id);
        }

        // Index may have shifted while members were removed
        if let Some(index) = self.layer_index(layer_id) {
            self.layers.remove(index);
        }
        normalize_layer_order(&mut self.layers);

        self.callbacks.layer_deleted(layer_id);
        self.callbacks.layers_changed(&self.layers);
        self.ensure_current_layer();
    }

    /// Bring back a deleted layer at its old index along with its elements
    pub(super) fn restore_layer(&mut self, layer: &LayerData, index: usize, elements: &[Element]) {
        self.insert_layer(layer, Some(index), false);
        for element in elements {
            self.insert_element(element);
        }
        self.callbacks.highlight_layer(&layer.id);
        self.callbacks.thumbnail_dirty(&layer.id);
    }

    fn update_layer(&mut self, layer_id: &str, update: impl FnOnce(&mut LayerData)) {
        let Some(layer) = self.layers.iter_mut().find(|layer| layer.id == layer_id) else {
            debug!("Layer {} not found, update skipped", layer_id);
            return;
        };

        update(layer);
        self.callbacks.layers_changed(&self.layers);
        self.callbacks.highlight_layer(layer_id);
    }

    pub(super) fn set_layer_name(&mut self, layer_id: &str, name: &str) {
        self.update_layer(layer_id, |layer| layer.name = name.to_string());
    }

    pub(super) fn set_layer_visible(&mut self, layer_id: &str, visible: bool) {
        self.update_layer(layer_id, |layer| layer.visible = visible);
    }

    pub(super) fn set_layer_locked(&mut self, layer_id: &str, locked: bool) {
        self.update_layer(layer_id, |layer| layer.locked = locked);
    }

    pub(super) fn set_layer_color(&mut self, layer_id: &str, color: Option<[f32; 4]>) {
        self.update_layer(layer_id, |layer| layer.color = color);
    }

    /// Move a layer to `index` in the stack, clamped to the stack bounds
    pub(super) fn reorder_layer(&mut self, layer_id: &str, index: usize) {
        let Some(from) = self.layer_index(layer_id) else {
            debug!("Layer {} not found, reorder skipped", layer_id);
            return;
        };

        let layer = self.layers.remove(from);
        let to = index.min(self.layers.len());
        self.layers.insert(to, layer);
        normalize_layer_order(&mut self.layers);

        self.callbacks.layers_changed(&self.layers);
        self.callbacks.highlight_layer(layer_id);
    }

    /// Insert a duplicated layer directly above its source
    pub(super) fn insert_duplicate_layer(
        &mut self,
        source_layer_id: &str,
        layer: &LayerData,
        elements: &[Element],
    ) {
        let index = self.layer_index(source_layer_id).map(|index| index + 1);
        self.insert_layer(layer, index, true);
        for element in elements {
            self.insert_element(element);
        }
        self.callbacks.highlight_layer(&layer.id);
    }
}
