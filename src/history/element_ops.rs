//! Element-level mutations applied by the reconciler.

use bevy::log::debug;
use bevy::math::Vec2;

use crate::scene::{Element, ElementStyle, ElementTransform};

use super::reconciler::StateReconciler;

impl StateReconciler {
    /// Append a clone of `element` and register it with its layer
    pub(super) fn insert_element(&mut self, element: &Element) {
        if self.element_index(&element.id).is_some() {
            debug!("Element {} already present, skipping insert", element.id);
            return;
        }

        self.elements.push(element.clone());
        if let Some(layer) = self
            .layers
            .iter_mut()
            .find(|layer| layer.id == element.layer_id)
        {
            layer.add_member(&element.id);
        }

        self.callbacks.element_created(element);
        self.callbacks.elements_changed(&self.elements);
        self.callbacks.thumbnail_dirty(&element.layer_id);
        self.callbacks.layer_state_sync(&self.layers);
    }

    /// Remove an element, its selection entry and its layer membership
    pub(super) fn remove_element(&mut self, element_id: &str) -> Option<Element> {
        let Some(index) = self.element_index(element_id) else {
            debug!("Element {} not found, nothing to remove", element_id);
            return None;
        };

        let removed = self.elements.remove(index);
        if self.selected_ids.remove(element_id) {
            self.callbacks.selection_changed(&self.selected_ids);
        }
        for layer in self.layers.iter_mut() {
            layer.remove_member(element_id);
        }

        self.callbacks.element_deleted(element_id);
        self.callbacks.elements_changed(&self.elements);
        self.callbacks.thumbnail_dirty(&removed.layer_id);
        self.callbacks.layer_state_sync(&self.layers);
        Some(removed)
    }

    fn update_element(&mut self, element_id: &str, update: impl FnOnce(&mut Element)) {
        let Some(element) = self
            .elements
            .iter_mut()
            .find(|element| element.id == element_id)
        else {
            debug!("Element {} not found, update skipped", element_id);
            return;
        };

        update(element);
        let layer_id = element.layer_id.clone();
        self.callbacks.element_updated(element);
        self.callbacks.elements_changed(&self.elements);
        self.callbacks.thumbnail_dirty(&layer_id);
    }

    pub(super) fn set_element_position(&mut self, element_id: &str, position: Vec2) {
        self.update_element(element_id, |element| element.position = position);
    }

    pub(super) fn set_element_transform(&mut self, element_id: &str, transform: ElementTransform) {
        self.update_element(element_id, |element| element.transform = transform);
    }

    pub(super) fn set_element_style(&mut self, element_id: &str, style: &ElementStyle) {
        self.update_element(element_id, |element| element.style = style.clone());
    }

    /// Insert pasted elements and make them the selection
    pub(super) fn insert_pasted(&mut self, elements: &[Element]) {
        for element in elements {
            self.insert_element(element);
        }
        self.set_selected_elements(elements.iter().map(|element| element.id.clone()));
    }

    pub(super) fn remove_pasted(&mut self, elements: &[Element]) {
        for element in elements.iter().rev() {
            self.remove_element(&element.id);
        }
    }
}
