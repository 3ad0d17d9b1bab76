//! Change notifications emitted by the state reconciler.
//!
//! Collaborators (renderer, thumbnail cache, layer panel) register closures
//! here. Every callback is optional; unregistered ones are skipped. The
//! closures are `Send + Sync` so a session can live inside a Bevy resource.

use std::collections::BTreeSet;

use crate::scene::{Element, LayerData};

pub type ElementsCallback = Box<dyn FnMut(&[Element]) + Send + Sync>;
pub type SelectionCallback = Box<dyn FnMut(&BTreeSet<String>) + Send + Sync>;
pub type ElementCallback = Box<dyn FnMut(&Element) + Send + Sync>;
pub type IdCallback = Box<dyn FnMut(&str) + Send + Sync>;
pub type LayersCallback = Box<dyn FnMut(&[LayerData]) + Send + Sync>;
pub type LayerCallback = Box<dyn FnMut(&LayerData) + Send + Sync>;
pub type CurrentLayerCallback = Box<dyn FnMut(Option<&str>) + Send + Sync>;

#[derive(Default)]
pub struct ReconcilerCallbacks {
    elements_change: Option<ElementsCallback>,
    selection_change: Option<SelectionCallback>,
    element_update: Option<ElementCallback>,
    element_delete: Option<IdCallback>,
    element_create: Option<ElementCallback>,
    thumbnail_update: Option<IdCallback>,
    layers_change: Option<LayersCallback>,
    current_layer_change: Option<CurrentLayerCallback>,
    layer_highlight: Option<IdCallback>,
    layer_create: Option<LayerCallback>,
    layer_delete: Option<IdCallback>,
    layer_state_sync: Option<LayersCallback>,
}

impl ReconcilerCallbacks {
    pub fn on_elements_change(&mut self, f: impl FnMut(&[Element]) + Send + Sync + 'static) {
        self.elements_change = Some(Box::new(f));
    }

    pub fn on_selection_change(
        &mut self,
        f: impl FnMut(&BTreeSet<String>) + Send + Sync + 'static,
    ) {
        self.selection_change = Some(Box::new(f));
    }

    pub fn on_element_update(&mut self, f: impl FnMut(&Element) + Send + Sync + 'static) {
        self.element_update = Some(Box::new(f));
    }

    pub fn on_element_delete(&mut self, f: impl FnMut(&str) + Send + Sync + 'static) {
        self.element_delete = Some(Box::new(f));
    }

    pub fn on_element_create(&mut self, f: impl FnMut(&Element) + Send + Sync + 'static) {
        self.element_create = Some(Box::new(f));
    }

    /// Fired with a layer id whenever that layer's content changed
    pub fn on_thumbnail_update(&mut self, f: impl FnMut(&str) + Send + Sync + 'static) {
        self.thumbnail_update = Some(Box::new(f));
    }

    pub fn on_layers_change(&mut self, f: impl FnMut(&[LayerData]) + Send + Sync + 'static) {
        self.layers_change = Some(Box::new(f));
    }

    pub fn on_current_layer_change(
        &mut self,
        f: impl FnMut(Option<&str>) + Send + Sync + 'static,
    ) {
        self.current_layer_change = Some(Box::new(f));
    }

    /// Transient UI cue: flash the layer a replayed edit touched
    pub fn on_layer_highlight(&mut self, f: impl FnMut(&str) + Send + Sync + 'static) {
        self.layer_highlight = Some(Box::new(f));
    }

    pub fn on_layer_create(&mut self, f: impl FnMut(&LayerData) + Send + Sync + 'static) {
        self.layer_create = Some(Box::new(f));
    }

    pub fn on_layer_delete(&mut self, f: impl FnMut(&str) + Send + Sync + 'static) {
        self.layer_delete = Some(Box::new(f));
    }

    /// Fired when layer membership changed and an external layer owner must resync
    pub fn on_layer_state_sync(&mut self, f: impl FnMut(&[LayerData]) + Send + Sync + 'static) {
        self.layer_state_sync = Some(Box::new(f));
    }

    pub(crate) fn elements_changed(&mut self, elements: &[Element]) {
        if let Some(f) = self.elements_change.as_mut() {
            f(elements);
        }
    }

    pub(crate) fn selection_changed(&mut self, selected: &BTreeSet<String>) {
        if let Some(f) = self.selection_change.as_mut() {
            f(selected);
        }
    }

    pub(crate) fn element_updated(&mut self, element: &Element) {
        if let Some(f) = self.element_update.as_mut() {
            f(element);
        }
    }

    pub(crate) fn element_deleted(&mut self, element_id: &str) {
        if let Some(f) = self.element_delete.as_mut() {
            f(element_id);
        }
    }

    pub(crate) fn element_created(&mut self, element: &Element) {
        if let Some(f) = self.element_create.as_mut() {
            f(element);
        }
    }

    pub(crate) fn thumbnail_dirty(&mut self, layer_id: &str) {
        if let Some(f) = self.thumbnail_update.as_mut() {
            f(layer_id);
        }
    }

    pub(crate) fn layers_changed(&mut self, layers: &[LayerData]) {
        if let Some(f) = self.layers_change.as_mut() {
            f(layers);
        }
    }

    pub(crate) fn current_layer_changed(&mut self, layer_id: Option<&str>) {
        if let Some(f) = self.current_layer_change.as_mut() {
            f(layer_id);
        }
    }

    pub(crate) fn highlight_layer(&mut self, layer_id: &str) {
        if let Some(f) = self.layer_highlight.as_mut() {
            f(layer_id);
        }
    }

    pub(crate) fn layer_created(&mut self, layer: &LayerData) {
        if let Some(f) = self.layer_create.as_mut() {
            f(layer);
        }
    }

    pub(crate) fn layer_deleted(&mut self, layer_id: &str) {
        if let Some(f) = self.layer_delete.as_mut() {
            f(layer_id);
        }
    }

    pub(crate) fn layer_state_sync(&mut self, layers: &[LayerData]) {
        if let Some(f) = self.layer_state_sync.as_mut() {
            f(layers);
        }
    }
}
