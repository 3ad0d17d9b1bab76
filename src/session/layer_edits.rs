use bevy::color::Color;

use crate::history::factory;
use crate::scene::{Element, LayerData, array_to_color, color_to_array};

use super::{EditorSession, SessionError};

impl EditorSession {
    fn existing_layer(&self, layer_id: &str) -> Result<&LayerData, SessionError> {
        self.reconciler
            .find_layer(layer_id)
            .ok_or_else(|| SessionError::LayerNotFound(layer_id.to_string()))
    }

    fn check_layer_capacity(&self) -> Result<(), SessionError> {
        let max = self.settings.max_layers;
        if self.reconciler.layers().len() >= max {
            return Err(SessionError::LayerCapacityExceeded { max });
        }
        Ok(())
    }

    /// Create a layer on top of the stack and make it current. Returns its id.
    pub fn create_layer(&mut self, name: &str) -> Result<String, SessionError> {
        self.check_layer_capacity()?;

        let mut layer = LayerData::new(self.ids.next_id("layer"), name);
        layer.order = self.reconciler.layers().len() as i32;
        let id = layer.id.clone();

        self.commit(
            factory::create_layer(&layer, None, None),
            format!("Create layer '{}'", name),
        );
        Ok(id)
    }

    /// Delete a layer and every element on it
    pub fn delete_layer(&mut self, layer_id: &str) -> Result<(), SessionError> {
        if self.reconciler.layers().len() <= 1 {
            self.existing_layer(layer_id)?;
            return Err(SessionError::LastLayer);
        }
        let layer = self.existing_layer(layer_id)?;
        let index = self.reconciler.layer_index(layer_id).unwrap_or_default();
        let elements: Vec<Element> = self
            .reconciler
            .elements()
            .iter()
            .filter(|element| element.layer_id == layer_id)
            .cloned()
            .collect();

        let description = format!("Delete layer '{}'", layer.name);
        let selected = self.reconciler.selected_ids();
        let command = factory::delete_layer(layer, index, &elements, selected, None, None);
        self.commit(command, description);
        Ok(())
    }

    pub fn rename_layer(&mut self, layer_id: &str, name: &str) -> Result<(), SessionError> {
        let layer = self.existing_layer(layer_id)?;
        if layer.name == name {
            return Ok(());
        }
        let command = factory::rename_layer(layer_id, &layer.name, name, None, None);
        self.commit(command, format!("Rename layer to '{}'", name));
        Ok(())
    }

    pub fn toggle_layer_visibility(&mut self, layer_id: &str) -> Result<(), SessionError> {
        let visible = self.existing_layer(layer_id)?.visible;
        let description = if visible { "Hide layer" } else { "Show layer" };
        self.commit(
            factory::toggle_layer_visibility(layer_id, visible, !visible, None, None),
            description,
        );
        Ok(())
    }

    pub fn toggle_layer_lock(&mut self, layer_id: &str) -> Result<(), SessionError> {
        let locked = self.existing_layer(layer_id)?.locked;
        let description = if locked { "Unlock layer" } else { "Lock layer" };
        self.commit(
            factory::toggle_layer_lock(layer_id, locked, !locked, None, None),
            description,
        );
        Ok(())
    }

    /// Move a layer to `index` in the stack (clamped to the top)
    pub fn move_layer(&mut self, layer_id: &str, index: usize) -> Result<(), SessionError> {
        self.existing_layer(layer_id)?;
        let from = self.reconciler.layer_index(layer_id).unwrap_or_default();
        let to = index.min(self.reconciler.layers().len() - 1);
        if from == to {
            return Ok(());
        }
        self.commit(
            factory::move_layer(layer_id, from, to, None, None),
            "Reorder layers",
        );
        Ok(())
    }

    pub fn set_layer_color(
        &mut self,
        layer_id: &str,
        color: Option<Color>,
    ) -> Result<(), SessionError> {
        let old_color = self.existing_layer(layer_id)?.color;
        let new_color = color.map(color_to_array);
        if old_color == new_color {
            return Ok(());
        }
        self.commit(
            factory::set_layer_color(layer_id, old_color, new_color, None, None),
            "Change layer color",
        );
        Ok(())
    }

    /// Tint of a layer, `None` for an unknown or untinted layer
    pub fn layer_color(&self, layer_id: &str) -> Option<Color> {
        self.reconciler.find_layer(layer_id)?.color.map(array_to_color)
    }

    /// Copy a layer and its elements directly above the source. Returns the new layer id.
    pub fn duplicate_layer(&mut self, layer_id: &str) -> Result<String, SessionError> {
        self.check_layer_capacity()?;
        let source = self.existing_layer(layer_id)?;

        let mut layer = source.clone();
        layer.id = self.ids.next_id("layer");
        layer.name = format!("{} copy", source.name);
        layer.element_ids.clear();

        let elements: Vec<Element> = self
            .reconciler
            .elements()
            .iter()
            .filter(|element| element.layer_id == layer_id)
            .map(|element| {
                let mut copy = element.clone();
                copy.id = self.next_element_id();
                copy.layer_id = layer.id.clone();
                copy
            })
            .collect();
        layer.element_ids = elements.iter().map(|element| element.id.clone()).collect();

        let id = layer.id.clone();
        let description = format!("Duplicate layer '{}'", source.name);
        self.commit(
            factory::duplicate_layer(layer_id, &layer, &elements, None, None),
            description,
        );
        Ok(id)
    }
}
