use bevy::math::Vec2;

use crate::history::{OperationCommand, factory};
use crate::scene::{Element, ElementStyle, ElementTransform};

use super::{EditorSession, SessionError};

impl EditorSession {
    /// Look up an element whose layer accepts edits
    fn editable_element(&self, element_id: &str) -> Result<&Element, SessionError> {
        let element = self
            .reconciler
            .find_element(element_id)
            .ok_or_else(|| SessionError::ElementNotFound(element_id.to_string()))?;
        if self
            .reconciler
            .find_layer(&element.layer_id)
            .is_some_and(|layer| layer.locked)
        {
            return Err(SessionError::LayerLocked(element.layer_id.clone()));
        }
        Ok(element)
    }

    fn check_target_layer(&self, layer_id: &str) -> Result<(), SessionError> {
        let layer = self
            .reconciler
            .find_layer(layer_id)
            .ok_or_else(|| SessionError::LayerNotFound(layer_id.to_string()))?;
        if layer.locked {
            return Err(SessionError::LayerLocked(layer_id.to_string()));
        }
        Ok(())
    }

    pub fn add_element(&mut self, element: Element) -> Result<(), SessionError> {
        if self.reconciler.find_element(&element.id).is_some() {
            return Err(SessionError::DuplicateElement(element.id));
        }
        self.check_target_layer(&element.layer_id)?;

        let description = format!("Add {}", element.kind.display_name().to_lowercase());
        self.commit(factory::create_element(&element, None, None), description);
        Ok(())
    }

    /// Delete elements as one undoable step
    pub fn delete_elements(&mut self, element_ids: &[&str]) -> Result<(), SessionError> {
        let mut commands = Vec::with_capacity(element_ids.len());
        // Each step remembers the selection as it stands after the steps before it
        let mut selection = self.reconciler.selected_ids().clone();
        for id in element_ids {
            let element = self.editable_element(id)?;
            commands.push(factory::delete_element(element, &selection, None, None));
            selection.remove(*id);
        }

        match commands.len() {
            0 => {}
            1 => self.commit(commands.remove(0), "Delete element"),
            n => self.commit(
                factory::batch(&commands, None, None),
                format!("Delete {} elements", n),
            ),
        }
        Ok(())
    }

    pub fn move_element(&mut self, element_id: &str, position: Vec2) -> Result<(), SessionError> {
        self.move_elements(&[(element_id, position)])
    }

    /// Move elements to new positions as one undoable step
    pub fn move_elements(&mut self, moves: &[(&str, Vec2)]) -> Result<(), SessionError> {
        let mut commands: Vec<OperationCommand> = Vec::with_capacity(moves.len());
        for (id, position) in moves {
            let element = self.editable_element(id)?;
            if element.position == *position {
                continue;
            }
            commands.push(factory::move_element(
                id,
                element.position,
                *position,
                None,
                None,
            ));
        }

        match commands.len() {
            0 => {}
            1 => self.commit(commands.remove(0), "Move element"),
            n => self.commit(
                factory::batch(&commands, None, None),
                format!("Move {} elements", n),
            ),
        }
        Ok(())
    }

    pub fn transform_element(
        &mut self,
        element_id: &str,
        transform: ElementTransform,
    ) -> Result<(), SessionError> {
        let element = self.editable_element(element_id)?;
        if element.transform == transform {
            return Ok(());
        }
        let command =
            factory::transform_element(element_id, element.transform, transform, None, None);
        self.commit(command, "Transform element");
        Ok(())
    }

    pub fn update_style(
        &mut self,
        element_id: &str,
        style: ElementStyle,
    ) -> Result<(), SessionError> {
        let element = self.editable_element(element_id)?;
        if element.style == style {
            return Ok(());
        }
        let command = factory::update_style(element_id, &element.style, &style, None, None);
        self.commit(command, "Change style");
        Ok(())
    }

    /// Clone elements for the clipboard. The scene and timeline are unchanged.
    pub fn copy_elements(&mut self, element_ids: &[&str]) -> Result<Vec<Element>, SessionError> {
        let mut copied = Vec::with_capacity(element_ids.len());
        for id in element_ids {
            let element = self
                .reconciler
                .find_element(id)
                .ok_or_else(|| SessionError::ElementNotFound(id.to_string()))?;
            copied.push(element.clone());
        }

        let ids: Vec<String> = copied.iter().map(|element| element.id.clone()).collect();
        self.reconciler.execute_command(&factory::copy_elements(&ids));
        Ok(copied)
    }

    /// Paste clipboard elements onto the current layer, offset by `offset`.
    ///
    /// Pasted elements get fresh ids and become the selection. Returns the new ids.
    pub fn paste_elements(
        &mut self,
        clipboard: &[Element],
        offset: Vec2,
    ) -> Result<Vec<String>, SessionError> {
        if clipboard.is_empty() {
            return Ok(Vec::new());
        }

        let layer_id = self
            .reconciler
            .current_layer_id()
            .map(str::to_string)
            .ok_or(SessionError::NoCurrentLayer)?;
        self.check_target_layer(&layer_id)?;

        let pasted: Vec<Element> = clipboard
            .iter()
            .map(|source| {
                let mut element = source.clone();
                element.id = self.next_element_id();
                element.layer_id = layer_id.clone();
                element.position += offset;
                element
            })
            .collect();
        let ids = pasted.iter().map(|element| element.id.clone()).collect();

        let description = format!("Paste {} element(s)", pasted.len());
        let command =
            factory::paste_elements(&pasted, self.reconciler.selected_ids(), None, None);
        self.commit(command, description);
        Ok(ids)
    }
}
