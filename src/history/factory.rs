//! Command factory.
//!
//! One builder per command kind. Builders take borrowed inputs and clone
//! everything they embed, so a command never aliases caller-owned values.
//! Business rules are not checked here; callers validate before building.
//!
//! Every builder accepts the optional before/after states captured around the
//! edit. When both are present the command reverses by snapshot restore,
//! otherwise it reverses through its kind-specific payload.

use std::collections::BTreeSet;

use bevy::log::debug;
use bevy::math::Vec2;
use chrono::Utc;

use crate::scene::{Element, ElementStyle, ElementTransform, LayerData, SceneSnapshot};

use super::commands::{CommandKind, OperationCommand, Reversal};

fn reversal_for(before: Option<&SceneSnapshot>, after: Option<&SceneSnapshot>) -> Reversal {
    match (before, after) {
        (Some(before), Some(after)) => Reversal::Snapshot {
            before: Box::new(before.clone()),
            after: Box::new(after.clone()),
        },
        (None, None) => Reversal::Inverse,
        _ => {
            debug!("Only one side of the edit was captured, falling back to inverse replay");
            Reversal::Inverse
        }
    }
}

fn build(
    kind: CommandKind,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    OperationCommand {
        kind,
        reversal: reversal_for(before, after),
        timestamp: Utc::now(),
    }
}

/// Copy of `command` that reverses through the given captured states
pub fn with_states(
    command: &OperationCommand,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    OperationCommand {
        kind: command.kind.clone(),
        reversal: reversal_for(before, after),
        timestamp: command.timestamp,
    }
}

pub fn create_element(
    element: &Element,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::CreateElement {
            element: element.clone(),
        },
        before,
        after,
    )
}

/// `selected_before` is the selection at deletion time, brought back on undo
pub fn delete_element(
    element: &Element,
    selected_before: &BTreeSet<String>,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::DeleteElement {
            element: element.clone(),
            selected_before: selected_before.clone(),
        },
        before,
        after,
    )
}

pub fn move_element(
    element_id: &str,
    old_position: Vec2,
    new_position: Vec2,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::MoveElement {
            element_id: element_id.to_string(),
            old_position,
            new_position,
        },
        before,
        after,
    )
}

pub fn transform_element(
    element_id: &str,
    old_transform: ElementTransform,
    new_transform: ElementTransform,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::TransformElement {
            element_id: element_id.to_string(),
            old_transform,
            new_transform,
        },
        before,
        after,
    )
}

pub fn update_style(
    element_id: &str,
    old_style: &ElementStyle,
    new_style: &ElementStyle,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::UpdateStyle {
            element_id: element_id.to_string(),
            old_style: old_style.clone(),
            new_style: new_style.clone(),
        },
        before,
        after,
    )
}

/// Group heterogeneous commands into one undoable step
pub fn batch(
    commands: &[OperationCommand],
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::BatchOperation {
            commands: commands.to_vec(),
        },
        before,
        after,
    )
}

pub fn create_layer(
    layer: &LayerData,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::CreateLayer {
            layer: layer.clone(),
        },
        before,
        after,
    )
}

pub fn delete_layer(
    layer: &LayerData,
    index: usize,
    elements: &[Element],
    selected_before: &BTreeSet<String>,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::DeleteLayer {
            layer: layer.clone(),
            index,
            elements: elements.to_vec(),
            selected_before: selected_before.clone(),
        },
        before,
        after,
    )
}

pub fn rename_layer(
    layer_id: &str,
    old_name: &str,
    new_name: &str,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::RenameLayer {
            layer_id: layer_id.to_string(),
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
        },
        before,
        after,
    )
}

pub fn toggle_layer_visibility(
    layer_id: &str,
    old_visible: bool,
    new_visible: bool,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::ToggleLayerVisibility {
            layer_id: layer_id.to_string(),
            old_visible,
            new_visible,
        },
        before,
        after,
    )
}

pub fn toggle_layer_lock(
    layer_id: &str,
    old_locked: bool,
    new_locked: bool,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::ToggleLayerLock {
            layer_id: layer_id.to_string(),
            old_locked,
            new_locked,
        },
        before,
        after,
    )
}

pub fn move_layer(
    layer_id: &str,
    old_index: usize,
    new_index: usize,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::MoveLayer {
            layer_id: layer_id.to_string(),
            old_index,
            new_index,
        },
        before,
        after,
    )
}

pub fn set_layer_color(
    layer_id: &str,
    old_color: Option<[f32; 4]>,
    new_color: Option<[f32; 4]>,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::SetLayerColor {
            layer_id: layer_id.to_string(),
            old_color,
            new_color,
        },
        before,
        after,
    )
}

pub fn duplicate_layer(
    source_layer_id: &str,
    layer: &LayerData,
    elements: &[Element],
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::DuplicateLayer {
            source_layer_id: source_layer_id.to_string(),
            layer: layer.clone(),
            elements: elements.to_vec(),
        },
        before,
        after,
    )
}

pub fn copy_elements(element_ids: &[String]) -> OperationCommand {
    build(
        CommandKind::CopyElements {
            element_ids: element_ids.to_vec(),
        },
        None,
        None,
    )
}

pub fn paste_elements(
    elements: &[Element],
    selected_before: &BTreeSet<String>,
    before: Option<&SceneSnapshot>,
    after: Option<&SceneSnapshot>,
) -> OperationCommand {
    build(
        CommandKind::PasteElements {
            elements: elements.to_vec(),
            selected_before: selected_before.clone(),
        },
        before,
        after,
    )
}
