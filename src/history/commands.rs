//! Operation commands: immutable records of one semantic edit.

use std::collections::BTreeSet;

use bevy::math::Vec2;
use chrono::{DateTime, Utc};

use crate::scene::{Element, ElementStyle, ElementTransform, LayerData, SceneSnapshot};

/// What a command changes, with the data needed to apply and invert it
#[derive(Clone, Debug, PartialEq)]
pub enum CommandKind {
    /// An element was added to the board
    CreateElement { element: Element },
    /// An element was removed; `element` is the full value at deletion time
    DeleteElement {
        element: Element,
        selected_before: BTreeSet<String>,
    },
    MoveElement {
        element_id: String,
        old_position: Vec2,
        new_position: Vec2,
    },
    TransformElement {
        element_id: String,
        old_transform: ElementTransform,
        new_transform: ElementTransform,
    },
    UpdateStyle {
        element_id: String,
        old_style: ElementStyle,
        new_style: ElementStyle,
    },
    /// Sub-commands applied in order and undone in reverse order
    BatchOperation { commands: Vec<OperationCommand> },
    CreateLayer { layer: LayerData },
    /// A layer and every element on it were removed
    DeleteLayer {
        layer: LayerData,
        index: usize,
        elements: Vec<Element>,
        selected_before: BTreeSet<String>,
    },
    RenameLayer {
        layer_id: String,
        old_name: String,
        new_name: String,
    },
    ToggleLayerVisibility {
        layer_id: String,
        old_visible: bool,
        new_visible: bool,
    },
    ToggleLayerLock {
        layer_id: String,
        old_locked: bool,
        new_locked: bool,
    },
    MoveLayer {
        layer_id: String,
        old_index: usize,
        new_index: usize,
    },
    SetLayerColor {
        layer_id: String,
        old_color: Option<[f32; 4]>,
        new_color: Option<[f32; 4]>,
    },
    /// `layer` and `elements` are the freshly identified copies
    DuplicateLayer {
        source_layer_id: String,
        layer: LayerData,
        elements: Vec<Element>,
    },
    /// Elements were copied to the clipboard; the scene is unchanged
    CopyElements { element_ids: Vec<String> },
    /// Pasted elements replace the selection; `selected_before` is what they replaced
    PasteElements {
        elements: Vec<Element>,
        selected_before: BTreeSet<String>,
    },
}

impl CommandKind {
    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::CreateElement { .. } => "Create element",
            CommandKind::DeleteElement { .. } => "Delete element",
            CommandKind::MoveElement { .. } => "Move element",
            CommandKind::TransformElement { .. } => "Transform element",
            CommandKind::UpdateStyle { .. } => "Update style",
            CommandKind::BatchOperation { .. } => "Batch operation",
            CommandKind::CreateLayer { .. } => "Create layer",
            CommandKind::DeleteLayer { .. } => "Delete layer",
            CommandKind::RenameLayer { .. } => "Rename layer",
            CommandKind::ToggleLayerVisibility { .. } => "Toggle layer visibility",
            CommandKind::ToggleLayerLock { .. } => "Toggle layer lock",
            CommandKind::MoveLayer { .. } => "Move layer",
            CommandKind::SetLayerColor { .. } => "Set layer color",
            CommandKind::DuplicateLayer { .. } => "Duplicate layer",
            CommandKind::CopyElements { .. } => "Copy elements",
            CommandKind::PasteElements { .. } => "Paste elements",
        }
    }

    /// Ids of the elements or layer this command targets
    pub fn subject_ids(&self) -> Vec<String> {
        match self {
            CommandKind::CreateElement { element }
            | CommandKind::DeleteElement { element, .. } => vec![element.id.clone()],
            CommandKind::MoveElement { element_id, .. }
            | CommandKind::TransformElement { element_id, .. }
            | CommandKind::UpdateStyle { element_id, .. } => vec![element_id.clone()],
            CommandKind::BatchOperation { commands } => commands
                .iter()
                .flat_map(|command| command.kind.subject_ids())
                .collect(),
            CommandKind::CreateLayer { layer }
            | CommandKind::DeleteLayer { layer, .. }
            | CommandKind::DuplicateLayer { layer, .. } => vec![layer.id.clone()],
            CommandKind::RenameLayer { layer_id, .. }
            | CommandKind::ToggleLayerVisibility { layer_id, .. }
            | CommandKind::ToggleLayerLock { layer_id, .. }
            | CommandKind::MoveLayer { layer_id, .. }
            | CommandKind::SetLayerColor { layer_id, .. } => vec![layer_id.clone()],
            CommandKind::CopyElements { element_ids } => element_ids.clone(),
            CommandKind::PasteElements { elements, .. } => {
                elements.iter().map(|element| element.id.clone()).collect()
            }
        }
    }
}

/// How a command is reversed, fixed when the command is built
#[derive(Clone, Debug, PartialEq)]
pub enum Reversal {
    /// Replay the kind-specific inverse from the command payload
    Inverse,
    /// Restore whole captured states: `before` on undo, `after` on redo
    Snapshot {
        before: Box<SceneSnapshot>,
        after: Box<SceneSnapshot>,
    },
}

/// An immutable, self-contained description of one edit
#[derive(Clone, Debug, PartialEq)]
pub struct OperationCommand {
    pub kind: CommandKind,
    pub reversal: Reversal,
    /// Creation time, for diagnostics only
    pub timestamp: DateTime<Utc>,
}

impl OperationCommand {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn subject_ids(&self) -> Vec<String> {
        self.kind.subject_ids()
    }

    pub fn before_snapshot(&self) -> Option<&SceneSnapshot> {
        match &self.reversal {
            Reversal::Snapshot { before, .. } => Some(&**before),
            Reversal::Inverse => None,
        }
    }

    pub fn after_snapshot(&self) -> Option<&SceneSnapshot> {
        match &self.reversal {
            Reversal::Snapshot { after, .. } => Some(&**after),
            Reversal::Inverse => None,
        }
    }

    pub fn uses_snapshots(&self) -> bool {
        matches!(self.reversal, Reversal::Snapshot { .. })
    }
}
