//! Scene data model: elements, layers, selection snapshots.
//!
//! These are plain values. Every command and snapshot stores owned clones of
//! them, never references into the live scene.

mod color;
mod element;
mod ids;
mod layer;
mod snapshot;

pub use color::{array_to_color, color_to_array};
pub use element::{Element, ElementKind, ElementStyle, ElementTransform};
pub use ids::IdGenerator;
pub use layer::{LayerData, normalize_layer_order};
pub use snapshot::SceneSnapshot;
