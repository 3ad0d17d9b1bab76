use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Element, LayerData};

/// A deep copy of the editable state at one instant.
///
/// Every part is optional: restoring a snapshot only touches the parts it
/// carries. The bootstrap timeline entry stores elements and selection only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub elements: Option<Vec<Element>>,
    #[serde(default)]
    pub layers: Option<Vec<LayerData>>,
    #[serde(default)]
    pub selected_ids: Option<BTreeSet<String>>,
}

impl SceneSnapshot {
    /// Capture of the whole editable state
    pub fn full(
        elements: &[Element],
        layers: &[LayerData],
        selected_ids: &BTreeSet<String>,
    ) -> Self {
        Self {
            elements: Some(elements.to_vec()),
            layers: Some(layers.to_vec()),
            selected_ids: Some(selected_ids.clone()),
        }
    }

    /// Elements and selection only, used for the bootstrap entry
    pub fn elements_only(elements: &[Element], selected_ids: &BTreeSet<String>) -> Self {
        Self {
            elements: Some(elements.to_vec()),
            layers: None,
            selected_ids: Some(selected_ids.clone()),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;

    use super::*;
    use crate::scene::ElementKind;

    #[test]
    fn test_missing_parts_deserialize_as_none() {
        let snapshot: SceneSnapshot = serde_json::from_str(r#"{"selected_ids":["a"]}"#).unwrap();
        assert!(snapshot.elements.is_none());
        assert!(snapshot.layers.is_none());
        assert_eq!(snapshot.selected_ids.unwrap().len(), 1);
    }

    #[test]
    fn test_full_snapshot_is_detached_copy() {
        let mut elements = vec![Element::new("e1", ElementKind::Line, "l", Vec2::ZERO)];
        let layers = vec![LayerData::new("l", "L")];
        let selected = BTreeSet::from(["e1".to_string()]);

        let snapshot = SceneSnapshot::full(&elements, &layers, &selected);
        elements[0].position = Vec2::new(9.0, 9.0);

        let captured = snapshot.elements.as_ref().unwrap();
        assert_eq!(captured[0].position, Vec2::ZERO);
        assert_eq!(snapshot.element_count(), 1);
    }

    #[test]
    fn test_elements_only_has_no_layers() {
        let snapshot = SceneSnapshot::elements_only(&[], &BTreeSet::new());
        assert!(snapshot.layers.is_none());
        assert_eq!(snapshot.element_count(), 0);
    }
}
