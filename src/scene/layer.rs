use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LAYER_ID, DEFAULT_LAYER_NAME};

/// A layer in the document's layer stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    /// Accent colour shown in the layer panel
    #[serde(default)]
    pub color: Option<[f32; 4]>,
    /// Position in the layer stack (0 = bottom)
    #[serde(default)]
    pub order: i32,
    /// Ids of the elements that belong to this layer
    #[serde(default)]
    pub element_ids: Vec<String>,
}

impl LayerData {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            locked: false,
            color: None,
            order: 0,
            element_ids: Vec::new(),
        }
    }

    /// The layer every fresh document starts with
    pub fn default_layer() -> Self {
        Self::new(DEFAULT_LAYER_ID, DEFAULT_LAYER_NAME)
    }

    pub fn contains(&self, element_id: &str) -> bool {
        self.element_ids.iter().any(|id| id == element_id)
    }

    /// Add an element id if it is not already a member
    pub fn add_member(&mut self, element_id: &str) -> bool {
        if self.contains(element_id) {
            return false;
        }
        self.element_ids.push(element_id.to_string());
        true
    }

    pub fn remove_member(&mut self, element_id: &str) -> bool {
        let before = self.element_ids.len();
        self.element_ids.retain(|id| id != element_id);
        before != self.element_ids.len()
    }
}

/// Rewrite every layer's `order` to match its position in the stack
pub fn normalize_layer_order(layers: &mut [LayerData]) {
    for (index, layer) in layers.iter_mut().enumerate() {
        layer.order = index as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layer() {
        let layer = LayerData::default_layer();
        assert_eq!(layer.id, DEFAULT_LAYER_ID);
        assert_eq!(layer.name, DEFAULT_LAYER_NAME);
        assert!(layer.visible);
        assert!(!layer.locked);
        assert!(layer.element_ids.is_empty());
    }

    #[test]
    fn test_membership_is_unique() {
        let mut layer = LayerData::new("l1", "One");
        assert!(layer.add_member("e1"));
        assert!(!layer.add_member("e1"));
        assert_eq!(layer.element_ids, vec!["e1".to_string()]);

        assert!(layer.remove_member("e1"));
        assert!(!layer.remove_member("e1"));
        assert!(!layer.contains("e1"));
    }

    #[test]
    fn test_normalize_layer_order() {
        let mut layers = vec![LayerData::new("a", "A"), LayerData::new("b", "B")];
        layers[0].order = 7;
        layers[1].order = -3;
        normalize_layer_order(&mut layers);
        assert_eq!(layers[0].order, 0);
        assert_eq!(layers[1].order, 1);
    }

    #[test]
    fn test_layer_serialization_roundtrip() {
        let mut layer = LayerData::new("l2", "Sketch");
        layer.color = Some([0.2, 0.4, 0.6, 1.0]);
        layer.locked = true;
        layer.add_member("e9");

        let json = serde_json::to_string(&layer).unwrap();
        let deserialized: LayerData = serde_json::from_str(&json).unwrap();
        assert_eq!(layer, deserialized);
    }
}
