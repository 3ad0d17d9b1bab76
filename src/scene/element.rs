use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Shape family of a drawable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ElementKind {
    #[default]
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    /// Freehand pen stroke
    Freehand,
    Text,
}

impl ElementKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Ellipse => "Ellipse",
            ElementKind::Line => "Line",
            ElementKind::Arrow => "Arrow",
            ElementKind::Freehand => "Freehand",
            ElementKind::Text => "Text",
        }
    }
}

/// Geometry of an element relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementTransform {
    /// Rotation in radians
    pub rotation: f32,
    pub scale: Vec2,
    pub size: Vec2,
}

impl Default for ElementTransform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale: Vec2::ONE,
            size: Vec2::new(100.0, 100.0),
        }
    }
}

/// Visual style of an element. Colours are sRGBA arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub stroke_color: [f32; 4],
    #[serde(default)]
    pub fill_color: Option<[f32; 4]>,
    pub stroke_width: f32,
    pub opacity: f32,
    #[serde(default)]
    pub font_size: Option<f32>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: [0.0, 0.0, 0.0, 1.0],
            fill_color: None,
            stroke_width: 2.0,
            opacity: 1.0,
            font_size: None,
        }
    }
}

/// A drawable element on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub layer_id: String,
    pub position: Vec2,
    #[serde(default)]
    pub transform: ElementTransform,
    #[serde(default)]
    pub style: ElementStyle,
    /// Stroke points for freehand/line elements, relative to `position`
    #[serde(default)]
    pub points: Vec<Vec2>,
    #[serde(default)]
    pub text: Option<String>,
    /// Free-form tool data (e.g. pen pressure samples, connector bindings)
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Element {
    pub fn new(
        id: impl Into<String>,
        kind: ElementKind,
        layer_id: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            layer_id: layer_id.into(),
            position,
            transform: ElementTransform::default(),
            style: ElementStyle::default(),
            points: Vec::new(),
            text: None,
            data: serde_json::Value::Null,
        }
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_transform(mut self, transform: ElementTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_points(mut self, points: Vec<Vec2>) -> Self {
        self.points = points;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
