//! Component box model - the engine's output tree.
//!
//! A [`ComponentBox`] is the discriminator-plus-payload [`BoxKind`] flattened
//! next to its `children`. On the wire:
//!
//! ```text
//! { "type": "BUTTON", "label": "Go", ..., "children": [ ... ] }
//! { "type": "ROW", "children": [] }
//! ```

use crate::error::ParseComponentTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// COMPONENT TYPE
// ============================================================================

/// Semantic kind assigned to a scene node by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Column,
    Row,
    Modal,
    Image,
    Text,
    Button,
    Rectangle,
    Unknown,
    Vector,
}

impl ComponentType {
    pub const ALL: [ComponentType; 9] = [
        ComponentType::Column,
        ComponentType::Row,
        ComponentType::Modal,
        ComponentType::Image,
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Rectangle,
        ComponentType::Unknown,
        ComponentType::Vector,
    ];

    /// Wire name of the kind (`"COLUMN"`, `"BUTTON"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            ComponentType::Column => "COLUMN",
            ComponentType::Row => "ROW",
            ComponentType::Modal => "MODAL",
            ComponentType::Image => "IMAGE",
            ComponentType::Text => "TEXT",
            ComponentType::Button => "BUTTON",
            ComponentType::Rectangle => "RECTANGLE",
            ComponentType::Unknown => "UNKNOWN",
            ComponentType::Vector => "VECTOR",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentType {
    type Err = ParseComponentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| ParseComponentTypeError(s.to_string()))
    }
}

// ============================================================================
// KIND PAYLOADS
// ============================================================================

/// BUTTON payload, read from the instance's component properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonBox {
    pub label: String,
    pub size: String,
    pub on_click: String,
    pub variant: String,
    /// Always `true`; buttons are emitted full width.
    pub is_full_width: bool,
}

/// IMAGE payload: the name of the main component that draws the image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageBox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// COLUMN payload, read from variant properties.
///
/// String fields other than the two alignments default to the literal text
/// `"null"` when the variant axis is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBox {
    pub vertical_arrangement: String,
    pub horizontal_alignment: String,
    pub fill_max_size: bool,
    pub fill_max_height: bool,
    pub fill_max_width: bool,
    pub padding: String,
    pub margin: String,
    pub background: String,
    pub weight: String,
    pub height: String,
    pub width: String,
    pub design_variant: String,
}

/// Kind discriminator plus kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoxKind {
    Column(ColumnBox),
    Row,
    Modal,
    Image(ImageBox),
    Text,
    Button(ButtonBox),
    Rectangle,
    Unknown,
    Vector,
}

impl BoxKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            BoxKind::Column(_) => ComponentType::Column,
            BoxKind::Row => ComponentType::Row,
            BoxKind::Modal => ComponentType::Modal,
            BoxKind::Image(_) => ComponentType::Image,
            BoxKind::Text => ComponentType::Text,
            BoxKind::Button(_) => ComponentType::Button,
            BoxKind::Rectangle => ComponentType::Rectangle,
            BoxKind::Unknown => ComponentType::Unknown,
            BoxKind::Vector => ComponentType::Vector,
        }
    }
}

// ============================================================================
// COMPONENT BOX
// ============================================================================

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBox {
    #[serde(flatten)]
    pub kind: BoxKind,
    #[serde(default)]
    pub children: Vec<ComponentBox>,
}

impl ComponentBox {
    /// A box with no children.
    pub fn new(kind: BoxKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<ComponentBox>) -> Self {
        self.children = children;
        self
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    /// Number of boxes in this subtree, including `self`.
    pub fn box_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            count += 1;
            stack.extend(&tree.children);
        }
        count
    }
}
