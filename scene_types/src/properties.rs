//! Host property bags.
//!
//! Component properties are bound to instances (labels, toggles, swaps);
//! variant properties name the axes of a component set member.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Component-level parameters bound to an instance, in host key order.
pub type ComponentProperties = IndexMap<String, ComponentProperty>;

/// Variant axes of a component set member (axis name -> chosen value).
pub type VariantProperties = BTreeMap<String, String>;

/// Kind of a component property as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentPropertyKind {
    Boolean,
    Text,
    InstanceSwap,
    Variant,
    #[serde(other)]
    Other,
}

/// One bound component property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentProperty {
    pub value: PropertyValue,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ComponentPropertyKind>,
}

impl ComponentProperty {
    /// Text-valued property without a declared kind
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: PropertyValue::Text(value.into()),
            kind: None,
        }
    }

    /// Boolean toggle
    pub fn flag(value: bool) -> Self {
        Self {
            value: PropertyValue::Flag(value),
            kind: Some(ComponentPropertyKind::Boolean),
        }
    }

    pub fn with_kind(mut self, kind: ComponentPropertyKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Value of a component property: text for most kinds, a flag for toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Text(String),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Flag(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Flag(b) => write!(f, "{}", b),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Flag(b)
    }
}
