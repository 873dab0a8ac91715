//! Host export format.
//!
//! ```text
//! { "selection": ["1:2", ...],
//!   "nodes": [ { "id", "type", "name", "children"?, "mainComponentId"?,
//!                "componentProperties"?, "variantProperties"? }, ... ] }
//! ```
//!
//! Nesting carries the parent relation; instances point at their main
//! component by host id.

use crate::properties::{ComponentProperties, ComponentProperty, VariantProperties};
use crate::NodeKind;
use serde::{Deserialize, Serialize};

/// A page export: top-level nodes plus the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentExport {
    /// Selected node ids, in selection order. Empty means "all top-level nodes".
    #[serde(default)]
    pub selection: Vec<String>,
    pub nodes: Vec<ExportNode>,
}

impl DocumentExport {
    pub fn new(nodes: Vec<ExportNode>) -> Self {
        Self {
            selection: Vec::new(),
            nodes,
        }
    }

    pub fn with_selection<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// One exported node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExportNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_component_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_properties: Option<ComponentProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_properties: Option<VariantProperties>,
}

impl ExportNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            children: Vec::new(),
            main_component_id: None,
            component_properties: None,
            variant_properties: None,
        }
    }

    pub fn with_child(mut self, child: ExportNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ExportNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_main_component(mut self, id: impl Into<String>) -> Self {
        self.main_component_id = Some(id.into());
        self
    }

    /// Bind a component property. Insertion order is preserved.
    pub fn with_component_property(
        mut self,
        key: impl Into<String>,
        property: ComponentProperty,
    ) -> Self {
        self.component_properties
            .get_or_insert_with(ComponentProperties::new)
            .insert(key.into(), property);
        self
    }

    pub fn with_variant_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.variant_properties
            .get_or_insert_with(VariantProperties::new)
            .insert(key.into(), value.into());
        self
    }
}
