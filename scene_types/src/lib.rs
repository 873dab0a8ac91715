//! Scene Types - foundation types for the design-document scene graph.
//!
//! This crate models the host document as the component-box engine sees it:
//! a read-only tree of scene nodes with non-owning back-references to a
//! node's parent and, for instances, to the defining main component.
//!
//! ## Contents
//!
//! - [`NodeKind`] - structural kind vocabulary of the host
//! - [`ComponentProperties`] / [`VariantProperties`] - host property bags
//! - [`SceneNode`] - the read-only view the engine consumes
//! - [`SceneDocument`] / [`NodeRef`] - arena-backed implementation built from
//!   the host export format ([`DocumentExport`])
//!
//! ## Rules
//!
//! 1. **NO ENGINE LOGIC** - classification and projection live in `component_box`
//! 2. **READ ONLY** - nothing here mutates a node once the document is built
//! 3. **NO WORKSPACE DEPENDENCIES**
//!
//! ## Example
//!
//! ```
//! use scene_types::{DocumentExport, ExportNode, NodeKind, SceneDocument, SceneNode};
//!
//! let export = DocumentExport::new(vec![ExportNode::new("1:1", NodeKind::Frame, "Screen")
//!     .with_child(ExportNode::new("1:2", NodeKind::Text, "Title"))]);
//! let doc = SceneDocument::from_export(export).unwrap();
//!
//! let roots = doc.selection();
//! assert_eq!(roots[0].name(), "Screen");
//! assert_eq!(roots[0].children()[0].kind(), NodeKind::Text);
//! ```

mod document;
mod error;
mod export;
mod properties;

pub use document::{NodeIndex, NodeRecord, NodeRef, SceneDocument};
pub use error::DocumentError;
pub use export::{DocumentExport, ExportNode};
pub use properties::{
    ComponentProperties, ComponentProperty, ComponentPropertyKind, PropertyValue,
    VariantProperties,
};

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// STRUCTURAL KIND
// ============================================================================

/// Structural kind of a scene node, as reported by the host.
///
/// Only the kinds the engine reasons about are named; anything else the host
/// emits deserializes to [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Reusable element definition
    Component,
    /// Container of component variants
    ComponentSet,
    /// Placed copy of a component
    Instance,
    Text,
    Rectangle,
    Vector,
    Frame,
    Group,
    /// Any host kind not relevant to classification
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Host spelling of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Text => "TEXT",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Vector => "VECTOR",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// READ-ONLY NODE VIEW
// ============================================================================

/// Read-only view of one scene node.
///
/// `parent` and `main_component` are lookups into the externally owned tree,
/// never ownership: the returned handle borrows the same document.
pub trait SceneNode: Sized {
    /// Host identity, used to name a node in error reports.
    fn id(&self) -> &str;

    fn kind(&self) -> NodeKind;

    /// Author-assigned name.
    fn name(&self) -> &str;

    fn parent(&self) -> Option<Self>;

    /// Children in host order. Empty for leaf nodes.
    fn children(&self) -> Vec<Self>;

    /// Defining component of an instance, if the host could resolve it.
    fn main_component(&self) -> Option<Self>;

    fn component_properties(&self) -> Option<&ComponentProperties>;

    fn variant_properties(&self) -> Option<&VariantProperties>;
}
