//! Component Box - typed component trees from design-document selections.
//!
//! Each selected scene node is classified into one [`ComponentType`],
//! projected into a kind-specific [`BoxKind`] payload, and its children are
//! walked recursively. The result is a forest of [`ComponentBox`] trees ready
//! for JSON emission and downstream code generation.
//!
//! # Architecture
//!
//! ```text
//! SceneDocument ──► selection ──► TreeWalker ──► Vec<ComponentBox> ──► emit
//!                                   │
//!                                   ├─ Classifier   (node -> ComponentType)
//!                                   └─ project      (node, type -> BoxKind)
//! ```
//!
//! The engine is synchronous and pure: it only reads the host document.
//!
//! # Example
//!
//! ```
//! use component_box::{build_forest, emit, ComponentType};
//! use scene_types::{ComponentProperty, DocumentExport, ExportNode, NodeKind, SceneDocument};
//!
//! let button = ExportNode::new("1:2", NodeKind::Instance, "Button")
//!     .with_component_property("LabelText", ComponentProperty::text("Go"))
//!     .with_component_property("Size", ComponentProperty::text("M"))
//!     .with_component_property("OnClick", ComponentProperty::text("submit"))
//!     .with_component_property("Variant", ComponentProperty::text("primary"));
//! let doc = SceneDocument::from_export(DocumentExport::new(vec![button])).unwrap();
//!
//! let forest = build_forest(&doc.selection()).unwrap();
//! assert_eq!(forest[0].component_type(), ComponentType::Button);
//!
//! let json = emit::to_json(&forest, emit::EmitStyle::Compact).unwrap();
//! assert!(json.contains(r#""isFullWidth":true"#));
//! ```

pub mod classify;
pub mod emit;
mod error;
pub mod factory;
pub mod model;
pub mod policy;
pub mod walker;

// Re-exports
pub use classify::{classify, Classifier};
pub use error::{
    BoxError, EmitError, MissingPropertyError, ParseComponentTypeError, PolicyError, RootFailure,
};
pub use factory::project;
pub use model::{BoxKind, ButtonBox, ColumnBox, ComponentBox, ComponentType, ImageBox};
pub use policy::{BatchMode, PolicyOverrides, UnmatchedComponent, WalkPolicy};
pub use walker::{build_forest, search, Forest, OutlineEntry, TreeWalker};
