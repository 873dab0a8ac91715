//! Classifier - maps a scene node to one [`ComponentType`].
//!
//! Rules are grouped by structural kind and tried in order; the first rule
//! that matches decides. A node whose kind-specific rules all miss lands on
//! the catch-all. Absent optional data (no parent, no main component) means
//! "rule does not match", never an error.
//!
//! ```text
//! COMPONENT  name == "Rectangle"          -> RECTANGLE
//!            name == "Row"                -> ROW
//!            parent.name == "Modal"       -> MODAL
//!            otherwise                    -> UNKNOWN (or COLUMN, per policy)
//! INSTANCE   name == "Column"             -> COLUMN
//!            main component has VECTORs   -> IMAGE
//!            name == "Button"             -> BUTTON
//!            otherwise                    -> UNKNOWN
//! VECTOR / TEXT / RECTANGLE               -> same-named type
//! anything else                           -> UNKNOWN
//! ```

use crate::model::ComponentType;
use crate::policy::{UnmatchedComponent, WalkPolicy};
use scene_types::{NodeKind, SceneNode};

const RECTANGLE_NAME: &str = "Rectangle";
const ROW_NAME: &str = "Row";
const MODAL_SET_NAME: &str = "Modal";
const COLUMN_NAME: &str = "Column";
const BUTTON_NAME: &str = "Button";

/// Pure, total node classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    unmatched_component: UnmatchedComponent,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_policy(policy: &WalkPolicy) -> Self {
        Self {
            unmatched_component: policy.unmatched_component,
        }
    }

    pub fn with_unmatched_component(mut self, unmatched: UnmatchedComponent) -> Self {
        self.unmatched_component = unmatched;
        self
    }

    pub fn classify<N: SceneNode>(&self, node: &N) -> ComponentType {
        match node.kind() {
            NodeKind::Component => component_rules(node)
                .unwrap_or_else(|| self.unmatched_component.component_type()),
            NodeKind::Instance => instance_rules(node).unwrap_or(ComponentType::Unknown),
            NodeKind::Vector => ComponentType::Vector,
            NodeKind::Text => ComponentType::Text,
            NodeKind::Rectangle => ComponentType::Rectangle,
            _ => ComponentType::Unknown,
        }
    }
}

/// Classify with the default policy.
pub fn classify<N: SceneNode>(node: &N) -> ComponentType {
    Classifier::default().classify(node)
}

fn component_rules<N: SceneNode>(node: &N) -> Option<ComponentType> {
    match node.name() {
        RECTANGLE_NAME => return Some(ComponentType::Rectangle),
        ROW_NAME => return Some(ComponentType::Row),
        _ => {}
    }

    if node
        .parent()
        .is_some_and(|parent| parent.name() == MODAL_SET_NAME)
    {
        return Some(ComponentType::Modal);
    }

    None
}

fn instance_rules<N: SceneNode>(node: &N) -> Option<ComponentType> {
    if node.name() == COLUMN_NAME {
        return Some(ComponentType::Column);
    }

    if vector_child_count(node) > 0 {
        return Some(ComponentType::Image);
    }

    if node.name() == BUTTON_NAME {
        return Some(ComponentType::Button);
    }

    None
}

/// VECTOR children of the node's main component; 0 without one.
fn vector_child_count<N: SceneNode>(node: &N) -> usize {
    node.main_component()
        .map(|main| {
            main.children()
                .iter()
                .filter(|child| child.kind() == NodeKind::Vector)
                .count()
        })
        .unwrap_or(0)
}
