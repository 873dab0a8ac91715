//! Arena-backed scene document.
//!
//! Every node lives in one flat `Vec<NodeRecord>`; parent, child and
//! main-component links are `NodeIndex` values into that arena. `NodeRef`
//! is a borrowed view implementing [`SceneNode`].

use crate::error::DocumentError;
use crate::export::{DocumentExport, ExportNode};
use crate::properties::{ComponentProperties, VariantProperties};
use crate::{NodeKind, SceneNode};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Position of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

/// Stored state of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub main_component: Option<NodeIndex>,
    pub component_properties: Option<ComponentProperties>,
    pub variant_properties: Option<VariantProperties>,
}

/// A materialized, read-only host document.
#[derive(Debug, Clone, Default)]
pub struct SceneDocument {
    records: Vec<NodeRecord>,
    by_id: HashMap<String, NodeIndex>,
    top_level: Vec<NodeIndex>,
    selection: Vec<NodeIndex>,
}

impl SceneDocument {
    /// Parse a host export from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        let export: DocumentExport = serde_json::from_str(json)?;
        Self::from_export(export)
    }

    /// Parse a host export from a reader (file, stdin).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DocumentError> {
        let export: DocumentExport = serde_json::from_reader(reader)?;
        Self::from_export(export)
    }

    /// Build the arena from a nested export.
    ///
    /// Instances whose `mainComponentId` does not resolve keep no main
    /// component; that absence is tolerated, not an error.
    pub fn from_export(export: DocumentExport) -> Result<Self, DocumentError> {
        let DocumentExport { selection, nodes } = export;

        let mut doc = Self::default();
        let mut pending_links: Vec<(NodeIndex, String)> = Vec::new();

        for node in nodes {
            let index = doc.insert_subtree(node, &mut pending_links)?;
            doc.top_level.push(index);
        }

        for (index, target_id) in pending_links {
            match doc.by_id.get(&target_id) {
                Some(&target) => doc.records[index.0].main_component = Some(target),
                None => tracing::warn!(
                    node_id = %doc.records[index.0].id,
                    main_component_id = %target_id,
                    "main component not present in export; treating as absent"
                ),
            }
        }

        if selection.is_empty() {
            doc.selection = doc.top_level.clone();
        } else {
            doc.select(selection)?;
        }

        Ok(doc)
    }

    /// Insert one exported subtree without recursion. Returns the subtree root.
    fn insert_subtree(
        &mut self,
        root: ExportNode,
        pending_links: &mut Vec<(NodeIndex, String)>,
    ) -> Result<NodeIndex, DocumentError> {
        let root_index = NodeIndex(self.records.len());
        let mut stack: Vec<(ExportNode, Option<NodeIndex>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let ExportNode {
                id,
                kind,
                name,
                children,
                main_component_id,
                component_properties,
                variant_properties,
            } = node;

            if self.by_id.contains_key(&id) {
                return Err(DocumentError::DuplicateNodeId(id));
            }

            let index = NodeIndex(self.records.len());
            self.by_id.insert(id.clone(), index);
            if let Some(target_id) = main_component_id {
                pending_links.push((index, target_id));
            }

            self.records.push(NodeRecord {
                id,
                kind,
                name,
                parent,
                children: Vec::with_capacity(children.len()),
                main_component: None,
                component_properties,
                variant_properties,
            });

            if let Some(parent) = parent {
                self.records[parent.0].children.push(index);
            }

            // Reversed so children pop, and are appended to the parent, in host order.
            for child in children.into_iter().rev() {
                stack.push((child, Some(index)));
            }
        }

        Ok(root_index)
    }

    /// Replace the selection with the given node ids, in the given order.
    pub fn select<I, S>(&mut self, ids: I) -> Result<(), DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection = ids
            .into_iter()
            .map(|id| {
                let id = id.as_ref();
                self.by_id
                    .get(id)
                    .copied()
                    .ok_or_else(|| DocumentError::UnknownSelection(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.selection = selection;
        Ok(())
    }

    /// Currently selected roots, in selection order.
    pub fn selection(&self) -> Vec<NodeRef<'_>> {
        self.selection.iter().map(|&index| self.node(index)).collect()
    }

    /// Top-level nodes of the page, in host order.
    pub fn top_level(&self) -> Vec<NodeRef<'_>> {
        self.top_level.iter().map(|&index| self.node(index)).collect()
    }

    pub fn node(&self, index: NodeIndex) -> NodeRef<'_> {
        NodeRef { doc: self, index }
    }

    /// Look up a node by host id.
    pub fn get(&self, id: &str) -> Option<NodeRef<'_>> {
        self.by_id.get(id).map(|&index| self.node(index))
    }

    pub fn record(&self, index: NodeIndex) -> &NodeRecord {
        &self.records[index.0]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// NODE VIEW
// ============================================================================

/// Borrowed handle to one node of a [`SceneDocument`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a SceneDocument,
    index: NodeIndex,
}

impl<'a> NodeRef<'a> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn record(&self) -> &'a NodeRecord {
        &self.doc.records[self.index.0]
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record();
        write!(f, "NodeRef({} {} {:?})", record.id, record.kind, record.name)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.index == other.index
    }
}

impl SceneNode for NodeRef<'_> {
    fn id(&self) -> &str {
        &self.record().id
    }

    fn kind(&self) -> NodeKind {
        self.record().kind
    }

    fn name(&self) -> &str {
        &self.record().name
    }

    fn parent(&self) -> Option<Self> {
        self.record().parent.map(|index| self.doc.node(index))
    }

    fn children(&self) -> Vec<Self> {
        self.record()
            .children
            .iter()
            .map(|&index| self.doc.node(index))
            .collect()
    }

    fn main_component(&self) -> Option<Self> {
        self.record().main_component.map(|index| self.doc.node(index))
    }

    fn component_properties(&self) -> Option<&ComponentProperties> {
        self.record().component_properties.as_ref()
    }

    fn variant_properties(&self) -> Option<&VariantProperties> {
        self.record().variant_properties.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_export() -> DocumentExport {
        let icon_set = ExportNode::new("1:0", NodeKind::ComponentSet, "Icons").with_child(
            ExportNode::new("1:1", NodeKind::Component, "Icon/Star")
                .with_child(ExportNode::new("1:2", NodeKind::Vector, "Star")),
        );
        let screen = ExportNode::new("2:0", NodeKind::Frame, "Screen").with_children(vec![
            ExportNode::new("2:1", NodeKind::Text, "Title"),
            ExportNode::new("2:2", NodeKind::Instance, "Icon").with_main_component("1:1"),
            ExportNode::new("2:3", NodeKind::Rectangle, "Divider"),
        ]);
        DocumentExport::new(vec![icon_set, screen])
    }

    #[test]
    fn test_children_keep_host_order() {
        let doc = SceneDocument::from_export(sample_export()).unwrap();
        let screen = doc.get("2:0").unwrap();
        let children = screen.children();
        let names: Vec<&str> = children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Title", "Icon", "Divider"]);
    }

    #[test]
    fn test_parent_links() {
        let doc = SceneDocument::from_export(sample_export()).unwrap();
        let component = doc.get("1:1").unwrap();
        assert_eq!(component.parent().map(|p| p.name().to_string()), Some("Icons".to_string()));
        assert!(doc.get("2:0").unwrap().parent().is_none());
    }

    #[test]
    fn test_main_component_resolves_across_subtrees() {
        let doc = SceneDocument::from_export(sample_export()).unwrap();
        let instance = doc.get("2:2").unwrap();
        let main = instance.main_component().unwrap();
        assert_eq!(main.name(), "Icon/Star");
        assert_eq!(main.children()[0].kind(), NodeKind::Vector);
    }

    #[test]
    fn test_unresolved_main_component_is_absent() {
        let export = DocumentExport::new(vec![
            ExportNode::new("3:1", NodeKind::Instance, "Orphan").with_main_component("9:9"),
        ]);
        let doc = SceneDocument::from_export(export).unwrap();
        assert!(doc.get("3:1").unwrap().main_component().is_none());
    }

    #[test]
    fn test_selection_defaults_to_top_level() {
        let doc = SceneDocument::from_export(sample_export()).unwrap();
        let selection = doc.selection();
        let ids: Vec<&str> = selection.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["1:0", "2:0"]);
    }

    #[test]
    fn test_explicit_selection_order() {
        let export = sample_export().with_selection(["2:3", "1:1"]);
        let doc = SceneDocument::from_export(export).unwrap();
        let selection = doc.selection();
        let ids: Vec<&str> = selection.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["2:3", "1:1"]);
    }

    #[test]
    fn test_unknown_selection() {
        let export = sample_export().with_selection(["nope"]);
        let err = SceneDocument::from_export(export).unwrap_err();
        assert!(matches!(err, DocumentError::UnknownSelection(ref id) if id == "nope"));
        assert_eq!(err.code(), "UNKNOWN_SELECTION");
    }

    #[test]
    fn test_duplicate_node_id() {
        let export = DocumentExport::new(vec![
            ExportNode::new("1:1", NodeKind::Text, "A"),
            ExportNode::new("1:1", NodeKind::Text, "B"),
        ]);
        let err = SceneDocument::from_export(export).unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateNodeId(_)));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "selection": ["5:1"],
            "nodes": [
                { "id": "5:1", "type": "FRAME", "name": "Card",
                  "children": [ { "id": "5:2", "type": "TEXT", "name": "Body" } ] }
            ]
        }"#;
        let doc = SceneDocument::from_json_str(json).unwrap();
        assert_eq!(doc.len(), 2);
        let card = doc.selection()[0];
        assert_eq!(card.children()[0].parent(), Some(card));
    }

    #[test]
    fn test_malformed_json() {
        let err = SceneDocument::from_json_str("{ nodes: ").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_EXPORT");
    }

    #[test]
    fn test_deep_chain_builds_without_recursion() {
        let mut node = ExportNode::new("leaf", NodeKind::Text, "Leaf");
        for depth in 0..10_000 {
            node =
                ExportNode::new(format!("n{}", depth), NodeKind::Frame, "Frame").with_child(node);
        }
        let doc = SceneDocument::from_export(DocumentExport::new(vec![node])).unwrap();
        assert_eq!(doc.len(), 10_001);
    }
}
