//! Tree walker - Classifier -> Factory at every node, children reversed.
//!
//! ```text
//! selection [r1, r2]         forest [box(r1), box(r2)]        roots keep order
//! r1.children [c1, c2, c3]   box(r1).children [c3', c2', c1'] children reversed
//! ```
//!
//! Depth is bounded by [`WalkPolicy::max_depth`]. A failure anywhere in a
//! root's subtree discards that whole subtree; [`BatchMode`] decides whether
//! the remaining roots are still attempted.

use crate::classify::Classifier;
use crate::error::{BoxError, RootFailure};
use crate::factory::project;
use crate::model::{BoxKind, ComponentBox, ComponentType};
use crate::policy::{BatchMode, WalkPolicy};
use scene_types::{NodeKind, SceneNode};

/// Output of a forest build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    /// One box tree per successfully built root, in selection order.
    pub boxes: Vec<ComponentBox>,
    /// Roots left out under [`BatchMode::SkipFailedRoot`].
    pub skipped: Vec<RootFailure>,
}

impl Forest {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Every attempted root was skipped; an empty selection is not a failure.
    pub fn all_roots_failed(&self) -> bool {
        self.boxes.is_empty() && !self.skipped.is_empty()
    }
}

/// One line of a classification outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub depth: usize,
    pub node_id: String,
    pub node_name: String,
    pub node_kind: NodeKind,
    pub component_type: ComponentType,
}

#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    classifier: Classifier,
    policy: WalkPolicy,
}

impl TreeWalker {
    pub fn new(policy: WalkPolicy) -> Self {
        Self {
            classifier: Classifier::from_policy(&policy),
            policy,
        }
    }

    pub fn policy(&self) -> &WalkPolicy {
        &self.policy
    }

    /// Build the box tree rooted at `node`.
    ///
    /// The walk keeps its own stack of open nodes, so tree depth is limited
    /// only by the policy's `max_depth`, not by the thread's stack.
    pub fn search<N: SceneNode>(&self, node: &N) -> Result<ComponentBox, BoxError> {
        let mut root = self.enter(node, 0)?;
        let mut open: Vec<OpenNode<N>> = Vec::new();

        loop {
            let current = open.last_mut().unwrap_or(&mut root);
            match current.pending.next() {
                Some(child) => {
                    let depth = current.depth + 1;
                    let entered = self.enter(&child, depth)?;
                    open.push(entered);
                }
                None => match open.pop() {
                    Some(done) => {
                        let tree = done.finish();
                        open.last_mut().unwrap_or(&mut root).built.push(tree);
                    }
                    None => return Ok(root.finish()),
                },
            }
        }
    }

    /// Classify and project one node, leaving its children pending.
    fn enter<N: SceneNode>(&self, node: &N, depth: usize) -> Result<OpenNode<N>, BoxError> {
        if depth > self.policy.max_depth {
            return Err(BoxError::DepthLimitExceeded {
                node_id: node.id().to_string(),
                max_depth: self.policy.max_depth,
            });
        }

        let component_type = self.classifier.classify(node);
        tracing::debug!(
            node_id = node.id(),
            node_name = node.name(),
            node_kind = %node.kind(),
            component_type = %component_type,
            depth,
            "classified node"
        );

        Ok(OpenNode {
            kind: project(node, component_type)?,
            depth,
            pending: node.children().into_iter(),
            built: Vec::new(),
        })
    }

    /// Build one box tree per root, keeping root order.
    ///
    /// Under [`BatchMode::AbortBatch`] the first failing root aborts the
    /// build. Under [`BatchMode::SkipFailedRoot`] it is recorded in
    /// [`Forest::skipped`] and the remaining roots are still built.
    pub fn build_forest<N: SceneNode>(&self, roots: &[N]) -> Result<Forest, BoxError> {
        let mut forest = Forest::default();

        for root in roots {
            match self.search(root) {
                Ok(tree) => forest.boxes.push(tree),
                Err(error) => match self.policy.batch_mode {
                    BatchMode::AbortBatch => {
                        tracing::error!(
                            root_id = root.id(),
                            root_name = root.name(),
                            code = error.code(),
                            "aborting forest: {}",
                            error
                        );
                        return Err(error);
                    }
                    BatchMode::SkipFailedRoot => {
                        tracing::warn!(
                            root_id = root.id(),
                            root_name = root.name(),
                            code = error.code(),
                            "skipping root: {}",
                            error
                        );
                        forest.skipped.push(RootFailure {
                            root_id: root.id().to_string(),
                            root_name: root.name().to_string(),
                            error,
                        });
                    }
                },
            }
        }

        tracing::info!(
            roots = roots.len(),
            built = forest.boxes.len(),
            skipped = forest.skipped.len(),
            boxes = forest.boxes.iter().map(ComponentBox::box_count).sum::<usize>(),
            "built component box forest"
        );

        Ok(forest)
    }

    /// Pre-order classification of every node under `node`, in host order.
    ///
    /// Classification never fails, so neither does the outline. Nodes deeper
    /// than the policy's `max_depth` are not listed; each cut is logged.
    pub fn outline<N: SceneNode>(&self, node: &N) -> Vec<OutlineEntry> {
        let mut entries = vec![self.outline_entry(node, 0)];
        let mut pending: Vec<(N, usize)> =
            node.children().into_iter().rev().map(|c| (c, 1)).collect();

        while let Some((child, depth)) = pending.pop() {
            if depth > self.policy.max_depth {
                tracing::warn!(
                    node_id = child.id(),
                    node_name = child.name(),
                    max_depth = self.policy.max_depth,
                    "outline cut at depth limit"
                );
                continue;
            }
            entries.push(self.outline_entry(&child, depth));
            pending.extend(child.children().into_iter().rev().map(|c| (c, depth + 1)));
        }
        entries
    }

    fn outline_entry<N: SceneNode>(&self, node: &N, depth: usize) -> OutlineEntry {
        OutlineEntry {
            depth,
            node_id: node.id().to_string(),
            node_name: node.name().to_string(),
            node_kind: node.kind(),
            component_type: self.classifier.classify(node),
        }
    }
}

/// A node whose box is projected but whose children are still being built.
struct OpenNode<N> {
    kind: BoxKind,
    depth: usize,
    pending: std::vec::IntoIter<N>,
    built: Vec<ComponentBox>,
}

impl<N> OpenNode<N> {
    /// Children were built in host order; the box lists them reversed.
    fn finish(mut self) -> ComponentBox {
        self.built.reverse();
        ComponentBox {
            kind: self.kind,
            children: self.built,
        }
    }
}

/// Build the box tree for one node with the default policy.
pub fn search<N: SceneNode>(node: &N) -> Result<ComponentBox, BoxError> {
    TreeWalker::default().search(node)
}

/// Build the forest for a selection with the default policy.
///
/// The default policy aborts on the first failure, so the result is every
/// root's tree or the first error.
pub fn build_forest<N: SceneNode>(roots: &[N]) -> Result<Vec<ComponentBox>, BoxError> {
    TreeWalker::default()
        .build_forest(roots)
        .map(|forest| forest.boxes)
}
