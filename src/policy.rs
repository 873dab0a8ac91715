//! Walk policy - configuration for classification and forest building.
//!
//! ```yaml
//! unmatched_component: UNKNOWN   # or COLUMN
//! batch_mode: ABORT_BATCH        # or SKIP_FAILED_ROOT
//! max_depth: 512
//! ```
//!
//! Every field is optional; missing fields take the defaults above.

use crate::error::PolicyError;
use crate::model::ComponentType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default recursion limit for the tree walk.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Classification of a COMPONENT node that matches no name or parent rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnmatchedComponent {
    /// Fall through to the catch-all.
    #[default]
    Unknown,
    /// Treat a bare component as a layout container.
    Column,
}

impl UnmatchedComponent {
    pub fn component_type(&self) -> ComponentType {
        match self {
            UnmatchedComponent::Unknown => ComponentType::Unknown,
            UnmatchedComponent::Column => ComponentType::Column,
        }
    }
}

/// What a failed root does to the rest of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchMode {
    /// The first failure aborts the whole forest.
    #[default]
    AbortBatch,
    /// Failed roots are reported and left out; other roots still build.
    SkipFailedRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkPolicy {
    pub unmatched_component: UnmatchedComponent,
    pub batch_mode: BatchMode,
    /// Deepest node level (root = 0) the walker will visit.
    pub max_depth: usize,
}

impl Default for WalkPolicy {
    fn default() -> Self {
        Self {
            unmatched_component: UnmatchedComponent::default(),
            batch_mode: BatchMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Values set on top of a loaded policy, e.g. from command-line flags.
///
/// `None` keeps whatever the policy already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    pub unmatched_component: Option<UnmatchedComponent>,
    pub batch_mode: Option<BatchMode>,
    pub max_depth: Option<usize>,
}

impl WalkPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, PolicyError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn with_unmatched_component(mut self, unmatched: UnmatchedComponent) -> Self {
        self.unmatched_component = unmatched;
        self
    }

    pub fn with_batch_mode(mut self, mode: BatchMode) -> Self {
        self.batch_mode = mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Apply every override that is set; unset ones keep the current value.
    pub fn with_overrides(mut self, overrides: PolicyOverrides) -> Self {
        if let Some(unmatched) = overrides.unmatched_component {
            self.unmatched_component = unmatched;
        }
        if let Some(mode) = overrides.batch_mode {
            self.batch_mode = mode;
        }
        if let Some(max_depth) = overrides.max_depth {
            self.max_depth = max_depth;
        }
        self
    }
}
