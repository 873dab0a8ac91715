//! Error types for classification, projection and emission.

use thiserror::Error;

/// A required component property is absent on a node classified as BUTTON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing property '{key}' on node '{node_name}' ({node_id})")]
pub struct MissingPropertyError {
    /// Host id of the offending node.
    pub node_id: String,
    /// Author-assigned name of the offending node.
    pub node_name: String,
    /// The fixed key, or `Label*` when no key starts with the label prefix.
    pub key: String,
}

/// Failure while building one box subtree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoxError {
    #[error(transparent)]
    MissingProperty(#[from] MissingPropertyError),

    /// The subtree nests deeper than the walk policy allows.
    #[error("Depth limit exceeded at node '{node_id}' (max depth: {max_depth})")]
    DepthLimitExceeded {
        node_id: String,
        max_depth: usize,
    },
}

impl BoxError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingProperty(_) => "MISSING_PROPERTY",
            Self::DepthLimitExceeded { .. } => "DEPTH_LIMIT_EXCEEDED",
        }
    }

    /// Host id of the node that triggered the failure.
    pub fn node_id(&self) -> &str {
        match self {
            Self::MissingProperty(e) => &e.node_id,
            Self::DepthLimitExceeded { node_id, .. } => node_id,
        }
    }
}

/// A selected root whose subtree could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Root '{root_name}' ({root_id}) skipped: {error}")]
pub struct RootFailure {
    pub root_id: String,
    pub root_name: String,
    pub error: BoxError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown component type '{0}'")]
pub struct ParseComponentTypeError(pub String);

/// Failure reading a walk policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid policy: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure serializing or writing a forest.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to serialize component boxes: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write component boxes: {0}")]
    Io(#[from] std::io::Error),
}
