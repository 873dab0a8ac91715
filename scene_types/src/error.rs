//! Errors raised while building a scene document from a host export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed host export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate node id '{0}' in host export")]
    DuplicateNodeId(String),

    #[error("Selected node '{0}' does not exist in the document")]
    UnknownSelection(String),
}

impl DocumentError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "MALFORMED_EXPORT",
            Self::DuplicateNodeId(_) => "DUPLICATE_NODE_ID",
            Self::UnknownSelection(_) => "UNKNOWN_SELECTION",
        }
    }
}
