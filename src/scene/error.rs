// Scene graph errors
//
// Only handle misuse can fail in the scene graph. Missing resources are
// never errors here; they are handled by the factory with a fallback.

use super::NodeId;
use thiserror::Error;

/// Errors returned by [`SceneGraph`](super::SceneGraph) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The handle refers to a node that has been destroyed
    #[error("node {0:?} is no longer alive")]
    StaleNode(NodeId),

    /// A path lookup found nothing
    #[error("no node found at path `{0}`")]
    NotFound(String),

    /// A node was about to be attached under a destroyed parent
    #[error("cannot attach under {0:?}: parent is not alive")]
    InvalidParent(NodeId),
}
