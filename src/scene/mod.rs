// Scene graph module
//
// This module contains the retained node tree that every panel is built into:
// - Generational node handles
// - Node data (kind, transform, text, image, collider, click handler)
// - The arena-backed SceneGraph with subtree destruction and name lookup

mod error;
mod graph;
mod node;

pub use error::SceneError;
pub use graph::SceneGraph;
pub use node::{
    Collider, Color, ImageHandle, Node, NodeId, NodeKind, RectTransform, TextAlign, TextStyle,
    Vec2,
};
