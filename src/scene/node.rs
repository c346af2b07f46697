// Scene node types
//
// Plain data carried by every node in the SceneGraph. Nothing in here knows
// about rendering; a node is a name, a kind, a layout rectangle, and the
// optional content (text, image, click handler) a renderer would consume.

use crate::action::UiAction;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// ============================================================================
// Handles
// ============================================================================

/// Handle to a node in a [`SceneGraph`](super::SceneGraph)
///
/// Carries a slot index and a generation counter, so a handle kept across a
/// rebuild is detected as stale instead of silently aliasing the new node
/// that reused its slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Raw slot index (diagnostics only)
    pub fn index(self) -> u32 {
        self.idx
    }

    /// Generation counter of the slot when this handle was issued
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

/// A loaded image resource
///
/// Cheap to clone; several nodes may show the same icon.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageHandle {
    path: Rc<PathBuf>,
}

impl ImageHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Rc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageHandle({})", self.path.display())
    }
}

// ============================================================================
// Geometry and style
// ============================================================================

/// 2D vector used for anchors, offsets and sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color with components in 0.0 ~ 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to 8-bit channels (alpha dropped), used by terminal renderers
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::CLEAR
    }
}

/// Anchored layout rectangle relative to the parent
///
/// Anchors are normalized (0.0 ~ 1.0) in parent space; offsets and size are
/// in canvas units. `z` pushes the node towards the viewer when negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectTransform {
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    pub offset_min: Vec2,
    pub offset_max: Vec2,
    pub size: Vec2,
    pub z: f32,
}

impl RectTransform {
    /// Stretch over the whole parent with no offsets
    pub const fn stretch() -> Self {
        Self::anchored(Vec2::ZERO, Vec2::ONE)
    }

    /// Stretch between two anchors with no offsets
    pub const fn anchored(min: Vec2, max: Vec2) -> Self {
        Self {
            anchor_min: min,
            anchor_max: max,
            offset_min: Vec2::ZERO,
            offset_max: Vec2::ZERO,
            size: Vec2::ZERO,
            z: 0.0,
        }
    }

    /// Centered fixed-size rectangle
    pub const fn sized(width: f32, height: f32) -> Self {
        Self {
            anchor_min: Vec2::new(0.5, 0.5),
            anchor_max: Vec2::new(0.5, 0.5),
            offset_min: Vec2::ZERO,
            offset_max: Vec2::ZERO,
            size: Vec2::new(width, height),
            z: 0.0,
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }
}

impl Default for RectTransform {
    fn default() -> Self {
        Self::stretch()
    }
}

/// Box collider used for hit-testing on raycast-driven input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Collider {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// Horizontal/vertical text placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    MiddleCenter,
    MiddleLeft,
    UpperLeft,
    UpperCenter,
}

/// Text content plus its styling
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub content: String,
    pub font_size: u16,
    pub bold: bool,
    pub align: TextAlign,
    pub color: Color,
}

impl TextStyle {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: 16,
            bold: false,
            align: TextAlign::MiddleCenter,
            color: Color::WHITE,
        }
    }
}

// ============================================================================
// Node
// ============================================================================

/// Node kind, which decides what content a node is expected to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Grouping node without visuals (root containers, layout groups)
    Container,
    /// Background surface of a menu, dialog or page
    Panel,
    /// Text
    Label,
    /// Clickable surface
    Button,
    /// Image or icon
    Image,
    /// Editable single-line text
    InputField,
    /// Background with a `Fill` child whose right anchor is the progress ratio
    ProgressBar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Container => "container",
            NodeKind::Panel => "panel",
            NodeKind::Label => "label",
            NodeKind::Button => "button",
            NodeKind::Image => "image",
            NodeKind::InputField => "input",
            NodeKind::ProgressBar => "progress",
        };
        f.write_str(s)
    }
}

/// A single visual element
///
/// Tree links are owned by the [`SceneGraph`](super::SceneGraph); everything
/// else is public data.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub rect: RectTransform,
    /// Local active flag; a node is visible only if it and all ancestors are active
    pub active: bool,
    pub color: Color,
    pub text: Option<TextStyle>,
    pub image: Option<ImageHandle>,
    pub collider: Option<Collider>,
    /// Whether the node takes part in raycasts
    pub raycast_target: bool,
    pub interactable: bool,
    /// Action fired when the node is clicked; dropped together with the node
    pub handler: Option<UiAction>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rect: RectTransform::default(),
            active: true,
            color: Color::CLEAR,
            text: None,
            image: None,
            collider: None,
            raycast_target: false,
            interactable: true,
            handler: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Text content, if any
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.content.as_str())
    }
}
