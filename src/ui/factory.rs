// NodeFactory - primitive node construction
//
// Creates panels, labels, buttons, images, input fields and progress bars
// with one uniform default style. Every clickable node gets a collider and
// is pushed towards the viewer so raycasts hit it before the panel behind.
//
// Missing icons never fail construction: the node is built without the icon
// and falls back to a neutral solid color.

use super::icons::IconCache;
use crate::scene::{
    Collider, Color, NodeId, NodeKind, RectTransform, SceneError, SceneGraph, TextStyle, Vec2,
};

// ============================================================================
// Default style
// ============================================================================

/// Dark button background (made for white icons)
pub const BUTTON_BG: Color = Color::rgba(0.18, 0.18, 0.18, 0.95);

/// Translucent blue used for menu items and for missing icons
pub const FALLBACK_BG: Color = Color::rgba(0.12, 0.23, 0.54, 0.6);

/// Default dialog/page background
pub const PANEL_BG: Color = Color::rgba(0.1, 0.1, 0.15, 0.95);

/// Input field background
pub const INPUT_BG: Color = Color::rgba(0.2, 0.2, 0.25, 1.0);

/// Placeholder text color
pub const PLACEHOLDER_COLOR: Color = Color::rgba(0.6, 0.6, 0.6, 1.0);

/// Progress bar track and fill
pub const PROGRESS_TRACK: Color = Color::rgba(0.2, 0.2, 0.2, 1.0);
pub const PROGRESS_FILL: Color = Color::rgba(0.2, 0.8, 0.4, 1.0);

/// Z offset applied to every clickable node
pub const BUTTON_Z: f32 = -10.0;

/// Collider depth for clickable nodes
pub const COLLIDER_DEPTH: f32 = 50.0;

/// Collider size used when the rect carries no fixed size
pub const DEFAULT_COLLIDER: Collider = Collider::new(100.0, 40.0, COLLIDER_DEPTH);

/// Anchors of the icon inside an icon-only button
const ICON_MIN: Vec2 = Vec2::new(0.15, 0.15);
const ICON_MAX: Vec2 = Vec2::new(0.85, 0.85);

/// Optional parts of a button; the default is a bare button with the
/// default background
#[derive(Debug, Clone, Default)]
pub struct ButtonStyle<'a> {
    pub color: Option<Color>,
    pub label: Option<TextStyle>,
    pub icon: Option<&'a str>,
    /// Overrides the collider derived from the rect
    pub collider: Option<Collider>,
}

impl<'a> ButtonStyle<'a> {
    pub fn labeled(text: impl Into<String>) -> Self {
        Self {
            label: Some(TextStyle::new(text)),
            ..Self::default()
        }
    }

    pub fn icon(symbolic: &'a str) -> Self {
        Self {
            icon: Some(symbolic),
            ..Self::default()
        }
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Creates primitive nodes with the default style
pub struct NodeFactory {
    icons: IconCache,
}

impl NodeFactory {
    pub fn new(icons: IconCache) -> Self {
        Self { icons }
    }

    pub fn icons(&mut self) -> &mut IconCache {
        &mut self.icons
    }

    /// Grouping node
    pub fn container(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        rect: RectTransform,
    ) -> Result<NodeId, SceneError> {
        let id = graph.create(name, NodeKind::Container, parent)?;
        graph.node_mut(id)?.rect = rect;
        Ok(id)
    }

    /// Background panel
    pub fn panel(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        rect: RectTransform,
        color: Option<Color>,
    ) -> Result<NodeId, SceneError> {
        let id = graph.create(name, NodeKind::Panel, parent)?;
        let node = graph.node_mut(id)?;
        node.rect = rect;
        node.color = color.unwrap_or(PANEL_BG);
        Ok(id)
    }

    /// Text label; never a raycast target
    pub fn label(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        rect: RectTransform,
        style: TextStyle,
    ) -> Result<NodeId, SceneError> {
        let id = graph.create(name, NodeKind::Label, parent)?;
        let node = graph.node_mut(id)?;
        node.rect = rect;
        node.text = Some(style);
        node.raycast_target = false;
        Ok(id)
    }

    /// Clickable button with an optional icon and/or text label
    ///
    /// With both, the icon sits on the left quarter and the label fills the
    /// rest. An icon that cannot be resolved is skipped and the button
    /// background switches to [`FALLBACK_BG`].
    pub fn button(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        rect: RectTransform,
        style: ButtonStyle<'_>,
    ) -> Result<NodeId, SceneError> {
        let ButtonStyle {
            color,
            label,
            icon,
            collider,
        } = style;
        let id = graph.create(name, NodeKind::Button, parent)?;
        {
            let node = graph.node_mut(id)?;
            node.rect = rect;
            if node.rect.z == 0.0 {
                node.rect.z = BUTTON_Z;
            }
            node.color = color.unwrap_or(BUTTON_BG);
            node.raycast_target = true;
            node.collider = Some(collider.unwrap_or_else(|| collider_for(&rect)));
        }

        let has_label = label.is_some();
        if let Some(symbolic) = icon {
            match self.icons.resolve(symbolic) {
                Some(image) => {
                    let icon_rect = if has_label {
                        RectTransform::anchored(Vec2::new(0.05, 0.15), Vec2::new(0.25, 0.85))
                    } else {
                        RectTransform::anchored(ICON_MIN, ICON_MAX)
                    };
                    let icon_id = graph.create("Icon", NodeKind::Image, Some(id))?;
                    let icon_node = graph.node_mut(icon_id)?;
                    icon_node.rect = icon_rect;
                    icon_node.color = Color::WHITE;
                    icon_node.image = Some(image);
                }
                None => graph.node_mut(id)?.color = FALLBACK_BG,
            }
        }

        if let Some(style) = label {
            let label_rect = if icon.is_some() {
                RectTransform::anchored(Vec2::new(0.3, 0.0), Vec2::ONE)
            } else {
                RectTransform::stretch()
            };
            self.label(graph, Some(id), "Label", label_rect, style)?;
        }

        Ok(id)
    }

    /// Image node; `icon` of `None` gives a plain colored rectangle
    ///
    /// A requested icon that cannot be resolved leaves the image empty and
    /// tinted with [`FALLBACK_BG`].
    pub fn image(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        rect: RectTransform,
        color: Option<Color>,
        icon: Option<&str>,
    ) -> Result<NodeId, SceneError> {
        let id = graph.create(name, NodeKind::Image, parent)?;
        let image = icon.and_then(|symbolic| self.icons.resolve(symbolic));
        let node = graph.node_mut(id)?;
        node.rect = rect;
        node.raycast_target = false;
        node.color = match (&image, icon) {
            (None, Some(_)) => FALLBACK_BG,
            _ => color.unwrap_or(Color::WHITE),
        };
        node.image = image;
        Ok(id)
    }

    /// Single-line input with a `Placeholder` child label
    pub fn input_field(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        rect: RectTransform,
        text: &str,
        placeholder: &str,
    ) -> Result<NodeId, SceneError> {
        let id = graph.create(name, NodeKind::InputField, parent)?;
        {
            let node = graph.node_mut(id)?;
            node.rect = rect;
            node.color = INPUT_BG;
            node.raycast_target = true;
            node.collider = Some(collider_for(&rect));
            let mut style = TextStyle::new(text);
            style.font_size = 14;
            node.text = Some(style);
        }

        let mut hint = TextStyle::new(placeholder);
        hint.color = PLACEHOLDER_COLOR;
        hint.font_size = 14;
        let placeholder_id =
            self.label(graph, Some(id), "Placeholder", RectTransform::stretch(), hint)?;
        graph.set_active(placeholder_id, text.is_empty())?;
        Ok(id)
    }

    /// Progress bar track with a `Fill` child anchored to `ratio`
    pub fn progress_bar(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        rect: RectTransform,
        ratio: f32,
    ) -> Result<NodeId, SceneError> {
        let id = graph.create(name, NodeKind::ProgressBar, parent)?;
        {
            let node = graph.node_mut(id)?;
            node.rect = rect;
            node.color = PROGRESS_TRACK;
        }
        let fill = graph.create("Fill", NodeKind::Image, Some(id))?;
        graph.node_mut(fill)?.color = PROGRESS_FILL;
        graph.set_progress(id, ratio)?;
        Ok(id)
    }
}

/// Collider matching a fixed-size rect, or the default button collider
fn collider_for(rect: &RectTransform) -> Collider {
    if rect.size.x > 0.0 && rect.size.y > 0.0 {
        Collider::new(rect.size.x, rect.size.y, COLLIDER_DEPTH)
    } else {
        DEFAULT_COLLIDER
    }
}
