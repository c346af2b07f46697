// Declarative node descriptors
//
// A NodeSpec is a tree of typed descriptors: what to build, not how. Panel
// layouts are written as NodeSpec values and handed to the builder, which
// materializes them through the NodeFactory. Specs can be built and
// inspected without a scene graph.

use crate::action::UiAction;
use crate::scene::{Collider, Color, RectTransform, TextAlign, TextStyle, Vec2};

/// What kind of widget a descriptor materializes into
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// Grouping node without visuals
    Container,
    /// Background surface
    Panel,
    /// Text
    Label(TextStyle),
    /// Clickable surface with an optional text label and/or icon
    Button {
        label: Option<TextStyle>,
        icon: Option<String>,
    },
    /// Icon or sprite, resolved through the icon cache
    Image { icon: Option<String> },
    /// Editable text with a placeholder shown while empty
    InputField { text: String, placeholder: String },
    /// Progress bar with a `Fill` child
    ProgressBar { ratio: f32 },
}

/// Descriptor for one node and its children
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub name: String,
    pub widget: Widget,
    pub rect: RectTransform,
    /// Background color; the factory default for the widget when `None`
    pub color: Option<Color>,
    /// Hit-test bounds; derived from the rect by the factory when `None`
    pub collider: Option<Collider>,
    pub action: Option<UiAction>,
    pub active: bool,
    pub interactable: bool,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    fn new(name: impl Into<String>, widget: Widget) -> Self {
        Self {
            name: name.into(),
            widget,
            rect: RectTransform::stretch(),
            color: None,
            collider: None,
            action: None,
            active: true,
            interactable: true,
            children: Vec::new(),
        }
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    pub fn container(name: impl Into<String>) -> Self {
        Self::new(name, Widget::Container)
    }

    pub fn panel(name: impl Into<String>) -> Self {
        Self::new(name, Widget::Panel)
    }

    pub fn label(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Widget::Label(TextStyle::new(text)))
    }

    /// Button with a text label
    pub fn button(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            name,
            Widget::Button {
                label: Some(TextStyle::new(label)),
                icon: None,
            },
        )
    }

    /// Button without built-in label or icon; content comes from children
    pub fn plain_button(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Widget::Button {
                label: None,
                icon: None,
            },
        )
    }

    /// Button showing only an icon
    pub fn icon_button(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self::new(
            name,
            Widget::Button {
                label: None,
                icon: Some(icon.into()),
            },
        )
    }

    /// Button with an icon followed by a text label
    pub fn icon_label_button(
        name: impl Into<String>,
        icon: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            Widget::Button {
                label: Some(TextStyle::new(label)),
                icon: Some(icon.into()),
            },
        )
    }

    pub fn image(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self::new(
            name,
            Widget::Image {
                icon: Some(icon.into()),
            },
        )
    }

    /// Plain colored image without a sprite
    pub fn solid(name: impl Into<String>) -> Self {
        Self::new(name, Widget::Image { icon: None })
    }

    pub fn input(
        name: impl Into<String>,
        text: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            Widget::InputField {
                text: text.into(),
                placeholder: placeholder.into(),
            },
        )
    }

    pub fn progress(name: impl Into<String>, ratio: f32) -> Self {
        Self::new(name, Widget::ProgressBar { ratio })
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    pub fn rect(mut self, rect: RectTransform) -> Self {
        self.rect = rect;
        self
    }

    /// Stretch between two normalized anchors
    pub fn anchors(mut self, min: (f32, f32), max: (f32, f32)) -> Self {
        let z = self.rect.z;
        self.rect = RectTransform::anchored(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1));
        self.rect.z = z;
        self
    }

    /// Fixed size, centered on the parent
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.rect = RectTransform::sized(width, height).with_z(self.rect.z);
        self
    }

    pub fn z(mut self, z: f32) -> Self {
        self.rect.z = z;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn collider(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.collider = Some(Collider::new(width, height, depth));
        self
    }

    pub fn on_click(mut self, action: UiAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Start hidden
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn interactable(mut self, interactable: bool) -> Self {
        self.interactable = interactable;
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    /// Font size and weight for the descriptor's text (label or button label)
    pub fn font(mut self, size: u16, bold: bool) -> Self {
        if let Some(style) = self.text_style_mut() {
            style.font_size = size;
            style.bold = bold;
        }
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        if let Some(style) = self.text_style_mut() {
            style.align = align;
        }
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        if let Some(style) = self.text_style_mut() {
            style.color = color;
        }
        self
    }

    fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match &mut self.widget {
            Widget::Label(style) => Some(style),
            Widget::Button { label, .. } => label.as_mut(),
            _ => None,
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Number of descriptors in this tree, including `self`
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeSpec::count).sum::<usize>()
    }

    /// Depth-first search by name
    pub fn find(&self, name: &str) -> Option<&NodeSpec> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}
