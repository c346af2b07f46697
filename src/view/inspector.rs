// Node Inspector rendering module
//
// Renders the detail panel for the focused node: where it sits in the tree,
// what it shows and what clicking it does.

use crate::app::AppState;
use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::theme::{scene_color, toggle_color, ACCENT, DANGER, MUTED};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

// ============================================================================
// Inspector View Model
// ============================================================================

/// View model for the inspector panel
///
/// Extracted from AppState so rendering never touches the graph directly.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectorView {
    pub name: String,
    /// Slash-separated path from the top-level node
    pub path: String,
    pub kind: Option<NodeKind>,
    pub active: bool,
    /// Active together with every ancestor
    pub visible: bool,
    pub interactable: bool,
    pub text: Option<String>,
    pub image: Option<String>,
    /// Node tint; `None` when fully transparent
    pub color: Option<Color>,
    /// Collider size as "w x h x d"
    pub collider: Option<String>,
    /// Click action, debug-formatted
    pub action: Option<String>,
    pub child_count: usize,
    pub has_selection: bool,
}

impl Default for InspectorView {
    fn default() -> Self {
        Self {
            name: "Nothing focused".to_string(),
            path: String::new(),
            kind: None,
            active: false,
            visible: false,
            interactable: false,
            text: None,
            image: None,
            color: None,
            collider: None,
            action: None,
            child_count: 0,
            has_selection: false,
        }
    }
}

/// Path of `id` from its top-level ancestor
pub fn node_path(graph: &SceneGraph, id: NodeId) -> String {
    let mut names = Vec::new();
    let mut current = Some(id);
    while let Some(node_id) = current {
        match graph.get(node_id) {
            Some(node) => names.push(node.name.as_str()),
            None => break,
        }
        current = graph.parent(node_id);
    }
    names.reverse();
    names.join("/")
}

/// Build InspectorView for the focused node
pub fn build_inspector_view(app: &AppState) -> InspectorView {
    let Some(id) = app.focused() else {
        return InspectorView::default();
    };
    let graph = &app.graph;
    let Some(node) = graph.get(id) else {
        return InspectorView::default();
    };

    InspectorView {
        name: node.name.clone(),
        path: node_path(graph, id),
        kind: Some(node.kind),
        active: node.active,
        visible: graph.is_active_in_hierarchy(id),
        interactable: node.interactable,
        text: node.text_content().map(str::to_string),
        image: node.image.as_ref().map(|i| i.path().display().to_string()),
        color: scene_color(node.color),
        collider: node
            .collider
            .map(|c| format!("{} x {} x {}", c.width, c.height, c.depth)),
        action: node.handler.as_ref().map(|a| format!("{:?}", a)),
        child_count: node.children().len(),
        has_selection: true,
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn field(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(ACCENT)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn flag(label: &'static str, on: bool) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("[{}:", label), Style::default().fg(MUTED)),
        Span::styled(
            if on { "ON" } else { "OFF" },
            Style::default().fg(toggle_color(on)).add_modifier(Modifier::BOLD),
        ),
        Span::styled("] ", Style::default().fg(MUTED)),
    ]
}

pub fn render_inspector(f: &mut Frame, area: Rect, app: &AppState) {
    let view = build_inspector_view(app);
    let mut lines = vec![Line::from(Span::styled(
        view.name.clone(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))];

    if view.has_selection {
        lines.push(field("Path", view.path.clone(), Color::White));
        if let Some(kind) = view.kind {
            lines.push(field("Kind", kind.to_string(), Color::White));
        }

        let mut flags = flag("active", view.active);
        flags.extend(flag("visible", view.visible));
        flags.extend(flag("click", view.interactable));
        lines.push(Line::from(flags));

        if let Some(text) = &view.text {
            lines.push(field("Text", format!("\"{}\"", text), Color::White));
        }
        if let Some(image) = &view.image {
            lines.push(field("Image", image.clone(), Color::White));
        }
        if let Some(color) = view.color {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", "Color"), Style::default().fg(ACCENT)),
                Span::styled("■■", Style::default().fg(color)),
            ]));
        }
        if let Some(collider) = &view.collider {
            lines.push(field("Collider", collider.clone(), Color::White));
        }
        match &view.action {
            Some(action) => lines.push(field("Action", action.clone(), Color::White)),
            None => lines.push(field("Action", "none".to_string(), MUTED)),
        }
        lines.push(field("Children", view.child_count.to_string(), Color::White));
    } else if app.graph.is_empty() {
        lines.push(Line::from(Span::styled(
            "Scene is empty, press r to rebuild",
            Style::default().fg(DANGER),
        )));
    }

    let inspector = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Inspector ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(inspector, area);
}
