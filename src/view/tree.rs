// Scene tree rendering module
//
// Renders the live scene graph as an indented tree. Hidden subtrees are
// collapsed to their root unless the preview shows hidden nodes.

use crate::app::AppState;
use crate::scene::{NodeId, NodeKind};
use crate::theme::{kind_color, ACCENT, HIGHLIGHT, MUTED};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ============================================================================
// Tree View Model
// ============================================================================

/// One line of the scene tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: NodeId,
    pub depth: usize,
    pub name: String,
    pub kind: NodeKind,
    /// Active together with every ancestor
    pub visible: bool,
    pub focused: bool,
    pub clickable: bool,
    pub text: Option<String>,
    /// Descendants folded away under a hidden node
    pub hidden_descendants: usize,
}

/// Flatten the scene into rows, pre-order
pub fn build_tree_rows(app: &AppState) -> Vec<TreeRow> {
    let graph = &app.graph;
    let focused = app.focused();
    let mut rows: Vec<TreeRow> = Vec::new();

    for root in graph.roots() {
        let mut collapsed_at: Option<usize> = None;
        for (id, depth) in graph.walk(*root) {
            if let Some(d) = collapsed_at {
                if depth > d {
                    if let Some(last) = rows.last_mut() {
                        last.hidden_descendants += 1;
                    }
                    continue;
                }
                collapsed_at = None;
            }
            let Some(node) = graph.get(id) else {
                continue;
            };
            if !node.active && !app.show_hidden {
                collapsed_at = Some(depth);
            }
            rows.push(TreeRow {
                id,
                depth,
                name: node.name.clone(),
                kind: node.kind,
                visible: graph.is_active_in_hierarchy(id),
                focused: focused == Some(id),
                clickable: node.handler.is_some() && node.interactable,
                text: node.text_content().map(str::to_string),
                hidden_descendants: 0,
            });
        }
    }
    rows
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ============================================================================
// Rendering
// ============================================================================

fn row_line(row: &TreeRow, width: usize) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let marker = if row.focused { "▶ " } else { "  " };
    let name_style = if row.visible {
        Style::default().fg(kind_color(row.kind))
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    };
    let name_style = if row.focused {
        name_style.fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        name_style
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(HIGHLIGHT)),
        Span::raw(indent),
        Span::styled(row.name.clone(), name_style),
        Span::styled(format!(" [{}]", row.kind), Style::default().fg(MUTED)),
    ];
    if row.clickable {
        spans.push(Span::styled(" *", Style::default().fg(ACCENT)));
    }
    if row.hidden_descendants > 0 {
        spans.push(Span::styled(
            format!(" (+{} hidden)", row.hidden_descendants),
            Style::default().fg(MUTED),
        ));
    }
    if let Some(text) = row.text.as_deref().filter(|t| !t.is_empty()) {
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let room = width.saturating_sub(used + 3);
        if room > 1 {
            let one_line = text.replace('\n', " ");
            spans.push(Span::styled(
                format!(" \"{}\"", truncate_to_width(&one_line, room)),
                Style::default().fg(MUTED),
            ));
        }
    }
    Line::from(spans)
}

pub fn render_scene_tree(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = build_tree_rows(app);
    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(row_line(row, width)))
        .collect();

    let title = format!(
        " Scene ({} nodes{}) ",
        app.graph.len(),
        if app.show_hidden { ", showing hidden" } else { "" }
    );
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );

    let mut state = ListState::default();
    state.select(rows.iter().position(|r| r.focused));
    f.render_stateful_widget(list, area, &mut state);
}
