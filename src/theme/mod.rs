// Theme module - terminal palette for the scene preview
//
// Fixed colors for the preview chrome, plus the mapping from scene node
// colors and kinds to terminal colors.

use crate::scene::{self, NodeKind};
use ratatui::style::Color;

/// Borders, titles and key hints
/// RGB: (122, 162, 247)
pub const ACCENT: Color = Color::Rgb(122, 162, 247);

/// Focused node highlight and warnings
/// RGB: (255, 158, 100)
pub const HIGHLIGHT: Color = Color::Rgb(255, 158, 100);

/// Errors and stale handles
/// RGB: (247, 118, 142)
pub const DANGER: Color = Color::Rgb(247, 118, 142);

/// Visible nodes and ON indicators
/// RGB: (158, 206, 106)
pub const ACTIVE: Color = Color::Rgb(158, 206, 106);

/// General text and hidden nodes
/// RGB: (169, 177, 214)
pub const MUTED: Color = Color::Rgb(169, 177, 214);

/// Terminal color for a scene color; fully transparent colors have none
pub fn scene_color(color: scene::Color) -> Option<Color> {
    if color.a <= 0.0 {
        return None;
    }
    let (r, g, b) = color.to_rgb8();
    Some(Color::Rgb(r, g, b))
}

/// Tree color per node kind
pub fn kind_color(kind: NodeKind) -> Color {
    match kind {
        NodeKind::Container => MUTED,
        NodeKind::Panel => ACCENT,
        NodeKind::Label => Color::White,
        NodeKind::Button => HIGHLIGHT,
        NodeKind::Image => Color::Cyan,
        NodeKind::InputField => ACTIVE,
        NodeKind::ProgressBar => ACTIVE,
    }
}

/// ON/OFF indicator color
pub fn toggle_color(on: bool) -> Color {
    if on {
        ACTIVE
    } else {
        MUTED
    }
}
