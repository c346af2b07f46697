// On-screen console log panel

use crate::scene::{Color, TextAlign};
use crate::ui::NodeSpec;

pub const PANEL_NAME: &str = "DebugPanel";
pub const DEBUG_TEXT: &str = "DebugText";

pub fn debug_panel() -> NodeSpec {
    NodeSpec::panel(PANEL_NAME)
        .anchors((0.6, 0.3), (0.98, 0.8))
        .color(Color::rgba(0.0, 0.0, 0.0, 0.75))
        .inactive()
        .child(
            NodeSpec::label(DEBUG_TEXT, "")
                .anchors((0.02, 0.02), (0.98, 0.98))
                .font(12, false)
                .align(TextAlign::UpperLeft),
        )
}
