// Search loading indicator and category picker

use super::{CANCEL_BG, CONFIRM_BG};
use crate::action::UiAction;
use crate::scene::Color;
use crate::ui::NodeSpec;

pub const LOADING_PANEL: &str = "LoadingPanel";
pub const LOADING_TEXT: &str = "LoadingText";
pub const LOADING_CANCEL_BUTTON: &str = "CancelSearchButton";
pub const CATEGORY_PANEL: &str = "CategoryPanel";

pub fn loading_panel() -> NodeSpec {
    NodeSpec::panel(LOADING_PANEL)
        .anchors((0.35, 0.4), (0.65, 0.6))
        .color(Color::rgba(0.0, 0.0, 0.0, 0.8))
        .inactive()
        .child(NodeSpec::image("Spinner", "icon_loading").anchors((0.4, 0.55), (0.6, 0.9)))
        .child(NodeSpec::label(LOADING_TEXT, "Loading...").anchors((0.0, 0.3), (1.0, 0.55)))
        .child(
            NodeSpec::button(LOADING_CANCEL_BUTTON, "Cancel")
                .anchors((0.3, 0.05), (0.7, 0.27))
                .color(CANCEL_BG)
                .on_click(UiAction::CompleteSearch),
        )
}

pub fn category_panel() -> NodeSpec {
    NodeSpec::panel(CATEGORY_PANEL)
        .anchors((0.2, 0.2), (0.8, 0.8))
        .z(-30.0)
        .inactive()
        .child(
            NodeSpec::container("ButtonContainer")
                .anchors((0.1, 0.05), (0.9, 0.25))
                .child(
                    NodeSpec::icon_label_button(
                        "SearchExecuteButton",
                        "icon_search",
                        "Start Search",
                    )
                    .anchors((0.0, 0.0), (0.48, 1.0))
                    .color(CONFIRM_BG)
                    .on_click(UiAction::ExecuteSearch),
                )
                .child(
                    NodeSpec::button("CancelButton", "Close")
                        .anchors((0.52, 0.0), (1.0, 1.0))
                        .color(CANCEL_BG)
                        .on_click(UiAction::ToggleCategoryPanel),
                ),
        )
}
