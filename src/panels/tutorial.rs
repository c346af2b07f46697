// Tutorial overlay

use super::{title, CANCEL_BG};
use crate::action::UiAction;
use crate::scene::{Color, TextAlign};
use crate::ui::NodeSpec;

pub const PANEL_NAME: &str = "TutorialPanel";
pub const TITLE_TEXT: &str = "TitleText";
pub const CONTENT_TEXT: &str = "ContentText";
pub const PAGE_INDICATOR: &str = "PageIndicator";
pub const NEXT_BUTTON: &str = "NextButton";
pub const SKIP_BUTTON: &str = "SkipButton";

pub fn tutorial_panel() -> NodeSpec {
    NodeSpec::panel(PANEL_NAME)
        .anchors((0.15, 0.15), (0.85, 0.85))
        .z(-60.0)
        .color(Color::rgba(0.05, 0.08, 0.15, 0.97))
        .inactive()
        .child(title(TITLE_TEXT, "Tutorial"))
        .child(NodeSpec::solid("TutorialImage").anchors((0.35, 0.6), (0.65, 0.86)).inactive())
        .child(
            NodeSpec::label(CONTENT_TEXT, "Content here")
                .anchors((0.06, 0.18), (0.94, 0.58))
                .align(TextAlign::UpperLeft),
        )
        .child(
            NodeSpec::label(PAGE_INDICATOR, "1 / 5")
                .anchors((0.4, 0.04), (0.6, 0.14))
                .font(14, false),
        )
        .child(
            NodeSpec::button(NEXT_BUTTON, "Next")
                .anchors((0.65, 0.04), (0.94, 0.14))
                .on_click(UiAction::TutorialNext),
        )
        .child(
            NodeSpec::button(SKIP_BUTTON, "Skip")
                .anchors((0.06, 0.04), (0.35, 0.14))
                .color(CANCEL_BG)
                .on_click(UiAction::TutorialSkip),
        )
}
