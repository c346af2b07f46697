// Search root and bottom menu
//
// The SearchPanel is a transparent full-screen root. It carries the two
// main buttons (settings bottom-left, functions bottom-right), their hover
// menus, the dim background overlay shown while a menu is open, and the
// shared close button used by every overlay panel.

use super::CANCEL_BG;
use crate::action::{Overlay, UiAction};
use crate::app::config::{DisplayMode, InputMode, SEARCH_PANEL_NAME};
use crate::scene::Color;
use crate::ui::factory::FALLBACK_BG;
use crate::ui::NodeSpec;

pub const SETTINGS_MAIN_BUTTON: &str = "SettingsMainButton";
pub const SETTINGS_HOVER_MENU: &str = "SettingsHoverMenu";
pub const FUNCTIONS_MAIN_BUTTON: &str = "FunctionsMainButton";
pub const FUNCTIONS_HOVER_MENU: &str = "FunctionsHoverMenu";
pub const BACKGROUND_OVERLAY: &str = "BackgroundOverlay";
pub const COMMON_CLOSE_BUTTON: &str = "CommonCloseButton";

/// Functions menu item relabelled when the display mode cycles
pub const AR_MODE_ITEM: &str = "ARModeButton";

/// Functions menu item relabelled when the input mode flips
pub const INPUT_MODE_ITEM: &str = "InputModeButton";

const HOVER_MENU_BG: Color = Color::rgba(0.05, 0.1, 0.2, 0.85);
const OVERLAY_DIM: Color = Color::rgba(0.0, 0.0, 0.0, 0.4);

/// One entry of a hover menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Node name prefix; the button is named `{key}Button`
    pub key: &'static str,
    pub label: String,
    pub action: UiAction,
}

impl MenuItem {
    fn new(key: &'static str, label: impl Into<String>, action: UiAction) -> Self {
        Self {
            key,
            label: label.into(),
            action,
        }
    }

    pub fn node_name(&self) -> String {
        format!("{}Button", self.key)
    }
}

/// Items of the settings (bottom-left) hover menu
pub fn settings_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new("IPSettings", "Settings", UiAction::OpenOverlay(Overlay::IpSettings)),
        MenuItem::new("ConsoleLog", "Console Log", UiAction::ToggleConsole),
        MenuItem::new("Beacon", "Beacon", UiAction::ToggleBeacon),
        MenuItem::new(
            "RegisteredList",
            "Registered List",
            UiAction::OpenOverlay(Overlay::RegistrationList),
        ),
        MenuItem::new(
            "WeatherRegion",
            "Weather Region",
            UiAction::OpenOverlay(Overlay::WeatherRegion),
        ),
        MenuItem::new("Tutorial", "Tutorial", UiAction::ShowTutorial),
    ]
}

/// Items of the functions (bottom-right) hover menu
pub fn functions_items(display_mode: DisplayMode, input_mode: InputMode) -> Vec<MenuItem> {
    vec![
        MenuItem::new("Search", "Search", UiAction::ExecuteSearch),
        MenuItem::new("ARMode", ar_mode_label(display_mode), UiAction::CycleDisplayMode),
        MenuItem::new("InputMode", input_mode.label(), UiAction::ToggleInputMode),
        MenuItem::new("Registration", "+ Register", UiAction::ShowRegistrationSelect),
    ]
}

pub fn ar_mode_label(mode: DisplayMode) -> String {
    format!("AR: {}", mode.label())
}

fn hover_menu(name: &str, min: (f32, f32), max: (f32, f32), items: Vec<MenuItem>) -> NodeSpec {
    let count = items.len();
    let buttons = items.into_iter().enumerate().map(|(i, item)| {
        let (lo, hi) = super::stacked_row(i, count, 0.04, 0.05, 0.95);
        NodeSpec::button(item.node_name(), item.label.clone())
            .anchors(lo, hi)
            .z(-10.0)
            .color(FALLBACK_BG)
            .collider(300.0, 80.0, 10.0)
            .on_click(item.action.from_menu())
    });

    NodeSpec::panel(name)
        .anchors(min, max)
        .z(-50.0)
        .color(HOVER_MENU_BG)
        .inactive()
        .children(buttons)
}

/// The SearchPanel root with the bottom menu
pub fn search_root(display_mode: DisplayMode, input_mode: InputMode) -> NodeSpec {
    NodeSpec::panel(SEARCH_PANEL_NAME)
        .color(Color::CLEAR)
        .child(
            NodeSpec::solid(BACKGROUND_OVERLAY)
                .color(OVERLAY_DIM)
                .inactive()
                .on_click(UiAction::CloseAllMenus),
        )
        .child(
            NodeSpec::icon_button(SETTINGS_MAIN_BUTTON, "icon_settings")
                .anchors((0.02, 0.02), (0.1, 0.16))
                .collider(120.0, 120.0, 50.0)
                .on_click(UiAction::ToggleSettingsMenu),
        )
        .child(hover_menu(
            SETTINGS_HOVER_MENU,
            (0.02, 0.25),
            (0.25, 0.9),
            settings_items(),
        ))
        .child(
            NodeSpec::icon_button(FUNCTIONS_MAIN_BUTTON, "icon_apps")
                .anchors((0.9, 0.02), (0.98, 0.16))
                .collider(120.0, 120.0, 50.0)
                .on_click(UiAction::ToggleFunctionsMenu),
        )
        .child(hover_menu(
            FUNCTIONS_HOVER_MENU,
            (0.75, 0.25),
            (0.98, 0.9),
            functions_items(display_mode, input_mode),
        ))
        .child(
            NodeSpec::button(COMMON_CLOSE_BUTTON, "Close")
                .anchors((0.4, 0.03), (0.6, 0.1))
                .z(-20.0)
                .color(CANCEL_BG)
                .inactive()
                .on_click(UiAction::CloseOverlays),
        )
}
