// IPSettingsPanel - three-page settings booklet
//
// Page 1: server URL presets, URL row, console toggle
// Page 2: AR display mode, input mode, beacon toggle
// Page 3: registered list, beacon clearing, weather region, tutorial
//
// Which page is visible is owned by SettingsPanelController; the spec only
// lays the pages out.

use super::{title, CONFIRM_BG, MUTED_TEXT};
use crate::action::{Overlay, UiAction};
use crate::app::config::{DisplayMode, InputMode, DEFAULT_SERVER_URL};
use crate::scene::{Color, TextAlign};
use crate::ui::NodeSpec;

pub const PANEL_NAME: &str = "IPSettingsPanel";
pub const PAGE_NAMES: [&str; 3] = ["SettingsPage1", "SettingsPage2", "SettingsPage3"];
pub const PREV_BUTTON: &str = "PrevPageButton";
pub const NEXT_BUTTON: &str = "NextPageButton";
pub const PAGE_INDICATOR: &str = "PageIndicator";
pub const FEEDBACK_TEXT: &str = "DebugFeedbackText";

/// Paths below the panel root
pub const IP_INPUT_PATH: &str = "SettingsPage1/IPRow/IPInputField";
pub const LOG_TOGGLE_PATH: &str = "SettingsPage1/LogRow/LogToggleButton";
pub const AR_MODE_PATH: &str = "SettingsPage2/ARModeRow/ARModeToggleButton";
pub const CONTROLLER_MODE_PATH: &str = "SettingsPage2/InputModeRow/ControllerModeButton";
pub const HAND_MODE_PATH: &str = "SettingsPage2/InputModeRow/HandModeButton";
pub const BEACON_TOGGLE_PATH: &str = "SettingsPage2/BeaconRow/BeaconToggleButton";
pub const REGION_BUTTON_PATH: &str = "SettingsPage3/WeatherRegionButton";

/// Server preset for a home network
pub const HOME_SERVER_URL: &str = "http://192.168.0.19:5000";

/// Highlight of the active input mode button
pub const MODE_ACTIVE_BG: Color = Color::rgba(0.2, 0.5, 0.9, 0.95);
pub const MODE_INACTIVE_BG: Color = Color::rgba(0.25, 0.25, 0.3, 0.9);

const PANEL_BG: Color = Color::rgba(0.08, 0.1, 0.16, 0.96);
const PAGE_BUTTON_BG: Color = Color::rgba(0.3, 0.3, 0.4, 0.9);

/// Values shown when the panel is built
#[derive(Debug, Clone)]
pub struct SettingsContent {
    pub server_url: String,
    pub display_mode: DisplayMode,
    pub input_mode: InputMode,
    pub beacon_enabled: bool,
    pub console_visible: bool,
    pub region: String,
}

impl Default for SettingsContent {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            display_mode: DisplayMode::default(),
            input_mode: InputMode::default(),
            beacon_enabled: true,
            console_visible: false,
            region: super::weather::DEFAULT_REGION.to_string(),
        }
    }
}

pub fn console_label(visible: bool) -> String {
    format!("Console Log: {}", if visible { "ON" } else { "OFF" })
}

pub fn beacon_label(enabled: bool) -> String {
    format!("Beacon: {}", if enabled { "ON" } else { "OFF" })
}

pub fn ar_mode_label(mode: DisplayMode) -> String {
    format!("AR Mode: {}", mode.label())
}

pub fn region_label(region: &str) -> String {
    format!("Region: {}", region)
}

/// Button colors for (controller, hand) given the active input mode
pub fn input_mode_colors(mode: InputMode) -> (Color, Color) {
    match mode {
        InputMode::Controller => (MODE_ACTIVE_BG, MODE_INACTIVE_BG),
        InputMode::HandTracking => (MODE_INACTIVE_BG, MODE_ACTIVE_BG),
    }
}

fn row(name: &str, index: usize, count: usize) -> NodeSpec {
    let (lo, hi) = super::stacked_row(index, count, 0.09, 0.03, 0.97);
    NodeSpec::container(name).anchors(lo, hi)
}

fn page(name: &str) -> NodeSpec {
    NodeSpec::container(name).anchors((0.02, 0.1), (0.98, 0.86))
}

fn page_one(content: &SettingsContent) -> NodeSpec {
    page(PAGE_NAMES[0])
        .child(
            row("PresetRow", 0, 3)
                .child(
                    NodeSpec::button("TetheringButton", "Tethering")
                        .anchors((0.0, 0.0), (0.48, 1.0))
                        .on_click(UiAction::FillServerUrl(DEFAULT_SERVER_URL.to_string())),
                )
                .child(
                    NodeSpec::button("HomeServerButton", "Home Server")
                        .anchors((0.52, 0.0), (1.0, 1.0))
                        .on_click(UiAction::FillServerUrl(HOME_SERVER_URL.to_string())),
                ),
        )
        .child(
            row("IPRow", 1, 3)
                .child(
                    NodeSpec::label("IPLabel", "Server IP:")
                        .anchors((0.0, 0.0), (0.2, 1.0))
                        .align(TextAlign::MiddleLeft),
                )
                .child(
                    NodeSpec::input("IPInputField", content.server_url.clone(), "http://host:port")
                        .anchors((0.22, 0.0), (0.78, 1.0)),
                )
                .child(
                    NodeSpec::icon_label_button("SetIPButton", "icon_check", "SET")
                        .anchors((0.8, 0.0), (1.0, 1.0))
                        .color(CONFIRM_BG)
                        .on_click(UiAction::ApplyServerUrl),
                ),
        )
        .child(
            row("LogRow", 2, 3).child(
                NodeSpec::button("LogToggleButton", console_label(content.console_visible))
                    .on_click(UiAction::ToggleConsole),
            ),
        )
}

fn page_two(content: &SettingsContent) -> NodeSpec {
    let (controller_bg, hand_bg) = input_mode_colors(content.input_mode);
    page(PAGE_NAMES[1])
        .inactive()
        .child(
            row("ARModeRow", 0, 3).child(
                NodeSpec::button("ARModeToggleButton", ar_mode_label(content.display_mode))
                    .on_click(UiAction::CycleDisplayMode),
            ),
        )
        .child(
            row("InputModeRow", 1, 3)
                .child(
                    NodeSpec::label("InputModeLabel", "Input:")
                        .anchors((0.0, 0.0), (0.2, 1.0))
                        .align(TextAlign::MiddleLeft),
                )
                .child(
                    NodeSpec::icon_label_button(
                        "ControllerModeButton",
                        "icon_settings",
                        "Controller",
                    )
                    .anchors((0.22, 0.0), (0.6, 1.0))
                    .color(controller_bg)
                    .on_click(UiAction::SetInputMode(InputMode::Controller)),
                )
                .child(
                    NodeSpec::icon_label_button("HandModeButton", "icon_face_id", "Hands")
                        .anchors((0.62, 0.0), (1.0, 1.0))
                        .color(hand_bg)
                        .on_click(UiAction::SetInputMode(InputMode::HandTracking)),
                ),
        )
        .child(
            row("BeaconRow", 2, 3).child(
                NodeSpec::button("BeaconToggleButton", beacon_label(content.beacon_enabled))
                    .on_click(UiAction::ToggleBeacon),
            ),
        )
}

fn page_three(content: &SettingsContent) -> NodeSpec {
    let buttons = [
        NodeSpec::button("RegisteredListButton", "List")
            .on_click(UiAction::OpenOverlay(Overlay::RegistrationList)),
        NodeSpec::button("ClearBeaconsButton", "Clear Beacons").on_click(UiAction::ClearBeacons),
        NodeSpec::button("WeatherRegionButton", region_label(&content.region))
            .on_click(UiAction::OpenOverlay(Overlay::WeatherRegion)),
        NodeSpec::icon_label_button("ShowTutorialButton", "icon_info", "Tutorial")
            .on_click(UiAction::ShowTutorial),
    ];
    let count = buttons.len();
    page(PAGE_NAMES[2]).inactive().children(
        buttons.into_iter().enumerate().map(|(i, b)| {
            let (lo, hi) = super::stacked_row(i, count, 0.08, 0.1, 0.9);
            b.anchors(lo, hi)
        }),
    )
}

/// The settings panel with its three pages and page navigation
pub fn ip_settings_panel(content: &SettingsContent) -> NodeSpec {
    NodeSpec::panel(PANEL_NAME)
        .anchors((0.15, 0.12), (0.85, 0.88))
        .z(-30.0)
        .color(PANEL_BG)
        .inactive()
        .child(
            NodeSpec::container("IPSettingsTitle")
                .anchors((0.12, 0.88), (0.6, 0.98))
                .child(NodeSpec::image("Icon", "icon_settings").anchors((0.0, 0.1), (0.12, 0.9)))
                .child(
                    title("Text", "Settings")
                        .anchors((0.14, 0.0), (1.0, 1.0))
                        .align(TextAlign::MiddleLeft),
                ),
        )
        .child(
            NodeSpec::button(PREV_BUTTON, "<")
                .anchors((0.02, 0.88), (0.1, 0.98))
                .color(PAGE_BUTTON_BG)
                .on_click(UiAction::SettingsPrevPage),
        )
        .child(
            NodeSpec::label(PAGE_INDICATOR, "1 / 3")
                .anchors((0.65, 0.88), (0.88, 0.98))
                .font(18, true),
        )
        .child(
            NodeSpec::button(NEXT_BUTTON, ">")
                .anchors((0.9, 0.88), (0.98, 0.98))
                .color(PAGE_BUTTON_BG)
                .on_click(UiAction::SettingsNextPage),
        )
        .child(
            NodeSpec::label(FEEDBACK_TEXT, "[Waiting for button click...]")
                .anchors((0.02, 0.02), (0.98, 0.08))
                .font(12, false)
                .text_color(MUTED_TEXT),
        )
        .child(page_one(content))
        .child(page_two(content))
        .child(page_three(content))
}
