// Weather panel, region picker and the top-bar weather button

use super::{title, CANCEL_BG, MUTED_TEXT};
use crate::action::{Overlay, UiAction};
use crate::scene::{Color, TextAlign};
use crate::ui::NodeSpec;

pub const WEATHER_PANEL: &str = "WeatherPanel";
pub const REGION_PANEL: &str = "RegionSettingsPanel";
pub const WEATHER_BUTTON: &str = "WeatherButton";
pub const WEATHER_TOAST: &str = "WeatherToast";

pub const WEATHER_TITLE: &str = "WeatherTitle";
pub const WEATHER_CONTENT: &str = "WeatherContent";
pub const WEATHER_DATE: &str = "WeatherDate";
pub const TOAST_TEXT: &str = "ToastText";
pub const REGION_CONTENT_PATH: &str = "RegionScrollView/RegionContent";

pub const DEFAULT_REGION: &str = "Osaka";

/// Regions offered by the picker, in display order
pub const REGIONS: [&str; 14] = [
    "Hokkaido", "Tokyo", "Kanagawa", "Chiba", "Saitama", "Aichi", "Osaka", "Kyoto", "Hyogo",
    "Hiroshima", "Fukuoka", "Okinawa", "Miyagi", "Niigata",
];

const WEATHER_BG: Color = Color::rgba(0.08, 0.15, 0.25, 0.95);
const REGION_ITEM_BG: Color = Color::rgba(0.2, 0.4, 0.6, 0.9);

pub fn region_button_name(region: &str) -> String {
    format!("{}Button", region)
}

pub fn weather_panel() -> NodeSpec {
    NodeSpec::panel(WEATHER_PANEL)
        .anchors((0.1, 0.2), (0.9, 0.8))
        .z(-30.0)
        .color(WEATHER_BG)
        .inactive()
        .child(title(WEATHER_TITLE, "Weather Forecast").anchors((0.0, 0.85), (1.0, 0.98)))
        .child(
            NodeSpec::label(WEATHER_DATE, "")
                .anchors((0.0, 0.78), (1.0, 0.85))
                .font(14, false)
                .text_color(MUTED_TEXT),
        )
        .child(
            NodeSpec::button("RegionButton", "Change Region")
                .anchors((0.3, 0.75), (0.7, 0.82))
                .color(REGION_ITEM_BG)
                .collider(150.0, 30.0, 1.0)
                .on_click(UiAction::OpenOverlay(Overlay::WeatherRegion)),
        )
        .child(
            NodeSpec::label(WEATHER_CONTENT, "Loading...")
                .anchors((0.05, 0.15), (0.95, 0.75))
                .align(TextAlign::UpperLeft),
        )
        .child(
            NodeSpec::button("RefreshWeatherButton", "Refresh")
                .anchors((0.1, 0.03), (0.45, 0.12))
                .on_click(UiAction::RefreshWeather),
        )
        .child(
            NodeSpec::button("CloseWeatherButton", "Close")
                .anchors((0.55, 0.03), (0.9, 0.12))
                .color(CANCEL_BG)
                .on_click(UiAction::HideWeather),
        )
}

/// One button per region; picking one hands it to the weather manager
pub fn region_panel() -> NodeSpec {
    let columns = 2;
    let rows = REGIONS.len().div_ceil(columns);
    let buttons = REGIONS.iter().enumerate().map(|(i, region)| {
        let (lo, hi) = super::grid_cell(i, columns, rows);
        NodeSpec::button(region_button_name(region), *region)
            .anchors(lo, hi)
            .color(REGION_ITEM_BG)
            .on_click(UiAction::SelectRegion(region.to_string()))
    });

    NodeSpec::panel(REGION_PANEL)
        .anchors((0.1, 0.1), (0.9, 0.9))
        .z(-40.0)
        .color(WEATHER_BG)
        .inactive()
        .child(title("RegionTitle", "Select Region"))
        .child(
            NodeSpec::container("RegionScrollView")
                .anchors((0.02, 0.12), (0.98, 0.86))
                .child(NodeSpec::container("RegionContent").children(buttons)),
        )
        .child(
            NodeSpec::button("CloseRegionButton", "Close")
                .anchors((0.35, 0.02), (0.65, 0.1))
                .color(CANCEL_BG)
                .on_click(UiAction::CloseOverlays),
        )
}

/// Transient status strip shown while weather loads
pub fn weather_toast() -> NodeSpec {
    NodeSpec::panel(WEATHER_TOAST)
        .anchors((0.05, 0.02), (0.95, 0.1))
        .color(Color::rgba(0.0, 0.0, 0.0, 0.7))
        .inactive()
        .child(NodeSpec::label(TOAST_TEXT, "Loading weather...").font(14, false))
}

/// Top-bar button that opens the weather panel
pub fn weather_button() -> NodeSpec {
    NodeSpec::icon_button(WEATHER_BUTTON, "icon_weather_sunny")
        .anchors((0.9, 0.85), (0.99, 0.98))
        .color(Color::CLEAR)
        .on_click(UiAction::ShowWeather)
}
