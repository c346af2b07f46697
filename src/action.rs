// Click actions
//
// Every interactive node carries at most one UiAction as plain data. The
// action is owned by the node, so destroying a node (or rebuilding its panel)
// drops its handler with it and a rebuilt button can never double-fire.
// AppState::dispatch is the single place actions are executed.

use crate::app::config::InputMode;

/// Overlay panels opened from the menus and closed by the shared close button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Paged settings surface
    IpSettings,
    /// Tracking-target list with bounded multiselect
    RegistrationList,
    /// Weather region picker
    WeatherRegion,
}

impl Overlay {
    pub const ALL: [Overlay; 3] = [
        Overlay::IpSettings,
        Overlay::RegistrationList,
        Overlay::WeatherRegion,
    ];

    /// Name of the panel node that backs this overlay
    pub fn panel_name(self) -> &'static str {
        match self {
            Overlay::IpSettings => "IPSettingsPanel",
            Overlay::RegistrationList => "RegistrationListPanel",
            Overlay::WeatherRegion => "RegionSettingsPanel",
        }
    }
}

/// Action attached to a clickable node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    // Bottom menu
    ToggleSettingsMenu,
    ToggleFunctionsMenu,
    CloseAllMenus,
    /// Hover menu item: close both menus, then run the wrapped action
    CloseMenusThen(Box<UiAction>),

    // Overlays
    OpenOverlay(Overlay),
    CloseOverlays,
    ToggleConsole,

    // Settings pages
    SettingsNextPage,
    SettingsPrevPage,
    ApplyServerUrl,
    /// Prefill the server URL field with a preset
    FillServerUrl(String),
    CycleDisplayMode,
    ToggleInputMode,
    SetInputMode(InputMode),
    ToggleBeacon,
    ClearBeacons,

    // Registration
    ShowRegistrationSelect,
    ShowObjectIdPanel,
    SubmitRegistration,
    CancelRegistration,
    ToggleSelection(String),

    // Search
    ExecuteSearch,
    ToggleCategoryPanel,
    /// Dismiss the loading indicator
    CompleteSearch,

    // Weather
    ShowWeather,
    /// Refetch the report without showing the toast
    RefreshWeather,
    HideWeather,
    SelectRegion(String),

    // Tutorial
    ShowTutorial,
    TutorialNext,
    TutorialSkip,
}

impl UiAction {
    /// Wrap `self` as a hover-menu item action
    pub fn from_menu(self) -> UiAction {
        UiAction::CloseMenusThen(Box::new(self))
    }
}
