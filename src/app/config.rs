// Application configuration types
//
// This module contains configuration structs and enums for:
// - Scene build settings (icon directory, selection cap, legacy node names)
// - Persisted preference keys and their defaults
// - Display and input modes

use std::path::PathBuf;

// ============================================================================
// Constants
// ============================================================================

/// Name of the top-level canvas every build pass recreates
pub const CANVAS_NAME: &str = "FlashbackCanvas";

/// Name of the root panel that holds every surface
pub const SEARCH_PANEL_NAME: &str = "SearchPanel";

/// Maximum number of simultaneously tracked registration targets
pub const MAX_SELECTIONS: usize = 3;

/// Default icon directory, relative to the working directory
pub const DEFAULT_ICON_DIR: &str = "assets/ui/icons";

/// Preference key for the AR display mode index
pub const DISPLAY_MODE_KEY: &str = "ARDisplayMode";

/// Display mode index used when no preference is stored (InfiniteCarousel)
pub const DEFAULT_DISPLAY_MODE_INDEX: i32 = 1;

/// Preference key for persisted registration selections
pub const SELECTIONS_KEY: &str = "BeaconSelectedObjects";

/// Server URL shown in the settings input field before the user edits it
pub const DEFAULT_SERVER_URL: &str = "http://192.168.43.1:5000";

/// Stale top-level nodes left behind by earlier versions of the generated scene
///
/// Removed from the top level of the scene before every build pass.
pub const LEGACY_NODE_NAMES: [&str; 4] = [
    "SearchPanel",
    "ObjectRegPanel",
    "RegistrationListPanel",
    "ObjectRegistration3DProgress",
];

/// Top-level nodes removed by the scene cleanup command
pub const CLEANUP_NODE_NAMES: [&str; 11] = [
    "FlashbackCanvas",
    "Canvas",
    "SearchPanel",
    "AppManager",
    "ImageUploaderSystem",
    "HeadLockedCanvas",
    "DebugLogPanel",
    "EventSystem",
    "DebugText3D",
    "OnScreenDebugLog",
    "DebugLog",
];

// ============================================================================
// Enums
// ============================================================================

/// How search results are laid out in AR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    FloatingCard,
    InfiniteCarousel,
    GalleryCorridor,
}

impl DisplayMode {
    /// Map a stored index to a mode, clamping out-of-range values to [0, 2]
    pub fn from_index(index: i32) -> Self {
        match index.clamp(0, 2) {
            0 => DisplayMode::FloatingCard,
            1 => DisplayMode::InfiniteCarousel,
            _ => DisplayMode::GalleryCorridor,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            DisplayMode::FloatingCard => 0,
            DisplayMode::InfiniteCarousel => 1,
            DisplayMode::GalleryCorridor => 2,
        }
    }

    /// Next mode in the cycle FloatingCard -> InfiniteCarousel -> GalleryCorridor
    pub fn next(self) -> Self {
        DisplayMode::from_index((self.index() + 1) % 3)
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::FloatingCard => "Floating Card",
            DisplayMode::InfiniteCarousel => "Infinite Carousel",
            DisplayMode::GalleryCorridor => "Gallery Corridor",
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::from_index(DEFAULT_DISPLAY_MODE_INDEX)
    }
}

/// Pointer source used for interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    Controller,
    HandTracking,
}

impl InputMode {
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Controller => InputMode::HandTracking,
            InputMode::HandTracking => InputMode::Controller,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Controller => "Input: Controller",
            InputMode::HandTracking => "Input: Hand",
        }
    }
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Settings for one build pass
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory searched for icon images
    pub icon_dir: PathBuf,

    /// Selection cap for the registration list
    pub max_selections: usize,

    /// Stale top-level node names removed before building
    pub legacy_node_names: Vec<String>,

    /// Server URL prefilled in the settings page
    pub default_server_url: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            icon_dir: PathBuf::from(DEFAULT_ICON_DIR),
            max_selections: MAX_SELECTIONS,
            legacy_node_names: LEGACY_NODE_NAMES.iter().map(|s| s.to_string()).collect(),
            default_server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}
