// Application state management
//
// This module contains the main AppState struct: it owns the scene graph,
// runs full build passes, wires managers into the controllers, and routes
// clicks to actions. Controllers and configuration live in submodules.

pub mod clock;
pub mod config;
pub mod event;
pub mod menu;
pub mod pages;
pub mod prefs;
pub mod selection;

// Re-export config types for convenience
pub use config::{BuildConfig, DisplayMode, InputMode};

use crate::action::{Overlay, UiAction};
use crate::managers::{
    wire, ManagerGraph, ManagerLinks, RegistrationManager, SearchSinks, SinkTargets, TutorialSinks,
    UploaderSinks, WeatherSinks,
};
use crate::panels::{
    self, clock as clock_panel, debug, menu as menu_panel, registration, search, settings,
    tutorial, weather,
};
use crate::scene::{NodeId, NodeKind, SceneError, SceneGraph};
use crate::ui::{clean_scene, cleanup_orphans, IconCache, NodeFactory, PanelBuilder};
use config::{
    CANVAS_NAME, CLEANUP_NODE_NAMES, DEFAULT_DISPLAY_MODE_INDEX, DISPLAY_MODE_KEY,
    SEARCH_PANEL_NAME,
};
use clock::ClockController;
use menu::{BottomMenuController, MenuNodes};
use pages::SettingsPanelController;
use prefs::Preferences;
use selection::{SelectionListController, ToggleOutcome};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Number of lines kept in the on-screen console
const CONSOLE_LINES: usize = 12;

/// Nodes of the current build pass that actions write into
#[derive(Debug, Clone)]
struct SceneNodes {
    canvas: NodeId,
    root: NodeId,
    close_button: NodeId,
    overlays: Vec<(Overlay, NodeId)>,
    ip_input: NodeId,
    feedback: NodeId,
    log_toggle: NodeId,
    ar_mode_setting: NodeId,
    controller_mode: NodeId,
    hand_mode: NodeId,
    beacon_setting: NodeId,
    region_button: NodeId,
    ar_mode_item: NodeId,
    input_mode_item: NodeId,
    list_beacon_toggle: NodeId,
    debug_panel: NodeId,
    debug_text: NodeId,
    weather_toast: NodeId,
    toast_text: NodeId,
}

impl SceneNodes {
    fn resolve(graph: &SceneGraph, canvas: NodeId, root: NodeId) -> Result<Self, SceneError> {
        let at = |panel: &str, path: &str| graph.find_path(root, &format!("{}/{}", panel, path));
        let overlays = Overlay::ALL
            .iter()
            .map(|o| graph.find_path(root, o.panel_name()).map(|id| (*o, id)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            canvas,
            root,
            close_button: graph.find_path(root, menu_panel::COMMON_CLOSE_BUTTON)?,
            overlays,
            ip_input: at(settings::PANEL_NAME, settings::IP_INPUT_PATH)?,
            feedback: at(settings::PANEL_NAME, settings::FEEDBACK_TEXT)?,
            log_toggle: at(settings::PANEL_NAME, settings::LOG_TOGGLE_PATH)?,
            ar_mode_setting: at(settings::PANEL_NAME, settings::AR_MODE_PATH)?,
            controller_mode: at(settings::PANEL_NAME, settings::CONTROLLER_MODE_PATH)?,
            hand_mode: at(settings::PANEL_NAME, settings::HAND_MODE_PATH)?,
            beacon_setting: at(settings::PANEL_NAME, settings::BEACON_TOGGLE_PATH)?,
            region_button: at(settings::PANEL_NAME, settings::REGION_BUTTON_PATH)?,
            ar_mode_item: at(menu_panel::FUNCTIONS_HOVER_MENU, menu_panel::AR_MODE_ITEM)?,
            input_mode_item: at(menu_panel::FUNCTIONS_HOVER_MENU, menu_panel::INPUT_MODE_ITEM)?,
            list_beacon_toggle: at(registration::LIST_PANEL, registration::BEACON_TOGGLE)?,
            debug_panel: graph.find_path(root, debug::PANEL_NAME)?,
            debug_text: at(debug::PANEL_NAME, debug::DEBUG_TEXT)?,
            weather_toast: graph.find_path(root, weather::WEATHER_TOAST)?,
            toast_text: at(weather::WEATHER_TOAST, weather::TOAST_TEXT)?,
        })
    }

    fn sinks(graph: &SceneGraph, root: NodeId) -> SinkTargets {
        let at = |panel: &str, path: Option<&str>| {
            let full = match path {
                Some(p) => format!("{}/{}", panel, p),
                None => panel.to_string(),
            };
            match graph.find_path(root, &full) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(error = %e, "Sink node missing");
                    None
                }
            }
        };

        SinkTargets {
            uploader: UploaderSinks {
                select_panel: at(registration::SELECT_PANEL, None),
                object_panel: at(registration::OBJECT_PANEL, None),
                progress_bar: at(registration::OBJECT_PANEL, Some(registration::PROGRESS_BAR)),
                progress_text: at(registration::OBJECT_PANEL, Some(registration::PROGRESS_TEXT)),
            },
            weather: WeatherSinks {
                panel: at(weather::WEATHER_PANEL, None),
                title: at(weather::WEATHER_PANEL, Some(weather::WEATHER_TITLE)),
                content: at(weather::WEATHER_PANEL, Some(weather::WEATHER_CONTENT)),
                date: at(weather::WEATHER_PANEL, Some(weather::WEATHER_DATE)),
            },
            tutorial: TutorialSinks {
                panel: at(tutorial::PANEL_NAME, None),
                title: at(tutorial::PANEL_NAME, Some(tutorial::TITLE_TEXT)),
                content: at(tutorial::PANEL_NAME, Some(tutorial::CONTENT_TEXT)),
                page_indicator: at(tutorial::PANEL_NAME, Some(tutorial::PAGE_INDICATOR)),
                next_button: at(tutorial::PANEL_NAME, Some(tutorial::NEXT_BUTTON)),
            },
            search: SearchSinks {
                category_panel: at(search::CATEGORY_PANEL, None),
                loading_panel: at(search::LOADING_PANEL, None),
                loading_text: at(search::LOADING_PANEL, Some(search::LOADING_TEXT)),
            },
            object_name_input: at(
                registration::OBJECT_PANEL,
                Some(registration::OBJECT_NAME_INPUT),
            ),
        }
    }
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// The live scene
    pub graph: SceneGraph,

    builder: PanelBuilder,
    config: BuildConfig,
    prefs: Box<dyn Preferences>,

    /// Collaborators; controllers only hold weak links into these
    pub managers: ManagerGraph,

    pub menu: BottomMenuController,
    pub pages: SettingsPanelController,
    pub selection: SelectionListController,
    pub registration: RegistrationManager,
    pub clock: ClockController,

    /// Nodes of the last build pass; `None` after a scene cleanup
    nodes: Option<SceneNodes>,

    pub display_mode: DisplayMode,
    pub input_mode: InputMode,
    pub console_visible: bool,

    /// Index into `focusable_nodes()` for keyboard navigation
    pub cursor: usize,

    /// Whether keystrokes edit the focused input field
    pub editing: bool,

    /// Whether the preview expands hidden subtrees
    pub show_hidden: bool,

    /// Last feedback message, shown in the status bar
    pub last_message: String,

    console: VecDeque<String>,

    /// Completed build passes
    pub build_count: u32,
}

impl AppState {
    /// Run a first build pass into an empty scene
    pub fn build(
        config: BuildConfig,
        prefs: Box<dyn Preferences>,
        managers: ManagerGraph,
    ) -> Result<Self, SceneError> {
        Self::build_into(SceneGraph::new(), config, prefs, managers)
    }

    /// Run a first build pass into an existing scene
    pub fn build_into(
        graph: SceneGraph,
        config: BuildConfig,
        prefs: Box<dyn Preferences>,
        managers: ManagerGraph,
    ) -> Result<Self, SceneError> {
        let icons = IconCache::from_dir(config.icon_dir.clone());
        let mut state = Self {
            running: true,
            graph,
            builder: PanelBuilder::new(NodeFactory::new(icons)),
            selection: SelectionListController::new(config.max_selections),
            config,
            prefs,
            managers,
            menu: BottomMenuController::new(),
            pages: SettingsPanelController::new(),
            registration: RegistrationManager::new(),
            clock: ClockController::new(),
            nodes: None,
            display_mode: DisplayMode::default(),
            input_mode: InputMode::default(),
            console_visible: false,
            cursor: 0,
            editing: false,
            show_hidden: false,
            last_message: String::new(),
            console: VecDeque::with_capacity(CONSOLE_LINES),
            build_count: 0,
        };
        state.rebuild()?;
        Ok(state)
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn prefs(&self) -> &dyn Preferences {
        &*self.prefs
    }

    /// Console lines, oldest first
    pub fn console_lines(&self) -> impl Iterator<Item = &str> {
        self.console.iter().map(String::as_str)
    }

    /// The current SearchPanel root, if a scene is built
    pub fn search_root(&self) -> Option<NodeId> {
        self.nodes.as_ref().map(|n| n.root)
    }

    /// The current canvas, if a scene is built
    pub fn canvas(&self) -> Option<NodeId> {
        self.nodes.as_ref().map(|n| n.canvas)
    }

    /// Node at `path` below the SearchPanel root
    pub fn find(&self, path: &str) -> Result<NodeId, SceneError> {
        let root = self
            .search_root()
            .ok_or_else(|| SceneError::NotFound(SEARCH_PANEL_NAME.to_string()))?;
        self.graph.find_path(root, path)
    }

    // ========================================================================
    // Build pass
    // ========================================================================

    /// Full build pass: clean up, build every panel, bind and wire
    ///
    /// Safe to run any number of times against the live scene; each pass
    /// replaces the previous one. Returns the number of nodes built.
    pub fn rebuild(&mut self) -> Result<usize, SceneError> {
        self.builder.begin_pass();
        let orphans = cleanup_orphans(&mut self.graph, &self.config.legacy_node_names);
        if orphans > 0 {
            info!(removed = orphans, "Removed legacy nodes");
        }

        let stored = self
            .prefs
            .int_or(DISPLAY_MODE_KEY, DEFAULT_DISPLAY_MODE_INDEX);
        self.display_mode = DisplayMode::from_index(stored);
        self.managers.ensure_defaults();

        let graph = &mut self.graph;
        let canvas = self
            .builder
            .build_or_rebuild(graph, None, CANVAS_NAME, &panels::canvas())?;
        let root = self.builder.build_or_rebuild(
            graph,
            Some(canvas.root),
            SEARCH_PANEL_NAME,
            &menu_panel::search_root(self.display_mode, self.input_mode),
        )?;

        let content = self.settings_content();
        let specs = [
            clock_panel::clock_panel(),
            settings::ip_settings_panel(&content),
            registration::select_panel(),
            registration::object_panel(),
            registration::list_panel(self.config.max_selections),
            weather::weather_panel(),
            weather::region_panel(),
            weather::weather_toast(),
            weather::weather_button(),
            tutorial::tutorial_panel(),
            search::loading_panel(),
            search::category_panel(),
            debug::debug_panel(),
        ];
        for spec in &specs {
            self.builder
                .build_or_rebuild(&mut self.graph, Some(root.root), &spec.name, spec)?;
        }

        let nodes = SceneNodes::resolve(&self.graph, canvas.root, root.root)?;
        let menu_nodes = MenuNodes::resolve(&self.graph, root.root)?;
        let settings_panel = self.graph.find_path(root.root, settings::PANEL_NAME)?;
        let list = self.graph.find_path(root.root, registration::LIST_PANEL)?;
        let clock = self.graph.find_path(root.root, clock_panel::PANEL_NAME)?;

        self.menu.attach(&mut self.graph, menu_nodes);
        self.pages.bind(&mut self.graph, settings_panel)?;
        self.selection
            .bind(&mut self.graph, list, self.builder.factory_mut().icons())?;
        self.selection.restore(&mut self.graph, &*self.prefs);
        self.clock
            .bind(&mut self.graph, clock, self.builder.factory_mut().icons())?;

        let sinks = SceneNodes::sinks(&self.graph, root.root);
        wire(
            &self.managers,
            &sinks,
            &mut self.menu,
            &mut self.pages,
            &mut self.registration,
        );

        self.graph.set_active(nodes.debug_panel, self.console_visible)?;
        self.nodes = Some(nodes);
        self.refresh_beacon_labels();
        self.render_console();
        self.cursor = 0;
        self.editing = false;
        self.build_count += 1;

        let built = self.graph.descendant_count(canvas.root) + 1;
        info!(pass = self.build_count, nodes = built, "Scene built");
        Ok(built)
    }

    /// Destroy every known top-level node; returns how many were removed
    pub fn clean_scene(&mut self) -> usize {
        let removed = clean_scene(&mut self.graph, &CLEANUP_NODE_NAMES);
        self.nodes = None;
        self.pages.reset();
        self.cursor = 0;
        self.editing = false;
        self.last_message = format!("Removed {} nodes", removed);
        removed
    }

    /// Show `hour:minute` on the clock panel; ignored while no scene is built
    pub fn set_clock(&mut self, hour: u32, minute: u32) {
        if self.nodes.is_some() {
            self.clock.set_time(&mut self.graph, hour, minute);
        }
    }

    fn settings_content(&self) -> settings::SettingsContent {
        let links = ManagerLinks::from_graph(&self.managers);
        settings::SettingsContent {
            server_url: self.config.default_server_url.clone(),
            display_mode: self.display_mode,
            input_mode: self.input_mode,
            beacon_enabled: links.beacon_enabled().unwrap_or(true),
            console_visible: self.console_visible,
            region: links
                .region()
                .unwrap_or_else(|| weather::DEFAULT_REGION.to_string()),
        }
    }

    // ========================================================================
    // Click routing
    // ========================================================================

    /// Click a node; returns whether an action ran
    ///
    /// Stale, hidden and non-interactable nodes ignore clicks.
    pub fn click(&mut self, id: NodeId) -> bool {
        let Some(node) = self.graph.get(id) else {
            warn!(node = ?id, "Click on a destroyed node");
            return false;
        };
        if !node.interactable || !self.graph.is_active_in_hierarchy(id) {
            debug!(node = %node.name, "Click ignored, node not clickable");
            return false;
        }
        let Some(action) = node.handler.clone() else {
            return false;
        };
        debug!(node = %node.name, action = ?action, "Click");
        self.dispatch(action);
        true
    }

    /// Click the node at `path` below the SearchPanel root
    pub fn click_path(&mut self, path: &str) -> bool {
        match self.find(path) {
            Ok(id) => self.click(id),
            Err(e) => {
                warn!(path, error = %e, "Click target not found");
                false
            }
        }
    }

    /// Execute an action
    pub fn dispatch(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleSettingsMenu => {
                self.menu.toggle_settings(&mut self.graph);
            }
            UiAction::ToggleFunctionsMenu => {
                self.menu.toggle_functions(&mut self.graph);
            }
            UiAction::CloseAllMenus => self.menu.close_all(&mut self.graph),
            UiAction::CloseMenusThen(inner) => {
                self.menu.close_all(&mut self.graph);
                self.dispatch(*inner);
            }

            UiAction::OpenOverlay(overlay) => self.open_overlay(overlay),
            UiAction::CloseOverlays => self.close_overlays(),
            UiAction::ToggleConsole => self.toggle_console(),

            UiAction::SettingsNextPage => {
                self.pages.next(&mut self.graph);
            }
            UiAction::SettingsPrevPage => {
                self.pages.prev(&mut self.graph);
            }
            UiAction::ApplyServerUrl => self.apply_server_url(),
            UiAction::FillServerUrl(url) => {
                if let Some(input) = self.nodes.as_ref().map(|n| n.ip_input) {
                    self.set_input_text(input, &url);
                }
                self.feedback(format!("Preset: {}", url));
            }
            UiAction::CycleDisplayMode => self.cycle_display_mode(),
            UiAction::ToggleInputMode => self.set_input_mode(self.input_mode.toggled()),
            UiAction::SetInputMode(mode) => self.set_input_mode(mode),
            UiAction::ToggleBeacon => {
                let toggled = self.menu.links().with_uploader(|u| u.toggle_beacon_enabled());
                if let Some(enabled) = toggled {
                    self.refresh_beacon_labels();
                    self.feedback(settings::beacon_label(enabled));
                }
            }
            UiAction::ClearBeacons => {
                if let Some(removed) = self.pages.links().with_uploader(|u| u.clear_beacons()) {
                    self.feedback(format!("Cleared {} beacons", removed));
                }
            }

            UiAction::ShowRegistrationSelect => {
                self.registration.begin(&mut self.graph);
            }
            UiAction::ShowObjectIdPanel => {
                self.registration.choose_object(&mut self.graph);
            }
            UiAction::SubmitRegistration => {
                if !self.registration.submit(&mut self.graph) {
                    self.feedback("Enter an object name first".to_string());
                }
            }
            UiAction::CancelRegistration => {
                self.registration.cancel(&mut self.graph);
            }
            UiAction::ToggleSelection(object) => {
                let outcome = self.selection.toggle(&mut self.graph, &object);
                match outcome {
                    ToggleOutcome::Rejected => self.feedback(format!(
                        "Up to {} objects can be tracked",
                        self.selection.max()
                    )),
                    _ => self.selection.save(&mut *self.prefs),
                }
            }

            UiAction::ExecuteSearch => {
                self.menu.links().with_search(|s| s.execute_search(&mut self.graph));
            }
            UiAction::ToggleCategoryPanel => {
                self.menu
                    .links()
                    .with_search(|s| s.toggle_category_panel(&mut self.graph));
            }

            UiAction::CompleteSearch => {
                self.menu.links().with_search(|s| s.complete_search(&mut self.graph));
            }

            UiAction::ShowWeather => self.show_weather(),
            UiAction::RefreshWeather => {
                self.menu
                    .links()
                    .with_weather(|w| w.refresh_weather(&mut self.graph));
            }
            UiAction::HideWeather => {
                self.menu
                    .links()
                    .with_weather(|w| w.hide_weather_panel(&mut self.graph));
                self.set_node_active(self.nodes.as_ref().map(|n| n.weather_toast), false);
            }
            UiAction::SelectRegion(region) => self.select_region(&region),

            UiAction::ShowTutorial => {
                self.menu.links().with_tutorial(|t| t.show_tutorial(&mut self.graph));
            }
            UiAction::TutorialNext => {
                self.menu.links().with_tutorial(|t| t.next_page(&mut self.graph));
            }
            UiAction::TutorialSkip => {
                self.menu.links().with_tutorial(|t| t.skip(&mut self.graph));
            }
        }
    }

    // ========================================================================
    // Action handlers
    // ========================================================================

    /// Show one overlay panel (hiding the others) plus the shared close button
    fn open_overlay(&mut self, overlay: Overlay) {
        let Some(nodes) = self.nodes.clone() else {
            warn!(?overlay, "No scene built, overlay ignored");
            return;
        };
        for (o, panel) in &nodes.overlays {
            self.set_node_active(Some(*panel), *o == overlay);
        }
        self.set_node_active(Some(nodes.close_button), true);
        if let Err(e) = self.graph.set_as_last_sibling(nodes.close_button) {
            warn!(error = %e, "Close button is gone");
        }
        debug!(?overlay, "Overlay opened");
    }

    fn close_overlays(&mut self) {
        let Some(nodes) = self.nodes.clone() else {
            return;
        };
        for (_, panel) in &nodes.overlays {
            self.set_node_active(Some(*panel), false);
        }
        self.set_node_active(Some(nodes.close_button), false);
        debug!("Overlays closed");
    }

    /// Whether any overlay panel is showing
    pub fn overlay_open(&self) -> bool {
        self.nodes
            .as_ref()
            .map(|n| n.overlays.iter().any(|(_, id)| self.graph.is_active(*id)))
            .unwrap_or(false)
    }

    fn toggle_console(&mut self) {
        self.console_visible = !self.console_visible;
        let (panel, toggle) = match &self.nodes {
            Some(n) => (Some(n.debug_panel), Some(n.log_toggle)),
            None => (None, None),
        };
        self.set_node_active(panel, self.console_visible);
        self.set_button_label(toggle, &settings::console_label(self.console_visible));
    }

    fn apply_server_url(&mut self) {
        let url = self
            .nodes
            .as_ref()
            .and_then(|n| self.graph.text(n.ip_input))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if url.is_empty() {
            self.feedback("Server URL is empty".to_string());
            return;
        }
        if self
            .pages
            .links()
            .with_uploader(|u| u.set_server_url(&url))
            .is_some()
        {
            self.feedback(format!("Server URL set: {}", url));
        }
    }

    fn cycle_display_mode(&mut self) {
        self.display_mode = self.display_mode.next();
        self.prefs.set_int(DISPLAY_MODE_KEY, self.display_mode.index());
        let (item, setting) = match &self.nodes {
            Some(n) => (Some(n.ar_mode_item), Some(n.ar_mode_setting)),
            None => (None, None),
        };
        self.set_button_label(item, &menu_panel::ar_mode_label(self.display_mode));
        self.set_button_label(setting, &settings::ar_mode_label(self.display_mode));
        info!(mode = self.display_mode.label(), "Display mode changed");
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.pages.links().with_search(|s| s.set_input_mode(mode));

        let Some(nodes) = self.nodes.clone() else {
            return;
        };
        self.set_button_label(Some(nodes.input_mode_item), mode.label());
        let (controller_bg, hand_bg) = settings::input_mode_colors(mode);
        for (button, color) in [
            (nodes.controller_mode, controller_bg),
            (nodes.hand_mode, hand_bg),
        ] {
            if let Err(e) = self.graph.set_color(button, color) {
                warn!(error = %e, "Input mode button is gone");
            }
        }
        info!(mode = mode.label(), "Input mode changed");
    }

    fn show_weather(&mut self) {
        if !self.menu.links().has_weather() {
            warn!("WeatherManager not found, weather ignored");
            return;
        }
        let region = self.menu.links().region().unwrap_or_default();
        if let Some((toast, text)) = self.nodes.as_ref().map(|n| (n.weather_toast, n.toast_text)) {
            self.set_node_active(Some(toast), true);
            if let Err(e) = self.graph.set_text(text, format!("Weather: {}", region)) {
                warn!(error = %e, "Weather toast is gone");
            }
        }
        self.menu
            .links()
            .with_weather(|w| w.refresh_weather(&mut self.graph));
    }

    fn select_region(&mut self, region: &str) {
        let changed = self
            .menu
            .links()
            .with_weather(|w| w.set_region(&mut self.graph, region))
            .is_some();

        let Some(nodes) = self.nodes.clone() else {
            return;
        };
        if let Some((_, panel)) = nodes
            .overlays
            .iter()
            .find(|(o, _)| *o == Overlay::WeatherRegion)
        {
            self.set_node_active(Some(*panel), false);
        }
        if !self.overlay_open() {
            self.set_node_active(Some(nodes.close_button), false);
        }
        if changed {
            self.set_button_label(Some(nodes.region_button), &settings::region_label(region));
            self.feedback(format!("Region: {}", region));
        }
    }

    // ========================================================================
    // Node helpers
    // ========================================================================

    fn set_node_active(&mut self, id: Option<NodeId>, active: bool) {
        if let Some(id) = id {
            if let Err(e) = self.graph.set_active(id, active) {
                warn!(error = %e, "Node is gone");
            }
        }
    }

    /// Rewrite the `Label` child of a button
    fn set_button_label(&mut self, button: Option<NodeId>, text: &str) {
        let Some(button) = button else {
            return;
        };
        match self.graph.find_child(button, "Label") {
            Some(label) => {
                if let Err(e) = self.graph.set_text(label, text) {
                    warn!(error = %e, "Button label is gone");
                }
            }
            None => warn!(text, "Button has no label"),
        }
    }

    fn refresh_beacon_labels(&mut self) {
        let Some(enabled) = self.menu.links().beacon_enabled() else {
            return;
        };
        let label = settings::beacon_label(enabled);
        let buttons = match &self.nodes {
            Some(n) => [Some(n.beacon_setting), Some(n.list_beacon_toggle)],
            None => [None, None],
        };
        for button in buttons {
            self.set_button_label(button, &label);
        }
    }

    /// Replace an input field's text and show its placeholder while empty
    pub fn set_input_text(&mut self, input: NodeId, text: &str) {
        if let Err(e) = self.graph.set_text(input, text) {
            warn!(error = %e, "Input field is gone");
            return;
        }
        if let Some(placeholder) = self.graph.find_child(input, "Placeholder") {
            self.set_node_active(Some(placeholder), text.is_empty());
        }
    }

    /// Report a user-facing message in the settings feedback line and console
    fn feedback(&mut self, message: String) {
        info!(%message, "Feedback");
        if let Some(feedback) = self.nodes.as_ref().map(|n| n.feedback) {
            if let Err(e) = self.graph.set_text(feedback, message.as_str()) {
                warn!(error = %e, "Feedback text is gone");
            }
        }
        if self.console.len() == CONSOLE_LINES {
            self.console.pop_front();
        }
        self.console.push_back(message.clone());
        self.last_message = message;
        self.render_console();
    }

    fn render_console(&mut self) {
        let Some(text) = self.nodes.as_ref().map(|n| n.debug_text) else {
            return;
        };
        let joined = self.console.iter().cloned().collect::<Vec<_>>().join("\n");
        if let Err(e) = self.graph.set_text(text, joined) {
            warn!(error = %e, "Console text is gone");
        }
    }

    // ========================================================================
    // Keyboard navigation
    // ========================================================================

    /// Visible nodes that react to input (clickable nodes and input fields)
    pub fn focusable_nodes(&self) -> Vec<NodeId> {
        let Some(canvas) = self.canvas() else {
            return Vec::new();
        };
        self.graph
            .walk(canvas)
            .into_iter()
            .map(|(id, _)| id)
            .filter(|id| {
                self.graph.get(*id).is_some_and(|n| {
                    n.interactable && (n.handler.is_some() || n.kind == NodeKind::InputField)
                }) && self.graph.is_active_in_hierarchy(*id)
            })
            .collect()
    }

    /// Focused node, clamping the cursor to the focusable list
    pub fn focused(&self) -> Option<NodeId> {
        let nodes = self.focusable_nodes();
        if nodes.is_empty() {
            return None;
        }
        nodes.get(self.cursor.min(nodes.len() - 1)).copied()
    }

    pub fn focus_next(&mut self) {
        let count = self.focusable_nodes().len();
        if count > 0 {
            self.cursor = (self.cursor.min(count - 1) + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.focusable_nodes().len();
        if count > 0 {
            self.cursor = (self.cursor.min(count - 1) + count - 1) % count;
        }
    }

    /// Click the focused node, or start editing when it is an input field
    pub fn activate_focused(&mut self) -> bool {
        let Some(id) = self.focused() else {
            return false;
        };
        if self.graph.get(id).map(|n| n.kind) == Some(NodeKind::InputField) {
            self.editing = true;
            return true;
        }
        let clicked = self.click(id);
        // The clicked action may have hidden or revealed nodes
        let count = self.focusable_nodes().len();
        if count > 0 {
            self.cursor = self.cursor.min(count - 1);
        }
        clicked
    }

    /// Append a character to the focused input field
    pub fn type_char(&mut self, c: char) {
        if let Some(id) = self.focused_input() {
            let mut text = self.graph.text(id).unwrap_or_default().to_string();
            text.push(c);
            self.set_input_text(id, &text);
        }
    }

    /// Remove the last character of the focused input field
    pub fn backspace(&mut self) {
        if let Some(id) = self.focused_input() {
            let mut text = self.graph.text(id).unwrap_or_default().to_string();
            text.pop();
            self.set_input_text(id, &text);
        }
    }

    fn focused_input(&self) -> Option<NodeId> {
        self.focused()
            .filter(|id| self.graph.get(*id).map(|n| n.kind) == Some(NodeKind::InputField))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prefs::MemoryPreferences;
    use crate::managers::{
        shared, DefaultUploader, DefaultWeatherManager, Shared, Uploader, WeatherManager,
    };
    use crate::panels::menu::{
        COMMON_CLOSE_BUTTON, FUNCTIONS_HOVER_MENU, SETTINGS_HOVER_MENU, SETTINGS_MAIN_BUTTON,
    };
    use config::SELECTIONS_KEY;

    fn test_config() -> BuildConfig {
        BuildConfig {
            icon_dir: "/nonexistent/icons".into(),
            ..BuildConfig::default()
        }
    }

    fn app_with(prefs: MemoryPreferences) -> AppState {
        AppState::build(test_config(), Box::new(prefs), ManagerGraph::with_defaults()).unwrap()
    }

    fn app() -> AppState {
        app_with(MemoryPreferences::new())
    }

    fn active(app: &AppState, path: &str) -> bool {
        app.graph.is_active(app.find(path).unwrap())
    }

    fn label(app: &AppState, path: &str) -> String {
        let button = app.find(path).unwrap();
        let label = app.graph.find_child(button, "Label").unwrap();
        app.graph.text(label).unwrap().to_string()
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut app = app();
        let first = app.graph.len();
        app.rebuild().unwrap();
        app.rebuild().unwrap();

        assert_eq!(app.graph.len(), first);
        let canvases = app
            .graph
            .roots()
            .iter()
            .filter(|id| app.graph.get(**id).unwrap().name == CANVAS_NAME)
            .count();
        assert_eq!(canvases, 1);
        let root = app.search_root().unwrap();
        assert_eq!(app.graph.children_named(root, settings::PANEL_NAME).len(), 1);
        assert_eq!(app.build_count, 3);
    }

    #[test]
    fn test_build_removes_legacy_orphans() {
        let mut graph = SceneGraph::new();
        graph.create("ObjectRegPanel", NodeKind::Panel, None).unwrap();
        graph.create("SearchPanel", NodeKind::Panel, None).unwrap();
        let app = AppState::build_into(
            graph,
            test_config(),
            Box::new(MemoryPreferences::new()),
            ManagerGraph::with_defaults(),
        )
        .unwrap();

        assert_eq!(app.graph.roots().len(), 1);
        assert_eq!(app.graph.find_root(CANVAS_NAME), app.canvas());
    }

    #[test]
    fn test_stale_handles_ignore_clicks_after_rebuild() {
        let mut app = app();
        let old = app.find(SETTINGS_MAIN_BUTTON).unwrap();
        app.rebuild().unwrap();
        assert!(!app.click(old));
        assert!(app.click_path(SETTINGS_MAIN_BUTTON));
    }

    #[test]
    fn test_hidden_menu_items_ignore_clicks() {
        let mut app = app();
        let item = format!("{}/IPSettingsButton", SETTINGS_HOVER_MENU);
        assert!(!app.click_path(&item));
        assert!(!active(&app, settings::PANEL_NAME));
    }

    #[test]
    fn test_menu_item_closes_menus_then_opens_overlay() {
        let mut app = app();
        app.click_path(SETTINGS_MAIN_BUTTON);
        assert!(active(&app, SETTINGS_HOVER_MENU));

        assert!(app.click_path(&format!("{}/IPSettingsButton", SETTINGS_HOVER_MENU)));
        assert_eq!(app.menu.state(), menu::MenuState::None);
        assert!(!active(&app, SETTINGS_HOVER_MENU));
        assert!(!active(&app, menu_panel::BACKGROUND_OVERLAY));
        assert!(active(&app, settings::PANEL_NAME));

        let root = app.search_root().unwrap();
        let close = app.find(COMMON_CLOSE_BUTTON).unwrap();
        assert!(app.graph.is_active(close));
        assert_eq!(app.graph.children(root).last(), Some(&close));
    }

    #[test]
    fn test_overlays_are_exclusive_and_close_together() {
        let mut app = app();
        app.dispatch(UiAction::OpenOverlay(Overlay::IpSettings));
        app.dispatch(UiAction::OpenOverlay(Overlay::RegistrationList));
        assert!(!active(&app, settings::PANEL_NAME));
        assert!(active(&app, registration::LIST_PANEL));

        assert!(app.click_path(COMMON_CLOSE_BUTTON));
        assert!(!app.overlay_open());
        assert!(!active(&app, COMMON_CLOSE_BUTTON));
    }

    #[test]
    fn test_display_mode_pref_is_read_and_clamped() {
        let mut prefs = MemoryPreferences::new();
        prefs.set_int(DISPLAY_MODE_KEY, 7);
        let app = app_with(prefs);
        assert_eq!(app.display_mode, DisplayMode::GalleryCorridor);
        assert_eq!(
            label(&app, &format!("{}/{}", FUNCTIONS_HOVER_MENU, menu_panel::AR_MODE_ITEM)),
            "AR: Gallery Corridor"
        );
    }

    #[test]
    fn test_cycle_display_mode_persists_and_relabels() {
        let mut app = app();
        app.dispatch(UiAction::CycleDisplayMode.from_menu());
        assert_eq!(app.display_mode, DisplayMode::GalleryCorridor);
        assert_eq!(app.prefs().get_int(DISPLAY_MODE_KEY), Some(2));
        assert_eq!(
            label(&app, &format!("{}/{}", settings::PANEL_NAME, settings::AR_MODE_PATH)),
            "AR Mode: Gallery Corridor"
        );

        app.rebuild().unwrap();
        assert_eq!(app.display_mode, DisplayMode::GalleryCorridor);
    }

    #[test]
    fn test_input_mode_reaches_search_and_highlights() {
        let mut app = app();
        app.dispatch(UiAction::ToggleInputMode);
        assert_eq!(app.input_mode, InputMode::HandTracking);
        assert_eq!(
            app.menu.links().with_search(|s| s.input_mode()),
            Some(InputMode::HandTracking)
        );
        let hand = app
            .find(&format!("{}/{}", settings::PANEL_NAME, settings::HAND_MODE_PATH))
            .unwrap();
        assert_eq!(app.graph.get(hand).unwrap().color, settings::MODE_ACTIVE_BG);
        assert_eq!(
            label(&app, &format!("{}/{}", FUNCTIONS_HOVER_MENU, menu_panel::INPUT_MODE_ITEM)),
            "Input: Hand"
        );
    }

    #[test]
    fn test_apply_server_url_reaches_uploader() {
        let mut app = app();
        let input = app
            .find(&format!("{}/{}", settings::PANEL_NAME, settings::IP_INPUT_PATH))
            .unwrap();
        app.set_input_text(input, "  http://10.0.0.2:5000 ");
        app.dispatch(UiAction::ApplyServerUrl);
        assert_eq!(
            app.pages.links().with_uploader(|u| u.server_url()).as_deref(),
            Some("http://10.0.0.2:5000")
        );

        app.set_input_text(input, "");
        app.dispatch(UiAction::ApplyServerUrl);
        assert_eq!(app.last_message, "Server URL is empty");
    }

    #[test]
    fn test_selection_cap_and_persistence() {
        let mut app = app();
        for object in ["cup", "laptop", "bottle", "chair"] {
            app.dispatch(UiAction::ToggleSelection(object.to_string()));
        }
        assert_eq!(app.selection.selected(), &["cup", "laptop", "bottle"]);
        assert_eq!(
            app.prefs().get_string(SELECTIONS_KEY).as_deref(),
            Some("cup,laptop,bottle")
        );

        app.rebuild().unwrap();
        assert_eq!(app.selection.count(), 3);
        let count = app
            .find(&format!("{}/{}", registration::LIST_PANEL, registration::SELECTION_COUNT))
            .unwrap();
        assert_eq!(app.graph.text(count), Some("Selected: 3/3"));
    }

    #[test]
    fn test_tutorial_blocks_main_buttons() {
        let mut app = app();
        app.dispatch(UiAction::ShowTutorial);
        assert!(active(&app, tutorial::PANEL_NAME));
        app.click_path(SETTINGS_MAIN_BUTTON);
        assert!(!active(&app, SETTINGS_HOVER_MENU));

        app.dispatch(UiAction::TutorialSkip);
        app.click_path(SETTINGS_MAIN_BUTTON);
        assert!(active(&app, SETTINGS_HOVER_MENU));
    }

    #[test]
    fn test_rebuild_while_tutorial_showing_unblocks_main_buttons() {
        let mut app = app();
        app.dispatch(UiAction::ShowTutorial);
        assert!(app.menu.links().tutorial_showing());

        app.rebuild().unwrap();
        assert!(!active(&app, tutorial::PANEL_NAME));
        assert!(!app.menu.links().tutorial_showing());
        assert!(app.click_path(SETTINGS_MAIN_BUTTON));
        assert!(active(&app, SETTINGS_HOVER_MENU));
    }

    #[test]
    fn test_rebuild_resets_live_state_to_fresh_nodes() {
        let uploader = shared(DefaultUploader::new());
        let as_dyn: Shared<dyn Uploader> = uploader.clone();
        let managers = ManagerGraph {
            uploader: Some(as_dyn),
            ..ManagerGraph::with_defaults()
        };
        let mut app =
            AppState::build(test_config(), Box::new(MemoryPreferences::new()), managers).unwrap();

        app.click_path(SETTINGS_MAIN_BUTTON);
        app.dispatch(UiAction::OpenOverlay(Overlay::IpSettings));
        app.dispatch(UiAction::SettingsNextPage);
        app.dispatch(UiAction::ShowRegistrationSelect);
        app.dispatch(UiAction::ShowObjectIdPanel);
        let input = app
            .find(&format!("{}/{}", registration::OBJECT_PANEL, registration::OBJECT_NAME_INPUT))
            .unwrap();
        app.set_input_text(input, "cup");
        app.dispatch(UiAction::SubmitRegistration);
        app.dispatch(UiAction::ShowTutorial);

        assert_eq!(app.menu.state(), menu::MenuState::SettingsOpen);
        assert!(app.overlay_open());
        assert_eq!(app.pages.current_index(), 1);
        assert!(active(&app, registration::OBJECT_PANEL));
        assert_eq!(uploader.borrow().pending_registration(), Some("cup"));
        assert!(app.menu.links().tutorial_showing());

        app.rebuild().unwrap();

        assert_eq!(app.menu.state(), menu::MenuState::None);
        assert!(!active(&app, SETTINGS_HOVER_MENU));
        assert!(!active(&app, menu_panel::BACKGROUND_OVERLAY));
        assert!(!app.overlay_open());
        assert!(!active(&app, COMMON_CLOSE_BUTTON));
        assert_eq!(app.pages.current_index(), 0);
        assert_eq!(app.pages.indicator_text(), format!("1 / {}", app.pages.page_count()));
        assert!(!active(&app, registration::SELECT_PANEL));
        assert!(!active(&app, registration::OBJECT_PANEL));
        assert_eq!(uploader.borrow().pending_registration(), None);
        assert!(!active(&app, tutorial::PANEL_NAME));
        assert!(!app.menu.links().tutorial_showing());

        assert!(app.click_path(SETTINGS_MAIN_BUTTON));
        assert!(active(&app, SETTINGS_HOVER_MENU));
    }

    #[test]
    fn test_cancel_button_dismisses_loading_panel() {
        let mut app = app();
        app.dispatch(UiAction::ExecuteSearch);
        app.dispatch(UiAction::ExecuteSearch);
        assert!(active(&app, search::LOADING_PANEL));

        let cancel = format!("{}/{}", search::LOADING_PANEL, search::LOADING_CANCEL_BUTTON);
        assert!(app.click_path(&cancel));
        assert!(!active(&app, search::LOADING_PANEL));
        assert!(!active(&app, search::CATEGORY_PANEL));
    }

    #[test]
    fn test_refresh_weather_skips_toast() {
        let mut app = app();
        app.dispatch(UiAction::RefreshWeather);
        assert!(active(&app, weather::WEATHER_PANEL));
        assert!(!active(&app, weather::WEATHER_TOAST));

        app.dispatch(UiAction::ShowWeather);
        assert!(active(&app, weather::WEATHER_TOAST));
    }

    #[test]
    fn test_clock_survives_rebuild() {
        let mut app = app();
        app.set_clock(9, 5);
        let digit = |app: &AppState, display: &str, index: usize| {
            let path = format!(
                "{}/{}",
                clock_panel::PANEL_NAME,
                clock_panel::digit_path(display, index)
            );
            app.graph.text(app.find(&path).unwrap()).map(str::to_string)
        };
        // No sprites in the test icon dir, so digits render as text
        assert_eq!(digit(&app, clock_panel::HOUR_DISPLAY, 0).as_deref(), Some("0"));
        assert_eq!(digit(&app, clock_panel::HOUR_DISPLAY, 1).as_deref(), Some("9"));

        app.rebuild().unwrap();
        assert_eq!(digit(&app, clock_panel::MINUTE_DISPLAY, 1).as_deref(), Some("5"));

        app.clean_scene();
        app.set_clock(10, 30);
        assert_eq!(app.clock.displayed(), Some((9, 5)));
    }

    #[test]
    fn test_select_region_updates_weather_and_hides_picker() {
        let mut app = app();
        app.dispatch(UiAction::OpenOverlay(Overlay::WeatherRegion));
        app.dispatch(UiAction::SelectRegion("Sapporo".to_string()));

        assert_eq!(app.menu.links().region().as_deref(), Some("Sapporo"));
        assert!(!active(&app, weather::REGION_PANEL));
        assert!(!active(&app, COMMON_CLOSE_BUTTON));
        assert_eq!(
            label(&app, &format!("{}/{}", settings::PANEL_NAME, settings::REGION_BUTTON_PATH)),
            "Region: Sapporo"
        );
    }

    #[test]
    fn test_missing_weather_manager_is_noop() {
        let managers = ManagerGraph {
            weather: None,
            ..ManagerGraph::with_defaults()
        };
        let mut app =
            AppState::build(test_config(), Box::new(MemoryPreferences::new()), managers).unwrap();
        app.dispatch(UiAction::ShowWeather);
        assert!(!active(&app, weather::WEATHER_PANEL));
        assert!(!active(&app, weather::WEATHER_TOAST));
    }

    #[test]
    fn test_supplied_weather_manager_is_kept() {
        let weather: Shared<dyn WeatherManager> = shared(DefaultWeatherManager::new());
        let managers = ManagerGraph {
            weather: Some(weather.clone()),
            ..ManagerGraph::new()
        };
        let mut app =
            AppState::build(test_config(), Box::new(MemoryPreferences::new()), managers).unwrap();
        app.dispatch(UiAction::ShowWeather);
        assert!(active(&app, weather::WEATHER_PANEL));
        assert!(app.managers.uploader.is_some());
    }

    #[test]
    fn test_console_toggle_shows_debug_panel() {
        let mut app = app();
        app.dispatch(UiAction::ToggleConsole);
        assert!(active(&app, debug::PANEL_NAME));
        assert_eq!(
            label(&app, &format!("{}/{}", settings::PANEL_NAME, settings::LOG_TOGGLE_PATH)),
            "Console Log: ON"
        );
        app.dispatch(UiAction::ClearBeacons);
        let text = app
            .find(&format!("{}/{}", debug::PANEL_NAME, debug::DEBUG_TEXT))
            .unwrap();
        assert!(app.graph.text(text).unwrap().contains("Cleared 0 beacons"));
    }

    #[test]
    fn test_clean_scene_then_rebuild() {
        let mut app = app();
        assert!(app.clean_scene() >= 1);
        assert!(app.graph.is_empty());
        assert!(!app.click_path(SETTINGS_MAIN_BUTTON));

        app.rebuild().unwrap();
        assert!(app.click_path(SETTINGS_MAIN_BUTTON));
    }

    #[test]
    fn test_keyboard_focus_walks_visible_nodes() {
        let mut app = app();
        let before = app.focusable_nodes();
        assert!(!before.is_empty());
        // Hover menu items are hidden, so they are not focusable
        let item = app
            .find(&format!("{}/IPSettingsButton", SETTINGS_HOVER_MENU))
            .unwrap();
        assert!(!before.contains(&item));

        app.focus_previous();
        assert_eq!(app.cursor, before.len() - 1);
        app.focus_next();
        assert_eq!(app.cursor, 0);
    }
}
