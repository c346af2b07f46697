// Bottom menu state machine
//
// Two hover menus (settings, functions) hang off the main buttons. The
// visible flags of both menus and of the background overlay are always
// written together from a single MenuState, so they can never disagree.

use crate::managers::ManagerLinks;
use crate::panels::menu::{
    BACKGROUND_OVERLAY, FUNCTIONS_HOVER_MENU, FUNCTIONS_MAIN_BUTTON, SETTINGS_HOVER_MENU,
    SETTINGS_MAIN_BUTTON,
};
use crate::scene::{NodeId, SceneError, SceneGraph};
use tracing::{debug, warn};

/// Which hover menu is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    #[default]
    None,
    SettingsOpen,
    FunctionsOpen,
}

impl MenuState {
    /// Close settings if open, otherwise open it (closing functions)
    pub fn toggle_settings(self) -> Self {
        match self {
            MenuState::SettingsOpen => MenuState::None,
            _ => MenuState::SettingsOpen,
        }
    }

    /// Close functions if open, otherwise open it (closing settings)
    pub fn toggle_functions(self) -> Self {
        match self {
            MenuState::FunctionsOpen => MenuState::None,
            _ => MenuState::FunctionsOpen,
        }
    }

    pub fn settings_open(self) -> bool {
        self == MenuState::SettingsOpen
    }

    pub fn functions_open(self) -> bool {
        self == MenuState::FunctionsOpen
    }

    pub fn any_open(self) -> bool {
        self != MenuState::None
    }
}

/// Nodes driven by the bottom menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuNodes {
    pub settings_button: NodeId,
    pub settings_menu: NodeId,
    pub functions_button: NodeId,
    pub functions_menu: NodeId,
    pub overlay: NodeId,
}

impl MenuNodes {
    /// Look the menu nodes up below the search root
    pub fn resolve(graph: &SceneGraph, root: NodeId) -> Result<Self, SceneError> {
        Ok(Self {
            settings_button: graph.find_path(root, SETTINGS_MAIN_BUTTON)?,
            settings_menu: graph.find_path(root, SETTINGS_HOVER_MENU)?,
            functions_button: graph.find_path(root, FUNCTIONS_MAIN_BUTTON)?,
            functions_menu: graph.find_path(root, FUNCTIONS_HOVER_MENU)?,
            overlay: graph.find_path(root, BACKGROUND_OVERLAY)?,
        })
    }
}

/// Owner of the MenuState and the nodes it projects onto
#[derive(Default)]
pub struct BottomMenuController {
    state: MenuState,
    nodes: Option<MenuNodes>,
    links: ManagerLinks,
}

impl BottomMenuController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to freshly built nodes; the state restarts closed
    pub fn attach(&mut self, graph: &mut SceneGraph, nodes: MenuNodes) {
        self.nodes = Some(nodes);
        self.state = MenuState::None;
        self.project(graph);
    }

    /// Replace the manager links (re-wiring overwrites)
    pub fn set_links(&mut self, links: ManagerLinks) {
        self.links = links;
    }

    pub fn links(&self) -> &ManagerLinks {
        &self.links
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn nodes(&self) -> Option<&MenuNodes> {
        self.nodes.as_ref()
    }

    /// Settings main button; ignored while the tutorial is showing
    pub fn toggle_settings(&mut self, graph: &mut SceneGraph) -> MenuState {
        if self.gated("settings") {
            return self.state;
        }
        self.transition(graph, self.state.toggle_settings())
    }

    /// Functions main button; ignored while the tutorial is showing
    pub fn toggle_functions(&mut self, graph: &mut SceneGraph) -> MenuState {
        if self.gated("functions") {
            return self.state;
        }
        self.transition(graph, self.state.toggle_functions())
    }

    /// Close both menus unconditionally
    pub fn close_all(&mut self, graph: &mut SceneGraph) {
        self.transition(graph, MenuState::None);
    }

    fn gated(&self, button: &str) -> bool {
        let showing = self.links.tutorial_showing();
        if showing {
            debug!(button, "Main button ignored while tutorial is showing");
        }
        showing
    }

    fn transition(&mut self, graph: &mut SceneGraph, next: MenuState) -> MenuState {
        if next != self.state {
            debug!(from = ?self.state, to = ?next, "Menu state changed");
        }
        self.state = next;
        self.project(graph);
        next
    }

    /// Write both menu flags and the overlay flag from the current state
    fn project(&self, graph: &mut SceneGraph) {
        let Some(nodes) = self.nodes else {
            return;
        };
        let flags = [
            (nodes.settings_menu, self.state.settings_open()),
            (nodes.functions_menu, self.state.functions_open()),
            (nodes.overlay, self.state.any_open()),
        ];
        for (id, active) in flags {
            if let Err(e) = graph.set_active(id, active) {
                warn!(error = %e, "Menu node is gone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::{shared, ManagerGraph, Shared, TutorialManager, TutorialSinks};
    use crate::scene::NodeKind;
    use proptest::prelude::*;

    fn menu_graph() -> (SceneGraph, MenuNodes) {
        let mut graph = SceneGraph::new();
        let root = graph.create("SearchPanel", NodeKind::Panel, None).unwrap();
        for name in [
            BACKGROUND_OVERLAY,
            SETTINGS_MAIN_BUTTON,
            SETTINGS_HOVER_MENU,
            FUNCTIONS_MAIN_BUTTON,
            FUNCTIONS_HOVER_MENU,
        ] {
            graph.create(name, NodeKind::Panel, Some(root)).unwrap();
        }
        let nodes = MenuNodes::resolve(&graph, root).unwrap();
        (graph, nodes)
    }

    fn controller(graph: &mut SceneGraph, nodes: MenuNodes) -> BottomMenuController {
        let mut menu = BottomMenuController::new();
        menu.attach(graph, nodes);
        menu
    }

    fn visible(graph: &SceneGraph, nodes: &MenuNodes) -> (bool, bool, bool) {
        (
            graph.is_active(nodes.settings_menu),
            graph.is_active(nodes.functions_menu),
            graph.is_active(nodes.overlay),
        )
    }

    #[test]
    fn test_attach_closes_everything() {
        let (mut graph, nodes) = menu_graph();
        controller(&mut graph, nodes);
        assert_eq!(visible(&graph, &nodes), (false, false, false));
    }

    #[test]
    fn test_settings_then_functions_swaps_menus() {
        let (mut graph, nodes) = menu_graph();
        let mut menu = controller(&mut graph, nodes);

        assert_eq!(menu.toggle_settings(&mut graph), MenuState::SettingsOpen);
        assert_eq!(visible(&graph, &nodes), (true, false, true));

        assert_eq!(menu.toggle_functions(&mut graph), MenuState::FunctionsOpen);
        assert_eq!(visible(&graph, &nodes), (false, true, true));
    }

    #[test]
    fn test_toggle_twice_closes() {
        let (mut graph, nodes) = menu_graph();
        let mut menu = controller(&mut graph, nodes);
        menu.toggle_functions(&mut graph);
        menu.toggle_functions(&mut graph);
        assert_eq!(menu.state(), MenuState::None);
        assert_eq!(visible(&graph, &nodes), (false, false, false));
    }

    #[test]
    fn test_close_all_from_any_state() {
        let (mut graph, nodes) = menu_graph();
        let mut menu = controller(&mut graph, nodes);
        menu.toggle_settings(&mut graph);
        menu.close_all(&mut graph);
        assert_eq!(menu.state(), MenuState::None);
        menu.close_all(&mut graph);
        assert_eq!(visible(&graph, &nodes), (false, false, false));
    }

    /// Tutorial stub that is always showing
    struct ShowingTutorial;

    impl TutorialManager for ShowingTutorial {
        fn set_sinks(&mut self, _sinks: TutorialSinks) {}
        fn show_tutorial(&mut self, _graph: &mut SceneGraph) {}
        fn next_page(&mut self, _graph: &mut SceneGraph) {}
        fn skip(&mut self, _graph: &mut SceneGraph) {}
        fn is_showing(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_tutorial_blocks_main_buttons() {
        let (mut graph, nodes) = menu_graph();
        let mut menu = controller(&mut graph, nodes);

        let tutorial: Shared<dyn TutorialManager> = shared(ShowingTutorial);
        let managers = ManagerGraph {
            tutorial: Some(tutorial),
            ..ManagerGraph::new()
        };
        menu.set_links(ManagerLinks::from_graph(&managers));

        assert_eq!(menu.toggle_settings(&mut graph), MenuState::None);
        assert_eq!(menu.toggle_functions(&mut graph), MenuState::None);
        assert_eq!(visible(&graph, &nodes), (false, false, false));
    }

    #[test]
    fn test_stale_nodes_do_not_panic() {
        let (mut graph, nodes) = menu_graph();
        let mut menu = controller(&mut graph, nodes);
        graph.destroy(nodes.settings_menu).unwrap();
        assert_eq!(menu.toggle_settings(&mut graph), MenuState::SettingsOpen);
        assert!(graph.is_active(nodes.overlay));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// **Property: menu exclusivity**
        ///
        /// For any sequence of settings/functions toggles and close-alls, the
        /// two hover menus SHALL never be visible at the same time, and the
        /// visible flags SHALL always equal the projection of the state.
        #[test]
        fn prop_menus_never_both_open(ops in prop::collection::vec(0u8..3, 0..50)) {
            let (mut graph, nodes) = menu_graph();
            let mut menu = controller(&mut graph, nodes);

            for op in ops {
                match op {
                    0 => { menu.toggle_settings(&mut graph); }
                    1 => { menu.toggle_functions(&mut graph); }
                    _ => menu.close_all(&mut graph),
                }
                let (settings, functions, overlay) = visible(&graph, &nodes);
                prop_assert!(!(settings && functions));
                prop_assert_eq!(settings, menu.state().settings_open());
                prop_assert_eq!(functions, menu.state().functions_open());
                prop_assert_eq!(overlay, settings || functions);
            }
        }
    }
}
