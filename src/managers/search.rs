// SearchUiManager - category picker, search launch and input mode

use crate::app::config::InputMode;
use crate::scene::{NodeId, SceneGraph};
use tracing::{debug, info, warn};

/// Nodes the search manager writes into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSinks {
    pub category_panel: Option<NodeId>,
    pub loading_panel: Option<NodeId>,
    pub loading_text: Option<NodeId>,
}

pub trait SearchUiManager {
    fn set_sinks(&mut self, sinks: SearchSinks);

    /// Open the category picker, or launch the search when it is already open
    fn execute_search(&mut self, graph: &mut SceneGraph);

    fn toggle_category_panel(&mut self, graph: &mut SceneGraph);

    /// Results arrived (or the request failed); hide the loading indicator
    fn complete_search(&mut self, graph: &mut SceneGraph);

    fn set_input_mode(&mut self, mode: InputMode);
    fn input_mode(&self) -> InputMode;
}

#[derive(Debug, Default)]
pub struct DefaultSearchUiManager {
    input_mode: InputMode,
    searches: u32,
    sinks: SearchSinks,
}

impl DefaultSearchUiManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of searches launched so far
    pub fn search_count(&self) -> u32 {
        self.searches
    }
}

fn set_active(graph: &mut SceneGraph, node: Option<NodeId>, active: bool) {
    if let Some(id) = node {
        if let Err(e) = graph.set_active(id, active) {
            warn!(error = %e, "Search sink is gone");
        }
    }
}

impl SearchUiManager for DefaultSearchUiManager {
    fn set_sinks(&mut self, sinks: SearchSinks) {
        self.sinks = sinks;
    }

    fn execute_search(&mut self, graph: &mut SceneGraph) {
        let picker_open = self
            .sinks
            .category_panel
            .map(|p| graph.is_active(p))
            .unwrap_or(false);
        if !picker_open {
            set_active(graph, self.sinks.category_panel, true);
            debug!("Category picker opened");
            return;
        }

        set_active(graph, self.sinks.category_panel, false);
        set_active(graph, self.sinks.loading_panel, true);
        if let Some(text) = self.sinks.loading_text {
            if let Err(e) = graph.set_text(text, "Searching...") {
                warn!(error = %e, "Search sink is gone");
            }
        }
        self.searches += 1;
        info!(search = self.searches, "Search launched");
    }

    fn toggle_category_panel(&mut self, graph: &mut SceneGraph) {
        if let Some(panel) = self.sinks.category_panel {
            let open = graph.is_active(panel);
            set_active(graph, Some(panel), !open);
        }
    }

    fn complete_search(&mut self, graph: &mut SceneGraph) {
        set_active(graph, self.sinks.loading_panel, false);
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        if self.input_mode != mode {
            info!(mode = ?mode, "Input mode changed");
        }
        self.input_mode = mode;
    }

    fn input_mode(&self) -> InputMode {
        self.input_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    #[test]
    fn test_execute_search_is_two_step() {
        let mut graph = SceneGraph::new();
        let category = graph.create("CategoryPanel", NodeKind::Panel, None).unwrap();
        let loading = graph.create("LoadingPanel", NodeKind::Panel, None).unwrap();
        graph.set_active(category, false).unwrap();
        graph.set_active(loading, false).unwrap();

        let mut search = DefaultSearchUiManager::new();
        search.set_sinks(SearchSinks {
            category_panel: Some(category),
            loading_panel: Some(loading),
            loading_text: None,
        });

        search.execute_search(&mut graph);
        assert!(graph.is_active(category));
        assert_eq!(search.search_count(), 0);

        search.execute_search(&mut graph);
        assert!(!graph.is_active(category));
        assert!(graph.is_active(loading));
        assert_eq!(search.search_count(), 1);

        search.complete_search(&mut graph);
        assert!(!graph.is_active(loading));
    }
}
