// Wiring - hand manager links and sink nodes to every controller
//
// Runs after each build pass. Every call overwrites what the previous pass
// set, so stale links and stale node handles never survive a rebuild.

use super::{ManagerGraph, ManagerLinks, SearchSinks, TutorialSinks, UploaderSinks, WeatherSinks};
use crate::app::menu::BottomMenuController;
use crate::app::pages::SettingsPanelController;
use crate::managers::RegistrationManager;
use crate::scene::NodeId;
use tracing::{debug, warn};

/// Nodes of a freshly built scene that managers write into
#[derive(Debug, Clone, Copy, Default)]
pub struct SinkTargets {
    pub uploader: UploaderSinks,
    pub weather: WeatherSinks,
    pub tutorial: TutorialSinks,
    pub search: SearchSinks,
    pub object_name_input: Option<NodeId>,
}

/// Connect managers to controllers and to the current scene's sink nodes
pub fn wire(
    managers: &ManagerGraph,
    sinks: &SinkTargets,
    menu: &mut BottomMenuController,
    pages: &mut SettingsPanelController,
    registration: &mut RegistrationManager,
) {
    let links = ManagerLinks::from_graph(managers);

    pages.set_links(links.uploader_and_search());
    registration.set_uploader(links.uploader_link());
    registration.set_name_input(sinks.object_name_input);
    menu.set_links(links);

    match &managers.uploader {
        Some(u) => u.borrow_mut().set_sinks(sinks.uploader),
        None => warn!("Uploader not found, registration disabled"),
    }
    match &managers.search {
        Some(s) => s.borrow_mut().set_sinks(sinks.search),
        None => warn!("SearchUiManager not found, search disabled"),
    }
    match &managers.weather {
        Some(w) => w.borrow_mut().set_sinks(sinks.weather),
        None => warn!("WeatherManager not found, weather panel not wired"),
    }
    match &managers.tutorial {
        Some(t) => t.borrow_mut().set_sinks(sinks.tutorial),
        None => warn!("TutorialManager not found, tutorial panel not wired"),
    }
    debug!("Managers wired");
}
