// TutorialManager - paged onboarding overlay

use crate::scene::{NodeId, SceneGraph};
use tracing::{debug, info, warn};

/// Nodes the tutorial manager writes into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TutorialSinks {
    pub panel: Option<NodeId>,
    pub title: Option<NodeId>,
    pub content: Option<NodeId>,
    pub page_indicator: Option<NodeId>,
    pub next_button: Option<NodeId>,
}

pub trait TutorialManager {
    fn set_sinks(&mut self, sinks: TutorialSinks);

    /// Open the tutorial at its first page
    fn show_tutorial(&mut self, graph: &mut SceneGraph);

    /// Advance one page; finishes the tutorial after the last page
    fn next_page(&mut self, graph: &mut SceneGraph);

    fn skip(&mut self, graph: &mut SceneGraph);

    /// Whether the tutorial overlay is currently up
    fn is_showing(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialPage {
    pub title: String,
    pub content: String,
}

impl TutorialPage {
    fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}

/// Onboarding pages shown by default
pub fn default_pages() -> Vec<TutorialPage> {
    vec![
        TutorialPage::new(
            "Welcome to Flashback Memory!",
            "This app records what you see through the AR glasses so you can search it later.",
        ),
        TutorialPage::new(
            "Automatic recording",
            "While the app runs, camera frames are sent to the server where objects are \
             detected and stored.\n\nNo action needed.",
        ),
        TutorialPage::new(
            "Searching",
            "Tap SEARCH to pick a category (e.g. bottle, laptop), then press Start Search.",
        ),
        TutorialPage::new(
            "Search results",
            "Results appear as cards in AR space. Swipe left and right to browse past records.",
        ),
        TutorialPage::new(
            "Object registration",
            "Point the camera at an object and enter its name. 30 images are captured to learn it.",
        ),
        TutorialPage::new(
            "Beacons",
            "When a registered object is recognized a beacon is placed at its location.\n\n\
             Beacons can be turned on and off in settings.",
        ),
        TutorialPage::new(
            "Registered list",
            "Use List in the settings panel to see registered objects.\n\n\
             Clear Beacons removes every placed beacon.",
        ),
        TutorialPage::new(
            "Settings",
            "The gear button opens settings:\n- AR display mode\n\
             - Controller or hand input\n- Beacon on/off",
        ),
        TutorialPage::new(
            "All set!",
            "That covers the basics. Start recording your day!",
        ),
    ]
}

#[derive(Debug)]
pub struct DefaultTutorialManager {
    pages: Vec<TutorialPage>,
    current: usize,
    showing: bool,
    completed: bool,
    sinks: TutorialSinks,
}

impl Default for DefaultTutorialManager {
    fn default() -> Self {
        Self::with_pages(default_pages())
    }
}

impl DefaultTutorialManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: Vec<TutorialPage>) -> Self {
        Self {
            pages,
            current: 0,
            showing: false,
            completed: false,
            sinks: TutorialSinks::default(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Whether the user finished (or skipped) the tutorial at least once
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn write(graph: &mut SceneGraph, sink: Option<NodeId>, text: &str) {
        if let Some(id) = sink {
            if let Err(e) = graph.set_text(id, text) {
                warn!(error = %e, "Tutorial sink is gone");
            }
        }
    }

    fn render_page(&self, graph: &mut SceneGraph) {
        let Some(page) = self.pages.get(self.current) else {
            return;
        };
        Self::write(graph, self.sinks.title, &page.title);
        Self::write(graph, self.sinks.content, &page.content);
        let indicator = format!("{} / {}", self.current + 1, self.pages.len());
        Self::write(graph, self.sinks.page_indicator, &indicator);

        if let Some(button) = self.sinks.next_button {
            let label = if self.current + 1 == self.pages.len() {
                "Done"
            } else {
                "Next"
            };
            if let Some(text) = graph.find_child(button, "Label") {
                Self::write(graph, Some(text), label);
            }
        }
    }

    fn finish(&mut self, graph: &mut SceneGraph) {
        self.showing = false;
        self.completed = true;
        if let Some(panel) = self.sinks.panel {
            if let Err(e) = graph.set_active(panel, false) {
                warn!(error = %e, "Tutorial panel is gone");
            }
        }
        info!("Tutorial completed");
    }
}

impl TutorialManager for DefaultTutorialManager {
    fn set_sinks(&mut self, sinks: TutorialSinks) {
        // A rebuilt panel starts hidden, so the tutorial is no longer showing
        if self.sinks != sinks && self.showing {
            debug!(page = self.current, "Tutorial panel rebuilt, tutorial closed");
            self.showing = false;
            self.current = 0;
        }
        self.sinks = sinks;
    }

    fn show_tutorial(&mut self, graph: &mut SceneGraph) {
        let Some(panel) = self.sinks.panel else {
            warn!("Tutorial panel not wired");
            return;
        };
        if self.pages.is_empty() {
            warn!("Tutorial has no pages");
            return;
        }
        if let Err(e) = graph.set_active(panel, true) {
            warn!(error = %e, "Tutorial panel is gone");
            return;
        }
        // Draw on top of everything else under the same parent
        if let Err(e) = graph.set_as_last_sibling(panel) {
            warn!(error = %e, "Could not raise tutorial panel");
        }
        self.current = 0;
        self.showing = true;
        self.render_page(graph);
        debug!(pages = self.pages.len(), "Tutorial shown");
    }

    fn next_page(&mut self, graph: &mut SceneGraph) {
        if !self.showing {
            return;
        }
        if self.current + 1 >= self.pages.len() {
            self.finish(graph);
        } else {
            self.current += 1;
            self.render_page(graph);
        }
    }

    fn skip(&mut self, graph: &mut SceneGraph) {
        if self.showing {
            self.finish(graph);
        }
    }

    fn is_showing(&self) -> bool {
        self.showing
    }
}
