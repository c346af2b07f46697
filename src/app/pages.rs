// Settings page navigation
//
// An ordered list of page nodes with a cursor. Exactly one page is active
// after every operation. Paging saturates at both ends; the indicator and
// the prev/next buttons' interactable flags follow the cursor.

use crate::managers::ManagerLinks;
use crate::panels::settings::{NEXT_BUTTON, PAGE_INDICATOR, PAGE_NAMES, PREV_BUTTON};
use crate::scene::{NodeId, SceneError, SceneGraph};
use tracing::{debug, warn};

#[derive(Default)]
pub struct SettingsPanelController {
    pages: Vec<NodeId>,
    current: usize,
    prev_button: Option<NodeId>,
    next_button: Option<NodeId>,
    indicator: Option<NodeId>,
    links: ManagerLinks,
}

impl SettingsPanelController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a built settings panel: navigation nodes plus every page
    pub fn bind(&mut self, graph: &mut SceneGraph, panel: NodeId) -> Result<(), SceneError> {
        self.reset();
        self.prev_button = Some(graph.find_path(panel, PREV_BUTTON)?);
        self.next_button = Some(graph.find_path(panel, NEXT_BUTTON)?);
        self.indicator = Some(graph.find_path(panel, PAGE_INDICATOR)?);
        for name in PAGE_NAMES {
            let page = graph.find_path(panel, name)?;
            self.add_page(graph, page);
        }
        Ok(())
    }

    /// Set navigation nodes directly (any may be absent)
    pub fn set_navigation(
        &mut self,
        prev_button: Option<NodeId>,
        next_button: Option<NodeId>,
        indicator: Option<NodeId>,
    ) {
        self.prev_button = prev_button;
        self.next_button = next_button;
        self.indicator = indicator;
    }

    /// Forget every page and navigation node
    pub fn reset(&mut self) {
        self.pages.clear();
        self.current = 0;
        self.prev_button = None;
        self.next_button = None;
        self.indicator = None;
    }

    pub fn set_links(&mut self, links: ManagerLinks) {
        self.links = links;
    }

    pub fn links(&self) -> &ManagerLinks {
        &self.links
    }

    /// Append a page; the first page starts active, later ones inactive
    pub fn add_page(&mut self, graph: &mut SceneGraph, page: NodeId) -> usize {
        self.pages.push(page);
        let first = self.pages.len() == 1;
        if first {
            self.current = 0;
        }
        if let Err(e) = graph.set_active(page, first) {
            warn!(error = %e, "Settings page is gone");
        }
        self.refresh(graph);
        self.pages.len() - 1
    }

    pub fn next(&mut self, graph: &mut SceneGraph) -> usize {
        if self.current + 1 < self.pages.len() {
            self.show_page(graph, self.current + 1);
        }
        self.current
    }

    pub fn prev(&mut self, graph: &mut SceneGraph) -> usize {
        if self.current > 0 {
            self.show_page(graph, self.current - 1);
        }
        self.current
    }

    /// Jump to `index`; out-of-range indices are rejected with a warning
    pub fn show_page(&mut self, graph: &mut SceneGraph, index: usize) -> bool {
        if index >= self.pages.len() {
            warn!(index, pages = self.pages.len(), "Page index out of range");
            return false;
        }
        for (i, page) in self.pages.iter().enumerate() {
            if let Err(e) = graph.set_active(*page, i == index) {
                warn!(page = i, error = %e, "Settings page is gone");
            }
        }
        debug!(from = self.current, to = index, "Settings page changed");
        self.current = index;
        self.refresh(graph);
        true
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[NodeId] {
        &self.pages
    }

    /// "current / total", 1-based
    pub fn indicator_text(&self) -> String {
        format!("{} / {}", self.current + 1, self.pages.len())
    }

    fn refresh(&self, graph: &mut SceneGraph) {
        if let Some(indicator) = self.indicator {
            if let Err(e) = graph.set_text(indicator, self.indicator_text()) {
                warn!(error = %e, "Page indicator is gone");
            }
        }
        let has_prev = self.current > 0;
        let has_next = self.current + 1 < self.pages.len();
        for (button, enabled) in [(self.prev_button, has_prev), (self.next_button, has_next)] {
            if let Some(id) = button {
                if let Err(e) = graph.set_interactable(id, enabled) {
                    warn!(error = %e, "Page button is gone");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;
    use proptest::prelude::*;

    struct Fixture {
        graph: SceneGraph,
        pages: Vec<NodeId>,
        prev: NodeId,
        next: NodeId,
        indicator: NodeId,
    }

    fn fixture(count: usize) -> Fixture {
        let mut graph = SceneGraph::new();
        let panel = graph.create("IPSettingsPanel", NodeKind::Panel, None).unwrap();
        let prev = graph.create(PREV_BUTTON, NodeKind::Button, Some(panel)).unwrap();
        let next = graph.create(NEXT_BUTTON, NodeKind::Button, Some(panel)).unwrap();
        let indicator = graph.create(PAGE_INDICATOR, NodeKind::Label, Some(panel)).unwrap();
        let pages = (0..count)
            .map(|i| {
                graph
                    .create(format!("SettingsPage{}", i + 1), NodeKind::Container, Some(panel))
                    .unwrap()
            })
            .collect();
        Fixture {
            graph,
            pages,
            prev,
            next,
            indicator,
        }
    }

    fn controller(f: &mut Fixture) -> SettingsPanelController {
        let mut pages = SettingsPanelController::new();
        pages.set_navigation(Some(f.prev), Some(f.next), Some(f.indicator));
        for page in f.pages.clone() {
            pages.add_page(&mut f.graph, page);
        }
        pages
    }

    fn active_pages(f: &Fixture) -> Vec<bool> {
        f.pages.iter().map(|p| f.graph.is_active(*p)).collect()
    }

    #[test]
    fn test_add_pages_then_next() {
        let mut f = fixture(3);
        let mut pages = controller(&mut f);

        assert_eq!(active_pages(&f), vec![true, false, false]);
        assert_eq!(f.graph.text(f.indicator), Some("1 / 3"));

        pages.next(&mut f.graph);
        assert_eq!(active_pages(&f), vec![false, true, false]);
        assert_eq!(f.graph.text(f.indicator), Some("2 / 3"));
    }

    #[test]
    fn test_paging_saturates() {
        let mut f = fixture(3);
        let mut pages = controller(&mut f);

        assert_eq!(pages.prev(&mut f.graph), 0);
        assert_eq!(active_pages(&f), vec![true, false, false]);

        pages.show_page(&mut f.graph, 2);
        assert_eq!(pages.next(&mut f.graph), 2);
        assert_eq!(active_pages(&f), vec![false, false, true]);
        assert_eq!(f.graph.text(f.indicator), Some("3 / 3"));
    }

    #[test]
    fn test_buttons_disabled_at_boundaries() {
        let mut f = fixture(3);
        let mut pages = controller(&mut f);
        let interactable = |f: &Fixture, id| f.graph.get(id).unwrap().interactable;

        assert!(!interactable(&f, f.prev));
        assert!(interactable(&f, f.next));

        pages.next(&mut f.graph);
        assert!(interactable(&f, f.prev));
        assert!(interactable(&f, f.next));

        pages.next(&mut f.graph);
        assert!(interactable(&f, f.prev));
        assert!(!interactable(&f, f.next));
    }

    #[test]
    fn test_show_page_rejects_out_of_range() {
        let mut f = fixture(3);
        let mut pages = controller(&mut f);
        pages.next(&mut f.graph);

        assert!(!pages.show_page(&mut f.graph, 3));
        assert_eq!(pages.current_index(), 1);
        assert_eq!(active_pages(&f), vec![false, true, false]);
    }

    #[test]
    fn test_bind_resolves_built_panel() {
        let mut f = fixture(3);
        let panel = f.graph.roots()[0];
        let mut pages = SettingsPanelController::new();
        pages.bind(&mut f.graph, panel).unwrap();
        assert_eq!(pages.page_count(), 3);
        assert_eq!(f.graph.text(f.indicator), Some("1 / 3"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// **Property: single active page**
        ///
        /// For any page count and any sequence of next/prev calls, exactly
        /// one page SHALL be active, it SHALL be the page at the cursor, and
        /// the indicator SHALL read "cursor+1 / count".
        #[test]
        fn prop_exactly_one_page_active(
            count in 1usize..6,
            ops in prop::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut f = fixture(count);
            let mut pages = controller(&mut f);

            for forward in ops {
                let index = if forward {
                    pages.next(&mut f.graph)
                } else {
                    pages.prev(&mut f.graph)
                };
                prop_assert!(index < count);

                let active = active_pages(&f);
                prop_assert_eq!(active.iter().filter(|a| **a).count(), 1);
                prop_assert!(active[index]);
                let expected = format!("{} / {}", index + 1, count);
                prop_assert_eq!(f.graph.text(f.indicator), Some(expected.as_str()));
            }
        }
    }
}
