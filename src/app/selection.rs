// Bounded multiselect for the tracking-target list
//
// At most `max` items are selected at once. Toggling an unselected item at
// the cap is rejected and changes nothing, not even the checkbox. The count
// label is rewritten after every change so it always shows the live size.

use super::config::SELECTIONS_KEY;
use super::prefs::Preferences;
use crate::panels::registration::{
    checkbox_path, selection_label, CHECKBOX_OFF_ICON, CHECKBOX_ON_ICON, DETECTABLE_OBJECTS,
    GRID_CONTAINER, SELECTION_COUNT,
};
use crate::scene::{Color, ImageHandle, NodeId, SceneError, SceneGraph};
use crate::ui::IconCache;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Checkbox tint when no checkbox images are available
pub const CHECKED_FALLBACK: Color = Color::rgba(0.2, 0.8, 0.4, 1.0);
pub const UNCHECKED_FALLBACK: Color = Color::rgba(0.4, 0.4, 0.4, 1.0);

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// The list is full; nothing changed
    Rejected,
}

pub struct SelectionListController {
    max: usize,
    /// Selected ids, oldest first
    selected: Vec<String>,
    checkboxes: HashMap<String, NodeId>,
    count_label: Option<NodeId>,
    checked_icon: Option<ImageHandle>,
    unchecked_icon: Option<ImageHandle>,
}

impl SelectionListController {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            selected: Vec::new(),
            checkboxes: HashMap::new(),
            count_label: None,
            checked_icon: None,
            unchecked_icon: None,
        }
    }

    /// Bind to a built list panel; the selection is cleared
    pub fn bind(
        &mut self,
        graph: &mut SceneGraph,
        panel: NodeId,
        icons: &mut IconCache,
    ) -> Result<(), SceneError> {
        self.selected.clear();
        self.checkboxes.clear();
        self.count_label = Some(graph.find_path(panel, SELECTION_COUNT)?);
        self.checked_icon = icons.resolve(CHECKBOX_ON_ICON);
        self.unchecked_icon = icons.resolve(CHECKBOX_OFF_ICON);

        let grid = graph.find_path(panel, GRID_CONTAINER)?;
        for object in DETECTABLE_OBJECTS {
            match graph.find_path(grid, &checkbox_path(object)) {
                Ok(checkbox) => {
                    self.checkboxes.insert(object.to_string(), checkbox);
                }
                Err(e) => warn!(object, error = %e, "List item has no checkbox"),
            }
        }
        self.refresh_all(graph);
        Ok(())
    }

    /// Register one item's checkbox and label sinks by hand
    pub fn register_item(&mut self, id: &str, checkbox: NodeId) {
        self.checkboxes.insert(id.to_string(), checkbox);
    }

    pub fn set_count_label(&mut self, label: Option<NodeId>) {
        self.count_label = label;
    }

    pub fn set_icons(&mut self, checked: Option<ImageHandle>, unchecked: Option<ImageHandle>) {
        self.checked_icon = checked;
        self.unchecked_icon = unchecked;
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids, oldest first
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn label_text(&self) -> String {
        selection_label(self.selected.len(), self.max)
    }

    /// Select or deselect `id`; selecting at the cap is rejected
    pub fn toggle(&mut self, graph: &mut SceneGraph, id: &str) -> ToggleOutcome {
        if self.is_selected(id) {
            self.deselect(graph, id);
            return ToggleOutcome::Deselected;
        }
        if self.selected.len() >= self.max {
            warn!(object = id, max = self.max, "Selection limit reached");
            return ToggleOutcome::Rejected;
        }
        self.selected.push(id.to_string());
        debug!(object = id, count = self.selected.len(), "Selected");
        self.refresh_item(graph, id);
        self.refresh_label(graph);
        ToggleOutcome::Selected
    }

    /// Remove `id`; returns whether it was selected
    pub fn deselect(&mut self, graph: &mut SceneGraph, id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        let removed = self.selected.len() != before;
        if removed {
            debug!(object = id, count = self.selected.len(), "Deselected");
            self.refresh_item(graph, id);
            self.refresh_label(graph);
        }
        removed
    }

    /// Select `id`, evicting the oldest selection when full
    ///
    /// Returns the evicted id, if any.
    pub fn force_select(&mut self, graph: &mut SceneGraph, id: &str) -> Option<String> {
        if self.is_selected(id) || self.max == 0 {
            return None;
        }
        let evicted = if self.selected.len() >= self.max {
            let oldest = self.selected.remove(0);
            self.refresh_item(graph, &oldest);
            info!(evicted = %oldest, object = id, "Selection replaced oldest");
            Some(oldest)
        } else {
            None
        };
        self.selected.push(id.to_string());
        self.refresh_item(graph, id);
        self.refresh_label(graph);
        evicted
    }

    pub fn clear(&mut self, graph: &mut SceneGraph) {
        self.selected.clear();
        self.refresh_all(graph);
    }

    /// Persist the selection as a comma-joined list
    pub fn save(&self, prefs: &mut dyn Preferences) {
        prefs.set_string(SELECTIONS_KEY, &self.selected.join(","));
    }

    /// Restore a persisted selection; entries beyond the cap are dropped
    pub fn restore(&mut self, graph: &mut SceneGraph, prefs: &dyn Preferences) {
        let Some(data) = prefs.get_string(SELECTIONS_KEY) else {
            return;
        };
        self.selected.clear();
        for id in data.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if self.is_selected(id) {
                continue;
            }
            if self.selected.len() >= self.max {
                warn!(object = id, max = self.max, "Dropping persisted selection over the limit");
                continue;
            }
            self.selected.push(id.to_string());
        }
        info!(count = self.selected.len(), "Restored selections");
        self.refresh_all(graph);
    }

    fn refresh_all(&self, graph: &mut SceneGraph) {
        let ids: Vec<String> = self.checkboxes.keys().cloned().collect();
        for id in ids {
            self.refresh_item(graph, &id);
        }
        self.refresh_label(graph);
    }

    fn refresh_item(&self, graph: &mut SceneGraph, id: &str) {
        let Some(&checkbox) = self.checkboxes.get(id) else {
            return;
        };
        let checked = self.is_selected(id);
        let icon = if checked {
            &self.checked_icon
        } else {
            &self.unchecked_icon
        };
        let result = match icon {
            Some(image) => graph
                .set_image(checkbox, Some(image.clone()))
                .and_then(|_| graph.set_color(checkbox, Color::WHITE)),
            None => {
                let tint = if checked {
                    CHECKED_FALLBACK
                } else {
                    UNCHECKED_FALLBACK
                };
                graph.set_color(checkbox, tint)
            }
        };
        if let Err(e) = result {
            warn!(object = id, error = %e, "Checkbox is gone");
        }
    }

    fn refresh_label(&self, graph: &mut SceneGraph) {
        if let Some(label) = self.count_label {
            if let Err(e) = graph.set_text(label, self.label_text()) {
                warn!(error = %e, "Selection count label is gone");
            }
        }
    }
}
