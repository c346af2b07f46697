// PanelBuilder - idempotent panel construction
//
// Turns NodeSpec trees into live nodes. A panel is identified by its name
// under a given root: building it again destroys whatever carries that name
// first, so repeated build passes never accumulate duplicates.

use super::factory::{ButtonStyle, NodeFactory};
use super::spec::{NodeSpec, Widget};
use crate::scene::{NodeId, SceneError, SceneGraph};
use tracing::{debug, info};

/// A freshly built panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelHandle {
    pub name: String,
    pub root: NodeId,
}

impl PanelHandle {
    /// Resolve a slash-separated child path below the panel root
    pub fn find(&self, graph: &SceneGraph, path: &str) -> Result<NodeId, SceneError> {
        graph.find_path(self.root, path)
    }
}

/// Materializes declarative specs through the node factory
pub struct PanelBuilder {
    factory: NodeFactory,
}

impl PanelBuilder {
    pub fn new(factory: NodeFactory) -> Self {
        Self { factory }
    }

    pub fn factory_mut(&mut self) -> &mut NodeFactory {
        &mut self.factory
    }

    /// Reset per-pass state before a new build pass
    pub fn begin_pass(&mut self) {
        self.factory.icons().clear();
    }

    /// Build `spec` as `panel_name` under `root`, replacing any existing panel
    ///
    /// `root` of `None` builds a top-level node. Every existing node with the
    /// same name under the same owner is destroyed, duplicates included.
    pub fn build_or_rebuild(
        &mut self,
        graph: &mut SceneGraph,
        root: Option<NodeId>,
        panel_name: &str,
        spec: &NodeSpec,
    ) -> Result<PanelHandle, SceneError> {
        let existing = match root {
            Some(r) => graph.children_named(r, panel_name),
            None => roots_named(graph, panel_name),
        };

        let mut replaced = 0;
        for id in existing {
            replaced += graph.destroy(id)?;
        }

        let id = self.materialize_as(graph, root, panel_name, spec)?;
        if replaced > 0 {
            info!(
                panel = panel_name,
                removed = replaced,
                built = spec.count(),
                "Rebuilt panel"
            );
        } else {
            debug!(panel = panel_name, built = spec.count(), "Built panel");
        }

        Ok(PanelHandle {
            name: panel_name.to_string(),
            root: id,
        })
    }

    /// Create the nodes described by `spec` under `parent`
    ///
    /// No duplicate check is made; use [`build_or_rebuild`](Self::build_or_rebuild)
    /// for named panels.
    pub fn materialize(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        spec: &NodeSpec,
    ) -> Result<NodeId, SceneError> {
        self.materialize_as(graph, parent, &spec.name, spec)
    }

    fn materialize_as(
        &mut self,
        graph: &mut SceneGraph,
        parent: Option<NodeId>,
        name: &str,
        spec: &NodeSpec,
    ) -> Result<NodeId, SceneError> {
        let f = &mut self.factory;
        let id = match &spec.widget {
            Widget::Container => f.container(graph, parent, name, spec.rect)?,
            Widget::Panel => f.panel(graph, parent, name, spec.rect, spec.color)?,
            Widget::Label(style) => {
                let id = f.label(graph, parent, name, spec.rect, style.clone())?;
                if let Some(color) = spec.color {
                    graph.set_color(id, color)?;
                }
                id
            }
            Widget::Button { label, icon } => {
                let style = ButtonStyle {
                    color: spec.color,
                    label: label.clone(),
                    icon: icon.as_deref(),
                    collider: spec.collider,
                };
                f.button(graph, parent, name, spec.rect, style)?
            }
            Widget::Image { icon } => {
                f.image(graph, parent, name, spec.rect, spec.color, icon.as_deref())?
            }
            Widget::InputField { text, placeholder } => {
                f.input_field(graph, parent, name, spec.rect, text, placeholder)?
            }
            Widget::ProgressBar { ratio } => {
                f.progress_bar(graph, parent, name, spec.rect, *ratio)?
            }
        };

        {
            let node = graph.node_mut(id)?;
            node.active = spec.active;
            node.interactable = spec.interactable;
            if let Some(collider) = spec.collider {
                node.collider = Some(collider);
            }
            if let Some(action) = &spec.action {
                node.handler = Some(action.clone());
                node.raycast_target = true;
            }
        }

        for child in &spec.children {
            self.materialize_as(graph, Some(id), &child.name, child)?;
        }

        Ok(id)
    }
}

fn roots_named(graph: &SceneGraph, name: &str) -> Vec<NodeId> {
    graph
        .roots()
        .iter()
        .copied()
        .filter(|r| graph.get(*r).map(|n| n.name == name).unwrap_or(false))
        .collect()
}

fn destroy_roots_named<S: AsRef<str>>(graph: &mut SceneGraph, names: &[S]) -> Vec<(String, usize)> {
    let mut removed = Vec::new();
    for name in names {
        let name = name.as_ref();
        for id in roots_named(graph, name) {
            if let Ok(count) = graph.destroy(id) {
                removed.push((name.to_string(), count));
            }
        }
    }
    removed
}

/// Remove stale top-level nodes left behind by earlier scene versions
///
/// Returns the number of top-level nodes removed.
pub fn cleanup_orphans<S: AsRef<str>>(graph: &mut SceneGraph, legacy_names: &[S]) -> usize {
    let removed = destroy_roots_named(graph, legacy_names);
    for (name, nodes) in &removed {
        info!(name = %name, nodes, "Removed legacy node");
    }
    removed.len()
}

/// Scene cleanup command: destroy every top-level node in `names`
///
/// Duplicates are all removed. Returns the number of top-level nodes removed.
pub fn clean_scene<S: AsRef<str>>(graph: &mut SceneGraph, names: &[S]) -> usize {
    let removed = destroy_roots_named(graph, names);
    for (name, _) in &removed {
        debug!(name = %name, "Deleted");
    }
    info!(removed = removed.len(), "Scene cleanup complete");
    removed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::UiAction;
    use crate::scene::{ImageHandle, NodeKind};
    use crate::ui::icons::{IconCache, IconSource};
    use proptest::prelude::*;
    use std::path::Path;

    struct NoIcons;

    impl IconSource for NoIcons {
        fn exists(&self, _path: &Path) -> bool {
            false
        }

        fn load(&self, _path: &Path) -> Option<ImageHandle> {
            None
        }
    }

    fn builder() -> PanelBuilder {
        PanelBuilder::new(NodeFactory::new(IconCache::new("icons", Box::new(NoIcons))))
    }

    fn search_spec() -> NodeSpec {
        NodeSpec::panel("SearchPanel")
            .child(
                NodeSpec::icon_button("SettingsMainButton", "icon_settings")
                    .on_click(UiAction::ToggleSettingsMenu),
            )
            .child(NodeSpec::panel("SettingsHoverMenu").inactive())
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut graph = SceneGraph::new();
        let mut builder = builder();
        let canvas = graph.create("Canvas", NodeKind::Container, None).unwrap();

        let first = builder
            .build_or_rebuild(&mut graph, Some(canvas), "SearchPanel", &search_spec())
            .unwrap();
        let second = builder
            .build_or_rebuild(&mut graph, Some(canvas), "SearchPanel", &search_spec())
            .unwrap();

        assert_eq!(graph.children_named(canvas, "SearchPanel"), vec![second.root]);
        assert!(!graph.is_alive(first.root));
        assert_eq!(graph.len(), 1 + search_spec().count());
    }

    #[test]
    fn test_rebuild_replaces_existing_descendants() {
        let mut graph = SceneGraph::new();
        let mut builder = builder();
        let canvas = graph.create("Canvas", NodeKind::Container, None).unwrap();

        // Hand-built SearchPanel with 5 descendants
        let old = graph.create("SearchPanel", NodeKind::Panel, Some(canvas)).unwrap();
        let mut old_descendants = Vec::new();
        let row = graph.create("OldRow", NodeKind::Container, Some(old)).unwrap();
        old_descendants.push(row);
        for i in 0..4 {
            let leaf = graph.create(format!("Old{}", i), NodeKind::Label, Some(row));
            old_descendants.push(leaf.unwrap());
        }
        assert_eq!(graph.descendant_count(old), 5);

        let handle = builder
            .build_or_rebuild(&mut graph, Some(canvas), "SearchPanel", &search_spec())
            .unwrap();

        assert_eq!(graph.children_named(canvas, "SearchPanel").len(), 1);
        assert!(old_descendants.iter().all(|id| !graph.is_alive(*id)));
        assert!(graph.find_descendant(handle.root, "OldRow").is_none());
        assert!(handle.find(&graph, "SettingsMainButton").is_ok());
    }

    #[test]
    fn test_rebuild_removes_every_duplicate() {
        let mut graph = SceneGraph::new();
        let mut builder = builder();
        graph.create("SearchPanel", NodeKind::Panel, None).unwrap();
        graph.create("SearchPanel", NodeKind::Panel, None).unwrap();

        builder
            .build_or_rebuild(&mut graph, None, "SearchPanel", &search_spec())
            .unwrap();
        assert_eq!(roots_named(&graph, "SearchPanel").len(), 1);
    }

    #[test]
    fn test_materialize_applies_spec_flags() {
        let mut graph = SceneGraph::new();
        let mut builder = builder();
        let handle = builder
            .build_or_rebuild(&mut graph, None, "SearchPanel", &search_spec())
            .unwrap();

        let button = handle.find(&graph, "SettingsMainButton").unwrap();
        assert_eq!(graph.handler(button), Some(&UiAction::ToggleSettingsMenu));

        let menu = handle.find(&graph, "SettingsHoverMenu").unwrap();
        assert!(!graph.is_active(menu));
    }

    #[test]
    fn test_missing_icons_do_not_abort_build() {
        let mut graph = SceneGraph::new();
        let mut builder = builder();
        let spec = NodeSpec::panel("Menu")
            .child(NodeSpec::icon_button("A", "icon_missing"))
            .child(NodeSpec::image("B", "icon_missing"));
        let handle = builder.build_or_rebuild(&mut graph, None, "Menu", &spec).unwrap();
        assert_eq!(graph.descendant_count(handle.root), 2);
    }

    #[test]
    fn test_cleanup_orphans_only_touches_listed_roots() {
        let mut graph = SceneGraph::new();
        graph.create("ObjectRegPanel", NodeKind::Panel, None).unwrap();
        graph.create("ObjectRegPanel", NodeKind::Panel, None).unwrap();
        let keep = graph.create("Camera", NodeKind::Container, None).unwrap();

        let removed = cleanup_orphans(&mut graph, &["ObjectRegPanel", "SearchPanel"]);
        assert_eq!(removed, 2);
        assert_eq!(graph.roots(), &[keep]);
    }

    #[test]
    fn test_clean_scene_reports_count() {
        let mut graph = SceneGraph::new();
        let canvas = graph.create("FlashbackCanvas", NodeKind::Container, None).unwrap();
        graph.create("SearchPanel", NodeKind::Panel, Some(canvas)).unwrap();
        graph.create("EventSystem", NodeKind::Container, None).unwrap();

        assert_eq!(clean_scene(&mut graph, &["FlashbackCanvas", "EventSystem", "DebugLog"]), 2);
        assert!(graph.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// **Property: repeated builds leave one panel**
        ///
        /// For any number of build passes, the root SHALL hold exactly one
        /// subtree named "SearchPanel" and the graph SHALL hold exactly the
        /// nodes of one materialized spec.
        #[test]
        fn prop_rebuild_never_duplicates(passes in 1usize..8) {
            let mut graph = SceneGraph::new();
            let mut builder = builder();
            let canvas = graph.create("Canvas", NodeKind::Container, None).unwrap();

            for _ in 0..passes {
                builder.begin_pass();
                builder
                    .build_or_rebuild(&mut graph, Some(canvas), "SearchPanel", &search_spec())
                    .unwrap();
            }

            prop_assert_eq!(graph.children_named(canvas, "SearchPanel").len(), 1);
            prop_assert_eq!(graph.len(), 1 + search_spec().count());
        }
    }
}
