// SceneGraph - arena-backed node tree
//
// Nodes live in slots addressed by generational NodeId handles. Destroyed
// slots go on a free list and are reused with a bumped generation, so stale
// handles from a previous build pass can never reach a new node.
//
// Ownership rule: every node has exactly one owner (its parent, or the
// graph's root list). Destroying a node destroys its whole subtree, and with
// it every click handler the subtree carried.

use super::{Color, ImageHandle, Node, NodeId, NodeKind, SceneError, TextStyle};
use crate::action::UiAction;
use tracing::debug;

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Retained tree of UI nodes
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Create a node under `parent` (or as a top-level node when `None`)
    ///
    /// Names are not forced unique here; keeping one panel per name is the
    /// builder's job (destroy-then-rebuild).
    pub fn create(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        if let Some(p) = parent {
            if !self.is_alive(p) {
                return Err(SceneError::InvalidParent(p));
            }
        }

        let mut node = Node::new(name, kind);
        node.parent = parent;

        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.node = Some(node);
            NodeId {
                idx,
                generation: slot.generation,
            }
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId { idx, generation: 0 }
        };

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.get_mut(p) {
                    parent_node.children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        Ok(id)
    }

    /// Destroy a node and its whole subtree
    ///
    /// Returns the number of nodes destroyed.
    pub fn destroy(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if !self.is_alive(id) {
            return Err(SceneError::StaleNode(id));
        }

        // Detach from the owner first so the parent never lists a dead child
        match self.get(id).and_then(|n| n.parent) {
            Some(p) => {
                if let Some(parent_node) = self.get_mut(p) {
                    parent_node.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        let mut stack = vec![id];
        let mut count = 0;
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.idx as usize];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children.iter().copied());
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(current.idx);
                count += 1;
            }
        }

        debug!(node = ?id, destroyed = count, "Destroyed subtree");
        Ok(count)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Whether `id` still refers to a live node
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slots
            .get(id.idx as usize)
            .map(|s| s.generation == id.generation && s.node.is_some())
            .unwrap_or(false)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    /// Like [`get`](Self::get) but with a typed error for stale handles
    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.get(id).ok_or(SceneError::StaleNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.get_mut(id).ok_or(SceneError::StaleNode(id))
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level nodes in creation order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of `id`; empty for stale handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// First direct child of `parent` named `name`
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.get(*c).map(|n| n.name == name).unwrap_or(false))
    }

    /// All direct children of `parent` named `name`
    pub fn children_named(&self, parent: NodeId, name: &str) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|c| self.get(*c).map(|n| n.name == name).unwrap_or(false))
            .collect()
    }

    /// First top-level node named `name`
    pub fn find_root(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|r| self.get(*r).map(|n| n.name == name).unwrap_or(false))
    }

    /// Resolve a slash-separated path of child names below `root`
    ///
    /// `find_path(panel, "IPRow/SetIPButton")`
    pub fn find_path(&self, root: NodeId, path: &str) -> Result<NodeId, SceneError> {
        let mut current = root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self
                .find_child(current, segment)
                .ok_or_else(|| SceneError::NotFound(path.to_string()))?;
        }
        Ok(current)
    }

    /// Depth-first search for a descendant named `name` (excluding `root`)
    pub fn find_descendant(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Pre-order list of `root` and its descendants with their depth
    pub fn walk(&self, root: NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            out.push((id, depth));
            stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
        }
        out
    }

    /// Number of nodes below `root` (not counting `root` itself)
    pub fn descendant_count(&self, root: NodeId) -> usize {
        self.walk(root).len().saturating_sub(1)
    }

    // ========================================================================
    // Mutation helpers
    // ========================================================================

    pub fn set_active(&mut self, id: NodeId, active: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.active = active;
        Ok(())
    }

    /// Local active flag; `false` for stale handles
    pub fn is_active(&self, id: NodeId) -> bool {
        self.get(id).map(|n| n.active).unwrap_or(false)
    }

    /// Active flag combined with every ancestor's flag
    pub fn is_active_in_hierarchy(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            match self.get(c) {
                Some(node) if node.active => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Replace the text content, creating a default text style when missing
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        let content = content.into();
        match node.text.as_mut() {
            Some(style) => style.content = content,
            None => node.text = Some(TextStyle::new(content)),
        }
        Ok(())
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| n.text_content())
    }

    pub fn set_color(&mut self, id: NodeId, color: Color) -> Result<(), SceneError> {
        self.node_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_image(&mut self, id: NodeId, image: Option<ImageHandle>) -> Result<(), SceneError> {
        self.node_mut(id)?.image = image;
        Ok(())
    }

    pub fn set_handler(&mut self, id: NodeId, action: Option<UiAction>) -> Result<(), SceneError> {
        self.node_mut(id)?.handler = action;
        Ok(())
    }

    pub fn handler(&self, id: NodeId) -> Option<&UiAction> {
        self.get(id).and_then(|n| n.handler.as_ref())
    }

    pub fn set_interactable(&mut self, id: NodeId, interactable: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.interactable = interactable;
        Ok(())
    }

    /// Move `id` to the end of its parent's child list (drawn last, on top)
    pub fn set_as_last_sibling(&mut self, id: NodeId) -> Result<(), SceneError> {
        let parent = self.node(id)?.parent;
        let siblings = match parent {
            Some(p) => &mut self.node_mut(p)?.children,
            None => &mut self.roots,
        };
        siblings.retain(|c| *c != id);
        siblings.push(id);
        Ok(())
    }

    /// Progress ratio of a progress bar's `Fill` child, clamped to 0.0 ~ 1.0
    pub fn set_progress(&mut self, bar: NodeId, ratio: f32) -> Result<(), SceneError> {
        let fill = self
            .find_child(bar, "Fill")
            .ok_or_else(|| SceneError::NotFound("Fill".to_string()))?;
        self.node_mut(fill)?.rect.anchor_max.x = ratio.clamp(0.0, 1.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_tree(graph: &mut SceneGraph) -> (NodeId, NodeId, NodeId) {
        let root = graph.create("Canvas", NodeKind::Container, None).unwrap();
        let panel = graph.create("SearchPanel", NodeKind::Panel, Some(root)).unwrap();
        let button = graph
            .create("SettingsMainButton", NodeKind::Button, Some(panel))
            .unwrap();
        graph.create("Label", NodeKind::Label, Some(button)).unwrap();
        (root, panel, button)
    }

    #[test]
    fn test_destroy_removes_subtree_and_detaches() {
        let mut graph = SceneGraph::new();
        let (root, panel, button) = sample_tree(&mut graph);
        assert_eq!(graph.len(), 4);

        let destroyed = graph.destroy(panel).unwrap();
        assert_eq!(destroyed, 3);
        assert_eq!(graph.len(), 1);
        assert!(graph.children(root).is_empty());
        assert!(!graph.is_alive(button));
    }

    #[test]
    fn test_stale_handle_does_not_alias_reused_slot() {
        let mut graph = SceneGraph::new();
        let (root, panel, _) = sample_tree(&mut graph);
        graph.destroy(panel).unwrap();

        let fresh = graph.create("SearchPanel", NodeKind::Panel, Some(root)).unwrap();
        assert!(graph.is_alive(fresh));
        assert!(!graph.is_alive(panel));
        assert!(graph.get(panel).is_none());
        assert_eq!(graph.destroy(panel), Err(SceneError::StaleNode(panel)));
    }

    #[test]
    fn test_destroy_drops_handlers() {
        let mut graph = SceneGraph::new();
        let (_, panel, button) = sample_tree(&mut graph);
        graph
            .set_handler(button, Some(UiAction::ToggleSettingsMenu))
            .unwrap();
        assert_eq!(graph.handler(button), Some(&UiAction::ToggleSettingsMenu));

        graph.destroy(panel).unwrap();
        assert_eq!(graph.handler(button), None);
    }

    #[test]
    fn test_create_under_dead_parent_fails() {
        let mut graph = SceneGraph::new();
        let (_, panel, _) = sample_tree(&mut graph);
        graph.destroy(panel).unwrap();
        assert_eq!(
            graph.create("Orphan", NodeKind::Label, Some(panel)),
            Err(SceneError::InvalidParent(panel))
        );
    }

    #[test]
    fn test_find_path_and_descendant() {
        let mut graph = SceneGraph::new();
        let (root, _, button) = sample_tree(&mut graph);

        assert_eq!(
            graph.find_path(root, "SearchPanel/SettingsMainButton"),
            Ok(button)
        );
        assert!(matches!(
            graph.find_path(root, "SearchPanel/Missing"),
            Err(SceneError::NotFound(_))
        ));
        let label = graph.find_descendant(root, "Label").unwrap();
        assert_eq!(graph.parent(label), Some(button));
        assert_eq!(graph.descendant_count(root), 3);
    }

    #[test]
    fn test_active_in_hierarchy_follows_ancestors() {
        let mut graph = SceneGraph::new();
        let (_, panel, button) = sample_tree(&mut graph);
        assert!(graph.is_active_in_hierarchy(button));

        graph.set_active(panel, false).unwrap();
        assert!(graph.is_active(button));
        assert!(!graph.is_active_in_hierarchy(button));
    }

    #[test]
    fn test_set_as_last_sibling() {
        let mut graph = SceneGraph::new();
        let root = graph.create("Root", NodeKind::Container, None).unwrap();
        let a = graph.create("A", NodeKind::Panel, Some(root)).unwrap();
        let b = graph.create("B", NodeKind::Panel, Some(root)).unwrap();

        graph.set_as_last_sibling(a).unwrap();
        assert_eq!(graph.children(root), &[b, a]);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut graph = SceneGraph::new();
        let bar = graph.create("Bar", NodeKind::ProgressBar, None).unwrap();
        let fill = graph.create("Fill", NodeKind::Image, Some(bar)).unwrap();

        graph.set_progress(bar, 1.7).unwrap();
        assert_eq!(graph.get(fill).unwrap().rect.anchor_max.x, 1.0);
        graph.set_progress(bar, 0.25).unwrap();
        assert_eq!(graph.get(fill).unwrap().rect.anchor_max.x, 0.25);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// **Property: destroyed handles stay dead**
        ///
        /// For any sequence of creates and destroys, every destroyed handle
        /// SHALL remain stale even after its slot is reused, and `len` SHALL
        /// equal the number of live handles.
        #[test]
        fn prop_destroyed_handles_never_alias(
            ops in prop::collection::vec((any::<bool>(), 0usize..8), 1..60),
        ) {
            let mut graph = SceneGraph::new();
            let mut live: Vec<NodeId> = Vec::new();
            let mut dead: Vec<NodeId> = Vec::new();

            for (create, pick) in ops {
                if create || live.is_empty() {
                    let id = graph.create("Node", NodeKind::Panel, None).unwrap();
                    live.push(id);
                } else {
                    let id = live.remove(pick % live.len());
                    prop_assert_eq!(graph.destroy(id).unwrap(), 1);
                    dead.push(id);
                }
            }

            for id in &dead {
                prop_assert!(!graph.is_alive(*id));
                prop_assert!(graph.get(*id).is_none());
            }
            prop_assert_eq!(graph.len(), live.len());
        }
    }
}
