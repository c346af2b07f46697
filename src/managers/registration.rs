// RegistrationManager - drives the registration dialogs through the uploader

use crate::managers::Uploader;
use crate::scene::{NodeId, SceneGraph};
use std::cell::RefCell;
use std::rc::Weak;
use tracing::{debug, warn};

#[derive(Default)]
pub struct RegistrationManager {
    uploader: Option<Weak<RefCell<dyn Uploader>>>,
    name_input: Option<NodeId>,
}

impl RegistrationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the uploader link (re-wiring overwrites)
    pub fn set_uploader(&mut self, uploader: Option<Weak<RefCell<dyn Uploader>>>) {
        self.uploader = uploader;
    }

    pub fn set_name_input(&mut self, input: Option<NodeId>) {
        self.name_input = input;
    }

    pub fn is_linked(&self) -> bool {
        self.uploader.as_ref().and_then(Weak::upgrade).is_some()
    }

    fn with_uploader(&self, f: impl FnOnce(&mut dyn Uploader)) -> bool {
        match self.uploader.as_ref().and_then(Weak::upgrade) {
            Some(uploader) => {
                f(&mut *uploader.borrow_mut());
                true
            }
            None => {
                warn!("Registration has no uploader, action ignored");
                false
            }
        }
    }

    /// Open the registration type dialog
    pub fn begin(&self, graph: &mut SceneGraph) -> bool {
        self.with_uploader(|u| u.show_registration_select_panel(graph))
    }

    /// Move on to the object name dialog
    pub fn choose_object(&self, graph: &mut SceneGraph) -> bool {
        self.with_uploader(|u| u.show_object_id_panel(graph))
    }

    pub fn cancel(&self, graph: &mut SceneGraph) -> bool {
        self.with_uploader(|u| u.hide_registration_panels(graph))
    }

    /// Start registering the name typed into the input field
    ///
    /// Returns `false` without touching the uploader when the name is empty.
    pub fn submit(&self, graph: &mut SceneGraph) -> bool {
        let name = self
            .name_input
            .and_then(|id| graph.text(id))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            debug!("Registration submitted without a name");
            return false;
        }
        self.with_uploader(|u| u.start_registration(graph, &name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::{shared, DefaultUploader, Shared};
    use crate::scene::NodeKind;
    use std::rc::Rc;

    #[test]
    fn test_submit_requires_name() {
        let mut graph = SceneGraph::new();
        let input = graph.create("ObjectNameInput", NodeKind::InputField, None).unwrap();
        let uploader = shared(DefaultUploader::new());
        let as_dyn: Shared<dyn Uploader> = uploader.clone();

        let mut registration = RegistrationManager::new();
        registration.set_uploader(Some(Rc::downgrade(&as_dyn)));
        registration.set_name_input(Some(input));

        assert!(!registration.submit(&mut graph));
        assert_eq!(uploader.borrow().pending_registration(), None);

        graph.set_text(input, "  mug ").unwrap();
        assert!(registration.submit(&mut graph));
        assert_eq!(uploader.borrow().pending_registration(), Some("mug"));
    }

    #[test]
    fn test_unlinked_registration_is_noop() {
        let mut graph = SceneGraph::new();
        let registration = RegistrationManager::new();
        assert!(!registration.is_linked());
        assert!(!registration.begin(&mut graph));
    }
}
