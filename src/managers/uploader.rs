// Uploader - registration capture, server URL and beacons
//
// The network side (image upload, recognition) lives outside this crate.
// The in-process default keeps the state the UI shows and writes it into the
// sink nodes it is handed during wiring.

use crate::app::config::DEFAULT_SERVER_URL;
use crate::panels::registration::{progress_label, CAPTURE_TARGET};
use crate::scene::{NodeId, SceneGraph};
use tracing::{debug, info, warn};

/// Nodes the uploader writes into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploaderSinks {
    pub select_panel: Option<NodeId>,
    pub object_panel: Option<NodeId>,
    pub progress_bar: Option<NodeId>,
    pub progress_text: Option<NodeId>,
}

/// Registration upload collaborator
pub trait Uploader {
    fn set_sinks(&mut self, sinks: UploaderSinks);

    /// Open the "what to register" dialog
    fn show_registration_select_panel(&mut self, graph: &mut SceneGraph);

    /// Switch from the select dialog to the object name dialog
    fn show_object_id_panel(&mut self, graph: &mut SceneGraph);

    /// Close both registration dialogs
    fn hide_registration_panels(&mut self, graph: &mut SceneGraph);

    /// Start capturing images for `name`
    fn start_registration(&mut self, graph: &mut SceneGraph, name: &str);

    /// Capture progress callback; writes the progress sinks
    fn report_progress(&mut self, graph: &mut SceneGraph, captured: u32);

    fn set_server_url(&mut self, url: &str);
    fn server_url(&self) -> String;

    /// Flip beacon placement; returns the new state
    fn toggle_beacon_enabled(&mut self) -> bool;
    fn beacon_enabled(&self) -> bool;

    /// Remove every placed beacon; returns how many were removed
    fn clear_beacons(&mut self) -> usize;
}

/// In-process uploader
#[derive(Debug)]
pub struct DefaultUploader {
    server_url: String,
    beacon_enabled: bool,
    beacons: Vec<String>,
    pending: Option<String>,
    sinks: UploaderSinks,
}

impl Default for DefaultUploader {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            beacon_enabled: true,
            beacons: Vec::new(),
            pending: None,
            sinks: UploaderSinks::default(),
        }
    }
}

impl DefaultUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the object currently being captured
    pub fn pending_registration(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Record a beacon placed at a recognized object
    pub fn place_beacon(&mut self, object: &str) {
        if self.beacon_enabled {
            self.beacons.push(object.to_string());
        }
    }

    pub fn beacon_count(&self) -> usize {
        self.beacons.len()
    }
}

fn show(graph: &mut SceneGraph, node: Option<NodeId>, active: bool, what: &str) {
    match node {
        Some(id) => {
            if let Err(e) = graph.set_active(id, active) {
                warn!(sink = what, error = %e, "Uploader sink is gone");
            }
        }
        None => warn!(sink = what, "Uploader sink not wired"),
    }
}

impl Uploader for DefaultUploader {
    fn set_sinks(&mut self, sinks: UploaderSinks) {
        // A capture started on the old dialog has no progress sinks anymore
        if self.sinks != sinks && self.pending.take().is_some() {
            debug!("Registration dialog rebuilt, pending capture dropped");
        }
        self.sinks = sinks;
    }

    fn show_registration_select_panel(&mut self, graph: &mut SceneGraph) {
        show(graph, self.sinks.object_panel, false, "object_panel");
        show(graph, self.sinks.select_panel, true, "select_panel");
    }

    fn show_object_id_panel(&mut self, graph: &mut SceneGraph) {
        show(graph, self.sinks.select_panel, false, "select_panel");
        show(graph, self.sinks.object_panel, true, "object_panel");
        self.report_progress(graph, 0);
    }

    fn hide_registration_panels(&mut self, graph: &mut SceneGraph) {
        show(graph, self.sinks.select_panel, false, "select_panel");
        show(graph, self.sinks.object_panel, false, "object_panel");
        self.pending = None;
    }

    fn start_registration(&mut self, graph: &mut SceneGraph, name: &str) {
        info!(object = name, server = %self.server_url, "Registration started");
        self.pending = Some(name.to_string());
        self.report_progress(graph, 0);
    }

    fn report_progress(&mut self, graph: &mut SceneGraph, captured: u32) {
        let captured = captured.min(CAPTURE_TARGET);
        if let Some(bar) = self.sinks.progress_bar {
            let ratio = captured as f32 / CAPTURE_TARGET as f32;
            if let Err(e) = graph.set_progress(bar, ratio) {
                warn!(error = %e, "Progress bar sink is gone");
            }
        }
        if let Some(text) = self.sinks.progress_text {
            if let Err(e) = graph.set_text(text, progress_label(captured)) {
                warn!(error = %e, "Progress text sink is gone");
            }
        }
    }

    fn set_server_url(&mut self, url: &str) {
        info!(url, "Server URL set");
        self.server_url = url.to_string();
    }

    fn server_url(&self) -> String {
        self.server_url.clone()
    }

    fn toggle_beacon_enabled(&mut self) -> bool {
        self.beacon_enabled = !self.beacon_enabled;
        debug!(enabled = self.beacon_enabled, "Beacon toggled");
        self.beacon_enabled
    }

    fn beacon_enabled(&self) -> bool {
        self.beacon_enabled
    }

    fn clear_beacons(&mut self) -> usize {
        let removed = self.beacons.len();
        self.beacons.clear();
        info!(removed, "Cleared beacons");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    #[test]
    fn test_dialog_switching() {
        let mut graph = SceneGraph::new();
        let select = graph.create("RegistrationSelectPanel", NodeKind::Panel, None).unwrap();
        let object = graph.create("ObjectRegPanel", NodeKind::Panel, None).unwrap();
        let mut uploader = DefaultUploader::new();
        uploader.set_sinks(UploaderSinks {
            select_panel: Some(select),
            object_panel: Some(object),
            ..UploaderSinks::default()
        });

        uploader.show_registration_select_panel(&mut graph);
        assert!(graph.is_active(select));
        assert!(!graph.is_active(object));

        uploader.show_object_id_panel(&mut graph);
        assert!(!graph.is_active(select));
        assert!(graph.is_active(object));

        uploader.hide_registration_panels(&mut graph);
        assert!(!graph.is_active(object));
    }

    #[test]
    fn test_progress_is_capped() {
        let mut graph = SceneGraph::new();
        let bar = graph.create("ProgressBar", NodeKind::ProgressBar, None).unwrap();
        let fill = graph.create("Fill", NodeKind::Image, Some(bar)).unwrap();
        let text = graph.create("ProgressText", NodeKind::Label, None).unwrap();
        let mut uploader = DefaultUploader::new();
        uploader.set_sinks(UploaderSinks {
            progress_bar: Some(bar),
            progress_text: Some(text),
            ..UploaderSinks::default()
        });

        uploader.report_progress(&mut graph, 15);
        assert_eq!(graph.text(text), Some("15/30"));
        assert_eq!(graph.get(fill).unwrap().rect.anchor_max.x, 0.5);

        uploader.report_progress(&mut graph, 99);
        assert_eq!(graph.text(text), Some("30/30"));
    }

    #[test]
    fn test_rewiring_new_nodes_drops_pending_capture() {
        let mut graph = SceneGraph::new();
        let object = graph.create("ObjectRegPanel", NodeKind::Panel, None).unwrap();
        let sinks = UploaderSinks {
            object_panel: Some(object),
            ..UploaderSinks::default()
        };
        let mut uploader = DefaultUploader::new();
        uploader.set_sinks(sinks);
        uploader.start_registration(&mut graph, "cup");

        uploader.set_sinks(sinks);
        assert_eq!(uploader.pending_registration(), Some("cup"));

        let rebuilt = graph.create("ObjectRegPanel", NodeKind::Panel, None).unwrap();
        uploader.set_sinks(UploaderSinks {
            object_panel: Some(rebuilt),
            ..UploaderSinks::default()
        });
        assert_eq!(uploader.pending_registration(), None);
    }

    #[test]
    fn test_beacons_respect_toggle() {
        let mut uploader = DefaultUploader::new();
        uploader.place_beacon("cup");
        assert!(!uploader.toggle_beacon_enabled());
        uploader.place_beacon("laptop");
        assert_eq!(uploader.beacon_count(), 1);
        assert_eq!(uploader.clear_beacons(), 1);
        assert_eq!(uploader.beacon_count(), 0);
    }
}
