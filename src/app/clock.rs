// Sprite clock controller
//
// Writes hours and minutes into the four digit nodes of the clock panel.
// A digit whose sprite is missing shows its numeral as text instead.

use crate::panels::clock::{digit_icon, digit_path, HOUR_DISPLAY, MINUTE_DISPLAY};
use crate::scene::{ImageHandle, NodeId, SceneError, SceneGraph};
use crate::ui::IconCache;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct ClockController {
    /// Sprite per numeral, indexed by digit value
    sprites: [Option<ImageHandle>; 10],
    hour: [Option<NodeId>; 2],
    minute: [Option<NodeId>; 2],
    /// Last time written, re-applied after a rebind
    shown: Option<(u32, u32)>,
}

impl ClockController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a built clock panel and redraw the last time shown
    pub fn bind(
        &mut self,
        graph: &mut SceneGraph,
        panel: NodeId,
        icons: &mut IconCache,
    ) -> Result<(), SceneError> {
        for index in 0..2 {
            self.hour[index] = Some(graph.find_path(panel, &digit_path(HOUR_DISPLAY, index))?);
            self.minute[index] = Some(graph.find_path(panel, &digit_path(MINUTE_DISPLAY, index))?);
        }
        for (digit, sprite) in (0u32..).zip(self.sprites.iter_mut()) {
            *sprite = icons.resolve(&digit_icon(digit));
        }
        let missing = self.sprites.iter().filter(|s| s.is_none()).count();
        if missing > 0 {
            warn!(missing, "Clock digit sprites missing, using text digits");
        }
        if let Some((hour, minute)) = self.shown {
            self.set_time(graph, hour, minute);
        }
        Ok(())
    }

    /// Show `hour:minute`; out-of-range values wrap
    pub fn set_time(&mut self, graph: &mut SceneGraph, hour: u32, minute: u32) {
        let (hour, minute) = (hour % 24, minute % 60);
        let digits = [
            (self.hour[0], hour / 10),
            (self.hour[1], hour % 10),
            (self.minute[0], minute / 10),
            (self.minute[1], minute % 10),
        ];
        if self.hour[0].is_none() {
            debug!("Clock not bound, time kept for the next bind");
        }
        for (node, digit) in digits {
            if let Some(id) = node {
                self.write_digit(graph, id, digit);
            }
        }
        if self.shown != Some((hour, minute)) {
            debug!(hour, minute, "Clock updated");
        }
        self.shown = Some((hour, minute));
    }

    /// Last time written, as `(hour, minute)`
    pub fn displayed(&self) -> Option<(u32, u32)> {
        self.shown
    }

    fn write_digit(&self, graph: &mut SceneGraph, id: NodeId, digit: u32) {
        let sprite = self.sprites[digit as usize].clone();
        let result = match sprite {
            Some(image) => graph.set_image(id, Some(image)),
            None => graph
                .set_image(id, None)
                .and_then(|_| graph.set_text(id, digit.to_string())),
        };
        if let Err(e) = result {
            warn!(error = %e, "Clock digit is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::clock::{clock_panel, PANEL_NAME};
    use crate::ui::{IconSource, NodeFactory, PanelBuilder};
    use std::path::Path;

    /// Only the even digits have sprites
    struct EvenDigits;

    impl IconSource for EvenDigits {
        fn exists(&self, path: &Path) -> bool {
            path.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix("digit-"))
                .and_then(|n| n.strip_suffix(".png"))
                .and_then(|n| n.parse::<u32>().ok())
                .is_some_and(|d| d % 2 == 0)
        }

        fn load(&self, path: &Path) -> Option<ImageHandle> {
            self.exists(path).then(|| ImageHandle::new(path))
        }
    }

    fn built(source: Box<dyn IconSource>) -> (SceneGraph, NodeId, ClockController) {
        let mut graph = SceneGraph::new();
        let mut builder = PanelBuilder::new(NodeFactory::new(IconCache::new("icons", source)));
        let panel = builder
            .build_or_rebuild(&mut graph, None, PANEL_NAME, &clock_panel())
            .unwrap()
            .root;
        let mut clock = ClockController::new();
        clock
            .bind(&mut graph, panel, builder.factory_mut().icons())
            .unwrap();
        (graph, panel, clock)
    }

    fn digit(graph: &SceneGraph, panel: NodeId, display: &str, index: usize) -> NodeId {
        graph.find_path(panel, &digit_path(display, index)).unwrap()
    }

    #[test]
    fn test_time_maps_to_digit_sprites() {
        let (mut graph, panel, mut clock) = built(Box::new(EvenDigits));
        clock.set_time(&mut graph, 8, 42);

        let hour_ones = graph.get(digit(&graph, panel, HOUR_DISPLAY, 1)).unwrap();
        let image = hour_ones.image.as_ref().unwrap();
        assert_eq!(image.path(), Path::new("icons/digit-8.png"));

        let minute_tens = graph.get(digit(&graph, panel, MINUTE_DISPLAY, 0)).unwrap();
        assert_eq!(minute_tens.image.as_ref().unwrap().path(), Path::new("icons/digit-4.png"));
        assert_eq!(clock.displayed(), Some((8, 42)));
    }

    #[test]
    fn test_missing_sprite_falls_back_to_text() {
        let (mut graph, panel, mut clock) = built(Box::new(EvenDigits));
        clock.set_time(&mut graph, 13, 7);

        let hour_ones = digit(&graph, panel, HOUR_DISPLAY, 1);
        assert!(graph.get(hour_ones).unwrap().image.is_none());
        assert_eq!(graph.text(hour_ones), Some("3"));
        let minute_ones = digit(&graph, panel, MINUTE_DISPLAY, 1);
        assert_eq!(graph.text(minute_ones), Some("7"));
    }

    #[test]
    fn test_out_of_range_time_wraps() {
        let mut clock = ClockController::new();
        let mut graph = SceneGraph::new();
        clock.set_time(&mut graph, 25, 61);
        assert_eq!(clock.displayed(), Some((1, 1)));
    }

    #[test]
    fn test_rebind_redraws_last_time() {
        let (mut graph, _, mut clock) = built(Box::new(EvenDigits));
        clock.set_time(&mut graph, 20, 46);

        let mut builder = PanelBuilder::new(NodeFactory::new(IconCache::new(
            "icons",
            Box::new(EvenDigits),
        )));
        let panel = builder
            .build_or_rebuild(&mut graph, None, PANEL_NAME, &clock_panel())
            .unwrap()
            .root;
        clock
            .bind(&mut graph, panel, builder.factory_mut().icons())
            .unwrap();

        let hour_tens = graph.get(digit(&graph, panel, HOUR_DISPLAY, 0)).unwrap();
        assert_eq!(hour_tens.image.as_ref().unwrap().path(), Path::new("icons/digit-2.png"));
    }
}
