// WeatherManager - weather panel content and region selection
//
// Forecast retrieval is external. The default manager shows whatever report
// it was last given for the current region.

use crate::panels::weather::DEFAULT_REGION;
use crate::scene::{NodeId, SceneGraph};
use tracing::{debug, info, warn};

/// Nodes the weather manager writes into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeatherSinks {
    pub panel: Option<NodeId>,
    pub title: Option<NodeId>,
    pub content: Option<NodeId>,
    pub date: Option<NodeId>,
}

pub trait WeatherManager {
    fn set_sinks(&mut self, sinks: WeatherSinks);

    /// Show the weather panel and redraw the current report
    fn refresh_weather(&mut self, graph: &mut SceneGraph);

    fn set_region(&mut self, graph: &mut SceneGraph, region: &str);
    fn region(&self) -> String;

    fn hide_weather_panel(&mut self, graph: &mut SceneGraph);
}

/// A forecast as delivered by the external weather source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub date: String,
    pub summary: String,
}

#[derive(Debug)]
pub struct DefaultWeatherManager {
    region: String,
    report: Option<WeatherReport>,
    sinks: WeatherSinks,
}

impl Default for DefaultWeatherManager {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            report: None,
            sinks: WeatherSinks::default(),
        }
    }
}

impl DefaultWeatherManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest forecast for the current region
    pub fn set_report(&mut self, report: WeatherReport) {
        self.report = Some(report);
    }

    fn write(graph: &mut SceneGraph, sink: Option<NodeId>, text: &str) {
        if let Some(id) = sink {
            if let Err(e) = graph.set_text(id, text) {
                warn!(error = %e, "Weather sink is gone");
            }
        }
    }
}

impl WeatherManager for DefaultWeatherManager {
    fn set_sinks(&mut self, sinks: WeatherSinks) {
        self.sinks = sinks;
    }

    fn refresh_weather(&mut self, graph: &mut SceneGraph) {
        let Some(panel) = self.sinks.panel else {
            warn!("Weather panel not wired");
            return;
        };
        if let Err(e) = graph.set_active(panel, true) {
            warn!(error = %e, "Weather panel is gone");
            return;
        }

        let title = format!("Weather Forecast - {}", self.region);
        let (date, content) = match &self.report {
            Some(r) => (r.date.as_str(), r.summary.as_str()),
            None => ("", "No forecast available"),
        };
        Self::write(graph, self.sinks.title, &title);
        Self::write(graph, self.sinks.date, date);
        Self::write(graph, self.sinks.content, content);
        debug!(region = %self.region, "Weather refreshed");
    }

    fn set_region(&mut self, graph: &mut SceneGraph, region: &str) {
        if self.region != region {
            // The stored report belonged to the old region
            self.report = None;
        }
        self.region = region.to_string();
        info!(region, "Region changed");
        let showing = self
            .sinks
            .panel
            .map(|p| graph.is_active(p))
            .unwrap_or(false);
        if showing {
            self.refresh_weather(graph);
        }
    }

    fn region(&self) -> String {
        self.region.clone()
    }

    fn hide_weather_panel(&mut self, graph: &mut SceneGraph) {
        if let Some(panel) = self.sinks.panel {
            if let Err(e) = graph.set_active(panel, false) {
                warn!(error = %e, "Weather panel is gone");
            }
        }
    }
}
