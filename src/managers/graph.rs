// ManagerGraph - explicitly constructed manager set
//
// The graph owns one strong handle per manager. Controllers only ever get
// ManagerLinks (weak handles), so dropping a manager never keeps another one
// alive and a missing manager turns calls into logged no-ops.

use super::search::{DefaultSearchUiManager, SearchUiManager};
use super::tutorial::TutorialManager;
use super::uploader::{DefaultUploader, Uploader};
use super::weather::WeatherManager;
use super::{shared, DefaultTutorialManager, DefaultWeatherManager, Shared};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{info, warn};

/// The set of managers a build pass wires together
#[derive(Default)]
pub struct ManagerGraph {
    pub search: Option<Shared<dyn SearchUiManager>>,
    pub weather: Option<Shared<dyn WeatherManager>>,
    pub tutorial: Option<Shared<dyn TutorialManager>>,
    pub uploader: Option<Shared<dyn Uploader>>,
}

impl ManagerGraph {
    /// Graph with no managers
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the in-process default of every manager
    pub fn with_defaults() -> Self {
        let search: Shared<dyn SearchUiManager> = shared(DefaultSearchUiManager::new());
        let weather: Shared<dyn WeatherManager> = shared(DefaultWeatherManager::new());
        let tutorial: Shared<dyn TutorialManager> = shared(DefaultTutorialManager::new());
        let uploader: Shared<dyn Uploader> = shared(DefaultUploader::new());
        Self {
            search: Some(search),
            weather: Some(weather),
            tutorial: Some(tutorial),
            uploader: Some(uploader),
        }
    }

    /// Fill in managers that are safe to create on demand
    ///
    /// Uploader and search get default instances. Weather and tutorial need
    /// external data, so a missing one stays missing and is only reported.
    pub fn ensure_defaults(&mut self) {
        if self.uploader.is_none() {
            info!("No uploader supplied, creating default");
            let uploader: Shared<dyn Uploader> = shared(DefaultUploader::new());
            self.uploader = Some(uploader);
        }
        if self.search.is_none() {
            info!("No search manager supplied, creating default");
            let search: Shared<dyn SearchUiManager> = shared(DefaultSearchUiManager::new());
            self.search = Some(search);
        }
        if self.weather.is_none() {
            warn!("WeatherManager not found, weather actions disabled");
        }
        if self.tutorial.is_none() {
            warn!("TutorialManager not found, tutorial actions disabled");
        }
    }
}

/// Weak references to the managers a controller may call
#[derive(Clone, Default)]
pub struct ManagerLinks {
    search: Option<Weak<RefCell<dyn SearchUiManager>>>,
    weather: Option<Weak<RefCell<dyn WeatherManager>>>,
    tutorial: Option<Weak<RefCell<dyn TutorialManager>>>,
    uploader: Option<Weak<RefCell<dyn Uploader>>>,
}

fn call<T: ?Sized, R>(
    link: &Option<Weak<RefCell<T>>>,
    manager: &str,
    f: impl FnOnce(&mut T) -> R,
) -> Option<R> {
    match link.as_ref().and_then(Weak::upgrade) {
        Some(strong) => {
            let mut guard = strong.borrow_mut();
            Some(f(&mut *guard))
        }
        None => {
            warn!(manager, "Manager not available, action ignored");
            None
        }
    }
}

fn peek<T: ?Sized, R>(link: &Option<Weak<RefCell<T>>>, f: impl FnOnce(&T) -> R) -> Option<R> {
    let strong = link.as_ref().and_then(Weak::upgrade)?;
    let guard = strong.borrow();
    Some(f(&*guard))
}

impl ManagerLinks {
    /// Links to every manager present in `graph`
    pub fn from_graph(graph: &ManagerGraph) -> Self {
        Self {
            search: graph.search.as_ref().map(Rc::downgrade),
            weather: graph.weather.as_ref().map(Rc::downgrade),
            tutorial: graph.tutorial.as_ref().map(Rc::downgrade),
            uploader: graph.uploader.as_ref().map(Rc::downgrade),
        }
    }

    /// Same links with only the uploader and search manager kept
    pub fn uploader_and_search(&self) -> Self {
        Self {
            search: self.search.clone(),
            uploader: self.uploader.clone(),
            ..Self::default()
        }
    }

    pub fn uploader_link(&self) -> Option<Weak<RefCell<dyn Uploader>>> {
        self.uploader.clone()
    }

    pub fn with_search<R>(&self, f: impl FnOnce(&mut dyn SearchUiManager) -> R) -> Option<R> {
        call(&self.search, "search", |m| f(m))
    }

    pub fn with_weather<R>(&self, f: impl FnOnce(&mut dyn WeatherManager) -> R) -> Option<R> {
        call(&self.weather, "weather", |m| f(m))
    }

    pub fn with_tutorial<R>(&self, f: impl FnOnce(&mut dyn TutorialManager) -> R) -> Option<R> {
        call(&self.tutorial, "tutorial", |m| f(m))
    }

    pub fn with_uploader<R>(&self, f: impl FnOnce(&mut dyn Uploader) -> R) -> Option<R> {
        call(&self.uploader, "uploader", |m| f(m))
    }

    /// Whether the tutorial overlay is up; `false` without a tutorial manager
    pub fn tutorial_showing(&self) -> bool {
        peek(&self.tutorial, |t| t.is_showing()).unwrap_or(false)
    }

    pub fn beacon_enabled(&self) -> Option<bool> {
        peek(&self.uploader, |u| u.beacon_enabled())
    }

    pub fn region(&self) -> Option<String> {
        peek(&self.weather, |w| w.region())
    }

    pub fn has_weather(&self) -> bool {
        self.weather.as_ref().and_then(Weak::upgrade).is_some()
    }

    pub fn has_tutorial(&self) -> bool {
        self.tutorial.as_ref().and_then(Weak::upgrade).is_some()
    }
}
