// Manager collaborators
//
// Long-lived objects exposing domain operations (search, weather, tutorial,
// upload) that UI controllers call but do not own. Each trait comes with an
// in-process default so a scene is usable without any external service.

mod graph;
mod registration;
mod search;
mod tutorial;
mod uploader;
mod weather;
mod wiring;

pub use graph::{ManagerGraph, ManagerLinks};
pub use registration::RegistrationManager;
pub use search::{DefaultSearchUiManager, SearchSinks, SearchUiManager};
pub use tutorial::{
    default_pages, DefaultTutorialManager, TutorialManager, TutorialPage, TutorialSinks,
};
pub use uploader::{DefaultUploader, Uploader, UploaderSinks};
pub use weather::{DefaultWeatherManager, WeatherManager, WeatherReport, WeatherSinks};
pub use wiring::{wire, SinkTargets};

use std::cell::RefCell;
use std::rc::Rc;

/// Single-threaded shared ownership used for managers
pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
