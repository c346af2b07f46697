// Panel layouts
//
// Declarative NodeSpec trees for every surface of the scene. Nothing here
// touches a SceneGraph; AppState hands these specs to the PanelBuilder.
// Node names exported as constants are the ones controllers look up after
// a build pass.

pub mod clock;
pub mod debug;
pub mod menu;
pub mod registration;
pub mod search;
pub mod settings;
pub mod tutorial;
pub mod weather;

use crate::app::config::CANVAS_NAME;
use crate::scene::Color;
use crate::ui::NodeSpec;

/// Dialog title color
pub const TITLE_COLOR: Color = Color::rgba(0.55, 0.8, 1.0, 1.0);

/// Secondary text color (subtitles, hints)
pub const MUTED_TEXT: Color = Color::rgba(0.7, 0.7, 0.7, 1.0);

/// Red-tinted background for cancel/close buttons
pub const CANCEL_BG: Color = Color::rgba(0.5, 0.15, 0.15, 0.9);

/// Green-tinted background for confirm buttons
pub const CONFIRM_BG: Color = Color::rgba(0.15, 0.45, 0.25, 0.9);

/// Top-level canvas that owns every generated panel
pub fn canvas() -> NodeSpec {
    NodeSpec::container(CANVAS_NAME)
}

/// Anchors of row `index` out of `count` rows stacked top to bottom
///
/// Rows are centered on `1 - (index + 1) / (count + 1)` with a fixed half
/// height, spanning `x_min..x_max` horizontally.
pub(crate) fn stacked_row(
    index: usize,
    count: usize,
    half_height: f32,
    x_min: f32,
    x_max: f32,
) -> ((f32, f32), (f32, f32)) {
    let y = 1.0 - (index + 1) as f32 / (count + 1) as f32;
    ((x_min, y - half_height), (x_max, y + half_height))
}

/// Anchors of cell `index` in a grid filled row by row from the top
pub(crate) fn grid_cell(index: usize, columns: usize, rows: usize) -> ((f32, f32), (f32, f32)) {
    let col = index % columns;
    let row = index / columns;
    let w = 1.0 / columns as f32;
    let h = 1.0 / rows as f32;
    let x0 = col as f32 * w;
    let y1 = 1.0 - row as f32 * h;
    ((x0 + 0.01, y1 - h + 0.01), (x0 + w - 0.01, y1 - 0.01))
}

/// Bold dialog title spanning the top strip of its parent
pub(crate) fn title(name: &str, text: &str) -> NodeSpec {
    NodeSpec::label(name, text)
        .anchors((0.0, 0.88), (1.0, 0.98))
        .font(22, true)
        .text_color(TITLE_COLOR)
}
