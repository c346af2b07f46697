// Keyboard event handling
//
// This module contains the keyboard event handler that processes
// user input and routes it into the same click/dispatch path that
// scene buttons use.

use super::AppState;
use crate::action::UiAction;
use crossterm::event::KeyCode;
use tracing::warn;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Quit the application
/// - `Up`, `Down`, `Tab` - Move focus between visible clickable nodes
/// - `Enter`, `Space` - Click the focused node (edit it if it is an input field)
/// - `s` / `f` - Toggle the settings / functions hover menu
/// - `n` / `p` - Next / previous settings page
/// - `m` - Cycle the AR display mode
/// - `i` - Toggle the input mode
/// - `l` - Toggle the console log panel
/// - `w` - Show the weather panel
/// - `x` - Close menus and overlays
/// - `h` - Show or collapse hidden subtrees in the preview
/// - `r` - Rebuild the scene
/// - `d` - Run the scene cleanup command
///
/// While an input field is being edited, characters go to the field and
/// `Enter`/`Esc` end editing.
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    if app.editing {
        match key {
            KeyCode::Enter | KeyCode::Esc => app.editing = false,
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(c) => app.type_char(c),
            _ => {}
        }
        return true;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.running = false;
            false
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.focus_previous();
            true
        }
        KeyCode::Down | KeyCode::Tab => {
            app.focus_next();
            true
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.activate_focused();
            true
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if let Err(e) = app.rebuild() {
                warn!(error = %e, "Rebuild failed");
                app.last_message = format!("Rebuild failed: {}", e);
            }
            true
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            app.clean_scene();
            true
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.show_hidden = !app.show_hidden;
            true
        }
        KeyCode::Char(c) => {
            if let Some(action) = shortcut(c) {
                app.dispatch(action);
            }
            true
        }
        _ => true,
    }
}

/// Action bound to a single-letter shortcut
fn shortcut(c: char) -> Option<UiAction> {
    let action = match c.to_ascii_lowercase() {
        's' => UiAction::ToggleSettingsMenu,
        'f' => UiAction::ToggleFunctionsMenu,
        'n' => UiAction::SettingsNextPage,
        'p' => UiAction::SettingsPrevPage,
        'm' => UiAction::CycleDisplayMode,
        'i' => UiAction::ToggleInputMode,
        'l' => UiAction::ToggleConsole,
        'w' => UiAction::ShowWeather,
        'x' => UiAction::CloseMenusThen(Box::new(UiAction::CloseOverlays)),
        _ => return None,
    };
    Some(action)
}
