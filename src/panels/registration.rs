// Registration dialogs and the tracking-target list
//
// RegistrationSelectPanel asks what to register, ObjectRegPanel collects a
// name and shows capture progress, and RegistrationListPanel is the grid of
// detectable objects the user can pick beacon targets from.

use super::{grid_cell, title, CANCEL_BG, CONFIRM_BG, MUTED_TEXT};
use crate::action::UiAction;
use crate::scene::{Color, TextAlign};
use crate::ui::NodeSpec;

pub const SELECT_PANEL: &str = "RegistrationSelectPanel";
pub const OBJECT_PANEL: &str = "ObjectRegPanel";
pub const LIST_PANEL: &str = "RegistrationListPanel";

pub const OBJECT_NAME_INPUT: &str = "ObjectNameInput";
pub const PROGRESS_BAR: &str = "ProgressBar";
pub const PROGRESS_TEXT: &str = "ProgressText";
pub const GRID_CONTAINER: &str = "GridContainer";
pub const SELECTION_COUNT: &str = "SelectionCount";
pub const BEACON_TOGGLE: &str = "BeaconToggleBtn";
pub const CHECKBOX: &str = "Checkbox";

/// Icons swapped on a list item's checkbox
pub const CHECKBOX_ON_ICON: &str = "icon_checkbox_on";
pub const CHECKBOX_OFF_ICON: &str = "icon_checkbox_off";

/// Images captured per registered object
pub const CAPTURE_TARGET: u32 = 30;

/// Objects the detector can recognize, in grid order
pub const DETECTABLE_OBJECTS: [&str; 15] = [
    "person",
    "bicycle",
    "car",
    "dog",
    "cat",
    "backpack",
    "umbrella",
    "bottle",
    "cup",
    "fork",
    "spoon",
    "bowl",
    "chair",
    "laptop",
    "cell phone",
];

const GRID_COLUMNS: usize = 3;
const DIALOG_BG: Color = Color::rgba(0.1, 0.12, 0.2, 0.96);
const ITEM_BG: Color = Color::rgba(0.2, 0.22, 0.3, 0.9);

/// Name of the button node for a list item
pub fn item_button_name(object: &str) -> String {
    format!("{}_Btn", object)
}

/// Name of the container node for a list item
pub fn item_container_name(object: &str) -> String {
    format!("{}_Container", object)
}

/// Path of an item's checkbox below the grid container
pub fn checkbox_path(object: &str) -> String {
    format!(
        "{}/{}/{}",
        item_container_name(object),
        item_button_name(object),
        CHECKBOX
    )
}

pub fn selection_label(count: usize, max: usize) -> String {
    format!("Selected: {}/{}", count, max)
}

pub fn progress_label(captured: u32) -> String {
    format!("{}/{}", captured, CAPTURE_TARGET)
}

/// "What do you want to register?" dialog
pub fn select_panel() -> NodeSpec {
    NodeSpec::panel(SELECT_PANEL)
        .anchors((0.3, 0.3), (0.7, 0.7))
        .z(-30.0)
        .color(DIALOG_BG)
        .inactive()
        .child(title("Title", "Register Real Object"))
        .child(
            NodeSpec::button("ObjectButton", "Register Object")
                .anchors((0.1, 0.45), (0.9, 0.7))
                .color(CONFIRM_BG)
                .on_click(UiAction::ShowObjectIdPanel),
        )
        .child(
            NodeSpec::button("CancelButton", "Cancel")
                .anchors((0.1, 0.1), (0.9, 0.3))
                .color(CANCEL_BG)
                .on_click(UiAction::CancelRegistration),
        )
}

/// Object name entry with capture progress
pub fn object_panel() -> NodeSpec {
    NodeSpec::panel(OBJECT_PANEL)
        .anchors((0.25, 0.25), (0.75, 0.75))
        .z(-30.0)
        .color(DIALOG_BG)
        .inactive()
        .child(title("Title", "OBJECT REGISTRATION"))
        .child(
            NodeSpec::label("Instruction", "Point camera at object and enter name:")
                .anchors((0.05, 0.72), (0.95, 0.84))
                .font(14, false)
                .text_color(MUTED_TEXT),
        )
        .child(
            NodeSpec::input(OBJECT_NAME_INPUT, "", "Enter object name...")
                .anchors((0.1, 0.56), (0.9, 0.7)),
        )
        .child(
            NodeSpec::icon_label_button("RegisterObjectButton", "icon_check", "Register")
                .anchors((0.1, 0.36), (0.48, 0.5))
                .color(CONFIRM_BG)
                .on_click(UiAction::SubmitRegistration),
        )
        .child(
            NodeSpec::icon_label_button("CancelObjectRegButton", "icon_close", "Cancel")
                .anchors((0.52, 0.36), (0.9, 0.5))
                .color(CANCEL_BG)
                .on_click(UiAction::CancelRegistration),
        )
        .child(NodeSpec::progress(PROGRESS_BAR, 0.0).anchors((0.1, 0.18), (0.9, 0.26)))
        .child(
            NodeSpec::label(PROGRESS_TEXT, progress_label(0))
                .anchors((0.1, 0.06), (0.9, 0.16))
                .font(14, false),
        )
}

fn list_item(object: &str, index: usize, rows: usize) -> NodeSpec {
    let (lo, hi) = grid_cell(index, GRID_COLUMNS, rows);
    NodeSpec::container(item_container_name(object))
        .anchors(lo, hi)
        .child(
            NodeSpec::plain_button(item_button_name(object))
                .color(ITEM_BG)
                .on_click(UiAction::ToggleSelection(object.to_string()))
                .child(
                    NodeSpec::image(CHECKBOX, CHECKBOX_OFF_ICON)
                        .anchors((0.04, 0.2), (0.2, 0.8)),
                )
                .child(
                    NodeSpec::label("Label", object)
                        .anchors((0.24, 0.0), (1.0, 1.0))
                        .align(TextAlign::MiddleLeft)
                        .font(14, false),
                ),
        )
}

/// Grid of detectable objects with a live selection count
pub fn list_panel(max_selections: usize) -> NodeSpec {
    let rows = DETECTABLE_OBJECTS.len().div_ceil(GRID_COLUMNS);
    let grid = NodeSpec::container(GRID_CONTAINER)
        .anchors((0.04, 0.2), (0.96, 0.78))
        .children(
            DETECTABLE_OBJECTS
                .iter()
                .enumerate()
                .map(|(i, object)| list_item(object, i, rows)),
        );

    NodeSpec::panel(LIST_PANEL)
        .anchors((0.15, 0.1), (0.85, 0.9))
        .z(-30.0)
        .color(DIALOG_BG)
        .inactive()
        .child(title("Title", "Detection Targets"))
        .child(
            NodeSpec::label(
                "Subtitle",
                format!("Select up to {} objects to track", max_selections),
            )
            .anchors((0.0, 0.8), (1.0, 0.87))
            .font(14, false)
            .text_color(MUTED_TEXT),
        )
        .child(grid)
        .child(
            NodeSpec::label(SELECTION_COUNT, selection_label(0, max_selections))
                .anchors((0.04, 0.11), (0.5, 0.18))
                .align(TextAlign::MiddleLeft),
        )
        .child(
            NodeSpec::button(BEACON_TOGGLE, super::settings::beacon_label(true))
                .anchors((0.52, 0.11), (0.96, 0.18))
                .on_click(UiAction::ToggleBeacon),
        )
        .child(
            NodeSpec::button("CloseButton", "Close")
                .anchors((0.35, 0.02), (0.65, 0.09))
                .color(CANCEL_BG)
                .on_click(UiAction::CloseOverlays),
        )
}
