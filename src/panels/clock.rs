// Digital clock in the top-left corner of the search panel
//
// HH:MM drawn with one digit sprite per numeral. The colon is a sprite too
// and does not blink.

use crate::scene::Color;
use crate::ui::NodeSpec;

pub const PANEL_NAME: &str = "ClockPanel";
pub const CLOCK_CONTAINER: &str = "ClockContainer";
pub const HOUR_DISPLAY: &str = "HourDisplay";
pub const MINUTE_DISPLAY: &str = "MinuteDisplay";
pub const COLON: &str = "Colon";

/// Digit nodes inside each display, most significant first
pub const DIGIT_NODES: [&str; 2] = ["Digit0", "Digit1"];

/// Symbolic name of the colon sprite
pub const COLON_ICON: &str = "digit-_";

/// Symbolic sprite name for `digit`; resolves to `digit-N.png` in the
/// legacy convention
pub fn digit_icon(digit: u32) -> String {
    format!("digit-{}", digit % 10)
}

/// Path of digit `index` inside `display`, relative to the clock panel
pub fn digit_path(display: &str, index: usize) -> String {
    format!("{}/{}/{}", CLOCK_CONTAINER, display, DIGIT_NODES[index])
}

fn two_digit_display(name: &str, x_min: f32, x_max: f32) -> NodeSpec {
    NodeSpec::container(name)
        .anchors((x_min, 0.0), (x_max, 1.0))
        .child(NodeSpec::image(DIGIT_NODES[0], digit_icon(0)).anchors((0.0, 0.0), (0.5, 1.0)))
        .child(NodeSpec::image(DIGIT_NODES[1], digit_icon(0)).anchors((0.5, 0.0), (1.0, 1.0)))
}

pub fn clock_panel() -> NodeSpec {
    NodeSpec::panel(PANEL_NAME)
        .anchors((0.02, 0.88), (0.16, 0.97))
        .color(Color::CLEAR)
        .child(
            NodeSpec::container(CLOCK_CONTAINER)
                .anchors((0.05, 0.08), (0.95, 0.92))
                .child(two_digit_display(HOUR_DISPLAY, 0.0, 0.44))
                .child(NodeSpec::image(COLON, COLON_ICON).anchors((0.44, 0.07), (0.56, 0.93)))
                .child(two_digit_display(MINUTE_DISPLAY, 0.56, 1.0)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::icons::legacy_file_name;

    #[test]
    fn test_digit_sprites_use_numbered_files() {
        assert_eq!(legacy_file_name(&digit_icon(7)), "digit-7.png");
        assert_eq!(legacy_file_name(COLON_ICON), "digit-_.png");
        assert_eq!(digit_icon(12), "digit-2");
    }

    #[test]
    fn test_every_digit_path_exists() {
        let spec = clock_panel();
        for display in [HOUR_DISPLAY, MINUTE_DISPLAY] {
            let node = spec.find(display).unwrap();
            for digit in DIGIT_NODES {
                assert!(node.find(digit).is_some());
            }
        }
        assert!(spec.find(COLON).is_some());
        assert_eq!(digit_path(HOUR_DISPLAY, 1), "ClockContainer/HourDisplay/Digit1");
    }
}
