// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts, scene state
// indicators and the last feedback message.

use crate::app::menu::MenuState;
use crate::app::AppState;
use crate::theme::{toggle_color, ACCENT, DANGER, HIGHLIGHT, MUTED};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

struct Hint {
    priority: u8,
    key: &'static str,
    desc: &'static str,
    color: Color,
}

const HINTS: [Hint; 9] = [
    Hint {
        priority: 1,
        key: "Q:",
        desc: "Quit | ",
        color: DANGER,
    },
    Hint {
        priority: 1,
        key: "↑↓:",
        desc: "Focus | ",
        color: ACCENT,
    },
    Hint {
        priority: 1,
        key: "⏎:",
        desc: "Click | ",
        color: ACCENT,
    },
    Hint {
        priority: 2,
        key: "S/F:",
        desc: "Menus | ",
        color: ACCENT,
    },
    Hint {
        priority: 2,
        key: "N/P:",
        desc: "Pages | ",
        color: ACCENT,
    },
    Hint {
        priority: 2,
        key: "M:",
        desc: "AR mode | ",
        color: ACCENT,
    },
    Hint {
        priority: 3,
        key: "R:",
        desc: "Rebuild | ",
        color: ACCENT,
    },
    Hint {
        priority: 3,
        key: "D:",
        desc: "Clean | ",
        color: ACCENT,
    },
    Hint {
        priority: 3,
        key: "H:",
        desc: "Hidden | ",
        color: ACCENT,
    },
];

/// Hint spans that fit in `available` columns, highest priority first
fn hint_spans(available: usize) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut used = 0;
    for priority in 1..=3 {
        for hint in HINTS.iter().filter(|h| h.priority == priority) {
            let len = hint.key.width() + hint.desc.width();
            if used + len <= available {
                spans.push(Span::styled(
                    hint.key,
                    Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(hint.desc));
                used += len;
            }
        }
    }
    spans
}

fn indicator(label: &'static str, value: String, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("[{}:", label), Style::default().fg(MUTED)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled("] ", Style::default().fg(MUTED)),
    ]
}

/// Scene state indicators, always shown
pub fn build_indicators(app: &AppState) -> Vec<Span<'static>> {
    let menu = match app.menu.state() {
        MenuState::None => "-",
        MenuState::SettingsOpen => "Settings",
        MenuState::FunctionsOpen => "Functions",
    };
    let mut spans = indicator("Menu", menu.to_string(), HIGHLIGHT);

    if app.pages.page_count() > 0 {
        spans.extend(indicator("Page", app.pages.indicator_text(), HIGHLIGHT));
    }
    let full = app.selection.count() >= app.selection.max();
    spans.extend(indicator(
        "Sel",
        format!("{}/{}", app.selection.count(), app.selection.max()),
        if full { DANGER } else { HIGHLIGHT },
    ));
    spans.extend(indicator("AR", app.display_mode.label().to_string(), ACCENT));
    spans.extend(indicator(
        "In",
        app.input_mode
            .label()
            .trim_start_matches("Input: ")
            .to_string(),
        ACCENT,
    ));
    let console = if app.console_visible { "ON" } else { "OFF" };
    spans.extend(indicator(
        "Log",
        console.to_string(),
        toggle_color(app.console_visible),
    ));
    if app.editing {
        spans.push(Span::styled(
            "EDITING ",
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        ));
    }
    spans
}

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let available = area.width.saturating_sub(4) as usize;

    // Indicators always show; hints get whatever room is left
    let indicators = build_indicators(app);
    let indicator_width: usize = indicators.iter().map(|s| s.content.width()).sum();

    let mut spans = vec![Span::styled(" ◆ ", Style::default().fg(ACCENT))];
    spans.extend(hint_spans(available.saturating_sub(4 + indicator_width)));
    spans.push(Span::raw(" "));
    spans.extend(indicators);
    if !app.last_message.is_empty() {
        spans.push(Span::styled(
            app.last_message.clone(),
            Style::default().fg(Color::White),
        ));
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::UiAction;
    use crate::app::config::BuildConfig;
    use crate::app::prefs::MemoryPreferences;
    use crate::managers::ManagerGraph;

    fn app() -> AppState {
        let config = BuildConfig {
            icon_dir: "/nonexistent/icons".into(),
            ..BuildConfig::default()
        };
        AppState::build(
            config,
            Box::new(MemoryPreferences::new()),
            ManagerGraph::with_defaults(),
        )
        .unwrap()
    }

    fn text(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_narrow_bar_keeps_top_priority_hints() {
        let all = text(&hint_spans(200));
        assert!(all.contains("Rebuild"));

        let narrow = text(&hint_spans(30));
        assert!(narrow.contains("Quit"));
        assert!(!narrow.contains("Rebuild"));
    }

    #[test]
    fn test_indicators_follow_state() {
        let mut app = app();
        let before = text(&build_indicators(&app));
        assert!(before.contains("[Menu:-]"));
        assert!(before.contains("[Log:OFF]"));

        app.dispatch(UiAction::ToggleSettingsMenu);
        app.dispatch(UiAction::ToggleConsole);
        let after = text(&build_indicators(&app));
        assert!(after.contains("[Menu:Settings]"));
        assert!(after.contains("[Log:ON]"));
        assert!(after.contains(&format!("[Sel:0/{}]", app.selection.max())));
    }
}
