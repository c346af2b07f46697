// Terminal preview of the live scene
//
// Layout: title bar, then the scene tree next to the inspector (and the
// console when it is open), then the status bar.

pub mod inspector;
pub mod status_bar;
pub mod tree;

use crate::app::AppState;
use crate::theme::{ACCENT, HIGHLIGHT, MUTED};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_title(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    tree::render_scene_tree(f, body[0], app);

    if app.console_visible {
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body[1]);
        inspector::render_inspector(f, side[0], app);
        render_console(f, side[1], app);
    } else {
        inspector::render_inspector(f, body[1], app);
    }

    status_bar::render_status_bar(f, chunks[2], app);
}

fn render_title(f: &mut Frame, area: Rect, app: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            " Flashback UI ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("build #{} ", app.build_count),
            Style::default().fg(HIGHLIGHT),
        ),
        Span::styled(
            format!("icons: {}", app.config().icon_dir.display()),
            Style::default().fg(MUTED),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT));
    f.render_widget(Paragraph::new(title).block(block), area);
}

fn render_console(f: &mut Frame, area: Rect, app: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<&str> = app.console_lines().collect();
    let start = lines.len().saturating_sub(visible);
    let text: Vec<Line> = lines[start..]
        .iter()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(MUTED))))
        .collect();

    let console = Paragraph::new(text).block(
        Block::default()
            .title(" Console ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(console, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::UiAction;
    use crate::app::config::BuildConfig;
    use crate::app::prefs::MemoryPreferences;
    use crate::managers::ManagerGraph;
    use ratatui::{backend::TestBackend, Terminal};

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

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_draw_shows_tree_inspector_and_status() {
        let app = app();
        let out = screen(&app);
        assert!(out.contains("Flashback UI"));
        assert!(out.contains("Inspector"));
        assert!(out.contains("SearchPanel"));
        assert!(out.contains("[Log:OFF]"));
    }

    #[test]
    fn test_console_pane_appears_when_open() {
        let mut app = app();
        app.dispatch(UiAction::ToggleConsole);
        assert!(screen(&app).contains("Console"));
    }

    #[test]
    fn test_draw_after_cleanup() {
        let mut app = app();
        app.clean_scene();
        assert!(screen(&app).contains("Scene is empty"));
    }
}
