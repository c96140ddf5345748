use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const LOGO: &str = r#"
 _   _       _     _ _
| | | | ___ | | __| ( )___ _ __ ___
| |_| |/ _ \| |/ _` |// _ \ '_ ` _ \
|  _  | (_) | | (_| | |  __/ | | | | |
|_| |_|\___/|_|\__,_|  \___|_| |_| |_|
"#;

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let block = Block::default()
        .title(format!("holdem-table v{}", crate::VERSION))
        .borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let logo_lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Green))))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(logo_lines.len() as u16 + 1), Constraint::Min(3)])
        .split(inner(area));

    // Ragged art lines skew when centered one by one.
    let logo_para =
        Paragraph::new(logo_lines).wrap(Wrap { trim: false }).alignment(Alignment::Left);
    f.render_widget(logo_para, rows[0]);

    let mut cfg_lines: Vec<Line> = vec![Line::from(Span::styled(
        "Configuration:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, it) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        cfg_lines.push(Line::from(Span::styled(it, style)));
    }
    cfg_lines.push(Line::from(""));
    cfg_lines.push(Line::from(Span::styled(
        "[Enter] Deal  [Q] Quit  [Esc] Back  [↑/↓] Move  [+/-] Adjust",
        Style::default().add_modifier(Modifier::DIM),
    )));
    if let Some(status) = app.status() {
        cfg_lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    let cfg_para = Paragraph::new(cfg_lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(cfg_para, rows[1]);
}
