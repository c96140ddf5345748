use crate::cards::{Card, Suit};
use ratatui::layout::Constraint;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// `n` equal columns across `area`.
pub(super) fn columns(area: Rect, n: u16) -> std::rc::Rc<[Rect]> {
    let width = area.width / n.max(1);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..n).map(|_| Constraint::Length(width)).collect::<Vec<_>>())
        .split(area)
}

pub(super) fn suit_style(s: Suit) -> Style {
    match s {
        Suit::Hearts | Suit::Diamonds => Style::default().fg(Color::Red),
        Suit::Spades | Suit::Clubs => Style::default().fg(Color::White),
    }
}

/// A bordered card face; `None` draws an empty slot.
pub(super) fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let content = match card {
        Some(c) => Line::from(Span::styled(c.pretty(), suit_style(c.suit()))),
        None => Line::from("[  ]"),
    };
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
