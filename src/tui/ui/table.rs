use crate::table::{Phase, Player, SettlementReason};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner, render_card_widget};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let t = &app.table;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // board
            Constraint::Min(3),    // seats
            Constraint::Length(5), // status bar
        ])
        .split(f.area());

    let cfg = t.config();
    let header_lines = vec![
        Line::from(format!(
            "SB: {}  BB: {}  Dealer: P{}  Pot: {}  Hand #{}",
            cfg.small_blind,
            cfg.big_blind,
            t.dealer() + 1,
            t.pot(),
            t.hand_number(),
        )),
        Line::from(format!(
            "Phase: {}   Highest bet: {}   To call: {}",
            t.phase(),
            t.highest_bet(),
            t.to_call()
        )),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("holdem-table").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    // Board (5 slots)
    let board_area = chunks[1];
    f.render_widget(
        Block::default().title(format!("Board: {}", t.phase())).borders(Borders::ALL),
        board_area,
    );
    let board_cards = t.community();
    let newest = match t.phase() {
        Phase::Flop => 0..3,
        Phase::Turn => 3..4,
        Phase::River => 4..5,
        _ => 0..0,
    };
    for (i, slot) in columns(inner(board_area), 5).iter().enumerate() {
        let highlight = newest.contains(&i).then_some(Color::Yellow);
        render_card_widget(f, *slot, board_cards.get(i).copied(), highlight);
    }

    // Seats: top row left to right, bottom row right to left, like a ring.
    let seats_area = inner(chunks[2]);
    let total = t.players().len();
    let top_cols = ((total + 1) / 2) as u16;
    let bottom_cols = (total as u16).saturating_sub(top_cols);
    let row_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(seats_area);
    for (r, cols_this) in [top_cols, bottom_cols].into_iter().enumerate() {
        if cols_this == 0 {
            continue;
        }
        for (c, seat_area) in columns(row_chunks[r], cols_this).iter().enumerate() {
            let idx = if r == 0 { c } else { total.saturating_sub(1) - c };
            if let Some(p) = t.players().get(idx) {
                render_seat(f, *seat_area, app, idx, p);
            }
        }
    }

    draw_status(f, app, chunks[3]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.settlement_open() {
        draw_settlement(f, app);
    }
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    let t = &app.table;
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let mut left: Vec<Line> = Vec::new();
    if t.is_session_over() {
        left.push(Line::from("Session over: only one seat has chips. Press G for a new game."));
    } else if !t.is_hand_live() {
        left.push(Line::from("Hand over. Space deals the next hand, S shows the result."));
    } else if let Some(seat) = t.current() {
        let name = t.players().get(seat).map(Player::name).unwrap_or_default();
        let thinking = if t.pending().is_some() { "  (thinking...)" } else { "" };
        left.push(Line::from(format!("Acting: {name}{thinking}")));
    }

    if let Some(msg) = app.status() {
        left.push(Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Red))));
    }

    if t.is_hand_live() {
        let style = if app.human_to_act() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let call_label = if t.to_call() == 0 {
            "C check".to_string()
        } else {
            format!("C call {}", t.to_call())
        };
        left.push(Line::from(vec![
            Span::raw("Actions: "),
            Span::styled(call_label, style),
            Span::raw(" • "),
            Span::styled(format!("R raise +{}", t.config().raise_increment), style),
            Span::raw(" • "),
            Span::styled("F fold", style),
            Span::raw(" • "),
            Span::raw("N next street"),
        ]));
    }

    let right = vec![
        Line::from("? help • H history • S result"),
        Line::from("G new game • M menu"),
    ];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

/// Bots' cards stay hidden until they are shown down.
fn cards_visible(app: &AppState, p: &Player) -> bool {
    if p.is_human() {
        return true;
    }
    !app.table.is_hand_live()
        && !p.is_folded()
        && app.table.last_settlement().is_some_and(|s| s.reason == SettlementReason::Showdown)
}

fn render_seat(f: &mut Frame, seat_area: Rect, app: &AppState, idx: usize, p: &Player) {
    let t = &app.table;
    let mut title = format!("{} ({})", p.name(), p.kind());
    if p.is_dealer() {
        title.push_str(" [D]");
    }
    if p.is_small_blind() {
        title.push_str(" [SB]");
    }
    if p.is_big_blind() {
        title.push_str(" [BB]");
    }
    if p.is_all_in() {
        title.push_str(" [ALL-IN]");
    }
    if t.current() == Some(idx) {
        title.push_str(" [Act]");
    }

    let status = if p.hole().is_none() {
        "Out"
    } else if p.is_folded() {
        "Folded"
    } else if p.is_all_in() {
        "All-in"
    } else {
        "Active"
    };
    let dim = Style::default().add_modifier(Modifier::DIM);
    let show_cards = cards_visible(app, p);
    let description = if show_cards { t.seat_description(idx) } else { None };

    let mut lines: Vec<Line> = Vec::with_capacity(5);
    lines.push(Line::from(format!("Balance: ${}", p.balance())));
    lines.push(Line::from(format!("Bet: {}", p.current_bet())));
    lines.push(Line::from(format!("Status: {status}")));
    lines.push(match p.last_action() {
        Some(last) => Line::from(format!("Last: {last}")),
        None => Line::from(vec![Span::raw("Last: "), Span::styled("--", dim)]),
    });
    if let Some(desc) = description {
        lines.push(Line::from(Span::styled(desc, Style::default().fg(Color::Cyan))));
    }

    let won = !t.is_hand_live()
        && t.last_settlement().is_some_and(|s| s.winners.contains(&idx));
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if p.is_folded() {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if won {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if p.is_all_in() {
        block = block.border_style(Style::default().fg(Color::LightRed));
    } else if t.current() == Some(idx) {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    f.render_widget(block, seat_area);

    let seat_inner = inner(seat_area);
    let mut text_area = seat_inner;
    let mut cards_area: Option<Rect> = None;
    if show_cards && p.hole().is_some() && seat_inner.height > 3 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(seat_inner);
        text_area = split[0];
        cards_area = Some(split[1]);
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
    if let (Some(h), Some(area)) = (p.hole(), cards_area) {
        let slots = columns(area, 2);
        render_card_widget(f, slots[0], Some(h.first()), Some(Color::Cyan));
        render_card_widget(f, slots[1], Some(h.second()), Some(Color::Cyan));
    }
}

fn draw_settlement(f: &mut Frame, app: &AppState) {
    let Some(s) = app.table.last_settlement() else {
        return;
    };
    let area = centered_rect(80, 60, f.area());
    let title = match s.reason {
        SettlementReason::Showdown => "Showdown",
        SettlementReason::Uncontested => "Uncontested",
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let header = Row::new(["Seat", "Bet", "Won", "Net", "Balance", "Best hand"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = s.rows.iter().map(|row| {
        let style = if s.winners.contains(&row.seat) {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        Row::new(vec![
            row.name.clone(),
            row.bet.to_string(),
            row.won.to_string(),
            format!("{:+}", row.net),
            row.balance.to_string(),
            row.best_hand.map(|h| h.describe()).unwrap_or_else(|| "--".to_string()),
        ])
        .style(style)
    });
    let widths = [
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths).header(header);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3), Constraint::Length(1)])
        .split(inner(area));
    let mut summary = format!("Pot {} to {} winner(s), {} each", s.pot, s.winners.len(), s.split);
    if s.odd_chips > 0 {
        summary.push_str(&format!(", {} odd chip(s) ({})", s.odd_chips, app.table.config().odd_chips));
    }
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(summary), chunks[0]);
    f.render_widget(table, chunks[1]);
    f.render_widget(
        Paragraph::new(Span::styled("Close: S, Enter or Esc", Style::default().add_modifier(Modifier::DIM))),
        chunks[2],
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.table.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in entries {
            let amount = entry.amount.map(|v| format!(" {v}")).unwrap_or_default();
            let name = app.table.players().get(entry.seat).map(Player::name).unwrap_or_default();
            lines.push(Line::from(format!("{name} {}{amount} [{}]", entry.verb.label(), entry.phase)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- C: call / check"),
        Line::from("- R: raise by the raise increment"),
        Line::from("- F: fold"),
        Line::from("- N: deal the next street now"),
        Line::from("- Space: next hand (after settlement)"),
        Line::from("- G: new game with fresh stacks"),
        Line::from("- S: last hand result"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply and deal"),
        Line::from("- Esc: back to the table"),
        Line::from("- Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}
