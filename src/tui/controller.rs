use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Draw, read keys and tick the table until the user quits from the menu.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key press to an input action. Returns `true` to quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('?') => {
            app.handle_input(InputAction::ToggleHelp);
            return false;
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.handle_input(InputAction::ToggleHistory);
            return false;
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.handle_input(InputAction::ToggleSettlement);
            return false;
        }
        _ => {}
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }
    if app.settlement_open() && matches!(code, KeyCode::Esc | KeyCode::Enter) {
        app.handle_input(InputAction::ToggleSettlement);
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                app.handle_input(InputAction::MenuPrev);
            }
            KeyCode::Down => {
                app.handle_input(InputAction::MenuNext);
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                app.handle_input(InputAction::MenuInc);
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                app.handle_input(InputAction::MenuDec);
            }
            KeyCode::Enter => {
                app.handle_input(InputAction::MenuApply);
            }
            KeyCode::Esc => {
                app.handle_input(InputAction::MenuCancel);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Table => {
            let action = match code {
                KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
                KeyCode::Char(' ') => Some(InputAction::NewHand),
                KeyCode::Char('g') | KeyCode::Char('G') => Some(InputAction::NewGame),
                KeyCode::Char('c') | KeyCode::Char('C') => Some(InputAction::CallOrCheck),
                KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Raise),
                KeyCode::Char('f') | KeyCode::Char('F') => Some(InputAction::Fold),
                KeyCode::Char('n') | KeyCode::Char('N') => Some(InputAction::NextPhase),
                _ => None,
            };
            if let Some(action) = action {
                app.handle_input(action);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_only_from_the_menu() {
        let mut app = AppState::default();
        assert!(handle_key(&mut app, KeyCode::Char('q')));
        app.apply_menu();
        assert_eq!(app.scene, Scene::Table);
        assert!(!handle_key(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn escape_closes_the_help_overlay() {
        let mut app = AppState::default();
        app.apply_menu();
        handle_key(&mut app, KeyCode::Char('?'));
        assert!(app.help_open());
        handle_key(&mut app, KeyCode::Esc);
        assert!(!app.help_open());
    }
}
