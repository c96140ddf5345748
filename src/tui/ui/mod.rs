mod layout;
mod menu;
mod table;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::Frame;

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Menu => menu::draw_menu(f, app),
        Scene::Table => table::draw_table(f, app),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn menu_lists_the_settings() {
        let app = AppState::default();
        let screen = render(&app);
        assert!(screen.contains("Players: 2"));
        assert!(screen.contains("Raise Increment: 50"));
    }

    #[test]
    fn table_shows_pot_and_phase() {
        let mut app = AppState::default();
        app.apply_menu();
        let screen = render(&app);
        assert!(screen.contains("Pot: 30"), "{screen}");
        assert!(screen.contains("Preflop"));
    }
}
