use crate::config::{OddChipRule, MAX_SEATS, MIN_SEATS};
use crate::table::Table;

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    StartingStack,
    SmallBlind,
    BigBlind,
    RaiseIncrement,
    BotDelayMs,
    BotFoldChance,
    OddChips,
}

const MENU_ITEMS: [MenuItem; 8] = [
    MenuItem::Players,
    MenuItem::StartingStack,
    MenuItem::SmallBlind,
    MenuItem::BigBlind,
    MenuItem::RaiseIncrement,
    MenuItem::BotDelayMs,
    MenuItem::BotFoldChance,
    MenuItem::OddChips,
];

const FOLD_CHANCE_STEP: f64 = 0.1;

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        let cfg = &app.cfg;
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::StartingStack => format!("Starting Stack: ${}", cfg.starting_stack),
            MenuItem::SmallBlind => format!("Small Blind: {}", cfg.small_blind),
            MenuItem::BigBlind => format!("Big Blind: {}", cfg.big_blind),
            MenuItem::RaiseIncrement => format!("Raise Increment: {}", cfg.raise_increment),
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", cfg.bot_delay_ms),
            MenuItem::BotFoldChance => {
                format!("Bot Fold Chance: {:.0}%", cfg.bot_fold_chance * 100.0)
            }
            MenuItem::OddChips => format!("Odd Chips: {}", cfg.odd_chips),
        }
    }

    fn inc(self, app: &mut AppState) {
        let cfg = &mut app.cfg;
        match self {
            MenuItem::Players => {
                if app.cfg_num_players < MAX_SEATS {
                    app.cfg_num_players += 1;
                }
            }
            MenuItem::StartingStack => {
                cfg.starting_stack = cfg.starting_stack.saturating_add(100);
            }
            MenuItem::SmallBlind => {
                cfg.small_blind = cfg.small_blind.saturating_add(5);
                if cfg.big_blind < cfg.small_blind {
                    cfg.big_blind = cfg.small_blind;
                }
            }
            MenuItem::BigBlind => {
                cfg.big_blind = cfg.big_blind.saturating_add(5);
            }
            MenuItem::RaiseIncrement => {
                cfg.raise_increment = cfg.raise_increment.saturating_add(10);
            }
            MenuItem::BotDelayMs => {
                cfg.bot_delay_ms = cfg.bot_delay_ms.saturating_add(100);
            }
            MenuItem::BotFoldChance => {
                cfg.bot_fold_chance = (cfg.bot_fold_chance + FOLD_CHANCE_STEP).min(1.0);
            }
            MenuItem::OddChips => cfg.odd_chips = toggled(cfg.odd_chips),
        }
    }

    fn dec(self, app: &mut AppState) {
        let cfg = &mut app.cfg;
        match self {
            MenuItem::Players => {
                if app.cfg_num_players > MIN_SEATS {
                    app.cfg_num_players -= 1;
                }
            }
            MenuItem::StartingStack => {
                cfg.starting_stack = cfg.starting_stack.saturating_sub(100).max(100);
            }
            MenuItem::SmallBlind => {
                cfg.small_blind = cfg.small_blind.saturating_sub(5).max(1);
            }
            MenuItem::BigBlind => {
                cfg.big_blind = cfg.big_blind.saturating_sub(5).max(1);
                if cfg.big_blind < cfg.small_blind {
                    cfg.small_blind = cfg.big_blind;
                }
            }
            MenuItem::RaiseIncrement => {
                cfg.raise_increment = cfg.raise_increment.saturating_sub(10).max(10);
            }
            MenuItem::BotDelayMs => {
                cfg.bot_delay_ms = cfg.bot_delay_ms.saturating_sub(100);
            }
            MenuItem::BotFoldChance => {
                cfg.bot_fold_chance = (cfg.bot_fold_chance - FOLD_CHANCE_STEP).max(0.0);
            }
            MenuItem::OddChips => cfg.odd_chips = toggled(cfg.odd_chips),
        }
    }
}

fn toggled(rule: OddChipRule) -> OddChipRule {
    match rule {
        OddChipRule::LeftOfDealer => OddChipRule::Discard,
        _ => OddChipRule::LeftOfDealer,
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_overlays();
        match self.scene {
            Scene::Menu if !self.table.players().is_empty() => self.scene = Scene::Table,
            Scene::Menu => {}
            _ => self.open_menu(),
        }
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_overlays();
        self.menu_index = 0;
        self.cfg = self.table.config().clone();
        self.cfg_num_players = self.num_players;
        self.scene = Scene::Menu;
    }

    /// Build a fresh table from the edited settings and deal its first hand.
    pub fn apply_menu(&mut self) {
        self.cfg_num_players = self.cfg_num_players.clamp(MIN_SEATS, MAX_SEATS);
        if self.cfg.big_blind < self.cfg.small_blind {
            self.cfg.big_blind = self.cfg.small_blind;
        }
        let table = match Table::new(self.cfg.clone()) {
            Ok(t) => t,
            Err(err) => {
                self.set_status(err.to_string());
                return;
            }
        };
        self.table = table;
        self.num_players = self.cfg_num_players;
        self.scene = Scene::Table;
        self.new_game();
    }

    pub fn cancel_menu(&mut self) {
        if !self.table.players().is_empty() {
            self.scene = Scene::Table;
        }
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
