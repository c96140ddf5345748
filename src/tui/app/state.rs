use crate::config::TableConfig;
use crate::table::{Action, Table, TableError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    ToggleSettlement,
    HistoryUp,
    HistoryDown,
    NewHand,
    NewGame,
    CallOrCheck,
    Raise,
    Fold,
    NextPhase,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    pub table: Table,
    /// Seats dealt by `NewGame`.
    pub num_players: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg: TableConfig,
    pub cfg_num_players: usize,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    settlement_open: bool,
    settled_hand: u64,
    status: Option<String>,
    status_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let table = Table::default();
        let cfg = table.config().clone();
        Self {
            scene: Scene::Menu,
            started: Instant::now(),
            table,
            num_players: 2,
            menu_index: 0,
            cfg,
            cfg_num_players: 2,
            help_open: false,
            history_open: false,
            history_offset: 0,
            settlement_open: false,
            settled_hand: 0,
            status: None,
            status_at: None,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const STATUS_TTL: Duration = Duration::from_secs(3);

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
        self.status_at = Some(Instant::now());
    }

    fn clear_status(&mut self) {
        self.status = None;
        self.status_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn settlement_open(&self) -> bool {
        self.settlement_open
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
        self.settlement_open = false;
    }

    /// The acting seat belongs to a human and no overlay is covering the table.
    pub fn human_to_act(&self) -> bool {
        if self.scene != Scene::Table || self.help_open || self.history_open {
            return false;
        }
        self.table
            .current()
            .and_then(|seat| self.table.players().get(seat))
            .is_some_and(|p| p.is_human())
    }

    fn human_action(&mut self, action: Action) -> bool {
        if !self.human_to_act() {
            return false;
        }
        let result = self.table.player_action(action).map(|o| o.is_applied());
        self.after_table_call(result)
    }

    /// Surface errors in the status line and pop the settlement panel when a hand ends.
    fn after_table_call(&mut self, result: Result<bool, TableError>) -> bool {
        match result {
            Ok(changed) => {
                if changed {
                    self.clear_status();
                    self.note_settlement();
                }
                changed
            }
            Err(err) => {
                log::warn!("table rejected input: {err}");
                self.set_status(err.to_string());
                false
            }
        }
    }

    fn note_settlement(&mut self) {
        if self.table.is_hand_live() || self.table.last_settlement().is_none() {
            return;
        }
        if self.settled_hand != self.table.hand_number() {
            self.settled_hand = self.table.hand_number();
            self.settlement_open = true;
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.settlement_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    self.settlement_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::ToggleSettlement => {
                if self.scene == Scene::Table && self.table.last_settlement().is_some() {
                    self.help_open = false;
                    self.history_open = false;
                    self.settlement_open = !self.settlement_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.table.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewHand => self.scene == Scene::Table && self.new_hand(),
            InputAction::NewGame => self.scene == Scene::Table && self.new_game(),
            InputAction::CallOrCheck => self.human_action(Action::CallOrCheck),
            InputAction::Raise => self.human_action(Action::Raise),
            InputAction::Fold => self.human_action(Action::Fold),
            InputAction::NextPhase => {
                if self.scene != Scene::Table {
                    return false;
                }
                let result = self.table.next_phase().map(|o| o.is_applied());
                self.after_table_call(result)
            }
        }
    }

    /// Deal the next hand once the previous one has been settled.
    pub fn new_hand(&mut self) -> bool {
        if self.table.is_hand_live() || self.table.players().is_empty() {
            return false;
        }
        match self.table.start_new_hand() {
            Ok(()) => {
                self.history_offset = 0;
                self.settlement_open = false;
                self.clear_status();
                self.note_settlement();
                true
            }
            Err(TableError::NotEnoughFundedSeats) => {
                self.set_status("Session over. Press G for a new game.");
                false
            }
            Err(err) => self.after_table_call(Err(err)),
        }
    }

    /// Reseat everyone with fresh stacks and deal.
    pub fn new_game(&mut self) -> bool {
        self.close_overlays();
        self.history_offset = 0;
        self.settled_hand = 0;
        let result = self.table.start_new_game(self.num_players).map(|()| true);
        self.after_table_call(result)
    }

    /// Called on every controller tick: expires the status line and fires due bot decisions.
    pub fn tick(&mut self) {
        if self.scene != Scene::Table {
            return;
        }
        if let Some(at) = self.status_at {
            if at.elapsed() >= Self::STATUS_TTL {
                self.clear_status();
            }
        }
        let result = self.table.poll_bot().map(|o| o.is_applied());
        self.after_table_call(result);
    }
}
