//! holdem-table: a Texas Hold'em table rules engine
//!
//! Goals:
//! - Exact five-to-seven card hand evaluation with human-readable descriptions
//! - A synchronous betting-round state machine driven by seat actions
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_table::cards::{Card, Rank, Suit};
//! use holdem_table::evaluator::{evaluate_holdem, HandCategory};
//! use holdem_table::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let best = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(best.category, HandCategory::OnePair);
//! assert_eq!(best.describe(), "Pair of Aces with King kicker");
//! ```
//!
//! ## Quick start: run a betting round
//! ```
//! use holdem_table::config::TableConfig;
//! use holdem_table::table::{Action, Phase, Table};
//!
//! let mut table = Table::new(TableConfig::default().with_seed(7)).unwrap();
//! table.start_new_game(3).unwrap();
//! assert_eq!(table.pot(), 30);
//! assert_eq!(table.phase(), Phase::Preflop);
//!
//! // Seat 0 is the human and opens the betting three-handed.
//! assert_eq!(table.current(), Some(0));
//! table.player_action(Action::Raise).unwrap();
//! assert_eq!(table.highest_bet(), 70);
//! ```
//!
//! ## TUI
//! Run the interactive table with:
//! ```sh
//! cargo run --bin holdem-table
//! ```
//! Set `HOLDEM_LOG=debug` to write a log file under `logs/`.

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
