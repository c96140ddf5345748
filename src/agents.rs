//! Agents: who decides for a seat.
//!
//! Human seats are driven by the front-end through [`crate::table::Table::player_action`].
//! Bot seats consult a [`DecisionPolicy`] with the strength of the cards they can see;
//! the table owns the policy and the think-time pacing, so UIs stay thin.

use crate::evaluator::HandCategory;
use core::fmt;

/// Kinds of controllers attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatKind {
    Human,
    Bot,
}

impl fmt::Display for SeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatKind::Human => f.write_str("Human"),
            SeatKind::Bot => f.write_str("Bot"),
        }
    }
}

/// The two answers a bot can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotDecision {
    Fold,
    CallOrCheck,
}

/// Given the strength of what a bot seat can see, pick an action.
pub trait DecisionPolicy: fmt::Debug + Send {
    fn decide(&mut self, strength: HandCategory) -> BotDecision;
}

mod bots;

pub use bots::{CallingStation, CautiousBot};
