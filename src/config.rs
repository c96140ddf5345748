//! Table parameters.

use core::fmt;

/// Fewest seats a game can start with.
pub const MIN_SEATS: usize = 2;
/// Most seats a game can start with; 9 hands plus a full board fit in one deck.
pub const MAX_SEATS: usize = 9;

/// What happens to the chips left over when a pot does not divide evenly among winners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OddChipRule {
    /// One extra chip each to the winners closest to the dealer's left.
    #[default]
    LeftOfDealer,
    /// The remainder is dropped from the pot and never credited to anyone.
    Discard,
}

impl fmt::Display for OddChipRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OddChipRule::LeftOfDealer => f.write_str("left of dealer"),
            OddChipRule::Discard => f.write_str("discard"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("starting stack must be positive")]
    ZeroStack,
    #[error("big blind must be positive")]
    ZeroBigBlind,
    #[error("small blind {small} exceeds big blind {big}")]
    BlindsInverted { small: u64, big: u64 },
    #[error("raise increment must be positive")]
    ZeroRaiseIncrement,
    #[error("bot fold chance must be within 0..=1, got {0}")]
    FoldChance(f64),
}

/// Parameters for one session at the table.
///
/// ```
/// use holdem_table::config::TableConfig;
///
/// let cfg = TableConfig::default().with_blinds(25, 50).with_seed(7);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.big_blind, 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub starting_stack: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Chips added on top of the amount to call by a raise.
    pub raise_increment: u64,
    /// Think time before a bot's decision fires.
    pub bot_delay_ms: u64,
    /// Probability that a bot holding only a high card folds.
    pub bot_fold_chance: f64,
    pub odd_chips: OddChipRule,
    /// Seeds the deck shuffle and the bots; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: 1000,
            small_blind: 10,
            big_blind: 20,
            raise_increment: 50,
            bot_delay_ms: 800,
            bot_fold_chance: 0.3,
            odd_chips: OddChipRule::default(),
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn with_starting_stack(mut self, chips: u64) -> Self {
        self.starting_stack = chips;
        self
    }

    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn with_raise_increment(mut self, chips: u64) -> Self {
        self.raise_increment = chips;
        self
    }

    pub fn with_bot_delay_ms(mut self, ms: u64) -> Self {
        self.bot_delay_ms = ms;
        self
    }

    pub fn with_bot_fold_chance(mut self, p: f64) -> Self {
        self.bot_fold_chance = p;
        self
    }

    pub fn with_odd_chips(mut self, rule: OddChipRule) -> Self {
        self.odd_chips = rule;
        self
    }

    /// Set a deterministic seed for reproducible deals and bot decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if self.big_blind == 0 {
            return Err(ConfigError::ZeroBigBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::BlindsInverted {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.raise_increment == 0 {
            return Err(ConfigError::ZeroRaiseIncrement);
        }
        if !(0.0..=1.0).contains(&self.bot_fold_chance) {
            return Err(ConfigError::FoldChance(self.bot_fold_chance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.starting_stack, 1000);
        assert_eq!((cfg.small_blind, cfg.big_blind), (10, 20));
        assert_eq!(cfg.raise_increment, 50);
        assert_eq!(cfg.odd_chips, OddChipRule::LeftOfDealer);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = TableConfig::default();
        assert_eq!(base.clone().with_starting_stack(0).validate(), Err(ConfigError::ZeroStack));
        assert_eq!(base.clone().with_blinds(0, 0).validate(), Err(ConfigError::ZeroBigBlind));
        assert_eq!(
            base.clone().with_blinds(30, 20).validate(),
            Err(ConfigError::BlindsInverted { small: 30, big: 20 })
        );
        assert_eq!(
            base.clone().with_raise_increment(0).validate(),
            Err(ConfigError::ZeroRaiseIncrement)
        );
        assert!(matches!(
            base.with_bot_fold_chance(1.5).validate(),
            Err(ConfigError::FoldChance(_))
        ));
    }

    #[test]
    fn builders_chain() {
        let cfg = TableConfig::default()
            .with_bot_delay_ms(0)
            .with_odd_chips(OddChipRule::Discard)
            .with_seed(99);
        assert_eq!(cfg.bot_delay_ms, 0);
        assert_eq!(cfg.odd_chips, OddChipRule::Discard);
        assert_eq!(cfg.seed, Some(99));
    }
}
