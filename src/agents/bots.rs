use super::{BotDecision, DecisionPolicy};
use crate::evaluator::HandCategory;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Folds a bare high card with probability `fold_chance`; anything made calls or checks.
#[derive(Debug)]
pub struct CautiousBot {
    fold_chance: f64,
    rng: StdRng,
}

impl CautiousBot {
    /// `fold_chance` is clamped to `0.0..=1.0`. A seed makes decisions reproducible.
    pub fn new(fold_chance: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        let fold_chance = if fold_chance.is_nan() { 0.0 } else { fold_chance.clamp(0.0, 1.0) };
        Self { fold_chance, rng }
    }

    pub fn fold_chance(&self) -> f64 {
        self.fold_chance
    }
}

impl DecisionPolicy for CautiousBot {
    fn decide(&mut self, strength: HandCategory) -> BotDecision {
        if strength == HandCategory::HighCard && self.rng.random_bool(self.fold_chance) {
            BotDecision::Fold
        } else {
            BotDecision::CallOrCheck
        }
    }
}

/// Never folds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl DecisionPolicy for CallingStation {
    fn decide(&mut self, _strength: HandCategory) -> BotDecision {
        BotDecision::CallOrCheck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn made_hands_never_fold() {
        let mut bot = CautiousBot::new(1.0, Some(3));
        for cat in HandCategory::ALL.into_iter().skip(1) {
            assert_eq!(bot.decide(cat), BotDecision::CallOrCheck, "{cat}");
        }
    }

    #[test]
    fn certain_fold_chance_folds_high_card() {
        let mut bot = CautiousBot::new(1.0, Some(3));
        assert_eq!(bot.decide(HandCategory::HighCard), BotDecision::Fold);
        let mut never = CautiousBot::new(0.0, Some(3));
        assert_eq!(never.decide(HandCategory::HighCard), BotDecision::CallOrCheck);
    }

    #[test]
    fn seeded_bots_agree() {
        let mut a = CautiousBot::new(0.5, Some(42));
        let mut b = CautiousBot::new(0.5, Some(42));
        for _ in 0..32 {
            assert_eq!(a.decide(HandCategory::HighCard), b.decide(HandCategory::HighCard));
        }
    }

    #[test]
    fn fold_rate_tracks_probability() {
        let mut bot = CautiousBot::new(0.3, Some(11));
        let folds =
            (0..2000).filter(|_| bot.decide(HandCategory::HighCard) == BotDecision::Fold).count();
        assert!((450..=750).contains(&folds), "folds = {folds}");
    }

    #[test]
    fn out_of_range_chance_is_clamped() {
        assert_eq!(CautiousBot::new(7.0, Some(1)).fold_chance(), 1.0);
        assert_eq!(CautiousBot::new(-1.0, Some(1)).fold_chance(), 0.0);
    }
}
