use super::rank_groups::{count_ranks, RankGroups};
use super::{HandCategory, HandResult};
use core::fmt;

impl HandResult {
    /// Human-readable summary, e.g. "Two Pair: Kings and Nines with Ace kicker".
    pub fn describe(&self) -> String {
        let groups = RankGroups::from_counts(&count_ranks(&self.cards));
        let top = self.cards[0].rank();
        let lead = |n: u8| groups.with_count(n).first().copied().unwrap_or(top);
        let kicker = groups.kickers().first().copied().unwrap_or(top);

        match self.category {
            HandCategory::HighCard => format!("High Card: {}", top.name()),
            HandCategory::OnePair => {
                format!("Pair of {} with {} kicker", lead(2).plural(), kicker.name())
            }
            HandCategory::TwoPair => {
                let pairs = groups.pairs();
                let high = pairs.first().copied().unwrap_or(top);
                let low = pairs.get(1).copied().unwrap_or(high);
                format!(
                    "Two Pair: {} and {} with {} kicker",
                    high.plural(),
                    low.plural(),
                    kicker.name()
                )
            }
            HandCategory::ThreeOfAKind => format!("Three of a Kind: {}", lead(3).plural()),
            HandCategory::Straight => format!("Straight: {} high", top.name()),
            HandCategory::Flush => format!("Flush: {} high", top.name()),
            HandCategory::FullHouse => {
                format!("Full House: {} full of {}", lead(3).plural(), lead(2).plural())
            }
            HandCategory::FourOfAKind => {
                format!("Four of a Kind: {} with {} kicker", lead(4).plural(), kicker.name())
            }
            HandCategory::StraightFlush => format!("Straight Flush: {} high", top.name()),
            HandCategory::RoyalFlush => "Royal Flush".to_string(),
        }
    }
}

impl fmt::Display for HandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
