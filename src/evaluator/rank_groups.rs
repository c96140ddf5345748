use super::HandCategory;
use crate::cards::{Card, Rank};

/// Occurrences per rank, indexed by [`Rank::position`].
pub(crate) type RankCounts = [u8; 13];

pub(crate) fn count_ranks(cards: &[Card]) -> RankCounts {
    let mut counts = [0u8; 13];
    for c in cards {
        counts[c.rank().position()] += 1;
    }
    counts
}

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    pub fn from_counts(counts: &RankCounts) -> Self {
        let mut groups: Vec<(Rank, u8)> = counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(pos, &n)| (Rank::from_position(pos), n))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    /// Ranks that occur exactly `n` times, highest first.
    pub fn with_count(&self, n: u8) -> Vec<Rank> {
        self.groups.iter().filter(|(_, c)| *c == n).map(|(r, _)| *r).collect()
    }

    pub fn quad(&self) -> Option<Rank> {
        self.with_count(4).first().copied()
    }

    pub fn trips(&self) -> Option<Rank> {
        self.with_count(3).first().copied()
    }

    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2)
    }

    pub fn kickers(&self) -> Vec<Rank> {
        self.with_count(1)
    }

    pub fn has_full_house(&self) -> bool {
        self.trips().is_some() && !self.pairs().is_empty()
    }

    /// How often `rank` occurs; drives the significance order of a hand's cards.
    pub fn count_of(&self, rank: Rank) -> u8 {
        self.groups.iter().find(|(r, _)| *r == rank).map_or(0, |(_, c)| *c)
    }

    /// Category implied by rank multiplicities alone. Straights and flushes are the
    /// caller's business.
    pub fn category(&self) -> HandCategory {
        if self.quad().is_some() {
            HandCategory::FourOfAKind
        } else if self.has_full_house() {
            HandCategory::FullHouse
        } else if self.trips().is_some() {
            HandCategory::ThreeOfAKind
        } else {
            match self.pairs().len() {
                0 => HandCategory::HighCard,
                1 => HandCategory::OnePair,
                _ => HandCategory::TwoPair,
            }
        }
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
