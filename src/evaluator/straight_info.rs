use super::rank_groups::RankCounts;
use crate::cards::Rank;

/// Whether a set of ranks contains five consecutive positions, and the top of that run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StraightInfo {
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Scan unique rank positions from the Ace down. The wheel (A-2-3-4-5) plays the Ace
    /// low and reports Five as its top.
    pub fn detect(counts: &RankCounts) -> Self {
        let present = |pos: usize| counts[pos] > 0;
        for top in (4..13).rev() {
            if (top - 4..=top).all(present) {
                return StraightInfo { top_rank: Some(Rank::from_position(top)) };
            }
        }
        let ace = Rank::Ace.position();
        if present(ace) && (0..4).all(present) {
            return StraightInfo { top_rank: Some(Rank::Five) };
        }
        StraightInfo { top_rank: None }
    }

    #[cfg(test)]
    pub fn is_straight(&self) -> bool {
        self.top_rank.is_some()
    }

    pub fn is_wheel(&self) -> bool {
        self.top_rank == Some(Rank::Five)
    }
}
