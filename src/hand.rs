use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

/// Maximum number of community cards.
pub const BOARD_MAX: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A seat's two private cards.
///
/// ```
/// use holdem_table::cards::{Card, Rank, Suit};
/// use holdem_table::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Community cards, dealt flop (3), turn (1) and river (1).
///
/// ```
/// use holdem_table::hand::Board;
///
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > BOARD_MAX {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        if has_duplicates(&cards) {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Hole cards followed by the board, the input shape the evaluator wants.
    pub fn with_hole(&self, hole: &HoleCards) -> Vec<Card> {
        let mut all = Vec::with_capacity(2 + self.cards.len());
        all.extend_from_slice(&hole.as_array());
        all.extend_from_slice(&self.cards);
        all
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }

    pub(crate) fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

fn has_duplicates(cards: &[Card]) -> bool {
    let set: HashSet<Card> = cards.iter().copied().collect();
    set.len() != cards.len()
}

/// Check that hole cards and a board can coexist in one deal: at most five board cards
/// and no card seen twice.
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > BOARD_MAX {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    if has_duplicates(board.as_slice()) {
        return Err(HandError::DuplicateBoardCards);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    if board.as_slice().iter().any(|c| *c == hole.first() || *c == hole.second()) {
        return Err(HandError::Overlap);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
        assert!(matches!(HoleCards::from_slice(&[a]), Err(HandError::HoleCount(1))));
    }

    #[test]
    fn board_try_new_checks_limits_and_dupes() {
        let six = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        assert!(matches!(Board::try_new(six), Err(HandError::TooManyBoardCards(6))));

        let dupes = parse_cards("2c 2c").unwrap();
        assert!(matches!(Board::try_new(dupes), Err(HandError::DuplicateBoardCards)));
    }

    #[test]
    fn validate_holdem_catches_overlap() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board = Board::new(parse_cards("As 2c 3c").unwrap());
        assert!(matches!(validate_holdem(&hole, &board), Err(HandError::Overlap)));
    }

    #[test]
    fn with_hole_puts_hole_cards_first() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        let board: Board = "2c 3c 4c".parse().unwrap();
        let all = board.with_hole(&hole);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], hole.first());
        assert_eq!(all[4], Card::new(Rank::Four, Suit::Clubs));
    }
}
