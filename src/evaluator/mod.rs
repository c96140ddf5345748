//! Hand classification and ordering.
//!
//! Any five cards map to a [`HandCategory`] plus the five cards in significance order;
//! larger holdings are evaluated by trying every five-card subset.

mod combinations;
mod describe;
mod rank_groups;
mod straight_info;

pub use combinations::choose;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use combinations::for_each_subset;
use core::cmp::Ordering;
use core::fmt;
use rank_groups::{count_ranks, RankGroups};
use straight_info::StraightInfo;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified five-card hand.
///
/// `cards` are in significance order: larger rank groups first, then higher ranks, so
/// kickers trail. Straights run from the top card down and the wheel plays its Ace last.
/// Ordering compares the category, then the five ranks pairwise; suits never matter.
#[derive(Debug, Clone, Copy)]
pub struct HandResult {
    pub category: HandCategory,
    pub cards: [Card; 5],
}

impl HandResult {
    pub fn ranks(&self) -> [Rank; 5] {
        self.cards.map(Card::rank)
    }
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| self.ranks().cmp(&other.ranks()))
    }
}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for HandResult {}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: need 5, got {0}")]
    NotEnoughCards(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Classify exactly five cards.
///
/// ```
/// use holdem_table::cards::parse_cards;
/// use holdem_table::evaluator::{evaluate_five, HandCategory};
///
/// let cards: [_; 5] = parse_cards("5c 4d 3h 2s Ac").unwrap().try_into().unwrap();
/// assert_eq!(evaluate_five(&cards).category, HandCategory::Straight);
/// ```
pub fn evaluate_five(cards: &[Card; 5]) -> HandResult {
    let counts = count_ranks(cards);
    let groups = RankGroups::from_counts(&counts);
    let straight = StraightInfo::detect(&counts);
    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());

    // Five distinct cards cannot hold a flush or straight together with a rank group.
    let category = match (is_flush, straight.top_rank) {
        (true, Some(Rank::Ace)) => HandCategory::RoyalFlush,
        (true, Some(_)) => HandCategory::StraightFlush,
        (true, None) => HandCategory::Flush,
        (false, Some(_)) => HandCategory::Straight,
        (false, None) => groups.category(),
    };

    let mut sorted = *cards;
    sorted.sort_by(|a, b| {
        groups
            .count_of(b.rank())
            .cmp(&groups.count_of(a.rank()))
            .then(b.rank().cmp(&a.rank()))
            .then(b.suit().cmp(&a.suit()))
    });
    if straight.is_wheel() {
        sorted.rotate_left(1);
    }
    HandResult { category, cards: sorted }
}

/// Best five-card hand out of five or more distinct cards.
///
/// ```
/// use holdem_table::cards::parse_cards;
/// use holdem_table::evaluator::{evaluate_best, HandCategory};
///
/// let seven = parse_cards("As Ah Ad Ac 2s 3h 4d").unwrap();
/// let best = evaluate_best(&seven).unwrap();
/// assert_eq!(best.category, HandCategory::FourOfAKind);
/// assert_eq!(best.to_string(), "Four of a Kind: Aces with Four kicker");
/// ```
pub fn evaluate_best(cards: &[Card]) -> Result<HandResult, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }
    if let Some(dup) = first_duplicate(cards) {
        return Err(EvalError::DuplicateCard(dup));
    }
    let mut best: Option<HandResult> = None;
    for_each_subset::<Card, 5>(cards, |five| {
        let candidate = evaluate_five(five);
        if best.map_or(true, |b| candidate > b) {
            best = Some(candidate);
        }
    });
    best.ok_or(EvalError::NotEnoughCards(cards.len()))
}

fn first_duplicate(cards: &[Card]) -> Option<Card> {
    let mut seen = 0u64;
    for &c in cards {
        let bit = 1u64 << c.index();
        if seen & bit != 0 {
            return Some(c);
        }
        seen |= bit;
    }
    None
}

/// Evaluate a Hold'em hand given hole cards and a full board.
///
/// ```
/// use holdem_table::evaluator::{evaluate_holdem, HandCategory};
/// use holdem_table::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, HandCategory::OnePair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<HandResult, EvalError> {
    validate_holdem(hole, board)?;
    if board.len() < 5 {
        return Err(EvalError::NotEnoughCards(2 + board.len()));
    }
    evaluate_best(&board.with_hole(hole))
}

/// Compare two Hold'em hands on a shared board.
///
/// ```
/// use holdem_table::evaluator::compare_holdem;
/// use holdem_table::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}

/// Category of whatever a seat can currently see, from 0 to 7 cards. With fewer than five
/// cards only rank groups count, so two hole cards read as a pair or high card.
///
/// ```
/// use holdem_table::cards::parse_cards;
/// use holdem_table::evaluator::{hand_strength, HandCategory};
///
/// assert_eq!(hand_strength(&parse_cards("7c 7d").unwrap()), HandCategory::OnePair);
/// assert_eq!(hand_strength(&parse_cards("7c 2d").unwrap()), HandCategory::HighCard);
/// ```
pub fn hand_strength(cards: &[Card]) -> HandCategory {
    if cards.len() >= 5 {
        if let Ok(best) = evaluate_best(cards) {
            return best.category;
        }
    }
    RankGroups::from_counts(&count_ranks(cards)).category()
}
