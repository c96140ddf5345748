use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested}, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}

/// A standard 52-card deck. The top of the deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use holdem_table::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A full deck whose first deals are `top`, in order; the remaining cards follow in
    /// standard order. Duplicates in `top` are dealt once.
    ///
    /// ```
    /// use holdem_table::cards::parse_cards;
    /// use holdem_table::deck::Deck;
    ///
    /// let mut deck = Deck::stacked(&parse_cards("As Ah Kd").unwrap());
    /// assert_eq!(deck.len(), 52);
    /// assert_eq!(deck.deal(2).unwrap(), parse_cards("As Ah").unwrap());
    /// ```
    pub fn stacked(top: &[Card]) -> Self {
        let mut ordered: Vec<Card> = Vec::with_capacity(52);
        for &c in top {
            if !ordered.contains(&c) {
                ordered.push(c);
            }
        }
        let mut cards: Vec<Card> =
            Self::standard().cards.into_iter().filter(|c| !ordered.contains(c)).collect();
        cards.reverse();
        cards.extend(ordered.into_iter().rev());
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Restore all 52 cards and shuffle them.
    pub fn reset_and_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::standard();
        self.shuffle_with(rng);
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal `n` cards from the top, first dealt first. Asking for more than remain is an
    /// error and leaves the deck untouched.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted { requested: n, remaining: self.cards.len() });
        }
        let at = self.cards.len() - n;
        let mut dealt = self.cards.split_off(at);
        dealt.reverse();
        Ok(dealt)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
