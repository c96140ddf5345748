use holdem_table::cards::{Card, Rank, Suit};
use holdem_table::evaluator::{choose, evaluate_best, evaluate_five, hand_strength, HandCategory};
use proptest::prelude::*;
use std::cmp::Ordering;

fn any_rank() -> impl Strategy<Value = Rank> {
    (0usize..13).prop_map(Rank::from_position)
}

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Clubs), Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Spades),]
}

fn any_card() -> impl Strategy<Value = Card> {
    (any_rank(), any_suit()).prop_map(|(r, s)| Card::new(r, s))
}

/// `n` distinct cards.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence((0u8..52).collect::<Vec<_>>(), n)
        .prop_shuffle()
        .prop_map(|idx| idx.into_iter().map(card_at).collect())
}

fn card_at(i: u8) -> Card {
    Card::new(Rank::from_position((i % 13) as usize), Suit::ALL[(i / 13) as usize])
}

fn straight_cards(top: usize) -> [Card; 5] {
    // `top` is a rank position; 3 (the Five) means the wheel.
    let ranks: [Rank; 5] = if top == 3 {
        [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]
    } else {
        [0, 1, 2, 3, 4].map(|k| Rank::from_position(top - 4 + k))
    };
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    [0, 1, 2, 3, 4].map(|i| Card::new(ranks[i], suits[i]))
}

fn flush_rank_set() -> impl Strategy<Value = Vec<Rank>> {
    prop::collection::btree_set(0usize..13, 5)
        .prop_filter("non-straight ranks", |set| {
            let vals: Vec<usize> = set.iter().copied().collect();
            let is_wheel = vals == vec![0, 1, 2, 3, 12];
            let is_straight = vals.windows(2).all(|w| w[1] == w[0] + 1);
            !(is_straight || is_wheel)
        })
        .prop_map(|set| set.into_iter().rev().map(Rank::from_position).collect())
}

proptest! {
    #[test]
    fn five_card_ordering_is_antisymmetric_and_transitive(a in prop::array::uniform5(any_card()), b in prop::array::uniform5(any_card()), c in prop::array::uniform5(any_card())) {
        let ea = evaluate_five(&a);
        let eb = evaluate_five(&b);
        let ec = evaluate_five(&c);

        if ea >= eb && eb >= ea { prop_assert_eq!(ea, eb); }
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
        prop_assert_eq!(ea.cmp(&eb), eb.cmp(&ea).reverse());
    }

    #[test]
    fn seven_card_best_is_at_least_as_good_as_any_five(cards in distinct_cards(7)) {
        let best7 = evaluate_best(&cards).unwrap();
        let mut subsets = 0;
        for i in 0..3 { for j in (i+1)..4 { for k in (j+1)..5 { for l in (k+1)..6 { for m in (l+1)..7 {
            let five = [cards[i], cards[j], cards[k], cards[l], cards[m]];
            let e5 = evaluate_five(&five);
            prop_assert!(best7 >= e5);
            subsets += 1;
        }}}}}
        prop_assert_eq!(subsets, choose(7, 5));
    }

    #[test]
    fn best_hand_is_one_of_the_inputs(cards in distinct_cards(7)) {
        let best = evaluate_best(&cards).unwrap();
        for c in best.cards {
            prop_assert!(cards.contains(&c));
        }
        prop_assert_eq!(hand_strength(&cards), best.category);
    }

    #[test]
    fn input_order_does_not_matter(mut cards in distinct_cards(6)) {
        let before = evaluate_best(&cards).unwrap();
        cards.reverse();
        prop_assert_eq!(evaluate_best(&cards).unwrap(), before);
    }

    #[test]
    fn straight_ordering_respects_top_card(top_hi in 4usize..=12, top_lo in 3usize..=11) {
        prop_assume!(top_hi > top_lo);
        let e_hi = evaluate_five(&straight_cards(top_hi));
        let e_lo = evaluate_five(&straight_cards(top_lo));
        prop_assert_eq!(e_hi.category, HandCategory::Straight);
        prop_assert_eq!(e_lo.category, HandCategory::Straight);
        prop_assert!(e_hi > e_lo);
    }

    #[test]
    fn flush_kicker_ordering(a in flush_rank_set(), b in flush_rank_set()) {
        let hand_a: [Card; 5] = [0, 1, 2, 3, 4].map(|i| Card::new(a[i], Suit::Hearts));
        let hand_b: [Card; 5] = [0, 1, 2, 3, 4].map(|i| Card::new(b[i], Suit::Spades));
        let e_a = evaluate_five(&hand_a);
        let e_b = evaluate_five(&hand_b);
        prop_assert_eq!(e_a.category, HandCategory::Flush);
        prop_assert_eq!(e_b.category, HandCategory::Flush);

        // Both rank lists are already descending.
        match a.cmp(&b) {
            Ordering::Greater => prop_assert!(e_a > e_b),
            Ordering::Less => prop_assert!(e_a < e_b),
            Ordering::Equal => prop_assert_eq!(e_a, e_b),
        }
    }
}
