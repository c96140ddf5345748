use holdem_table::agents::{CallingStation, SeatKind};
use holdem_table::cards::parse_cards;
use holdem_table::config::{OddChipRule, TableConfig};
use holdem_table::deck::Deck;
use holdem_table::evaluator::HandCategory;
use holdem_table::table::{Action, SettlementReason, Table};

/// Seats `n` humans, then replaces the opening hand with one dealt from `stack`.
/// The abandoned first hand is refunded and the button moves to seat 1.
fn stacked_table(n: usize, cfg: TableConfig, stack: &str) -> Table {
    let mut t = Table::with_policy(cfg.with_seed(3).with_bot_delay_ms(0), Box::new(CallingStation))
        .unwrap();
    t.start_new_game(n).unwrap();
    for seat in 0..n {
        t.set_seat_kind(seat, SeatKind::Human).unwrap();
    }
    t.start_new_hand_with_deck(Deck::stacked(&parse_cards(stack).unwrap())).unwrap();
    assert_eq!(t.dealer(), 1);
    t
}

fn check_down(t: &mut Table) {
    while t.is_hand_live() {
        assert!(t.player_action(Action::CallOrCheck).unwrap().is_applied());
    }
}

#[test]
fn aces_beat_kings_at_showdown() {
    let mut t = stacked_table(2, TableConfig::default(), "As Ah Ks Kh 2c 7d 9h Jc 4s");
    assert_eq!(t.players()[0].hole().unwrap().as_array().to_vec(), parse_cards("As Ah").unwrap());
    check_down(&mut t);

    assert_eq!(t.community().len(), 5);
    let s = t.last_settlement().unwrap();
    assert_eq!(s.reason, SettlementReason::Showdown);
    assert_eq!(s.winners, vec![0]);
    assert_eq!(s.pot, 40);
    assert_eq!((s.rows[0].won, s.rows[0].net), (40, 20));
    assert_eq!((s.rows[1].won, s.rows[1].net), (0, -20));
    let best = s.rows[0].best_hand.unwrap();
    assert_eq!(best.category, HandCategory::OnePair);
    assert_eq!(best.describe(), "Pair of Aces with Jack kicker");
    assert_eq!(s.rows[1].best_hand.unwrap().describe(), "Pair of Kings with Jack kicker");
    assert_eq!(t.players()[0].balance(), 1020);
    assert_eq!(t.players()[1].balance(), 980);
    assert_eq!(t.players()[0].last_action(), Some("Win 40"));
}

#[test]
fn board_tie_splits_the_pot() {
    let mut t = stacked_table(2, TableConfig::default(), "2c 3d 4c 5d As Ks Qs Js Ts");
    check_down(&mut t);
    let s = t.last_settlement().unwrap();
    assert_eq!(s.winners.len(), 2);
    assert_eq!((s.split, s.odd_chips), (20, 0));
    assert!(s.rows.iter().all(|r| r.net == 0));
    assert_eq!(t.players()[0].last_action(), Some("Split 20"));
}

/// Seat 1 (button) limps, seat 2 folds its small blind, seat 0 checks: a 25 chip pot that
/// seats 0 and 1 split on a royal board.
fn odd_pot(rule: OddChipRule) -> Table {
    let cfg = TableConfig::default().with_blinds(5, 10).with_odd_chips(rule);
    let mut t = stacked_table(3, cfg, "2c 3d 4c 5d 2h 3h As Ks Qs Js Ts");
    assert_eq!(t.current(), Some(1));
    t.player_action(Action::CallOrCheck).unwrap();
    t.player_action(Action::Fold).unwrap();
    check_down(&mut t);
    t
}

#[test]
fn odd_chip_goes_left_of_the_dealer() {
    let t = odd_pot(OddChipRule::LeftOfDealer);
    let s = t.last_settlement().unwrap();
    assert_eq!(s.pot, 25);
    assert_eq!((s.split, s.odd_chips), (12, 1));
    // Seat 2 sits directly left of the button but folded; seat 0 is next.
    assert_eq!(s.rows[0].won, 13);
    assert_eq!(s.rows[1].won, 12);
    let balances: Vec<u64> = t.players().iter().map(|p| p.balance()).collect();
    assert_eq!(balances, vec![1003, 1002, 995]);
}

#[test]
fn discarded_odd_chip_leaves_the_table() {
    let t = odd_pot(OddChipRule::Discard);
    let s = t.last_settlement().unwrap();
    assert_eq!((s.rows[0].won, s.rows[1].won), (12, 12));
    let total: u64 = t.players().iter().map(|p| p.balance()).sum();
    assert_eq!(total, 2999);
}

#[test]
fn folded_seats_show_no_best_hand() {
    let t = odd_pot(OddChipRule::LeftOfDealer);
    let s = t.last_settlement().unwrap();
    assert!(s.rows[2].best_hand.is_none());
    assert_eq!(s.rows[2].net, -5);
    assert_eq!(s.rows[0].best_hand.unwrap().category, HandCategory::RoyalFlush);
}
