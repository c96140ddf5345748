use holdem_table::agents::{CallingStation, SeatKind};
use holdem_table::cards::parse_cards;
use holdem_table::config::TableConfig;
use holdem_table::deck::Deck;
use holdem_table::table::{Action, Table, TableError};

/// Stacks of one big blind; the opening hand is replaced by a stacked deal with the
/// button on seat 1.
fn short_stacked(n: usize, stack: &str) -> Table {
    let cfg = TableConfig::default().with_starting_stack(20).with_seed(8).with_bot_delay_ms(0);
    let mut t = Table::with_policy(cfg, Box::new(CallingStation)).unwrap();
    t.start_new_game(n).unwrap();
    for seat in 0..n {
        t.set_seat_kind(seat, SeatKind::Human).unwrap();
    }
    t.start_new_hand_with_deck(Deck::stacked(&parse_cards(stack).unwrap())).unwrap();
    t
}

#[test]
fn all_in_seats_run_the_board_out() {
    let mut t = short_stacked(2, "As Ah Ks Kh 2c 7d 9h Jc 4s");
    assert!(t.players()[1].is_all_in(), "big blind is all in");
    t.player_action(Action::CallOrCheck).unwrap();
    assert!(!t.is_hand_live());
    assert_eq!(t.community().len(), 5);
    assert_eq!(t.players()[0].balance(), 40);
    assert_eq!(t.players()[1].balance(), 0);
}

#[test]
fn last_funded_seat_ends_the_session() {
    let mut t = short_stacked(2, "As Ah Ks Kh 2c 7d 9h Jc 4s");
    t.player_action(Action::CallOrCheck).unwrap();
    assert!(t.is_session_over());
    assert_eq!(t.start_new_hand(), Err(TableError::NotEnoughFundedSeats));
    assert_eq!(t.current(), None);

    t.start_new_game(2).unwrap();
    assert!(!t.is_session_over());
    assert!(t.players().iter().all(|p| p.balance() + p.contributed() == 20));
}

#[test]
fn zero_balance_seats_sit_out_the_next_hand() {
    // Seat 1 folds; seat 2 calls all in and loses to seat 0's aces.
    let mut t = short_stacked(3, "As Ah Qc Qd Ks Kh 2c 7d 9h Jc 4s");
    t.player_action(Action::Fold).unwrap();
    t.player_action(Action::CallOrCheck).unwrap();
    assert!(!t.is_hand_live());
    let balances: Vec<u64> = t.players().iter().map(|p| p.balance()).collect();
    assert_eq!(balances, vec![40, 20, 0]);

    t.start_new_hand().unwrap();
    let busted = &t.players()[2];
    assert!(busted.is_folded());
    assert!(busted.hole().is_none());
    assert_eq!(busted.current_bet(), 0);
    assert_eq!(busted.contributed(), 0);
    assert!(!busted.is_dealer() && !busted.is_small_blind() && !busted.is_big_blind());
    assert_ne!(t.current(), Some(2));
}
