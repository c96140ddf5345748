use holdem_table::agents::{CallingStation, SeatKind};
use holdem_table::config::TableConfig;
use holdem_table::table::{ActionOutcome, Phase, SettlementReason, Table};

fn mk_table(n: usize) -> Table {
    let cfg = TableConfig::default().with_seed(17).with_bot_delay_ms(0);
    let mut t = Table::with_policy(cfg, Box::new(CallingStation)).unwrap();
    t.start_new_game(n).unwrap();
    for seat in 0..n {
        t.set_seat_kind(seat, SeatKind::Human).unwrap();
    }
    t
}

#[test]
fn next_phase_deals_each_street_in_turn() {
    let mut t = mk_table(3);
    let expected = [(Phase::Flop, 3), (Phase::Turn, 4), (Phase::River, 5)];
    for (phase, cards) in expected {
        assert_eq!(t.next_phase().unwrap(), ActionOutcome::Applied);
        assert_eq!(t.phase(), phase);
        assert_eq!(t.community().len(), cards);
        assert_eq!(t.highest_bet(), 0);
        assert_eq!(t.current(), Some(1), "action restarts left of the dealer");
    }
}

#[test]
fn next_phase_on_the_river_settles() {
    let mut t = mk_table(3);
    for _ in 0..4 {
        t.next_phase().unwrap();
    }
    assert!(!t.is_hand_live());
    assert_eq!(t.phase(), Phase::Showdown);
    let s = t.last_settlement().unwrap();
    assert_eq!(s.reason, SettlementReason::Showdown);
    assert_eq!(s.pot, 30);
    assert!(s.rows.iter().all(|r| r.best_hand.is_some()));
    let total: u64 = t.players().iter().map(|p| p.balance()).sum();
    assert_eq!(total, 3000);

    assert_eq!(t.next_phase().unwrap(), ActionOutcome::Ignored);
}

#[test]
fn descriptions_follow_the_board() {
    let mut t = mk_table(2);
    assert!(t.seat_description(0).is_some());
    t.next_phase().unwrap();
    let descriptions = t.hand_descriptions();
    assert_eq!(descriptions.len(), 2);
    assert!(descriptions.iter().all(|d| d.is_some()));
    assert!(t.seat_description(5).is_none());
}

#[test]
fn next_phase_waits_for_a_thinking_bot() {
    let cfg = TableConfig::default().with_seed(17).with_bot_delay_ms(500);
    let mut t = Table::with_policy(cfg, Box::new(CallingStation)).unwrap();
    t.start_new_game(2).unwrap();
    assert_eq!(t.current(), Some(1));
    assert_eq!(t.pending().map(|p| p.seat), Some(1));

    assert_eq!(t.next_phase().unwrap(), ActionOutcome::Ignored);
    assert_eq!(t.phase(), Phase::Preflop);
    assert!(t.community().is_empty());
    assert_eq!(t.pending().map(|p| p.seat), Some(1));

    assert_eq!(t.run_bots().unwrap(), 1);
    assert_eq!(t.current(), Some(0));
    assert_eq!(t.next_phase().unwrap(), ActionOutcome::Applied);
    assert_eq!(t.phase(), Phase::Flop);
    assert_eq!(t.community().len(), 3);
}
