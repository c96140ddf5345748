//! The betting-round state machine for one Hold'em table.
//!
//! A [`Table`] is created per session, seats players with [`Table::start_new_game`] and is
//! mutated in place for every hand. All mutations happen synchronously inside one call;
//! bot think-time is a deadline the driver polls with [`Table::poll_bot`].

use crate::agents::{BotDecision, CautiousBot, DecisionPolicy, SeatKind};
use crate::cards::Card;
use crate::config::{ConfigError, OddChipRule, TableConfig, MAX_SEATS, MIN_SEATS};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_best, hand_strength, EvalError, HandResult};
use crate::hand::{Board, HoleCards};
use core::fmt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Preflop => "Preflop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
        }
    }

    /// Community cards dealt when leaving this phase.
    fn cards_to_deal(self) -> usize {
        match self {
            Phase::Preflop => 3,
            Phase::Flop | Phase::Turn => 1,
            Phase::River | Phase::Showdown => 0,
        }
    }

    fn next(self) -> Phase {
        match self {
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River | Phase::Showdown => Phase::Showdown,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Seat-level intents for the acting seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CallOrCheck,
    /// Call plus the configured raise increment, capped by the balance.
    Raise,
    Fold,
}

/// Whether an action or poll changed the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Nothing to act on: no live hand, a folded or waiting seat, or a bot still thinking.
    Ignored,
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TableError {
    #[error("seat count must be within 2..=9, got {0}")]
    SeatCount(usize),
    #[error("no seat {0} at this table")]
    NoSuchSeat(usize),
    #[error("fewer than two seats have chips; the session is over")]
    NotEnoughFundedSeats,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Raise => "Raise",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub seat: usize,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
    pub phase: Phase,
}

/// Stable, opaque player identity. Survives seat reordering in front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) balance: u64,
    pub(crate) is_folded: bool,
    pub(crate) is_human: bool,
    pub(crate) is_dealer: bool,
    pub(crate) is_small_blind: bool,
    pub(crate) is_big_blind: bool,
    pub(crate) current_bet: u64,
    pub(crate) contributed: u64,
    pub(crate) last_action: Option<String>,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn is_folded(&self) -> bool {
        self.is_folded
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn kind(&self) -> SeatKind {
        if self.is_human {
            SeatKind::Human
        } else {
            SeatKind::Bot
        }
    }

    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }

    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }

    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }

    /// Chips committed in the current betting round.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Chips committed over the whole hand.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    /// Still in the hand with chips behind.
    pub fn can_act(&self) -> bool {
        !self.is_folded && self.balance > 0
    }

    pub fn is_all_in(&self) -> bool {
        !self.is_folded && self.balance == 0 && self.hole.is_some()
    }
}

/// A bot decision waiting for its think-time to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDecision {
    pub seat: usize,
    pub ready_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementReason {
    Showdown,
    /// Everyone else folded; no cards were compared.
    Uncontested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SettlementRow {
    pub seat: usize,
    pub name: String,
    /// Chips put in over the whole hand.
    pub bet: u64,
    pub won: u64,
    pub net: i64,
    pub balance: u64,
    pub best_hand: Option<HandResult>,
}

/// Summary of how the last pot was paid out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Settlement {
    pub reason: SettlementReason,
    pub winners: Vec<usize>,
    pub pot: u64,
    /// Each winner's even share.
    pub split: u64,
    /// Chips left over after the even split.
    pub odd_chips: u64,
    pub rows: Vec<SettlementRow>,
}

#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    deck: Deck,
    rng: ChaCha8Rng,
    policy: Box<dyn DecisionPolicy>,
    players: Vec<Player>,
    community: Board,
    pot: u64,
    phase: Phase,
    current: Option<usize>,
    highest_bet: u64,
    acted: BTreeSet<usize>,
    dealer: usize,
    hand_live: bool,
    hand_number: u64,
    next_id: u32,
    pending: Option<PendingDecision>,
    last_settlement: Option<Settlement>,
    history: Vec<HandHistoryEntry>,
}

impl Table {
    /// An empty table using the stock bot policy.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        let policy = CautiousBot::new(config.bot_fold_chance, config.seed);
        Self::with_policy(config, Box::new(policy))
    }

    pub fn with_policy(
        config: TableConfig,
        policy: Box<dyn DecisionPolicy>,
    ) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::build(config, policy))
    }

    fn build(config: TableConfig, policy: Box<dyn DecisionPolicy>) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            deck: Deck::standard(),
            rng,
            policy,
            players: Vec::new(),
            community: Board::default(),
            pot: 0,
            phase: Phase::Preflop,
            current: None,
            highest_bet: 0,
            acted: BTreeSet::new(),
            dealer: 0,
            hand_live: false,
            hand_number: 0,
            next_id: 0,
            pending: None,
            last_settlement: None,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn community(&self) -> &[Card] {
        self.community.as_slice()
    }

    pub fn board(&self) -> &Board {
        &self.community
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The acting seat; `None` before the first hand and once a hand is settled.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn highest_bet(&self) -> u64 {
        self.highest_bet
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// A hand has been dealt and not yet settled.
    pub fn is_hand_live(&self) -> bool {
        self.hand_live
    }

    pub fn pending(&self) -> Option<PendingDecision> {
        self.pending
    }

    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    /// Amount the acting seat must add to match the highest bet.
    pub fn to_call(&self) -> u64 {
        self.current.map_or(0, |seat| self.to_call_for(seat))
    }

    pub fn to_call_for(&self, seat: usize) -> u64 {
        if !self.hand_live {
            return 0;
        }
        self.players.get(seat).map_or(0, |p| self.highest_bet.saturating_sub(p.current_bet))
    }

    /// Fewer than two seats have chips and no hand is running.
    pub fn is_session_over(&self) -> bool {
        !self.players.is_empty() && !self.hand_live && self.funded_count() < MIN_SEATS
    }

    /// Best-hand label for a seat still holding cards. Before the board fills this is the
    /// category of what the seat can see so far.
    pub fn seat_description(&self, seat: usize) -> Option<String> {
        let p = self.players.get(seat)?;
        let hole = p.hole?;
        if p.is_folded {
            return None;
        }
        let cards = self.community.with_hole(&hole);
        match evaluate_best(&cards) {
            Ok(best) => Some(best.describe()),
            Err(_) => Some(hand_strength(&cards).to_string()),
        }
    }

    pub fn hand_descriptions(&self) -> Vec<Option<String>> {
        (0..self.players.len()).map(|seat| self.seat_description(seat)).collect()
    }

    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_recent(&self, n: usize) -> Vec<HandHistoryEntry> {
        self.history_recent_offset(n, 0)
    }

    /// Up to `n` entries ending `offset` entries before the newest.
    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HandHistoryEntry> {
        let len = self.history.len();
        if n == 0 || len == 0 {
            return Vec::new();
        }
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    /// Seat `player_count` players with the starting stack (seat 0 human, the rest bots)
    /// and deal the first hand.
    pub fn start_new_game(&mut self, player_count: usize) -> Result<(), TableError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&player_count) {
            return Err(TableError::SeatCount(player_count));
        }
        self.pending = None;
        self.last_settlement = None;
        self.hand_live = false;
        self.hand_number = 0;
        self.players = (0..player_count)
            .map(|seat| {
                self.next_id += 1;
                Player {
                    id: PlayerId(self.next_id),
                    name: format!("Player {}", seat + 1),
                    hole: None,
                    balance: self.config.starting_stack,
                    is_folded: false,
                    is_human: seat == 0,
                    is_dealer: false,
                    is_small_blind: false,
                    is_big_blind: false,
                    current_bet: 0,
                    contributed: 0,
                    last_action: None,
                }
            })
            .collect();
        // The first rotation lands the button on seat 0.
        self.dealer = player_count - 1;
        log::info!("new game: {player_count} seats, {} chips each", self.config.starting_stack);
        self.start_new_hand()
    }

    /// Shuffle a fresh deck and deal the next hand. Balances carry over.
    pub fn start_new_hand(&mut self) -> Result<(), TableError> {
        let mut deck = Deck::standard();
        deck.shuffle_with(&mut self.rng);
        self.start_new_hand_with_deck(deck)
    }

    /// Deal the next hand from a prearranged deck. Hole cards go two at a time to each funded
    /// seat in seat order, then the flop, turn and river follow.
    pub fn start_new_hand_with_deck(&mut self, deck: Deck) -> Result<(), TableError> {
        if self.players.is_empty() {
            return Err(TableError::SeatCount(0));
        }
        self.pending = None;
        if self.hand_live {
            self.refund_abandoned_hand();
        }
        if self.funded_count() < MIN_SEATS {
            log::info!("session over: fewer than {MIN_SEATS} funded seats");
            self.current = None;
            return Err(TableError::NotEnoughFundedSeats);
        }

        self.deck = deck;
        let mut holes: Vec<Option<HoleCards>> = Vec::with_capacity(self.players.len());
        for p in &self.players {
            if p.balance == 0 {
                holes.push(None);
                continue;
            }
            let cards = self.deck.deal(2).map_err(|e| {
                log::error!("dealing hole cards: {e}");
                e
            })?;
            holes.push(Some(HoleCards::from_slice(&cards).map_err(EvalError::from)?));
        }

        self.community.clear();
        self.pot = 0;
        self.acted.clear();
        self.highest_bet = 0;
        self.history.clear();
        self.last_settlement = None;
        self.phase = Phase::Preflop;
        self.hand_live = true;
        self.hand_number += 1;

        self.dealer = self.next_funded_after(self.dealer);
        let sb = self.next_funded_after(self.dealer);
        let bb = self.next_funded_after(sb);
        for (seat, (p, hole)) in self.players.iter_mut().zip(holes).enumerate() {
            p.hole = hole;
            p.is_folded = hole.is_none();
            p.is_dealer = seat == self.dealer;
            p.is_small_blind = seat == sb;
            p.is_big_blind = seat == bb;
            p.current_bet = 0;
            p.contributed = 0;
            p.last_action = None;
        }
        log::info!(
            "hand #{}: dealer seat {}, blinds {}/{} from seats {sb}/{bb}",
            self.hand_number,
            self.dealer,
            self.config.small_blind,
            self.config.big_blind
        );

        let sb_paid = self.post_blind(sb, self.config.small_blind, HandHistoryVerb::SmallBlind);
        let bb_paid = self.post_blind(bb, self.config.big_blind, HandHistoryVerb::BigBlind);
        self.highest_bet = sb_paid.max(bb_paid);
        self.current = Some(bb);
        self.advance_turn(bb)
    }

    /// Apply an action for the acting seat.
    pub fn player_action(&mut self, action: Action) -> Result<ActionOutcome, TableError> {
        if self.pending.is_some() {
            return Ok(ActionOutcome::Ignored);
        }
        match self.current {
            Some(seat) => self.process_action(seat, action),
            None => Ok(ActionOutcome::Ignored),
        }
    }

    /// Fire the pending bot decision if its think-time has elapsed.
    pub fn poll_bot(&mut self) -> Result<ActionOutcome, TableError> {
        self.poll_bot_at(Instant::now())
    }

    pub fn poll_bot_at(&mut self, now: Instant) -> Result<ActionOutcome, TableError> {
        match self.pending {
            Some(p) if now >= p.ready_at => {
                self.pending = None;
                self.fire_bot(p.seat)
            }
            _ => Ok(ActionOutcome::Ignored),
        }
    }

    /// Run every pending bot decision immediately until a human must act or the hand ends.
    /// Returns how many bot actions were applied.
    pub fn run_bots(&mut self) -> Result<usize, TableError> {
        let mut fired = 0;
        while let Some(p) = self.pending.take() {
            if self.fire_bot(p.seat)?.is_applied() {
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// Hand a seat to a human or a bot. Takes effect immediately if the seat is acting.
    pub fn set_seat_kind(&mut self, seat: usize, kind: SeatKind) -> Result<(), TableError> {
        let p = self.players.get_mut(seat).ok_or(TableError::NoSuchSeat(seat))?;
        p.is_human = matches!(kind, SeatKind::Human);
        match kind {
            SeatKind::Human => {
                if self.pending.is_some_and(|d| d.seat == seat) {
                    self.pending = None;
                }
            }
            SeatKind::Bot => {
                if self.current == Some(seat) && self.pending.is_none() && self.hand_live {
                    self.schedule_bot(seat);
                }
            }
        }
        Ok(())
    }

    /// Deal the next street without waiting for the betting round to close. On the river
    /// this settles the hand. Ignored while a bot decision is outstanding.
    pub fn next_phase(&mut self) -> Result<ActionOutcome, TableError> {
        if !self.hand_live || self.phase == Phase::Showdown || self.pending.is_some() {
            return Ok(ActionOutcome::Ignored);
        }
        if self.phase == Phase::River {
            self.phase = Phase::Showdown;
            self.settle_showdown()?;
            return Ok(ActionOutcome::Applied);
        }
        self.deal_next_phase()?;
        self.advance_turn(self.dealer)?;
        Ok(ActionOutcome::Applied)
    }

    fn fire_bot(&mut self, seat: usize) -> Result<ActionOutcome, TableError> {
        if self.current != Some(seat) || self.players[seat].is_human {
            return Ok(ActionOutcome::Ignored);
        }
        let visible = match self.players[seat].hole {
            Some(hole) => self.community.with_hole(&hole),
            None => return Ok(ActionOutcome::Ignored),
        };
        let strength = hand_strength(&visible);
        let action = match self.policy.decide(strength) {
            BotDecision::Fold => Action::Fold,
            BotDecision::CallOrCheck => Action::CallOrCheck,
        };
        log::debug!("seat {seat} bot sees {strength}, chooses {action:?}");
        self.process_action(seat, action)
    }

    fn process_action(&mut self, seat: usize, action: Action) -> Result<ActionOutcome, TableError> {
        if !self.hand_live || self.phase == Phase::Showdown {
            return Ok(ActionOutcome::Ignored);
        }
        let p = &self.players[seat];
        if p.is_folded || p.balance == 0 {
            return Ok(ActionOutcome::Ignored);
        }
        let to_call = self.highest_bet.saturating_sub(p.current_bet);
        let balance = p.balance;

        let (verb, contribution) = match action {
            Action::Fold => (HandHistoryVerb::Fold, 0),
            Action::CallOrCheck => {
                let pay = balance.min(to_call);
                (if pay == 0 { HandHistoryVerb::Check } else { HandHistoryVerb::Call }, pay)
            }
            // Short stacks can only call; the raise degrades to an all-in call.
            Action::Raise if balance <= to_call => (HandHistoryVerb::Call, balance),
            Action::Raise => {
                (HandHistoryVerb::Raise, balance.min(to_call + self.config.raise_increment))
            }
        };

        let p = &mut self.players[seat];
        if verb == HandHistoryVerb::Fold {
            p.is_folded = true;
        } else {
            p.balance -= contribution;
            p.current_bet += contribution;
            p.contributed += contribution;
            self.pot += contribution;
        }
        p.last_action = Some(match verb {
            HandHistoryVerb::Fold | HandHistoryVerb::Check => verb.label().to_string(),
            HandHistoryVerb::Raise => format!("Raise to {}", p.current_bet),
            _ => format!("{} {contribution}", verb.label()),
        });
        let amount = (contribution > 0).then_some(contribution);
        log::debug!(
            "{} {}: {}{}",
            self.phase,
            self.players[seat].name,
            verb.label(),
            amount.map(|a| format!(" {a}")).unwrap_or_default()
        );
        self.record_history(seat, verb, amount);
        self.acted.insert(seat);
        self.highest_bet = self.max_live_bet();
        self.advance_turn(seat)?;
        Ok(ActionOutcome::Applied)
    }

    /// Settle, close the betting round, or pass the turn on from `from`.
    fn advance_turn(&mut self, mut from: usize) -> Result<(), TableError> {
        loop {
            let live: Vec<usize> = self.live_seats().collect();
            if let [only] = live.as_slice() {
                self.settle_uncontested(*only);
                return Ok(());
            }
            if self.round_complete() {
                if self.phase == Phase::River {
                    self.phase = Phase::Showdown;
                    return self.settle_showdown();
                }
                self.deal_next_phase()?;
                from = self.dealer;
                continue;
            }
            let next = self.next_actor_after(from);
            self.current = next;
            if let Some(seat) = next {
                if !self.players[seat].is_human {
                    self.schedule_bot(seat);
                }
            }
            return Ok(());
        }
    }

    /// Every seat that can still act has acted and matched the highest bet. All-in seats
    /// count as matched; a lone seat with chips only has to match.
    fn round_complete(&self) -> bool {
        let actors: Vec<&Player> = self.players.iter().filter(|p| p.can_act()).collect();
        let matched = actors.iter().all(|p| p.current_bet >= self.highest_bet);
        if actors.len() <= 1 {
            return matched;
        }
        matched
            && self
                .players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.can_act())
                .all(|(seat, _)| self.acted.contains(&seat))
    }

    fn deal_next_phase(&mut self) -> Result<(), TableError> {
        let n = self.phase.cards_to_deal();
        let cards = self.deck.deal(n).map_err(|e| {
            log::error!("dealing the {}: {e}", self.phase.next());
            e
        })?;
        self.community.extend(cards);
        self.phase = self.phase.next();
        self.acted.clear();
        self.highest_bet = 0;
        for p in &mut self.players {
            p.current_bet = 0;
        }
        log::debug!(
            "{}: {}",
            self.phase,
            self.community.as_slice().iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        );
        Ok(())
    }

    fn settle_showdown(&mut self) -> Result<(), TableError> {
        let mut results: Vec<(usize, HandResult)> = Vec::new();
        for seat in self.live_seats().collect::<Vec<_>>() {
            if let Some(hole) = self.players[seat].hole {
                let best = evaluate_best(&self.community.with_hole(&hole))?;
                results.push((seat, best));
            }
        }
        let Some(top) = results.iter().map(|(_, r)| *r).max() else {
            self.pay_out(SettlementReason::Showdown, Vec::new(), &results);
            return Ok(());
        };
        let winners: Vec<usize> =
            results.iter().filter(|(_, r)| *r == top).map(|(seat, _)| *seat).collect();
        log::info!("showdown: best hand {top}, winners {winners:?}");
        self.pay_out(SettlementReason::Showdown, winners, &results);
        Ok(())
    }

    fn settle_uncontested(&mut self, seat: usize) {
        log::info!("{} wins {} uncontested", self.players[seat].name, self.pot);
        self.pay_out(SettlementReason::Uncontested, vec![seat], &[]);
    }

    fn pay_out(
        &mut self,
        reason: SettlementReason,
        mut winners: Vec<usize>,
        results: &[(usize, HandResult)],
    ) {
        let n = self.players.len();
        let pot = self.pot;
        let count = winners.len().max(1) as u64;
        let split = pot / count;
        let odd_chips = pot % count;
        let first_left = (self.dealer + 1) % n;
        winners.sort_by_key(|&seat| (seat + n - first_left) % n);

        let mut won = vec![0u64; n];
        for (i, &seat) in winners.iter().enumerate() {
            let bonus = match self.config.odd_chips {
                OddChipRule::LeftOfDealer if (i as u64) < odd_chips => 1,
                _ => 0,
            };
            won[seat] = split + bonus;
        }
        if odd_chips > 0 && self.config.odd_chips == OddChipRule::Discard {
            log::warn!("{odd_chips} odd chip(s) discarded from a {pot} pot");
        }

        let verb = if winners.len() > 1 { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
        for &seat in &winners {
            let p = &mut self.players[seat];
            p.balance += won[seat];
            p.last_action = Some(format!("{} {}", verb.label(), won[seat]));
            self.record_history(seat, verb, Some(won[seat]));
        }

        let rows = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| SettlementRow {
                seat,
                name: p.name.clone(),
                bet: p.contributed,
                won: won[seat],
                net: won[seat] as i64 - p.contributed as i64,
                balance: p.balance,
                best_hand: results.iter().find(|(s, _)| *s == seat).map(|(_, r)| *r),
            })
            .collect();
        self.last_settlement =
            Some(Settlement { reason, winners, pot, split, odd_chips, rows });

        self.pot = 0;
        self.highest_bet = 0;
        for p in &mut self.players {
            p.current_bet = 0;
        }
        self.current = None;
        self.pending = None;
        self.hand_live = false;
    }

    /// Give back every contribution of a hand that is being thrown away mid-play.
    fn refund_abandoned_hand(&mut self) {
        log::warn!("hand #{} abandoned; refunding {} chips", self.hand_number, self.pot);
        for p in &mut self.players {
            p.balance += p.contributed;
            p.contributed = 0;
            p.current_bet = 0;
        }
        self.pot = 0;
        self.hand_live = false;
    }

    fn post_blind(&mut self, seat: usize, amount: u64, verb: HandHistoryVerb) -> u64 {
        let p = &mut self.players[seat];
        let paid = p.balance.min(amount);
        p.balance -= paid;
        p.current_bet += paid;
        p.contributed += paid;
        p.last_action = Some(format!("{} {paid}", verb.label()));
        self.pot += paid;
        self.record_history(seat, verb, Some(paid));
        paid
    }

    fn schedule_bot(&mut self, seat: usize) {
        let ready_at = Instant::now() + Duration::from_millis(self.config.bot_delay_ms);
        self.pending = Some(PendingDecision { seat, ready_at });
    }

    fn live_seats(&self) -> impl Iterator<Item = usize> + '_ {
        self.players.iter().enumerate().filter(|(_, p)| !p.is_folded).map(|(i, _)| i)
    }

    fn max_live_bet(&self) -> u64 {
        self.players.iter().filter(|p| !p.is_folded).map(|p| p.current_bet).max().unwrap_or(0)
    }

    fn funded_count(&self) -> usize {
        self.players.iter().filter(|p| p.balance > 0).count()
    }

    /// Next seat after `start` (wrapping, `start` itself last) with chips behind.
    fn next_funded_after(&self, start: usize) -> usize {
        let n = self.players.len();
        (1..=n).map(|k| (start + k) % n).find(|&i| self.players[i].balance > 0).unwrap_or(start)
    }

    fn next_actor_after(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|k| (start + k) % n).find(|&i| self.players[i].can_act())
    }

    fn record_history(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        self.history.push(HandHistoryEntry { seat, verb, amount, phase: self.phase });
    }
}

impl Default for Table {
    /// An empty table with the default configuration.
    fn default() -> Self {
        let config = TableConfig::default();
        let policy = CautiousBot::new(config.bot_fold_chance, config.seed);
        Self::build(config, Box::new(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::CallingStation;
    use crate::cards::parse_cards;

    fn table(n: usize) -> Table {
        let cfg = TableConfig::default().with_seed(5).with_bot_delay_ms(0);
        let mut t = Table::with_policy(cfg, Box::new(CallingStation)).unwrap();
        t.start_new_game(n).unwrap();
        for seat in 0..n {
            t.set_seat_kind(seat, SeatKind::Human).unwrap();
        }
        t
    }

    fn contributions(t: &Table) -> u64 {
        t.players.iter().map(|p| p.contributed).sum()
    }

    #[test]
    fn phase_order_and_dealing_counts() {
        assert!(Phase::Preflop < Phase::Flop && Phase::River < Phase::Showdown);
        assert_eq!(Phase::Preflop.cards_to_deal(), 3);
        assert_eq!(Phase::Turn.cards_to_deal(), 1);
        assert_eq!(Phase::River.next(), Phase::Showdown);
    }

    #[test]
    fn seat_count_is_bounded() {
        let mut t = Table::new(TableConfig::default()).unwrap();
        assert_eq!(t.start_new_game(1), Err(TableError::SeatCount(1)));
        assert_eq!(t.start_new_game(10), Err(TableError::SeatCount(10)));
        assert!(t.start_new_game(9).is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Table::new(TableConfig::default().with_raise_increment(0)).unwrap_err();
        assert_eq!(err, TableError::Config(ConfigError::ZeroRaiseIncrement));
    }

    #[test]
    fn three_handed_blinds_and_first_actor() {
        let t = table(3);
        assert_eq!(t.dealer(), 0);
        assert!(t.players[1].is_small_blind && t.players[2].is_big_blind);
        assert_eq!(t.pot(), 30);
        assert_eq!(t.highest_bet(), 20);
        assert_eq!(t.current(), Some(0), "first to act sits after the big blind");
        assert_eq!(t.to_call(), 20);
    }

    #[test]
    fn big_blind_gets_the_option() {
        let mut t = table(3);
        t.player_action(Action::CallOrCheck).unwrap();
        t.player_action(Action::CallOrCheck).unwrap();
        assert_eq!(t.phase(), Phase::Preflop);
        assert_eq!(t.current(), Some(2));
        assert_eq!(t.to_call(), 0);
        t.player_action(Action::CallOrCheck).unwrap();
        assert_eq!(t.phase(), Phase::Flop);
        assert_eq!(t.community().len(), 3);
        assert_eq!(t.current(), Some(1), "postflop starts left of the dealer");
    }

    #[test]
    fn raise_reopens_the_round() {
        let mut t = table(3);
        t.player_action(Action::Raise).unwrap();
        assert_eq!(t.highest_bet(), 70);
        assert_eq!(t.players[0].current_bet, 70);
        t.player_action(Action::CallOrCheck).unwrap();
        t.player_action(Action::CallOrCheck).unwrap();
        assert_eq!(t.phase(), Phase::Flop);
        assert_eq!(t.pot(), 210);
        assert_eq!(t.pot(), contributions(&t));
    }

    #[test]
    fn folding_to_one_player_awards_the_pot() {
        let mut t = table(3);
        t.player_action(Action::Fold).unwrap();
        t.player_action(Action::Fold).unwrap();
        let s = t.last_settlement().unwrap();
        assert_eq!(s.reason, SettlementReason::Uncontested);
        assert_eq!(s.winners, vec![2]);
        assert_eq!(t.players[2].balance, 1010);
        assert_eq!(t.players[1].balance, 990);
        assert_eq!(t.pot(), 0);
        assert_eq!(t.phase(), Phase::Preflop, "no phase advance when uncontested");
        assert_eq!(t.current(), None);
        assert_eq!(t.player_action(Action::CallOrCheck).unwrap(), ActionOutcome::Ignored);
    }

    #[test]
    fn short_raise_is_an_all_in_call() {
        let mut t = table(2);
        t.players[1].balance = 5;
        t.player_action(Action::Raise).unwrap();
        assert_eq!(t.players[1].balance, 0);
        assert_eq!(t.players[1].last_action(), Some("Call 5"));
        assert!(!t.is_hand_live(), "board runs out once nobody can bet");
        assert_eq!(t.community().len(), 5);
    }

    #[test]
    fn fold_after_a_big_blind_raise_leaves_two_to_see_the_flop() {
        let mut t = table(3);
        t.player_action(Action::CallOrCheck).unwrap();
        t.player_action(Action::CallOrCheck).unwrap();
        t.player_action(Action::Raise).unwrap();
        assert_eq!(t.highest_bet(), 70);
        t.player_action(Action::CallOrCheck).unwrap();
        t.player_action(Action::Fold).unwrap();
        assert_eq!(t.phase(), Phase::Flop);
        assert_eq!(t.highest_bet(), 0);
        assert_eq!(t.pot(), 160);
        assert_eq!(t.pot(), contributions(&t));
    }

    #[test]
    fn stacked_showdown_settles_with_rows() {
        let mut t = table(2);
        let deck = Deck::stacked(&parse_cards("As Ah Ks Kh Ad Ac 2s 3h 4d").unwrap());
        t.start_new_hand_with_deck(deck).unwrap();
        while t.is_hand_live() {
            assert!(t.player_action(Action::CallOrCheck).unwrap().is_applied());
        }
        let s = t.last_settlement().unwrap();
        assert_eq!(s.reason, SettlementReason::Showdown);
        assert_eq!(s.winners, vec![0]);
        assert_eq!(s.rows[0].net, 20);
        assert_eq!(s.rows[1].net, -20);
        assert_eq!(s.rows[0].best_hand.unwrap().to_string(), "Four of a Kind: Aces with Four kicker");
        assert_eq!(t.players[0].balance + t.players[1].balance, 2000);
    }

    #[test]
    fn abandoned_hand_refunds_contributions() {
        let mut t = table(3);
        t.player_action(Action::Raise).unwrap();
        t.start_new_hand().unwrap();
        let total: u64 = t.players.iter().map(|p| p.balance).sum::<u64>() + t.pot();
        assert_eq!(total, 3000);
    }

    #[test]
    fn history_pages_from_the_newest() {
        let mut t = table(3);
        t.player_action(Action::CallOrCheck).unwrap();
        t.player_action(Action::CallOrCheck).unwrap();
        assert_eq!(t.history_len(), 4);
        let recent = t.history_recent(2);
        assert_eq!(recent[1].verb, HandHistoryVerb::Call);
        assert_eq!(recent[1].seat, 1);
        let older = t.history_recent_offset(2, 2);
        assert_eq!(older[0].verb, HandHistoryVerb::SmallBlind);
        assert_eq!(older[1].verb, HandHistoryVerb::BigBlind);
        assert!(t.history_recent(0).is_empty());
    }
}
