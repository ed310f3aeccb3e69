use crate::model::action::{Action, ActionKind};
use crate::model::build::BuildId;
use crate::model::card::Card;
use crate::model::deck::{DealDestination, DealtCard, Deck};
use crate::model::hand::Hand;
use crate::model::player::{Player, Seat};
use crate::model::table::TableState;
use crate::rules;
use std::collections::HashSet;

/// One round of play: four players, the table, and the remaining deck,
/// which the round owns exclusively. `apply_action` is the single atomic
/// transition; between calls the state is always consistent.
#[derive(Debug, Clone)]
pub struct RoundState {
    players: [Player; 4],
    table: TableState,
    deck: Deck,
    dealer: Seat,
    first_seat: Seat,
    current_seat: Seat,
    last_capturer: Option<Seat>,
    is_last_deal: bool,
    phase: RoundPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Playing,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    RoundComplete,
    OutOfTurn { expected: Seat, actual: Seat },
    CardNotInHand(Card),
    CardNotOnTable(Card),
    UnknownBuild(BuildId),
    DuplicateSelection,
    NoMatchingCombination,
    FaceRankMismatch,
    BuildValueMismatch,
    MissingCapturingCard,
    MissingBuildValue,
    BuildValueOutOfRange(u8),
    BuildNotExtendable(BuildId),
    ActiveBuildBlocksTrail,
}

/// What a resolved move looked like, for event emission and messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub seat: Seat,
    pub kind: ActionKind,
    pub sweep: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Advanced {
        resolution: Resolution,
        next_seat: Seat,
    },
    Redealt {
        resolution: Resolution,
        dealt: Vec<DealtCard>,
        next_seat: Seat,
    },
    RoundOver {
        resolution: Resolution,
    },
}

impl RoundState {
    /// Opens a round: shuffled deck in, two passes of two cards per seat
    /// plus two table cards per pass dealt out. The seat left of the dealer
    /// acts first.
    pub fn deal(mut deck: Deck, dealer: Seat, humans: [bool; 4]) -> (Self, Vec<DealtCard>) {
        let dealt = deck
            .deal(dealer, true)
            .expect("a fresh deck covers the opening deal");
        let first_seat = dealer.next();
        let mut round = Self {
            players: Seat::LOOP.map(|seat| Player::new(seat, humans[seat.index()])),
            table: TableState::new(),
            deck,
            dealer,
            first_seat,
            current_seat: first_seat,
            last_capturer: None,
            is_last_deal: false,
            phase: RoundPhase::Playing,
        };
        round.apply_dealt(&dealt);
        (round, dealt)
    }

    /// Assembles a round from explicit parts. Intended for tests and tools;
    /// no conservation is implied.
    pub fn from_parts(
        hands: [Hand; 4],
        loose: Vec<Card>,
        deck: Deck,
        dealer: Seat,
        current_seat: Seat,
    ) -> Self {
        let mut players = Seat::LOOP.map(|seat| Player::new(seat, false));
        for (player, hand) in players.iter_mut().zip(hands) {
            *player.hand_mut() = hand;
        }
        let mut table = TableState::new();
        for card in loose {
            table.add_loose(card);
        }
        Self {
            players,
            table,
            deck,
            dealer,
            first_seat: dealer.next(),
            current_seat,
            last_capturer: None,
            is_last_deal: false,
            phase: RoundPhase::Playing,
        }
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        self.players[seat.index()].hand()
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Direct table access for tests and tools; gameplay goes through
    /// `apply_action`.
    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn first_seat(&self) -> Seat {
        self.first_seat
    }

    pub fn current_seat(&self) -> Seat {
        self.current_seat
    }

    pub fn last_capturer(&self) -> Option<Seat> {
        self.last_capturer
    }

    pub fn is_last_deal(&self) -> bool {
        self.is_last_deal
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// The multiset union of hands, captured piles, loose cards, build
    /// cards, and the remaining deck is the 52-card universe exactly once.
    /// Holds for dealt rounds at every stable point between moves.
    pub fn is_conserved(&self) -> bool {
        let mut seen = HashSet::with_capacity(52);
        let mut total = 0usize;
        let mut visit = |card: Card| {
            total += 1;
            seen.insert(card);
        };
        for player in &self.players {
            player.hand().iter().copied().for_each(&mut visit);
            player.captured().iter().copied().for_each(&mut visit);
        }
        self.table.loose().iter().copied().for_each(&mut visit);
        for build in self.table.builds() {
            build.cards().iter().copied().for_each(&mut visit);
        }
        self.deck.cards().iter().copied().for_each(&mut visit);
        total == 52 && seen.len() == 52
    }

    pub fn apply_action(&mut self, seat: Seat, action: &Action) -> Result<TurnOutcome, MoveError> {
        if self.phase != RoundPhase::Playing {
            return Err(MoveError::RoundComplete);
        }
        if seat != self.current_seat {
            return Err(MoveError::OutOfTurn {
                expected: self.current_seat,
                actual: seat,
            });
        }
        let hand_card = action.hand_card();
        if !self.players[seat.index()].hand().contains(hand_card) {
            return Err(MoveError::CardNotInHand(hand_card));
        }

        let resolution = match action {
            Action::Capture {
                hand_card,
                table_cards,
                builds,
            } => self.resolve_capture(seat, *hand_card, table_cards, builds)?,
            Action::Build {
                hand_card,
                table_cards,
                builds,
                value,
            } => self.resolve_build(seat, *hand_card, table_cards, builds, *value)?,
            Action::Trail { hand_card } => self.resolve_trail(seat, *hand_card)?,
        };

        Ok(self.advance(resolution))
    }

    /// Moves residual loose and build cards to the last capturer at round
    /// end; if nobody captured all round they simply leave play.
    pub fn award_residue(&mut self) -> Option<Seat> {
        let cards = self.table.drain_all();
        match self.last_capturer {
            Some(seat) => {
                self.players[seat.index()].capture(cards);
                Some(seat)
            }
            None => None,
        }
    }

    fn resolve_capture(
        &mut self,
        seat: Seat,
        hand_card: Card,
        table_cards: &[Card],
        builds: &[BuildId],
    ) -> Result<Resolution, MoveError> {
        self.check_selection(table_cards, builds)?;
        let build_refs: Vec<_> = builds
            .iter()
            .map(|&id| self.table.build(id).expect("existence checked"))
            .collect();
        rules::capture::validate(hand_card, table_cards, &build_refs)?;

        let player = &mut self.players[seat.index()];
        player.hand_mut().remove(hand_card);
        player.capture([hand_card]);
        for &card in table_cards {
            self.table.remove_loose(card);
        }
        self.players[seat.index()].capture(table_cards.iter().copied());
        for &id in builds {
            let build = self.table.remove_build(id).expect("existence checked");
            self.players[seat.index()].capture(build.into_cards());
        }

        self.last_capturer = Some(seat);
        let sweep = self.table.is_cleared();
        let message = if sweep {
            self.players[seat.index()].record_sweep();
            "Sweep!".to_string()
        } else if hand_card.is_face() {
            format!("Taking {}s", hand_card.rank)
        } else {
            format!("Taking {}s", hand_card.capture_value())
        };
        Ok(Resolution {
            seat,
            kind: ActionKind::Capture,
            sweep,
            message,
        })
    }

    fn resolve_build(
        &mut self,
        seat: Seat,
        hand_card: Card,
        table_cards: &[Card],
        builds: &[BuildId],
        value: Option<u8>,
    ) -> Result<Resolution, MoveError> {
        self.check_selection(table_cards, builds)?;
        let build_refs: Vec<_> = builds
            .iter()
            .map(|&id| self.table.build(id).expect("existence checked"))
            .collect();
        let hand = self.players[seat.index()].hand();

        let kind = if hand_card.is_face() {
            rules::build::validate_face_build(hand_card, table_cards, &build_refs, hand)?
        } else {
            let value = value.ok_or(MoveError::MissingBuildValue)?;
            rules::build::validate_numeric_build(
                seat,
                hand_card,
                table_cards,
                &build_refs,
                value,
                hand,
            )?
        };

        self.players[seat.index()].hand_mut().remove(hand_card);
        let mut cards = vec![hand_card];
        for &card in table_cards {
            self.table.remove_loose(card);
            cards.push(card);
        }
        for &id in builds {
            let build = self.table.remove_build(id).expect("existence checked");
            cards.extend(build.into_cards());
        }
        self.table.add_build(seat, cards, kind);

        let message = match kind {
            crate::model::build::BuildKind::Face(rank) => format!("Building {rank}s"),
            crate::model::build::BuildKind::Numeric(value) => format!("Building {value}s"),
        };
        Ok(Resolution {
            seat,
            kind: ActionKind::Build,
            sweep: false,
            message,
        })
    }

    fn resolve_trail(&mut self, seat: Seat, hand_card: Card) -> Result<Resolution, MoveError> {
        if self.table.seat_owns_build(seat) {
            return Err(MoveError::ActiveBuildBlocksTrail);
        }
        self.players[seat.index()].hand_mut().remove(hand_card);
        self.table.add_loose(hand_card);
        Ok(Resolution {
            seat,
            kind: ActionKind::Trail,
            sweep: false,
            message: format!("Trailing {}", hand_card.rank),
        })
    }

    fn check_selection(&self, table_cards: &[Card], builds: &[BuildId]) -> Result<(), MoveError> {
        // Each table card and build may be selected once; a repeat would
        // double-count in the rule checks and double-capture on resolution.
        let mut seen_cards = HashSet::with_capacity(table_cards.len());
        for &card in table_cards {
            if !self.table.contains_loose(card) {
                return Err(MoveError::CardNotOnTable(card));
            }
            if !seen_cards.insert(card) {
                return Err(MoveError::DuplicateSelection);
            }
        }
        let mut seen_builds = HashSet::with_capacity(builds.len());
        for &id in builds {
            if self.table.build(id).is_none() {
                return Err(MoveError::UnknownBuild(id));
            }
            if !seen_builds.insert(id) {
                return Err(MoveError::DuplicateSelection);
            }
        }
        Ok(())
    }

    fn advance(&mut self, resolution: Resolution) -> TurnOutcome {
        let hands_empty = self.players.iter().all(|p| p.hand().is_empty());
        if !hands_empty {
            self.current_seat = self.current_seat.next();
            return TurnOutcome::Advanced {
                resolution,
                next_seat: self.current_seat,
            };
        }

        if self.deck.is_empty() {
            self.phase = RoundPhase::Complete;
            return TurnOutcome::RoundOver { resolution };
        }

        // Fresh hands, no table cards; the deck accounting guarantees the
        // sixteen cards are there.
        let dealt = self
            .deck
            .deal(self.dealer, false)
            .expect("redeal always finds sixteen cards");
        self.apply_dealt(&dealt);
        self.is_last_deal = self.deck.is_empty();
        self.current_seat = self.first_seat;
        TurnOutcome::Redealt {
            resolution,
            dealt,
            next_seat: self.first_seat,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_captured_for_test(&mut self, piles: [Vec<Card>; 4]) {
        for (player, pile) in self.players.iter_mut().zip(piles) {
            player.capture(pile);
        }
    }

    #[cfg(test)]
    pub(crate) fn set_sweeps_for_test(&mut self, seat: Seat, sweeps: u32) {
        for _ in 0..sweeps {
            self.players[seat.index()].record_sweep();
        }
    }

    fn apply_dealt(&mut self, dealt: &[DealtCard]) {
        for entry in dealt {
            match entry.destination {
                DealDestination::Seat(seat) => {
                    self.players[seat.index()].hand_mut().add(entry.card)
                }
                DealDestination::Table => self.table.add_loose(entry.card),
            }
        }
    }
}
