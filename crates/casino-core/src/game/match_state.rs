use crate::game::events::GameEvent;
use crate::game::score::{DEFAULT_TARGET_SCORE, score_round};
use crate::model::action::Action;
use crate::model::deck::{DealtCard, Deck};
use crate::model::player::Seat;
use crate::model::round::{MoveError, RoundState, TurnOutcome};
use crate::model::score::{GameResult, ScoreBoard};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A full match: rounds dealt from one seeded rng until a seat reaches the
/// target score. Round transitions are caller-driven so a UI can animate the
/// finished round before the next deal.
#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    round_number: u32,
    dealer: Seat,
    target: u32,
    humans: [bool; 4],
    current_round: RoundState,
    opening_deal: Vec<DealtCard>,
    phase: MatchPhase,
    result: Option<GameResult>,
    rng: StdRng,
    seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Playing,
    RoundComplete,
    GameOver,
}

impl MatchState {
    pub fn new(humans: [bool; 4]) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(humans, seed)
    }

    pub fn with_seed(humans: [bool; 4], seed: u64) -> Self {
        Self::with_seed_round(seed, 1, Seat::North, humans, DEFAULT_TARGET_SCORE)
    }

    pub fn with_seed_target(humans: [bool; 4], seed: u64, target: u32) -> Self {
        Self::with_seed_round(seed, 1, Seat::North, humans, target)
    }

    /// Rebuilds the rng stream up to `round_number` by replaying the earlier
    /// shuffles, so a restored match deals the same cards it would have.
    pub fn with_seed_round(
        seed: u64,
        round_number: u32,
        dealer: Seat,
        humans: [bool; 4],
        target: u32,
    ) -> Self {
        let normalized_round = round_number.max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 1..normalized_round {
            let _ = Deck::shuffled(&mut rng);
        }

        let deck = Deck::shuffled(&mut rng);
        let (current_round, opening_deal) = RoundState::deal(deck, dealer, humans);

        Self {
            scores: ScoreBoard::new(),
            round_number: normalized_round,
            dealer,
            target,
            humans,
            current_round,
            opening_deal,
            phase: MatchPhase::Playing,
            result: None,
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn humans(&self) -> [bool; 4] {
        self.humans
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn round(&self) -> &RoundState {
        &self.current_round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.current_round
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// The deal that opened the current round, in deal order.
    pub fn opening_deal(&self) -> &[DealtCard] {
        &self.opening_deal
    }

    /// The seat a bot should act for right now, if any.
    pub fn needs_bot_action(&self) -> Option<Seat> {
        if self.phase != MatchPhase::Playing {
            return None;
        }
        let seat = self.current_round.current_seat();
        if self.humans[seat.index()] {
            None
        } else {
            Some(seat)
        }
    }

    /// Applies one move and runs every consequence that follows from it:
    /// redeal, round scoring, and match end. Rejected moves change nothing.
    pub fn submit(&mut self, seat: Seat, action: &Action) -> Result<Vec<GameEvent>, MoveError> {
        if self.phase != MatchPhase::Playing {
            return Err(MoveError::RoundComplete);
        }

        let outcome = self.current_round.apply_action(seat, action)?;
        let mut events = Vec::new();
        let resolution = match &outcome {
            TurnOutcome::Advanced { resolution, .. }
            | TurnOutcome::Redealt { resolution, .. }
            | TurnOutcome::RoundOver { resolution } => resolution,
        };
        events.push(GameEvent::MoveResolved {
            seat: resolution.seat,
            kind: resolution.kind,
            sweep: resolution.sweep,
            message: resolution.message.clone(),
        });

        match outcome {
            TurnOutcome::Advanced { next_seat, .. } => {
                events.push(GameEvent::TurnAdvanced { next_seat });
            }
            TurnOutcome::Redealt { dealt, next_seat, .. } => {
                events.push(GameEvent::CardsDealt { dealt });
                events.push(GameEvent::TurnAdvanced { next_seat });
            }
            TurnOutcome::RoundOver { .. } => {
                self.finish_round(&mut events);
            }
        }
        Ok(events)
    }

    /// Deals the next round after scoring; the deal rotates one seat left.
    /// Returns `None` unless the match is between rounds.
    pub fn start_next_round(&mut self) -> Option<Vec<GameEvent>> {
        if self.phase != MatchPhase::RoundComplete {
            return None;
        }

        self.round_number += 1;
        self.dealer = self.dealer.next();
        let deck = Deck::shuffled(&mut self.rng);
        let (round, dealt) = RoundState::deal(deck, self.dealer, self.humans);
        self.current_round = round;
        self.opening_deal = dealt.clone();
        self.phase = MatchPhase::Playing;

        Some(vec![
            GameEvent::RoundStarted {
                round_number: self.round_number,
                dealer: self.dealer,
            },
            GameEvent::CardsDealt { dealt },
        ])
    }

    fn finish_round(&mut self, events: &mut Vec<GameEvent>) {
        let residue_to = self.current_round.award_residue();
        events.push(GameEvent::ResidueAwarded { seat: residue_to });

        let scores = score_round(&self.current_round);
        for seat in Seat::LOOP {
            self.scores.add_points(seat, scores.points_for(seat));
        }
        events.push(GameEvent::RoundEnded {
            scores,
            totals: *self.scores.standings(),
        });

        match self.scores.game_result(self.target) {
            Some(result) => {
                self.phase = MatchPhase::GameOver;
                events.push(GameEvent::GameEnded {
                    result: result.clone(),
                });
                self.result = Some(result);
            }
            None => {
                self.phase = MatchPhase::RoundComplete;
            }
        }
    }
}
