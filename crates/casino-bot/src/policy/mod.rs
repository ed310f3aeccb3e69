mod heuristic;

pub use heuristic::HeuristicPolicy;

use casino_core::model::action::Action;
use casino_core::model::hand::Hand;
use casino_core::model::player::Seat;
use casino_core::model::round::RoundState;
use casino_core::model::score::ScoreBoard;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub round: &'a RoundState,
    pub scores: &'a ScoreBoard,
}

/// Unified interface for AI decision-making
pub trait Policy: Send {
    /// Choose the move to submit for the context seat. Must return an
    /// action the rules accept for that seat's current state.
    fn choose_action(&mut self, ctx: &PolicyContext) -> Action;
}
