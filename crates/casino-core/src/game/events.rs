use crate::game::score::RoundScore;
use crate::model::action::ActionKind;
use crate::model::deck::DealtCard;
use crate::model::player::Seat;
use crate::model::score::GameResult;

/// Everything a caller needs to narrate the match, emitted in the order it
/// happened. Values carry the facts; presentation stays with the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted {
        round_number: u32,
        dealer: Seat,
    },
    CardsDealt {
        dealt: Vec<DealtCard>,
    },
    MoveResolved {
        seat: Seat,
        kind: ActionKind,
        sweep: bool,
        message: String,
    },
    TurnAdvanced {
        next_seat: Seat,
    },
    /// Leftover table cards went to the last capturer; `None` when the
    /// round saw no capture at all.
    ResidueAwarded {
        seat: Option<Seat>,
    },
    RoundEnded {
        scores: RoundScore,
        totals: [u32; 4],
    },
    GameEnded {
        result: GameResult,
    },
}
