use crate::model::build::{Build, BuildKind};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::round::MoveError;

/// Checks a face build: matching-rank table cards and a second card of the
/// rank still in hand, so the build stays capturable by its owner. Returns
/// the kind to stamp on the new build; never mutates.
pub fn validate_face_build(
    hand_card: Card,
    table_cards: &[Card],
    builds: &[&Build],
    hand: &Hand,
) -> Result<BuildKind, MoveError> {
    if !builds.is_empty() {
        // Face builds never absorb existing builds.
        return Err(MoveError::FaceRankMismatch);
    }
    if table_cards.is_empty() {
        return Err(MoveError::NoMatchingCombination);
    }
    if table_cards.iter().any(|c| c.rank != hand_card.rank) {
        return Err(MoveError::FaceRankMismatch);
    }
    if !hand.has_rank_besides(hand_card.rank, hand_card) {
        return Err(MoveError::MissingCapturingCard);
    }
    Ok(BuildKind::Face(hand_card.rank))
}

/// Checks a numeric build: declared value in range, arithmetic exact,
/// absorbed builds owned by the actor, and a second capturing card in hand.
pub fn validate_numeric_build(
    seat: Seat,
    hand_card: Card,
    table_cards: &[Card],
    builds: &[&Build],
    value: u8,
    hand: &Hand,
) -> Result<BuildKind, MoveError> {
    if !(2..=10).contains(&value) {
        return Err(MoveError::BuildValueOutOfRange(value));
    }
    if table_cards.is_empty() && builds.is_empty() {
        return Err(MoveError::NoMatchingCombination);
    }
    if table_cards.iter().any(|c| c.is_face()) {
        return Err(MoveError::NoMatchingCombination);
    }
    for build in builds {
        if build.owner() != seat || build.is_face() {
            return Err(MoveError::BuildNotExtendable(build.id()));
        }
    }
    if !hand.has_value_besides(value, hand_card) {
        return Err(MoveError::MissingCapturingCard);
    }

    let sum = hand_card.capture_value() as u32
        + table_cards
            .iter()
            .map(|c| c.capture_value() as u32)
            .sum::<u32>()
        + builds.iter().map(|b| b.value() as u32).sum::<u32>();
    if sum != value as u32 {
        return Err(MoveError::BuildValueMismatch);
    }
    Ok(BuildKind::Numeric(value))
}
