use crate::model::build::Build;
use crate::model::card::Card;
use crate::model::round::MoveError;

/// Decides whether playing `hand_card` may capture the selected loose table
/// cards and builds. Read-only; never touches state.
pub fn validate(hand_card: Card, table_cards: &[Card], builds: &[&Build]) -> Result<(), MoveError> {
    if hand_card.is_face() {
        return validate_face(hand_card, table_cards, builds);
    }
    validate_numeric(hand_card, table_cards, builds)
}

fn validate_face(hand_card: Card, table_cards: &[Card], builds: &[&Build]) -> Result<(), MoveError> {
    if table_cards.is_empty() && builds.is_empty() {
        return Err(MoveError::NoMatchingCombination);
    }
    for build in builds {
        if build.face_rank() != Some(hand_card.rank) {
            return Err(MoveError::FaceRankMismatch);
        }
    }
    if table_cards.iter().any(|c| c.rank != hand_card.rank) {
        return Err(MoveError::FaceRankMismatch);
    }
    Ok(())
}

fn validate_numeric(
    hand_card: Card,
    table_cards: &[Card],
    builds: &[&Build],
) -> Result<(), MoveError> {
    let target = hand_card.capture_value();
    for build in builds {
        if build.is_face() || build.value() != target {
            return Err(MoveError::BuildValueMismatch);
        }
    }

    // Face cards belong to the face capture class, never to numeric sums.
    if table_cards.iter().any(|c| c.is_face()) {
        return Err(MoveError::NoMatchingCombination);
    }

    match table_cards.len() {
        0 if builds.is_empty() => Err(MoveError::NoMatchingCombination),
        0 => Ok(()),
        1 if table_cards[0].capture_value() == target => Ok(()),
        1 => Err(MoveError::NoMatchingCombination),
        _ => {
            let values: Vec<u8> = table_cards.iter().map(|c| c.capture_value()).collect();
            let sum: u32 = values.iter().map(|&v| v as u32).sum();
            if sum == target as u32 || partitions_exactly(&values, target) {
                Ok(())
            } else {
                Err(MoveError::NoMatchingCombination)
            }
        }
    }
}

/// Covering-partition test: can `values` be split into disjoint subsets that
/// each sum to `target`, using every value exactly once? Exhaustive search
/// over the selection (small by construction), pruned once a partial sum
/// exceeds the target.
pub fn partitions_exactly(values: &[u8], target: u8) -> bool {
    if target == 0 || values.iter().any(|&v| v == 0 || v > target) {
        return false;
    }
    let total: u32 = values.iter().map(|&v| v as u32).sum();
    if total % target as u32 != 0 {
        return false;
    }
    let mut used = vec![false; values.len()];
    cover_remaining(values, &mut used, target)
}

fn cover_remaining(values: &[u8], used: &mut [bool], target: u8) -> bool {
    let Some(first) = used.iter().position(|&u| !u) else {
        return true;
    };
    used[first] = true;
    let found = extend_subset(values, used, target, values[first], first + 1);
    used[first] = false;
    found
}

fn extend_subset(values: &[u8], used: &mut [bool], target: u8, sum: u8, start: usize) -> bool {
    if sum == target {
        return cover_remaining(values, used, target);
    }
    for index in start..values.len() {
        if used[index] || sum + values[index] > target {
            continue;
        }
        used[index] = true;
        if extend_subset(values, used, target, sum + values[index], index + 1) {
            return true;
        }
        used[index] = false;
    }
    false
}
