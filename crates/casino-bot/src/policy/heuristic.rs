use super::{Policy, PolicyContext};
use casino_core::model::action::Action;
use casino_core::model::build::Build;
use casino_core::model::card::Card;
use tracing::{Level, event};

/// Fixed-priority heuristic: settle owned builds, capture faces, capture
/// numerically, build, trail. First applicable rule wins; within a rule the
/// first matching card in hand order wins.
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for HeuristicPolicy {
    fn choose_action(&mut self, ctx: &PolicyContext) -> Action {
        let (action, rule) = decide(ctx);
        log_decision(ctx, rule, &action);
        action
    }
}

/// Runs the priority chain and names the rule that fired.
pub fn decide(ctx: &PolicyContext) -> (Action, &'static str) {
    if let Some(action) = capture_own_build(ctx) {
        return (action, "own_build");
    }
    if let Some(action) = capture_faces(ctx) {
        return (action, "face_capture");
    }
    if let Some(action) = capture_numeric(ctx) {
        return (action, "numeric_capture");
    }
    if let Some(action) = create_numeric_build(ctx) {
        return (action, "numeric_build");
    }
    if let Some(action) = create_face_build(ctx) {
        return (action, "face_build");
    }

    if ctx.round.table().seat_owns_build(ctx.seat) {
        // A build is only created while its owner holds a capturing card,
        // and the chain above spends that card on the build before anything
        // else, so an owned build with no move left is a bookkeeping bug.
        event!(
            target: "casino_bot::decide",
            Level::ERROR,
            seat = ?ctx.seat,
            hand_size = ctx.hand.len(),
            "no legal move while owning a build"
        );
        panic!("heuristic policy has no legal move for {}", ctx.seat);
    }
    (trail_first(ctx), "trail")
}

/// Rule 1: an owned build whose capturing card is still in hand gets taken,
/// along with the seat's other matching builds and the matching loose cards.
fn capture_own_build(ctx: &PolicyContext) -> Option<Action> {
    for build in ctx.round.table().builds_owned_by(ctx.seat) {
        let Some(&hand_card) = ctx
            .hand
            .cards()
            .iter()
            .find(|c| build.is_capturable_with(**c))
        else {
            continue;
        };

        let table = ctx.round.table();
        let builds: Vec<_> = table
            .builds_owned_by(ctx.seat)
            .filter(|b| b.is_capturable_with(hand_card))
            .map(Build::id)
            .collect();
        let table_cards = if hand_card.is_face() {
            matching_faces(table.loose(), hand_card)
        } else {
            capture_groups(table.loose(), hand_card.capture_value())
        };
        return Some(Action::Capture {
            hand_card,
            table_cards,
            builds,
        });
    }
    None
}

/// Rule 2: the first face card with a matching loose card or opposing face
/// build takes everything of its rank.
fn capture_faces(ctx: &PolicyContext) -> Option<Action> {
    let table = ctx.round.table();
    for &hand_card in ctx.hand.cards().iter().filter(|c| c.is_face()) {
        let table_cards = matching_faces(table.loose(), hand_card);
        let builds: Vec<_> = table
            .builds()
            .iter()
            .filter(|b| b.owner() != ctx.seat && b.face_rank() == Some(hand_card.rank))
            .map(Build::id)
            .collect();
        if !table_cards.is_empty() || !builds.is_empty() {
            return Some(Action::Capture {
                hand_card,
                table_cards,
                builds,
            });
        }
    }
    None
}

/// Rule 3: the first numeric hand card with any match takes its matching
/// opposing builds plus every loose-card group summing to its value.
fn capture_numeric(ctx: &PolicyContext) -> Option<Action> {
    let table = ctx.round.table();
    for &hand_card in ctx.hand.cards().iter().filter(|c| !c.is_face()) {
        let value = hand_card.capture_value();
        let builds: Vec<_> = table
            .builds()
            .iter()
            .filter(|b| b.owner() != ctx.seat && !b.is_face() && b.value() == value)
            .map(Build::id)
            .collect();
        let table_cards = capture_groups(table.loose(), value);
        if table_cards.is_empty() && builds.is_empty() {
            continue;
        }
        return Some(Action::Capture {
            hand_card,
            table_cards,
            builds,
        });
    }
    None
}

/// Rule 4: pair a hand card of value 2 through 9 with one loose card into a
/// build (sum at most 10) that a second hand card can later capture.
fn create_numeric_build(ctx: &PolicyContext) -> Option<Action> {
    let loose = ctx.round.table().loose();
    for &hand_card in ctx.hand.cards().iter() {
        let hand_value = hand_card.capture_value();
        if !(2..=9).contains(&hand_value) {
            continue;
        }
        for &loose_card in loose.iter().filter(|c| !c.is_face()) {
            let value = hand_value + loose_card.capture_value();
            if value > 10 {
                continue;
            }
            if ctx.hand.has_value_besides(value, hand_card) {
                return Some(Action::Build {
                    hand_card,
                    table_cards: vec![loose_card],
                    builds: vec![],
                    value: Some(value),
                });
            }
        }
    }
    None
}

/// Rule 5: a duplicated face rank in hand plus a matching loose card makes a
/// face build; the spare copy stays behind to capture it.
fn create_face_build(ctx: &PolicyContext) -> Option<Action> {
    let loose = ctx.round.table().loose();
    for &hand_card in ctx.hand.cards().iter().filter(|c| c.is_face()) {
        if !ctx.hand.has_rank_besides(hand_card.rank, hand_card) {
            continue;
        }
        let table_cards = matching_faces(loose, hand_card);
        if !table_cards.is_empty() {
            return Some(Action::Build {
                hand_card,
                table_cards,
                builds: vec![],
                value: None,
            });
        }
    }
    None
}

/// Rule 6: trail the first hand card.
fn trail_first(ctx: &PolicyContext) -> Action {
    let hand_card = ctx.hand.cards()[0];
    Action::Trail { hand_card }
}

fn matching_faces(loose: &[Card], hand_card: Card) -> Vec<Card> {
    loose
        .iter()
        .copied()
        .filter(|c| c.rank == hand_card.rank)
        .collect()
}

/// Pulls disjoint groups of non-face loose cards, each summing to `target`,
/// until no further group exists. Every group is capturable at once, so the
/// union is too.
fn capture_groups(loose: &[Card], target: u8) -> Vec<Card> {
    let mut pool: Vec<Card> = loose.iter().copied().filter(|c| !c.is_face()).collect();
    let mut selected = Vec::new();
    loop {
        let values: Vec<u8> = pool.iter().map(|c| c.capture_value()).collect();
        let Some(group) = subset_summing(&values, target) else {
            break;
        };
        for &index in group.iter().rev() {
            selected.push(pool.remove(index));
        }
    }
    selected
}

/// First subset of `values` summing exactly to `target`, as ascending
/// indices. Depth-first with overshoot pruning.
fn subset_summing(values: &[u8], target: u8) -> Option<Vec<usize>> {
    fn dfs(values: &[u8], target: u8, start: usize, sum: u8, picked: &mut Vec<usize>) -> bool {
        if sum == target {
            return true;
        }
        for index in start..values.len() {
            if sum + values[index] > target {
                continue;
            }
            picked.push(index);
            if dfs(values, target, index + 1, sum + values[index], picked) {
                return true;
            }
            picked.pop();
        }
        false
    }

    if target == 0 {
        return None;
    }
    let mut picked = Vec::new();
    if dfs(values, target, 0, 0, &mut picked) {
        Some(picked)
    } else {
        None
    }
}

fn log_decision(ctx: &PolicyContext, rule: &str, action: &Action) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "casino_bot::decide",
        Level::INFO,
        seat = ?ctx.seat,
        rule,
        kind = %action.kind(),
        hand_size = ctx.hand.len(),
        loose = ctx.round.table().loose().len(),
        builds = ctx.round.table().builds().len(),
    );
}

#[cfg(test)]
mod tests {
    use super::decide;
    use crate::policy::PolicyContext;
    use casino_core::model::action::Action;
    use casino_core::model::build::BuildKind;
    use casino_core::model::card::Card;
    use casino_core::model::deck::Deck;
    use casino_core::model::hand::Hand;
    use casino_core::model::player::Seat;
    use casino_core::model::rank::Rank;
    use casino_core::model::round::RoundState;
    use casino_core::model::score::ScoreBoard;
    use casino_core::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn round_for(seat_hand: Vec<Card>, loose: Vec<Card>) -> RoundState {
        let filler = || Hand::with_cards(vec![card(Rank::King, Suit::Diamonds)]);
        RoundState::from_parts(
            [Hand::with_cards(seat_hand), filler(), filler(), filler()],
            loose,
            Deck::standard(),
            Seat::West,
            Seat::North,
        )
    }

    fn decide_for(round: &RoundState, seat: Seat) -> (Action, &'static str) {
        let scores = ScoreBoard::new();
        let ctx = PolicyContext {
            seat,
            hand: round.hand(seat),
            round,
            scores: &scores,
        };
        decide(&ctx)
    }

    #[test]
    fn own_build_is_captured_first() {
        let eight = card(Rank::Eight, Suit::Hearts);
        let mut round = round_for(
            vec![eight, card(Rank::Five, Suit::Clubs)],
            vec![card(Rank::Five, Suit::Diamonds)],
        );
        let id = round.table_mut().add_build(
            Seat::North,
            vec![card(Rank::Six, Suit::Clubs), card(Rank::Two, Suit::Hearts)],
            BuildKind::Numeric(8),
        );

        let (action, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "own_build");
        match action {
            Action::Capture { hand_card, builds, .. } => {
                assert_eq!(hand_card, eight);
                assert_eq!(builds, vec![id]);
            }
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn own_build_capture_vacuums_matching_loose_cards() {
        let eight = card(Rank::Eight, Suit::Hearts);
        let mut round = round_for(
            vec![eight],
            vec![card(Rank::Eight, Suit::Clubs), card(Rank::Three, Suit::Spades)],
        );
        round.table_mut().add_build(
            Seat::North,
            vec![card(Rank::Six, Suit::Clubs), card(Rank::Two, Suit::Hearts)],
            BuildKind::Numeric(8),
        );

        let (action, _) = decide_for(&round, Seat::North);
        match action {
            Action::Capture { table_cards, .. } => {
                assert_eq!(table_cards, vec![card(Rank::Eight, Suit::Clubs)]);
            }
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn own_build_capture_leaves_opposing_builds_alone() {
        let eight = card(Rank::Eight, Suit::Hearts);
        let mut round = round_for(vec![eight], vec![]);
        let own = round.table_mut().add_build(
            Seat::North,
            vec![card(Rank::Six, Suit::Clubs), card(Rank::Two, Suit::Hearts)],
            BuildKind::Numeric(8),
        );
        let _theirs = round.table_mut().add_build(
            Seat::South,
            vec![card(Rank::Five, Suit::Hearts), card(Rank::Three, Suit::Clubs)],
            BuildKind::Numeric(8),
        );

        let (action, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "own_build");
        match action {
            Action::Capture { builds, .. } => assert_eq!(builds, vec![own]),
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn face_cards_take_every_matching_loose_card() {
        let jack = card(Rank::Jack, Suit::Spades);
        let round = round_for(
            vec![jack, card(Rank::Four, Suit::Clubs)],
            vec![
                card(Rank::Jack, Suit::Hearts),
                card(Rank::Jack, Suit::Diamonds),
                card(Rank::Nine, Suit::Clubs),
            ],
        );

        let (action, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "face_capture");
        match action {
            Action::Capture { hand_card, table_cards, .. } => {
                assert_eq!(hand_card, jack);
                assert_eq!(table_cards.len(), 2);
            }
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn opposing_face_builds_are_fair_game() {
        let jack = card(Rank::Jack, Suit::Spades);
        let mut round = round_for(vec![jack], vec![]);
        let id = round.table_mut().add_build(
            Seat::South,
            vec![card(Rank::Jack, Suit::Hearts), card(Rank::Jack, Suit::Clubs)],
            BuildKind::Face(Rank::Jack),
        );

        let (action, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "face_capture");
        match action {
            Action::Capture { builds, .. } => assert_eq!(builds, vec![id]),
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn numeric_capture_takes_the_first_matching_hand_card() {
        // The ten would collect 4+6 and 3+7, but the nine sits earlier in
        // hand order and has a match, so the nine plays.
        let round = round_for(
            vec![card(Rank::Nine, Suit::Hearts), card(Rank::Ten, Suit::Clubs)],
            vec![
                card(Rank::Nine, Suit::Diamonds),
                card(Rank::Four, Suit::Clubs),
                card(Rank::Six, Suit::Spades),
                card(Rank::Three, Suit::Hearts),
                card(Rank::Seven, Suit::Diamonds),
            ],
        );

        let (action, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "numeric_capture");
        match action {
            Action::Capture { hand_card, table_cards, .. } => {
                assert_eq!(hand_card, card(Rank::Nine, Suit::Hearts));
                // The direct 9D match plus the 6+3 group.
                assert_eq!(table_cards.len(), 3);
            }
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn numeric_build_needs_a_guard_card_in_hand() {
        let round = round_for(
            vec![card(Rank::Three, Suit::Clubs), card(Rank::Eight, Suit::Hearts)],
            vec![card(Rank::Five, Suit::Diamonds)],
        );

        let (action, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "numeric_build");
        match action {
            Action::Build { hand_card, table_cards, value, .. } => {
                assert_eq!(hand_card, card(Rank::Three, Suit::Clubs));
                assert_eq!(table_cards, vec![card(Rank::Five, Suit::Diamonds)]);
                assert_eq!(value, Some(8));
            }
            other => panic!("expected build, got {other:?}"),
        }

        // Without the eight there is no guard, so the three trails instead.
        let round = round_for(
            vec![card(Rank::Three, Suit::Clubs), card(Rank::King, Suit::Hearts)],
            vec![card(Rank::Five, Suit::Diamonds)],
        );
        let (_, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "trail");
    }

    #[test]
    fn matching_loose_face_is_captured_not_built() {
        let round = round_for(
            vec![card(Rank::Queen, Suit::Hearts), card(Rank::Queen, Suit::Clubs)],
            vec![card(Rank::Queen, Suit::Spades)],
        );
        let (_, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "face_capture");
    }

    #[test]
    fn trails_the_first_hand_card() {
        let round = round_for(
            vec![
                card(Rank::Seven, Suit::Clubs),
                card(Rank::Ace, Suit::Hearts),
                card(Rank::Two, Suit::Spades),
            ],
            vec![],
        );

        let (action, rule) = decide_for(&round, Seat::North);
        assert_eq!(rule, "trail");
        // Hand order sorts spades first, so the 2♠ leads the hand.
        assert_eq!(
            action,
            Action::Trail {
                hand_card: card(Rank::Two, Suit::Spades)
            }
        );
    }

    #[test]
    #[should_panic(expected = "no legal move")]
    fn owned_build_without_any_move_is_a_breach() {
        let mut round = round_for(vec![card(Rank::King, Suit::Hearts)], vec![]);
        round.table_mut().add_build(
            Seat::North,
            vec![card(Rank::Six, Suit::Clubs), card(Rank::Two, Suit::Hearts)],
            BuildKind::Numeric(8),
        );
        let _ = decide_for(&round, Seat::North);
    }
}
