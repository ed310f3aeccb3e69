use crate::model::player::Seat;
use crate::model::rank::Rank;
use crate::model::round::RoundState;

/// First score at or past this ends the match.
pub const DEFAULT_TARGET_SCORE: u32 = 21;

pub const MOST_CARDS_POINTS: u32 = 3;
pub const MOST_SPADES_POINTS: u32 = 1;
pub const LITTLE_CASINO_POINTS: u32 = 1;
pub const BIG_CASINO_POINTS: u32 = 2;
pub const ACE_POINTS: u32 = 1;
pub const SWEEP_POINTS: u32 = 1;

/// One seat's scoring inputs and the points they produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatScore {
    pub cards: usize,
    pub spades: usize,
    pub aces: u32,
    pub sweeps: u32,
    pub little_casino: bool,
    pub big_casino: bool,
    pub points: u32,
}

/// A finished round's scoring, with the majority awards broken out. A tied
/// majority pays nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundScore {
    pub seats: [SeatScore; 4],
    pub most_cards: Option<Seat>,
    pub most_spades: Option<Seat>,
}

impl RoundScore {
    pub fn points_for(&self, seat: Seat) -> u32 {
        self.seats[seat.index()].points
    }
}

/// Scores a finished round from the captured piles and sweep counts.
/// Expects the table residue to have been awarded already.
pub fn score_round(round: &RoundState) -> RoundScore {
    let mut seats: [SeatScore; 4] = Default::default();
    for seat in Seat::LOOP {
        let player = round.player(seat);
        let tally = &mut seats[seat.index()];
        tally.cards = player.captured().len();
        for card in player.captured() {
            if card.suit.is_spade() {
                tally.spades += 1;
            }
            if card.rank == Rank::Ace {
                tally.aces += 1;
            }
            tally.little_casino |= card.is_little_casino();
            tally.big_casino |= card.is_big_casino();
        }
        tally.sweeps = player.sweeps();
    }

    let most_cards = unique_max(&seats.each_ref().map(|s| s.cards));
    let most_spades = unique_max(&seats.each_ref().map(|s| s.spades));

    for seat in Seat::LOOP {
        let tally = &mut seats[seat.index()];
        let mut points = tally.aces * ACE_POINTS + tally.sweeps * SWEEP_POINTS;
        if tally.little_casino {
            points += LITTLE_CASINO_POINTS;
        }
        if tally.big_casino {
            points += BIG_CASINO_POINTS;
        }
        if most_cards == Some(seat) {
            points += MOST_CARDS_POINTS;
        }
        if most_spades == Some(seat) {
            points += MOST_SPADES_POINTS;
        }
        tally.points = points;
    }

    RoundScore {
        seats,
        most_cards,
        most_spades,
    }
}

/// The seat holding a strict maximum, if any. Zero counts never win.
fn unique_max(counts: &[usize; 4]) -> Option<Seat> {
    let max = *counts.iter().max().expect("four seats");
    if max == 0 {
        return None;
    }
    let mut holders = Seat::LOOP
        .iter()
        .copied()
        .filter(|seat| counts[seat.index()] == max);
    let first = holders.next();
    if holders.next().is_some() { None } else { first }
}

#[cfg(test)]
mod tests {
    use super::{score_round, unique_max};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::Seat;
    use crate::model::rank::Rank;
    use crate::model::round::RoundState;
    use crate::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn round_with_piles(piles: [Vec<Card>; 4]) -> RoundState {
        let mut round = RoundState::from_parts(
            [Hand::new(), Hand::new(), Hand::new(), Hand::new()],
            vec![],
            Deck::standard(),
            Seat::North,
            Seat::East,
        );
        round.set_captured_for_test(piles);
        round
    }

    #[test]
    fn unique_max_requires_a_strict_winner() {
        assert_eq!(unique_max(&[3, 1, 1, 0]), Some(Seat::North));
        assert_eq!(unique_max(&[3, 3, 1, 0]), None);
        assert_eq!(unique_max(&[0, 0, 0, 0]), None);
    }

    #[test]
    fn majority_awards_go_to_strict_leaders() {
        let round = round_with_piles([
            vec![
                card(Rank::Three, Suit::Hearts),
                card(Rank::Four, Suit::Hearts),
                card(Rank::Five, Suit::Hearts),
            ],
            vec![card(Rank::Six, Suit::Spades), card(Rank::Seven, Suit::Spades)],
            vec![card(Rank::Eight, Suit::Clubs)],
            vec![],
        ]);
        let score = score_round(&round);
        assert_eq!(score.most_cards, Some(Seat::North));
        assert_eq!(score.most_spades, Some(Seat::East));
        assert_eq!(score.points_for(Seat::North), 3);
        assert_eq!(score.points_for(Seat::East), 1);
        assert_eq!(score.points_for(Seat::South), 0);
        assert_eq!(score.seats[Seat::East.index()].spades, 2);
    }

    #[test]
    fn tied_majorities_pay_nobody() {
        let round = round_with_piles([
            vec![card(Rank::Three, Suit::Hearts), card(Rank::Four, Suit::Spades)],
            vec![card(Rank::Six, Suit::Clubs), card(Rank::Seven, Suit::Spades)],
            vec![],
            vec![],
        ]);
        let score = score_round(&round);
        assert_eq!(score.most_cards, None);
        assert_eq!(score.most_spades, None);
        for seat in Seat::LOOP {
            assert_eq!(score.points_for(seat), 0);
        }
    }

    #[test]
    fn special_cards_and_aces_score_individually() {
        let round = round_with_piles([
            vec![
                card(Rank::Two, Suit::Spades),
                card(Rank::Ten, Suit::Diamonds),
                card(Rank::Ace, Suit::Hearts),
                card(Rank::Ace, Suit::Clubs),
            ],
            vec![card(Rank::Nine, Suit::Hearts)],
            vec![],
            vec![],
        ]);
        let score = score_round(&round);
        // 3 most cards + 1 most spades + 1 little + 2 big + 2 aces.
        assert_eq!(score.points_for(Seat::North), 9);
        let tally = &score.seats[Seat::North.index()];
        assert!(tally.little_casino);
        assert!(tally.big_casino);
        assert_eq!(tally.aces, 2);
    }

    #[test]
    fn sweeps_score_one_point_each() {
        let mut round = round_with_piles([
            vec![card(Rank::Nine, Suit::Hearts), card(Rank::Nine, Suit::Clubs)],
            vec![],
            vec![],
            vec![],
        ]);
        round.set_sweeps_for_test(Seat::North, 2);
        let score = score_round(&round);
        // 3 most cards + 2 sweeps; no spades captured at all.
        assert_eq!(score.points_for(Seat::North), 5);
        assert_eq!(score.most_spades, None);
    }
}
