use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Cards are drawn from the back of the vector, so the last element is the
/// next card dealt.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealDestination {
    Seat(Seat),
    Table,
}

/// One card leaving the deck during a deal, in deal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealtCard {
    pub destination: DealDestination,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealError {
    InsufficientCards { required: usize, available: usize },
}

const PASSES: usize = 2;
const CARDS_PER_SEAT_PER_PASS: usize = 2;
const TABLE_CARDS_PER_PASS: usize = 2;

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deals two passes: two cards to each seat starting left of the dealer
    /// and ending at the dealer, then two cards to the table when
    /// `include_table` (the opening deal of a round). Returns the dealt
    /// cards in order; the deck keeps whatever was not consumed.
    pub fn deal(&mut self, dealer: Seat, include_table: bool) -> Result<Vec<DealtCard>, DealError> {
        let per_pass =
            Seat::LOOP.len() * CARDS_PER_SEAT_PER_PASS + if include_table { TABLE_CARDS_PER_PASS } else { 0 };
        let required = PASSES * per_pass;
        if self.cards.len() < required {
            return Err(DealError::InsufficientCards {
                required,
                available: self.cards.len(),
            });
        }

        let order = [dealer.next(), dealer.next().next(), dealer.next().next().next(), dealer];
        let mut dealt = Vec::with_capacity(required);
        for _ in 0..PASSES {
            for seat in order.iter().copied() {
                for _ in 0..CARDS_PER_SEAT_PER_PASS {
                    let card = self.cards.pop().expect("length checked above");
                    dealt.push(DealtCard {
                        destination: DealDestination::Seat(seat),
                        card,
                    });
                }
            }
            if include_table {
                for _ in 0..TABLE_CARDS_PER_PASS {
                    let card = self.cards.pop().expect("length checked above");
                    dealt.push(DealtCard {
                        destination: DealDestination::Table,
                        card,
                    });
                }
            }
        }
        Ok(dealt)
    }
}

#[cfg(test)]
mod tests {
    use super::{DealDestination, DealError, Deck};
    use crate::model::player::Seat;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), 52);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let deck = Deck::shuffled_with_seed(7);
        let mut sorted: Vec<_> = deck.cards().to_vec();
        let mut reference: Vec<_> = Deck::standard().cards().to_vec();
        sorted.sort_by_key(|c| (c.suit, c.rank));
        reference.sort_by_key(|c| (c.suit, c.rank));
        assert_eq!(sorted, reference);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn opening_deal_consumes_twenty_cards_in_order() {
        let mut deck = Deck::shuffled_with_seed(3);
        let dealt = deck.deal(Seat::North, true).unwrap();
        assert_eq!(dealt.len(), 20);
        assert_eq!(deck.remaining(), 32);

        // First seat served sits left of the dealer, two cards at a time.
        assert_eq!(dealt[0].destination, DealDestination::Seat(Seat::East));
        assert_eq!(dealt[1].destination, DealDestination::Seat(Seat::East));
        assert_eq!(dealt[6].destination, DealDestination::Seat(Seat::North));
        assert_eq!(dealt[8].destination, DealDestination::Table);
        assert_eq!(dealt[9].destination, DealDestination::Table);

        let table_cards = dealt
            .iter()
            .filter(|d| d.destination == DealDestination::Table)
            .count();
        assert_eq!(table_cards, 4);
    }

    #[test]
    fn redeal_skips_the_table() {
        let mut deck = Deck::shuffled_with_seed(3);
        deck.deal(Seat::North, true).unwrap();
        let dealt = deck.deal(Seat::North, false).unwrap();
        assert_eq!(dealt.len(), 16);
        assert!(dealt.iter().all(|d| d.destination != DealDestination::Table));
        assert_eq!(deck.remaining(), 16);
    }

    #[test]
    fn round_exhausts_the_deck_in_three_deals() {
        let mut deck = Deck::shuffled_with_seed(11);
        deck.deal(Seat::West, true).unwrap();
        deck.deal(Seat::West, false).unwrap();
        deck.deal(Seat::West, false).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn short_deck_reports_insufficient_cards() {
        let mut deck = Deck::shuffled_with_seed(5);
        deck.deal(Seat::North, true).unwrap();
        deck.deal(Seat::North, false).unwrap();
        deck.deal(Seat::North, false).unwrap();
        assert_eq!(
            deck.deal(Seat::North, false),
            Err(DealError::InsufficientCards {
                required: 16,
                available: 0
            })
        );
    }
}
