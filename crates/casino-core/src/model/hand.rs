use crate::model::card::Card;
use crate::model::rank::Rank;

#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Build guard: another card of `rank` besides `excluding` is held, so a
    /// face build of that rank stays capturable by its owner.
    pub fn has_rank_besides(&self, rank: Rank, excluding: Card) -> bool {
        self.cards
            .iter()
            .any(|&c| c != excluding && c.rank == rank)
    }

    /// Build guard: another card worth `value` besides `excluding` is held,
    /// so a numeric build of that value stays capturable by its owner.
    pub fn has_value_besides(&self, value: u8, excluding: Card) -> bool {
        value > 0
            && self
                .cards
                .iter()
                .any(|&c| c != excluding && c.capture_value() == value)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
    }
}
