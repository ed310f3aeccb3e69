use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A card is identified by its rank and suit; the pair is unique across the
/// 52-card universe, so no separate id is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn capture_value(self) -> u8 {
        self.rank.capture_value()
    }

    pub const fn is_face(self) -> bool {
        self.rank.is_face()
    }

    /// The 2 of spades, worth one bonus point when captured.
    pub const fn is_little_casino(self) -> bool {
        matches!(self.rank, Rank::Two) && matches!(self.suit, Suit::Spades)
    }

    /// The 10 of diamonds, worth two bonus points when captured.
    pub const fn is_big_casino(self) -> bool {
        matches!(self.rank, Rank::Ten) && matches!(self.suit, Suit::Diamonds)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
