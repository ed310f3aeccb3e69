use crate::model::card::Card;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

/// One of the four fixed seats: the cards currently playable, the pile of
/// captured cards (order irrelevant), and the sweep count for the round.
#[derive(Debug, Clone)]
pub struct Player {
    seat: Seat,
    is_human: bool,
    hand: Hand,
    captured: Vec<Card>,
    sweeps: u32,
}

impl Player {
    pub fn new(seat: Seat, is_human: bool) -> Self {
        Self {
            seat,
            is_human,
            hand: Hand::new(),
            captured: Vec::new(),
            sweeps: 0,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn captured(&self) -> &[Card] {
        &self.captured
    }

    pub fn capture(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.captured.extend(cards);
    }

    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }

    pub fn record_sweep(&mut self) {
        self.sweeps += 1;
    }
}
