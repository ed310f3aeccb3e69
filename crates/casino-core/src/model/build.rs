use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::rank::Rank;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildId(pub u32);

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "build-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildKind {
    /// Cards sum exactly to the declared value (2-10).
    Numeric(u8),
    /// Cards all share the rank; captured by rank identity.
    Face(Rank),
}

/// A table formation only its owner may extend; any seat holding a matching
/// card may capture it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Build {
    id: BuildId,
    owner: Seat,
    cards: Vec<Card>,
    kind: BuildKind,
}

impl Build {
    pub fn new(id: BuildId, owner: Seat, cards: Vec<Card>, kind: BuildKind) -> Self {
        debug_assert!(!cards.is_empty());
        Self {
            id,
            owner,
            cards,
            kind,
        }
    }

    pub fn id(&self) -> BuildId {
        self.id
    }

    pub fn owner(&self) -> Seat {
        self.owner
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn kind(&self) -> BuildKind {
        self.kind
    }

    pub fn is_face(&self) -> bool {
        matches!(self.kind, BuildKind::Face(_))
    }

    /// Numeric value of the build; face builds carry none and report zero.
    pub fn value(&self) -> u8 {
        match self.kind {
            BuildKind::Numeric(value) => value,
            BuildKind::Face(_) => 0,
        }
    }

    pub fn face_rank(&self) -> Option<Rank> {
        match self.kind {
            BuildKind::Numeric(_) => None,
            BuildKind::Face(rank) => Some(rank),
        }
    }

    pub fn is_capturable_with(&self, card: Card) -> bool {
        match self.kind {
            BuildKind::Numeric(value) => card.capture_value() == value,
            BuildKind::Face(rank) => card.rank == rank,
        }
    }

    /// Structural invariant: numeric cards sum to the value, face cards all
    /// share the rank.
    pub fn is_consistent(&self) -> bool {
        match self.kind {
            BuildKind::Numeric(value) => {
                (2..=10).contains(&value)
                    && self
                        .cards
                        .iter()
                        .map(|c| c.capture_value() as u32)
                        .sum::<u32>()
                        == value as u32
            }
            BuildKind::Face(rank) => self.cards.iter().all(|c| c.rank == rank),
        }
    }
}
