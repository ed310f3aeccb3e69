use crate::model::build::{Build, BuildId, BuildKind};
use crate::model::card::Card;
use crate::model::player::Seat;

/// Loose cards and active builds between the seats. Every card in play sits
/// in exactly one hand, captured pile, the loose set, one build, or the
/// remaining deck.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    loose: Vec<Card>,
    builds: Vec<Build>,
    next_build_id: u32,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loose(&self) -> &[Card] {
        &self.loose
    }

    pub fn builds(&self) -> &[Build] {
        &self.builds
    }

    pub fn build(&self, id: BuildId) -> Option<&Build> {
        self.builds.iter().find(|b| b.id() == id)
    }

    pub fn builds_owned_by(&self, seat: Seat) -> impl Iterator<Item = &Build> {
        self.builds.iter().filter(move |b| b.owner() == seat)
    }

    pub fn seat_owns_build(&self, seat: Seat) -> bool {
        self.builds.iter().any(|b| b.owner() == seat)
    }

    pub fn contains_loose(&self, card: Card) -> bool {
        self.loose.contains(&card)
    }

    pub fn add_loose(&mut self, card: Card) {
        self.loose.push(card);
    }

    pub fn remove_loose(&mut self, card: Card) -> bool {
        if let Some(index) = self.loose.iter().position(|&c| c == card) {
            self.loose.remove(index);
            true
        } else {
            false
        }
    }

    pub fn add_build(&mut self, owner: Seat, cards: Vec<Card>, kind: BuildKind) -> BuildId {
        let id = BuildId(self.next_build_id);
        self.next_build_id += 1;
        self.builds.push(Build::new(id, owner, cards, kind));
        id
    }

    pub fn remove_build(&mut self, id: BuildId) -> Option<Build> {
        let index = self.builds.iter().position(|b| b.id() == id)?;
        Some(self.builds.remove(index))
    }

    /// True when nothing is left to capture; a capture that reaches this
    /// state is a sweep.
    pub fn is_cleared(&self) -> bool {
        self.loose.is_empty() && self.builds.is_empty()
    }

    /// Drains every remaining card (loose and built) off the table; used for
    /// the end-of-round residue award.
    pub fn drain_all(&mut self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.loose.drain(..).collect();
        for build in self.builds.drain(..) {
            cards.extend(build.into_cards());
        }
        cards
    }
}
