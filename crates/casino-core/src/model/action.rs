use crate::model::build::BuildId;
use crate::model::card::Card;
use core::fmt;

/// One move request, carrying exactly the fields its rule needs. Cards act
/// as their own ids; builds are referenced by `BuildId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Capture {
        hand_card: Card,
        table_cards: Vec<Card>,
        builds: Vec<BuildId>,
    },
    Build {
        hand_card: Card,
        table_cards: Vec<Card>,
        builds: Vec<BuildId>,
        /// Declared value for numeric builds; `None` for face builds.
        value: Option<u8>,
    },
    Trail {
        hand_card: Card,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Capture,
    Build,
    Trail,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Capture { .. } => ActionKind::Capture,
            Action::Build { .. } => ActionKind::Build,
            Action::Trail { .. } => ActionKind::Trail,
        }
    }

    pub fn hand_card(&self) -> Card {
        match self {
            Action::Capture { hand_card, .. }
            | Action::Build { hand_card, .. }
            | Action::Trail { hand_card } => *hand_card,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::Capture => "capture",
            ActionKind::Build => "build",
            ActionKind::Trail => "trail",
        };
        f.write_str(label)
    }
}
