use crate::model::player::Seat;
use serde::{Deserialize, Serialize};

/// Cumulative match totals per seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [u32; 4],
}

/// End-of-match outcome: every seat at or past the target, and the single
/// winner among them (highest total; seat order breaks exact ties).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Seat,
    pub finishers: Vec<Seat>,
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub fn add_points(&mut self, seat: Seat, points: u32) {
        self.totals[seat.index()] += points;
    }

    pub fn set_totals(&mut self, totals: [u32; 4]) {
        self.totals = totals;
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.totals
    }

    /// Checks the board against the target after a scored round. `None`
    /// while nobody has reached it.
    pub fn game_result(&self, target: u32) -> Option<GameResult> {
        let finishers: Vec<Seat> = Seat::LOOP
            .iter()
            .copied()
            .filter(|seat| self.score(*seat) >= target)
            .collect();
        if finishers.is_empty() {
            return None;
        }
        // max_by_key keeps the later of equal keys; iterate in reverse so
        // the earliest seat in table order wins exact ties.
        let winner = Seat::LOOP
            .iter()
            .rev()
            .copied()
            .max_by_key(|seat| self.score(*seat))
            .unwrap_or(Seat::North);
        Some(GameResult { winner, finishers })
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
