//! Which transitions the current state admits.
//!
//! A single projection both the transition layer and UI callers share, so
//! "disable the roll button" and "reject the roll action" can never drift
//! apart.

use crate::category::{ALL_COMBOS, NUM_COMBOS};
use crate::state::{DuelState, RoundState, ROLLS_PER_TURN};

/// Legality of each action kind in the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOptions {
    pub can_roll: bool,
    pub can_hold: bool,
    /// Per-combination selectability, indexed by `Combo::index()`.
    pub selectable: [bool; NUM_COMBOS],
}

impl TurnOptions {
    fn none() -> Self {
        Self {
            can_roll: false,
            can_hold: false,
            selectable: [false; NUM_COMBOS],
        }
    }

    pub fn any_selectable(&self) -> bool {
        self.selectable.iter().any(|&s| s)
    }
}

/// Options for a single-player round.
pub fn round_options(s: &RoundState) -> TurnOptions {
    if s.round_ended() {
        return TurnOptions::none();
    }
    let mut selectable = [false; NUM_COMBOS];
    if s.can_select {
        for (i, &c) in ALL_COMBOS.iter().enumerate() {
            selectable[i] = s.card.get(c).is_none();
        }
    }
    TurnOptions {
        can_roll: s.rolls_left > 0,
        // Holding only makes sense once this turn has dice on the table.
        can_hold: s.rolls_left < ROLLS_PER_TURN,
        selectable,
    }
}

/// Options for the active player of a duel.
pub fn duel_options(s: &DuelState) -> TurnOptions {
    if s.round_ended() {
        return TurnOptions::none();
    }
    let mut selectable = [false; NUM_COMBOS];
    if s.has_rolled {
        let card = s.active_card();
        for (i, &c) in ALL_COMBOS.iter().enumerate() {
            selectable[i] = card.get(c).is_none();
        }
    }
    TurnOptions {
        can_roll: s.rolls_left > 0,
        can_hold: s.has_rolled,
        selectable,
    }
}
