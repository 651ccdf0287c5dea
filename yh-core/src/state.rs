//! Game state values: score cards and the per-mode round state.
//!
//! All state is plain `Copy` data. Transitions live in [`crate::engine`] and
//! [`crate::duel`]; nothing here mutates outside those modules' control flow.

use serde::{Deserialize, Serialize};

use crate::category::{Combo, ALL_COMBOS, NUM_COMBOS};

/// Five dice; `None` before the first roll of a turn draws them.
pub type Hand = [Option<u8>; 5];

/// Per-die hold flags, same length as the hand.
pub type HeldMask = [bool; 5];

/// Rolls available at the start of every turn.
pub const ROLLS_PER_TURN: u8 = 3;

/// Upper-section total at which the one-time bonus is granted.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;

/// Upper-section bonus points.
pub const UPPER_BONUS: u32 = 35;

/// A hand with no dice drawn yet.
pub const EMPTY_HAND: Hand = [None; 5];

/// One player's card: 13 write-once slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreCard {
    slots: [Option<u32>; NUM_COMBOS],
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, combo: Combo) -> Option<u32> {
        self.slots[combo.index()]
    }

    /// Write a score into an open slot. Returns false (and changes nothing)
    /// if the slot was already filled.
    pub fn set(&mut self, combo: Combo, points: u32) -> bool {
        let slot = &mut self.slots[combo.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(points);
        true
    }

    /// True once every combination has been scored.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    /// Number of filled slots (0..=13). Doubles as the turn index.
    pub fn filled(&self) -> u8 {
        self.slots.iter().filter(|s| s.is_some()).count() as u8
    }

    /// Sum of the upper section (Aces..Sixes), filled slots only.
    pub fn upper_total(&self) -> u32 {
        self.slots[..6].iter().flatten().sum()
    }

    /// Grand total including the one-time +35 upper bonus at 63.
    pub fn total(&self) -> u32 {
        let raw: u32 = self.slots.iter().flatten().sum();
        if self.upper_total() >= UPPER_BONUS_THRESHOLD {
            raw + UPPER_BONUS
        } else {
            raw
        }
    }

    /// Iterate slots in card order.
    pub fn iter(&self) -> impl Iterator<Item = (Combo, Option<u32>)> + '_ {
        ALL_COMBOS.iter().map(move |&c| (c, self.get(c)))
    }
}

/// Single-player round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub hand: Hand,
    pub held: HeldMask,
    pub card: ScoreCard,
    /// Rolls remaining this turn, 0..=3.
    pub rolls_left: u8,
    /// True once the current turn has rolled; gates `Select`.
    pub can_select: bool,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            hand: EMPTY_HAND,
            held: [false; 5],
            card: ScoreCard::new(),
            rolls_left: ROLLS_PER_TURN,
            can_select: false,
        }
    }

    /// The round ends exactly when the card is complete.
    pub fn round_ended(&self) -> bool {
        self.card.is_complete()
    }

    /// 0-based index of the current turn within the round.
    pub fn turn_idx(&self) -> u8 {
        self.card.filled()
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-player round state: one card per player, one shared hand owned by
/// whoever is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelState {
    pub cards: [ScoreCard; 2],
    pub hand: Hand,
    pub held: HeldMask,
    /// Active player, 0 or 1.
    pub active: u8,
    pub rolls_left: u8,
    /// True once the active player has rolled this turn; gates `Select`.
    pub has_rolled: bool,
}

impl DuelState {
    pub fn new() -> Self {
        Self {
            cards: [ScoreCard::new(); 2],
            hand: EMPTY_HAND,
            held: [false; 5],
            active: 0,
            rolls_left: ROLLS_PER_TURN,
            has_rolled: false,
        }
    }

    pub fn active_card(&self) -> &ScoreCard {
        &self.cards[self.active as usize]
    }

    /// The round ends when both cards are complete.
    pub fn round_ended(&self) -> bool {
        self.cards.iter().all(ScoreCard::is_complete)
    }

    /// 0-based turn index for the active player.
    pub fn turn_idx(&self) -> u8 {
        self.active_card().filled()
    }
}

impl Default for DuelState {
    fn default() -> Self {
        Self::new()
    }
}
