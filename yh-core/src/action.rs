//! Player actions driving the turn state machines.

use crate::category::Combo;

/// One player input. The same action set drives both the single-player and
/// the duel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Redraw every die not held.
    Roll,
    /// Flip the hold flag of die `0..=4`.
    ToggleHold(u8),
    /// Score the current hand into an open slot and end the turn.
    Select(Combo),
}
