//! Single-player turn/round state machine.
//!
//! This module is the single place that mutates `RoundState` via rules.
//! States are plain values: `apply` takes the current state by value and
//! returns the next one, or an error that leaves the caller's copy untouched.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use thiserror::Error;

use crate::action::Action;
use crate::chance::{self, EventKey};
use crate::legal::round_options;
use crate::scoring::score;
use crate::state::{Hand, HeldMask, RoundState, ROLLS_PER_TURN};

/// How dice are generated for transitions.
pub enum ChanceMode {
    /// Deterministic, event-keyed dice stream. Requires a game seed.
    DeterministicEventKeyed { game_seed: u64 },
    /// Pseudorandom dice stream backed by a small PRNG.
    Rng { rng: Box<ChaCha8Rng> },
}

impl ChanceMode {
    /// Redraw unheld/unset dice under this chance mode.
    pub(crate) fn reroll(&mut self, hand: Hand, held: HeldMask, key: EventKey) -> Hand {
        match self {
            ChanceMode::DeterministicEventKeyed { .. } => chance::reroll_unheld(hand, held, key),
            ChanceMode::Rng { rng } => {
                let mut next = hand;
                for i in 0..5 {
                    if held[i] && hand[i].is_some() {
                        continue;
                    }
                    next[i] = Some(rng.gen_range(1..=6));
                }
                next
            }
        }
    }
}

/// Mutable transition context: chance mode + any per-game bookkeeping.
pub struct TurnContext {
    pub chance: ChanceMode,
}

impl TurnContext {
    pub fn new_deterministic(game_seed: u64) -> Self {
        Self {
            chance: ChanceMode::DeterministicEventKeyed { game_seed },
        }
    }

    pub fn new_rng(seed: u64) -> Self {
        Self {
            chance: ChanceMode::Rng {
                rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("illegal action {action:?} in current state")]
    IllegalAction { action: Action },
    #[error("invalid state: {msg}")]
    InvalidState { msg: &'static str },
}

/// Create a fresh round: undrawn hand, empty card, full rolls.
pub fn initial_state() -> RoundState {
    RoundState::new()
}

/// Apply an action to a state, producing the next state (or an error if
/// illegal). The scored slot of a card is write-once; re-selecting it yields
/// `IllegalAction` and no state change.
pub fn apply(
    mut state: RoundState,
    action: Action,
    ctx: &mut TurnContext,
) -> Result<RoundState, ApplyError> {
    validate_state(&state)?;

    let options = round_options(&state);

    match action {
        Action::Roll => {
            if !options.can_roll {
                return Err(ApplyError::IllegalAction { action });
            }
            let roll_idx = ROLLS_PER_TURN
                .checked_sub(state.rolls_left)
                .ok_or(ApplyError::InvalidState {
                    msg: "rolls_left out of range for Roll",
                })?;
            let key = event_key_for(ctx, 0, state.turn_idx(), roll_idx);
            state.hand = ctx.chance.reroll(state.hand, state.held, key);
            state.rolls_left -= 1;
            state.can_select = true;
            Ok(state)
        }
        Action::ToggleHold(i) => {
            let i = i as usize;
            let die_set = i < 5 && state.hand[i].is_some();
            if !options.can_hold || !die_set {
                return Err(ApplyError::IllegalAction { action });
            }
            state.held[i] = !state.held[i];
            Ok(state)
        }
        Action::Select(combo) => {
            if !options.selectable[combo.index()] {
                return Err(ApplyError::IllegalAction { action });
            }
            let points = score(combo, state.hand);
            if !state.card.set(combo, points) {
                // selectable already checked the slot; reaching here means
                // the card and options disagree.
                return Err(ApplyError::InvalidState {
                    msg: "card slot filled behind options check",
                });
            }
            state.rolls_left = ROLLS_PER_TURN;
            state.held = [false; 5];
            state.can_select = false;
            Ok(state)
        }
    }
}

pub(crate) fn event_key_for(ctx: &TurnContext, player: u8, turn_idx: u8, roll_idx: u8) -> EventKey {
    let game_seed = match &ctx.chance {
        ChanceMode::DeterministicEventKeyed { game_seed } => *game_seed,
        // Unused in RNG mode, but the reroll path takes a key either way.
        ChanceMode::Rng { .. } => 0,
    };
    EventKey {
        game_seed,
        player,
        turn_idx,
        roll_idx,
    }
}

pub(crate) fn validate_dice(hand: &Hand, held: &HeldMask) -> Result<(), ApplyError> {
    for d in hand.iter().flatten() {
        if !(1..=6).contains(d) {
            return Err(ApplyError::InvalidState {
                msg: "die values must be in 1..=6",
            });
        }
    }
    for i in 0..5 {
        if held[i] && hand[i].is_none() {
            return Err(ApplyError::InvalidState {
                msg: "held die must be set",
            });
        }
    }
    Ok(())
}

fn validate_state(s: &RoundState) -> Result<(), ApplyError> {
    if s.rolls_left > ROLLS_PER_TURN {
        return Err(ApplyError::InvalidState {
            msg: "rolls_left must be in 0..=3",
        });
    }
    validate_dice(&s.hand, &s.held)
}
