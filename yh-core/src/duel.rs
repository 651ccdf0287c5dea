//! Two-player turn alternation over the single-player rules.
//!
//! Both players share one hand and hold mask; the active player's turn
//! implicitly owns them. Scoring writes only the active card, flips the turn
//! flag, and hands the incoming player a fresh turn (undrawn hand, cleared
//! holds, full rolls).

use rustc_hash::FxHashMap;

use crate::action::Action;
use crate::category::{Combo, ALL_COMBOS};
use crate::engine::{event_key_for, validate_dice, ApplyError, TurnContext};
use crate::legal::duel_options;
use crate::scoring::score;
use crate::state::{DuelState, EMPTY_HAND, ROLLS_PER_TURN};

/// Create a fresh duel: player 0 to move, both cards empty.
pub fn initial_duel() -> DuelState {
    DuelState::new()
}

/// Apply an action for the active player.
pub fn apply_duel(
    mut state: DuelState,
    action: Action,
    ctx: &mut TurnContext,
) -> Result<DuelState, ApplyError> {
    validate_state(&state)?;

    let options = duel_options(&state);

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
            let key = event_key_for(ctx, state.active, state.turn_idx(), roll_idx);
            state.hand = ctx.chance.reroll(state.hand, state.held, key);
            state.rolls_left -= 1;
            state.has_rolled = true;
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
            let p = state.active as usize;
            if !state.cards[p].set(combo, points) {
                return Err(ApplyError::InvalidState {
                    msg: "card slot filled behind options check",
                });
            }

            // Hand the turn over with a clean slate.
            state.active = 1u8.saturating_sub(state.active);
            state.hand = EMPTY_HAND;
            state.held = [false; 5];
            state.rolls_left = ROLLS_PER_TURN;
            state.has_rolled = false;
            Ok(state)
        }
    }
}

/// What each open combination of the active player would score right now.
///
/// Read-only projection through the scorer; combinations already filled are
/// absent from the map. Before the first roll of a turn every entry is 0.
pub fn preview(state: &DuelState) -> FxHashMap<Combo, u32> {
    let card = state.active_card();
    let mut out = FxHashMap::default();
    for &c in &ALL_COMBOS {
        if card.get(c).is_none() {
            out.insert(c, score(c, state.hand));
        }
    }
    out
}

/// Winner of a finished duel: 0 or 1 by grand total (upper bonus included),
/// 2 on a draw. `None` while the round is still live.
pub fn duel_winner(state: &DuelState) -> Option<u8> {
    if !state.round_ended() {
        return None;
    }
    let t0 = state.cards[0].total();
    let t1 = state.cards[1].total();
    Some(match t0.cmp(&t1) {
        std::cmp::Ordering::Greater => 0,
        std::cmp::Ordering::Less => 1,
        std::cmp::Ordering::Equal => 2,
    })
}

fn validate_state(s: &DuelState) -> Result<(), ApplyError> {
    if s.active > 1 {
        return Err(ApplyError::InvalidState {
            msg: "active player must be 0 or 1",
        });
    }
    if s.rolls_left > ROLLS_PER_TURN {
        return Err(ApplyError::InvalidState {
            msg: "rolls_left must be in 0..=3",
        });
    }
    validate_dice(&s.hand, &s.held)
}
