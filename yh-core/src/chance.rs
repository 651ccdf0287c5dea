//! Deterministic event-keyed dice stream.
//!
//! Dice outcomes are defined by game seed + structural event, not by evolving
//! RNG state. Event key: (game_seed, player, turn_idx, roll_idx) with
//! roll_idx in {0,1,2}. Each key deterministically yields a sequence of 5 die
//! values; rerolling k dice consumes the first k values of that sequence.
//! Replaying the same actions with the same seed reproduces every hand.

use crate::state::{Hand, HeldMask};

/// Structural event key for deterministic dice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub game_seed: u64,
    pub player: u8,
    pub turn_idx: u8,
    pub roll_idx: u8,
}

/// SplitMix64 step (fast, deterministic).
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn mix_seed(key: EventKey) -> u64 {
    // Fixed, stable mixing. Avoid std Hash/RandomState.
    let mut x = key.game_seed;
    x ^= (key.player as u64).wrapping_mul(0xD6E8FEB86659FD93);
    x ^= (key.turn_idx as u64).wrapping_mul(0xA5A35625E4F7C1AD);
    x ^= (key.roll_idx as u64).wrapping_mul(0x9E3779B97F4A7C15);
    let mut s = x;
    splitmix64_next(&mut s)
}

/// Deterministically generate 5 die values (1..=6) for the given event key.
pub fn draw5(key: EventKey) -> [u8; 5] {
    let mut state = mix_seed(key);
    let mut out = [0u8; 5];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % 6) + 1) as u8;
    }
    out
}

/// Redraw every unheld (or still unset) die from the event-keyed stream;
/// held dice pass through unchanged.
///
/// Held positions must already be set; that is the hold rule's invariant and
/// is enforced by the transition layer.
pub fn reroll_unheld(hand: Hand, held: HeldMask, key: EventKey) -> Hand {
    let draws = draw5(key);
    let mut next = hand;
    let mut k = 0usize;
    for i in 0..5 {
        if held[i] && hand[i].is_some() {
            continue;
        }
        next[i] = Some(draws[k]);
        k += 1;
    }
    next
}
