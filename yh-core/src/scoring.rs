//! Scoring rules for the 13 combinations.
//!
//! One pure function evaluates a hand against a combination; it is total over
//! all combinations and returns 0 when a rule is not met. Unset dice are
//! excluded from the computation, so a partially drawn (or fully undrawn)
//! hand still scores.

use crate::category::{Combo, ALL_COMBOS, NUM_COMBOS};
use crate::state::Hand;

/// Face counts (index 0 = face 1) and sum over the set dice.
fn tally(hand: Hand) -> ([u8; 6], u32) {
    let mut counts = [0u8; 6];
    let mut sum = 0u32;
    for d in hand.iter().flatten() {
        debug_assert!((1..=6).contains(d), "die out of range: {}", d);
        counts[(d - 1) as usize] += 1;
        sum += u32::from(*d);
    }
    (counts, sum)
}

/// Distinct faces contain `run` consecutively.
fn has_run(counts: &[u8; 6], start: usize, len: usize) -> bool {
    counts[start..start + len].iter().all(|&c| c >= 1)
}

/// Score `hand` for `combo` under standard Yahtzee rules.
///
/// Straight checks are deliberately asymmetric: Small Straight is a subset
/// test over distinct faces, Large Straight is exact set equality. Full House
/// requires exactly a 3-count and a 2-count (five of a kind does not qualify).
pub fn score(combo: Combo, hand: Hand) -> u32 {
    let (counts, sum) = tally(hand);

    match combo {
        Combo::Aces
        | Combo::Twos
        | Combo::Threes
        | Combo::Fours
        | Combo::Fives
        | Combo::Sixes => {
            let face = combo.index() as u32 + 1;
            u32::from(counts[combo.index()]) * face
        }
        Combo::ThreeOfAKind => {
            if counts.iter().any(|&c| c >= 3) {
                sum
            } else {
                0
            }
        }
        Combo::FourOfAKind => {
            if counts.iter().any(|&c| c >= 4) {
                sum
            } else {
                0
            }
        }
        Combo::FullHouse => {
            if counts.contains(&3) && counts.contains(&2) {
                25
            } else {
                0
            }
        }
        Combo::SmallStraight => {
            if has_run(&counts, 0, 4) || has_run(&counts, 1, 4) || has_run(&counts, 2, 4) {
                30
            } else {
                0
            }
        }
        Combo::LargeStraight => {
            // Exact distinct sets {1..5} or {2..6}: five singleton counts.
            let low = counts[..5].iter().all(|&c| c == 1) && counts[5] == 0;
            let high = counts[1..].iter().all(|&c| c == 1) && counts[0] == 0;
            if low || high {
                40
            } else {
                0
            }
        }
        Combo::Yahtzee => {
            if counts.iter().any(|&c| c == 5) {
                50
            } else {
                0
            }
        }
        Combo::Chance => sum,
    }
}

/// Evaluate all 13 combinations for a hand at once.
pub fn scores_for_hand(hand: Hand) -> [u32; NUM_COMBOS] {
    let mut out = [0u32; NUM_COMBOS];
    for (i, &c) in ALL_COMBOS.iter().enumerate() {
        out[i] = score(c, hand);
    }
    out
}
