use crate::category::{Combo, ALL_COMBOS};
use crate::state::{DuelState, RoundState, ScoreCard, UPPER_BONUS, UPPER_BONUS_THRESHOLD};

#[test]
fn card_slots_are_write_once() {
    let mut card = ScoreCard::new();
    assert_eq!(card.get(Combo::Yahtzee), None);
    assert!(card.set(Combo::Yahtzee, 50));
    assert_eq!(card.get(Combo::Yahtzee), Some(50));

    // Second write is refused and changes nothing.
    assert!(!card.set(Combo::Yahtzee, 0));
    assert_eq!(card.get(Combo::Yahtzee), Some(50));
}

#[test]
fn complete_iff_all_thirteen_filled() {
    let mut card = ScoreCard::new();
    for (n, &c) in ALL_COMBOS.iter().enumerate() {
        assert!(!card.is_complete());
        assert_eq!(card.filled(), n as u8);
        assert!(card.set(c, 1));
    }
    assert!(card.is_complete());
    assert_eq!(card.filled(), 13);
}

#[test]
fn upper_bonus_granted_at_threshold() {
    let mut card = ScoreCard::new();
    // Three of each upper face: 3+6+9+12+15+18 = 63.
    for &c in &ALL_COMBOS[..6] {
        let face = u32::from(c.upper_face().unwrap());
        assert!(card.set(c, 3 * face));
    }
    assert_eq!(card.upper_total(), UPPER_BONUS_THRESHOLD);
    assert_eq!(card.total(), 63 + UPPER_BONUS);

    // One point short (aces at 2 instead of 3): no bonus.
    let mut short = ScoreCard::new();
    assert!(short.set(Combo::Aces, 2));
    for &c in &ALL_COMBOS[1..6] {
        let face = u32::from(c.upper_face().unwrap());
        assert!(short.set(c, 3 * face));
    }
    assert_eq!(short.upper_total(), 62);
    assert_eq!(short.total(), 62);
}

#[test]
fn lower_section_does_not_feed_the_bonus() {
    let mut card = ScoreCard::new();
    assert!(card.set(Combo::Yahtzee, 50));
    assert!(card.set(Combo::Chance, 30));
    assert_eq!(card.upper_total(), 0);
    assert_eq!(card.total(), 80);
}

#[test]
fn fresh_round_state() {
    let s = RoundState::new();
    assert_eq!(s.hand, [None; 5]);
    assert_eq!(s.held, [false; 5]);
    assert_eq!(s.rolls_left, 3);
    assert!(!s.can_select);
    assert!(!s.round_ended());
    assert_eq!(s.turn_idx(), 0);
}

#[test]
fn fresh_duel_state() {
    let s = DuelState::new();
    assert_eq!(s.active, 0);
    assert!(!s.has_rolled);
    assert!(!s.round_ended());
    assert_eq!(s.turn_idx(), 0);
}

#[test]
fn duel_round_ends_only_when_both_cards_complete() {
    let mut s = DuelState::new();
    for &c in &ALL_COMBOS {
        assert!(s.cards[0].set(c, 1));
    }
    assert!(!s.round_ended());
    for &c in &ALL_COMBOS {
        assert!(s.cards[1].set(c, 1));
    }
    assert!(s.round_ended());
}
