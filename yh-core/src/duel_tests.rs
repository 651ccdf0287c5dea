use crate::action::Action;
use crate::category::{Combo, ALL_COMBOS};
use crate::duel::{apply_duel, duel_winner, initial_duel, preview};
use crate::engine::{ApplyError, TurnContext};
use crate::legal::duel_options;
use crate::scoring::score;
use crate::state::DuelState;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn assert_invariants(s: &DuelState) {
    assert!(s.active <= 1);
    assert!(s.rolls_left <= 3);
    for d in s.hand.iter().flatten() {
        assert!((1..=6).contains(d));
    }
}

#[test]
fn select_flips_the_turn_and_writes_one_card_only() {
    let mut ctx = TurnContext::new_deterministic(21);
    let s = initial_duel();
    assert_eq!(s.active, 0);

    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let expected = score(Combo::Chance, s.hand);
    let before_p1 = s.cards[1];

    let s = apply_duel(s, Action::Select(Combo::Chance), &mut ctx).unwrap();
    assert_eq!(s.active, 1);
    assert_eq!(s.cards[0].get(Combo::Chance), Some(expected));
    assert_eq!(s.cards[1], before_p1);
}

#[test]
fn incoming_player_gets_a_fresh_turn() {
    let mut ctx = TurnContext::new_deterministic(22);
    let mut s = apply_duel(initial_duel(), Action::Roll, &mut ctx).unwrap();
    s = apply_duel(s, Action::ToggleHold(0), &mut ctx).unwrap();
    s = apply_duel(s, Action::Roll, &mut ctx).unwrap();

    let s = apply_duel(s, Action::Select(Combo::Aces), &mut ctx).unwrap();
    assert_eq!(s.hand, [None; 5]);
    assert_eq!(s.held, [false; 5]);
    assert_eq!(s.rolls_left, 3);
    assert!(!s.has_rolled);
}

#[test]
fn shared_hand_serves_whoever_is_active() {
    let mut ctx = TurnContext::new_deterministic(23);
    let s = apply_duel(initial_duel(), Action::Roll, &mut ctx).unwrap();
    let s = apply_duel(s, Action::Select(Combo::Yahtzee), &mut ctx).unwrap();

    // Player 1 now rolls and holds the same shared dice.
    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    assert!(s.hand.iter().all(|d| d.is_some()));
    let s = apply_duel(s, Action::ToggleHold(3), &mut ctx).unwrap();
    assert!(s.held[3]);
    assert_eq!(s.active, 1);
}

#[test]
fn select_needs_a_roll_and_an_open_slot() {
    let mut ctx = TurnContext::new_deterministic(24);
    let s = initial_duel();

    let err = apply_duel(s, Action::Select(Combo::Chance), &mut ctx).unwrap_err();
    assert!(matches!(err, ApplyError::IllegalAction { .. }));

    // Fill player 0's chance, come back around, try to re-select it.
    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let s = apply_duel(s, Action::Select(Combo::Chance), &mut ctx).unwrap();
    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let s = apply_duel(s, Action::Select(Combo::Chance), &mut ctx).unwrap();
    assert_eq!(s.active, 0);

    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let err = apply_duel(s, Action::Select(Combo::Chance), &mut ctx).unwrap_err();
    assert!(matches!(err, ApplyError::IllegalAction { .. }));
}

#[test]
fn preview_projects_open_combos_without_mutation() {
    let mut ctx = TurnContext::new_deterministic(25);
    let s = apply_duel(initial_duel(), Action::Roll, &mut ctx).unwrap();

    let before = s;
    let p = preview(&s);
    assert_eq!(s, before, "preview must not mutate state");
    assert_eq!(p.len(), ALL_COMBOS.len());
    for (&c, &points) in &p {
        assert_eq!(points, score(c, s.hand));
    }

    // Idempotent: a second call yields the same map.
    assert_eq!(preview(&s), p);

    // A filled slot drops out of the projection for that player.
    let s = apply_duel(s, Action::Select(Combo::Chance), &mut ctx).unwrap();
    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let s = apply_duel(s, Action::Select(Combo::Chance), &mut ctx).unwrap();
    // Back to player 0, whose chance is gone.
    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let p0 = preview(&s);
    assert!(!p0.contains_key(&Combo::Chance));
    assert_eq!(p0.len(), ALL_COMBOS.len() - 1);
}

#[test]
fn duel_options_follow_the_active_card() {
    let mut ctx = TurnContext::new_deterministic(26);
    let s = initial_duel();
    let o = duel_options(&s);
    assert!(o.can_roll);
    assert!(!o.can_hold);
    assert!(!o.any_selectable());

    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let s = apply_duel(s, Action::Select(Combo::Aces), &mut ctx).unwrap();

    // Player 1 has not rolled yet: nothing selectable even though their card
    // is fully open.
    let o = duel_options(&s);
    assert!(!o.any_selectable());
    let s = apply_duel(s, Action::Roll, &mut ctx).unwrap();
    let o = duel_options(&s);
    assert!(o.selectable[Combo::Aces.index()]);
}

#[test]
fn winner_by_total_including_bonus() {
    let mut s = initial_duel();
    assert_eq!(duel_winner(&s), None);

    for &c in &ALL_COMBOS {
        assert!(s.cards[0].set(c, if c.is_upper() { 0 } else { 10 }));
        assert!(s.cards[1].set(c, if c.is_upper() { 0 } else { 9 }));
    }
    assert!(s.round_ended());
    assert_eq!(duel_winner(&s), Some(0));

    // Upper bonus can decide it: give player 1 a full upper section.
    let mut s2 = initial_duel();
    for &c in &ALL_COMBOS {
        let face = c.upper_face().map(u32::from);
        assert!(s2.cards[0].set(c, 0));
        assert!(s2.cards[1].set(c, face.map_or(0, |f| 3 * f)));
    }
    assert_eq!(s2.cards[1].upper_total(), 63);
    assert_eq!(duel_winner(&s2), Some(1));

    // Draw.
    let mut s3 = initial_duel();
    for &c in &ALL_COMBOS {
        assert!(s3.cards[0].set(c, 5));
        assert!(s3.cards[1].set(c, 5));
    }
    assert_eq!(duel_winner(&s3), Some(2));
}

#[test]
fn deterministic_reproducibility_same_seed_same_actions() {
    let actions = [
        Action::Roll,
        Action::ToggleHold(1),
        Action::Roll,
        Action::Select(Combo::Twos),
        Action::Roll,
        Action::Select(Combo::Chance),
        Action::Roll,
    ];

    let mut ctx1 = TurnContext::new_deterministic(555);
    let mut s1 = initial_duel();
    for &a in &actions {
        s1 = apply_duel(s1, a, &mut ctx1).unwrap();
    }

    let mut ctx2 = TurnContext::new_deterministic(555);
    let mut s2 = initial_duel();
    for &a in &actions {
        s2 = apply_duel(s2, a, &mut ctx2).unwrap();
    }

    assert_eq!(s1, s2);
}

#[test]
fn random_duel_terminates_in_26_marks() {
    let mut ctx = TurnContext::new_rng(4321);
    let mut s = initial_duel();
    let mut chooser = ChaCha8Rng::seed_from_u64(9);
    let mut marks = 0usize;
    let mut flips = 0usize;

    for _step in 0..20_000 {
        assert_invariants(&s);
        if s.round_ended() {
            break;
        }

        let o = duel_options(&s);
        let mut candidates: Vec<Action> = Vec::new();
        if o.can_roll {
            candidates.push(Action::Roll);
        }
        if o.can_hold {
            candidates.push(Action::ToggleHold(chooser.gen_range(0..5)));
        }
        for (i, &ok) in o.selectable.iter().enumerate() {
            if ok {
                candidates.push(Action::Select(ALL_COMBOS[i]));
            }
        }
        assert!(!candidates.is_empty());

        let a = candidates[chooser.gen_range(0..candidates.len())];
        let active_before = s.active;
        if matches!(a, Action::Select(_)) {
            marks += 1;
        }
        s = apply_duel(s, a, &mut ctx).unwrap();
        if s.active != active_before {
            flips += 1;
        }
    }

    assert!(s.round_ended(), "duel did not terminate");
    assert_eq!(marks, 26);
    // Every mark flips the turn exactly once; nothing else does.
    assert_eq!(flips, 26);
    assert!(duel_winner(&s).is_some());
}
