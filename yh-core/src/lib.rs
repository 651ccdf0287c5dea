//! yh-core: Yahtzee rules, scoring, turn state machines, and configuration.

pub mod action;
pub mod category;
pub mod chance;
pub mod config;
pub mod duel;
pub mod engine;
pub mod legal;
pub mod scoring;
pub mod state;

pub use action::Action;
pub use category::{Combo, ALL_COMBOS, NUM_COMBOS};
pub use config::{Config, ConfigError, Mode};
pub use duel::{apply_duel, duel_winner, initial_duel, preview};
pub use engine::{apply, initial_state, ApplyError, ChanceMode, TurnContext};
pub use legal::{duel_options, round_options, TurnOptions};
pub use scoring::{score, scores_for_hand};
pub use state::{DuelState, Hand, HeldMask, RoundState, ScoreCard, ROLLS_PER_TURN};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod duel_tests;
#[cfg(test)]
mod state_tests;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
