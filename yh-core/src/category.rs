//! The thirteen scoring combinations in fixed card order.

use serde::{Deserialize, Serialize};

pub const NUM_COMBOS: usize = 13;

/// A scoring combination on the card.
///
/// Index order matches the printed card: upper section (Aces..Sixes) first,
/// then the lower section ending in Chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combo {
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

/// All combinations in index order (0..12).
pub const ALL_COMBOS: [Combo; NUM_COMBOS] = [
    Combo::Aces,
    Combo::Twos,
    Combo::Threes,
    Combo::Fours,
    Combo::Fives,
    Combo::Sixes,
    Combo::ThreeOfAKind,
    Combo::FourOfAKind,
    Combo::FullHouse,
    Combo::SmallStraight,
    Combo::LargeStraight,
    Combo::Yahtzee,
    Combo::Chance,
];

/// Wire/config names in index order.
const COMBO_NAMES: [&str; NUM_COMBOS] = [
    "aces",
    "twos",
    "threes",
    "fours",
    "fives",
    "sixes",
    "three_of_a_kind",
    "four_of_a_kind",
    "full_house",
    "small_straight",
    "large_straight",
    "yahtzee",
    "chance",
];

impl Combo {
    /// Card slot index (0..=12).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Combo::index`]; `None` when out of range.
    pub fn from_index(idx: usize) -> Option<Combo> {
        ALL_COMBOS.get(idx).copied()
    }

    /// Snake-case name used in config files and history events.
    pub fn name(self) -> &'static str {
        COMBO_NAMES[self.index()]
    }

    /// Look up a combination by name. Unknown names are not an error,
    /// they simply resolve to nothing.
    pub fn from_name(name: &str) -> Option<Combo> {
        COMBO_NAMES
            .iter()
            .position(|&n| n == name)
            .and_then(Combo::from_index)
    }

    /// True for the upper section (Aces..Sixes), which feeds the upper bonus.
    pub fn is_upper(self) -> bool {
        self.index() < 6
    }

    /// For an upper combination, the die face it counts (1..=6).
    pub fn upper_face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }
}
