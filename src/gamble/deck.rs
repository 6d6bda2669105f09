use crate::error::{PlResult, PsyLabError};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

pub const CYCLE_LEN: usize = 40;
pub const BLOCK_LEN: usize = 10;

// Bechara et al. (1994), fixed 40-card schedules. Loss positions are irregular
// inside each 10-card block but every block carries the same total.
const PENALTIES_A: [i64; CYCLE_LEN] = [
    0, 0, 150, 0, 300, 0, 200, 0, 250, 350, //
    0, 350, 0, 250, 0, 200, 0, 300, 150, 0, //
    150, 0, 300, 0, 0, 200, 250, 0, 0, 350, //
    350, 0, 200, 250, 0, 0, 150, 0, 300, 0,
];

const PENALTIES_B: [i64; CYCLE_LEN] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1250, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 1250, //
    0, 0, 0, 0, 1250, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 1250, 0, 0, 0,
];

const PENALTIES_C: [i64; CYCLE_LEN] = [
    0, 0, 50, 0, 50, 0, 50, 0, 50, 50, //
    0, 25, 0, 75, 0, 50, 0, 25, 75, 0, //
    50, 0, 25, 0, 0, 75, 50, 0, 0, 50, //
    25, 0, 75, 50, 0, 0, 25, 0, 75, 0,
];

const PENALTIES_D: [i64; CYCLE_LEN] = [
    0, 0, 0, 0, 0, 0, 0, 0, 250, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 250, //
    0, 0, 0, 0, 250, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 250, 0, 0, 0,
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Deck {
    A,
    B,
    C,
    D,
}

impl Deck {
    /// Parses a deck symbol. Only the exact letters `A`-`D` are accepted.
    pub fn parse(symbol: &str) -> PlResult<Self> {
        Self::from_str(symbol).map_err(|_| PsyLabError::InvalidDeck(symbol.to_string()))
    }

    pub fn reward(self) -> i64 {
        match self {
            Deck::A | Deck::B => 100,
            Deck::C | Deck::D => 50,
        }
    }

    pub fn penalties(self) -> &'static [i64; CYCLE_LEN] {
        match self {
            Deck::A => &PENALTIES_A,
            Deck::B => &PENALTIES_B,
            Deck::C => &PENALTIES_C,
            Deck::D => &PENALTIES_D,
        }
    }

    /// Loss total of every 10-card block.
    pub fn block_penalty_total(self) -> i64 {
        match self {
            Deck::A | Deck::B => 1250,
            Deck::C | Deck::D => 250,
        }
    }

    pub fn cycle_penalty_total(self) -> i64 {
        self.block_penalty_total() * (CYCLE_LEN / BLOCK_LEN) as i64
    }

    /// C and D win in the long run (+250 per 10 cards); A and B lose.
    pub fn is_advantageous(self) -> bool {
        matches!(self, Deck::C | Deck::D)
    }
}

/// One value per deck, indexable by [`Deck`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckTally<T> {
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "B")]
    pub b: T,
    #[serde(rename = "C")]
    pub c: T,
    #[serde(rename = "D")]
    pub d: T,
}

impl<T> Index<Deck> for DeckTally<T> {
    type Output = T;

    fn index(&self, deck: Deck) -> &T {
        match deck {
            Deck::A => &self.a,
            Deck::B => &self.b,
            Deck::C => &self.c,
            Deck::D => &self.d,
        }
    }
}

impl<T> IndexMut<Deck> for DeckTally<T> {
    fn index_mut(&mut self, deck: Deck) -> &mut T {
        match deck {
            Deck::A => &mut self.a,
            Deck::B => &mut self.b,
            Deck::C => &mut self.c,
            Deck::D => &mut self.d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_block_carries_the_canonical_total() {
        for deck in Deck::iter() {
            for block in deck.penalties().chunks(BLOCK_LEN) {
                assert_eq!(block.iter().sum::<i64>(), deck.block_penalty_total());
            }
        }
    }

    #[test]
    fn ten_card_expected_value() {
        for deck in Deck::iter() {
            let net = deck.reward() * BLOCK_LEN as i64 - deck.block_penalty_total();
            let expected = if deck.is_advantageous() { 250 } else { -250 };
            assert_eq!(net, expected, "deck {}", deck);
        }
    }
}
