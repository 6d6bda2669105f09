use super::deck::{Deck, DeckTally, CYCLE_LEN};
use crate::error::PlResult;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize, clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Walks each deck's 40-card table in order and wraps.
    #[default]
    Fixed,
    /// Picks a uniformly random entry of the deck's table on every draw.
    Probabilistic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub reward: i64,
    pub penalty: i64,
    pub net_outcome: i64,
}

/// Per-deck reward/penalty schedule with independent cursors.
pub struct DeckScheduler {
    mode: DrawMode,
    cursors: DeckTally<usize>,
    counts: DeckTally<usize>,
    rng: Rng,
}

impl Default for DeckScheduler {
    fn default() -> Self {
        Self::new(DrawMode::Fixed, None)
    }
}

impl DeckScheduler {
    pub fn new(mode: DrawMode, seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        Self {
            mode,
            cursors: DeckTally::default(),
            counts: DeckTally::default(),
            rng,
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn draw(&mut self, deck: Deck) -> Draw {
        self.counts[deck] += 1;

        let table = deck.penalties();
        let penalty = match self.mode {
            DrawMode::Fixed => {
                let cursor = self.cursors[deck];
                self.cursors[deck] = (cursor + 1) % CYCLE_LEN;
                table[cursor]
            }
            DrawMode::Probabilistic => table[self.rng.usize(..CYCLE_LEN)],
        };

        let reward = deck.reward();
        Draw {
            reward,
            penalty,
            net_outcome: reward - penalty,
        }
    }

    /// Draws by symbol. Unknown symbols fail with `InvalidDeck` and leave the
    /// scheduler untouched.
    pub fn draw_symbol(&mut self, symbol: &str) -> PlResult<Draw> {
        let deck = Deck::parse(symbol)?;
        Ok(self.draw(deck))
    }

    /// Position of the next card in the deck's table (fixed mode).
    pub fn cursor(&self, deck: Deck) -> usize {
        self.cursors[deck]
    }

    pub fn deck_counts(&self) -> DeckTally<usize> {
        self.counts
    }

    /// Clears the draw counters. Cursors keep their position.
    pub fn reset_counts(&mut self) {
        self.counts = DeckTally::default();
    }
}
