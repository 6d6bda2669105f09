use super::deck::Deck;
use super::scheduler::Draw;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub trial_number: usize,
    pub deck_choice: Deck,
    pub reward: i64,
    pub penalty: i64,
    pub net_outcome: i64,
    pub balance_after: i64,
    pub timestamp: DateTime<Local>,
}

impl Trial {
    pub fn new(trial_number: usize, deck: Deck, draw: Draw, balance_before: i64) -> Self {
        Self {
            trial_number,
            deck_choice: deck,
            reward: draw.reward,
            penalty: draw.penalty,
            net_outcome: draw.net_outcome,
            balance_after: balance_before + draw.net_outcome,
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trial {:3} | Deck {} | Reward: ${:4} | Penalty: ${:4} | Net: ${:+5} | Balance: ${:5}",
            self.trial_number,
            self.deck_choice,
            self.reward,
            self.penalty,
            self.net_outcome,
            self.balance_after
        )
    }
}
