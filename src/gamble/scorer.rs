use super::deck::DeckTally;
use super::types::Trial;
use crate::util::ratio;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GambleScores {
    /// (C + D) - (A + B)
    pub net_score: i64,
    pub deck_counts: DeckTally<usize>,
    pub advantageous_ratio: f64,
    pub total_trials: usize,
    pub final_balance: i64,
    pub profit: i64,
}

/// Aggregates a trial history. The final balance is the last trial's
/// `balance_after`, or `initial_balance` when nothing was drawn.
pub fn score(trials: &[Trial], initial_balance: i64) -> GambleScores {
    let mut deck_counts = DeckTally::<usize>::default();
    for t in trials {
        deck_counts[t.deck_choice] += 1;
    }

    let advantageous = deck_counts.c + deck_counts.d;
    let disadvantageous = deck_counts.a + deck_counts.b;
    let final_balance = trials
        .last()
        .map(|t| t.balance_after)
        .unwrap_or(initial_balance);

    GambleScores {
        net_score: advantageous as i64 - disadvantageous as i64,
        deck_counts,
        advantageous_ratio: ratio(advantageous, trials.len()),
        total_trials: trials.len(),
        final_balance,
        profit: final_balance - initial_balance,
    }
}
