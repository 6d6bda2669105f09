use super::types::{PresentedWord, RecallResponse};
use crate::stimuli::CategoryTally;
use crate::util::ratio;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Upper bound on the primacy/recency window.
pub const SERIAL_WINDOW_MAX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SerialPosition {
    Primacy,
    Middle,
    Recency,
}

impl SerialPosition {
    /// Size of the primacy and recency windows for a list of `list_len` words.
    pub fn window(list_len: usize) -> usize {
        SERIAL_WINDOW_MAX.min(list_len / 3)
    }

    /// Classifies a 1-based presentation position.
    ///
    /// Recency is strictly `position > list_len - window`. With a window of 0
    /// (lists shorter than 3) every position is middle.
    pub fn classify(position: usize, list_len: usize) -> Self {
        let window = Self::window(list_len);
        if position <= window {
            SerialPosition::Primacy
        } else if position > list_len - window {
            SerialPosition::Recency
        } else {
            SerialPosition::Middle
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialPositionCounts {
    pub primacy: usize,
    pub middle: usize,
    pub recency: usize,
}

impl SerialPositionCounts {
    fn add(&mut self, position: SerialPosition) {
        match position {
            SerialPosition::Primacy => self.primacy += 1,
            SerialPosition::Middle => self.middle += 1,
            SerialPosition::Recency => self.recency += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallScores {
    pub total_presented: usize,
    pub total_recalled: usize,
    pub correct_recalls: usize,
    pub recall_rate: f64,
    pub intrusion_errors: usize,
    pub category_recall: CategoryTally<usize>,
    pub category_total: CategoryTally<usize>,
    pub category_rate: CategoryTally<f64>,
    pub serial_position: SerialPositionCounts,
    pub distractor_accuracy: f64,
}

/// Scores a recall attempt. Pure function of its inputs.
pub fn score(
    presented: &[PresentedWord],
    recalled: &[RecallResponse],
    distractor_correct: usize,
    distractor_total: usize,
) -> RecallScores {
    let correct: Vec<&RecallResponse> = recalled.iter().filter(|r| r.is_correct).collect();
    let intrusion_errors = recalled.iter().filter(|r| r.is_intrusion).count();

    let mut category_total = CategoryTally::<usize>::default();
    for w in presented {
        category_total[w.category()] += 1;
    }

    let mut category_recall = CategoryTally::<usize>::default();
    for r in &correct {
        if let Some(w) = presented.iter().find(|w| w.word() == r.recalled_word) {
            category_recall[w.category()] += 1;
        }
    }

    let category_rate = category_recall.map(|c, &hits| ratio(hits, category_total[c]));

    let n = presented.len();
    let mut serial_position = SerialPositionCounts::default();
    for r in &correct {
        // positions are 1-based; 0 never came from a presented word
        if let Some(pos) = r.original_position.filter(|&p| p > 0) {
            serial_position.add(SerialPosition::classify(pos, n));
        }
    }

    RecallScores {
        total_presented: n,
        total_recalled: recalled.len(),
        correct_recalls: correct.len(),
        recall_rate: ratio(correct.len(), n),
        intrusion_errors,
        category_recall,
        category_total,
        category_rate,
        serial_position,
        distractor_accuracy: ratio(distractor_correct, distractor_total),
    }
}
