use crate::stimuli::{Category, Stimulus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedWord {
    #[serde(flatten)]
    pub stimulus: Stimulus,
    /// 1-based, unique within a session.
    pub presentation_order: usize,
}

impl PresentedWord {
    pub fn word(&self) -> &str {
        &self.stimulus.word
    }

    pub fn category(&self) -> Category {
        self.stimulus.category
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallResponse {
    pub recalled_word: String,
    pub recall_order: usize,
    /// Seconds until entry. Zero when the input widget does not time entries.
    pub response_time: f64,
    pub is_correct: bool,
    pub is_intrusion: bool,
    pub original_position: Option<usize>,
}

impl RecallResponse {
    /// Matches one recalled word against the presented list (exact string equality,
    /// first match wins).
    pub fn classify(
        presented: &[PresentedWord],
        recalled_word: &str,
        recall_order: usize,
        response_time: f64,
    ) -> Self {
        let matched = presented.iter().find(|w| w.word() == recalled_word);
        Self {
            recalled_word: recalled_word.to_string(),
            recall_order,
            response_time,
            is_correct: matched.is_some(),
            is_intrusion: matched.is_none(),
            original_position: matched.map(|w| w.presentation_order),
        }
    }

    /// Builds responses from raw participant input in entry order.
    ///
    /// Entries are trimmed; blanks and repeats are dropped before `recall_order`
    /// is assigned.
    pub fn from_inputs<S: AsRef<str>>(presented: &[PresentedWord], inputs: &[S]) -> Vec<Self> {
        let mut seen = HashSet::new();
        inputs
            .iter()
            .map(|raw| raw.as_ref().trim())
            .filter(|word| !word.is_empty() && seen.insert(*word))
            .enumerate()
            .map(|(i, word)| Self::classify(presented, word, i + 1, 0.0))
            .collect()
    }
}
