use super::types::PresentedWord;
use crate::error::{PlResult, PsyLabError};
use crate::stimuli::{Category, Stimulus, StimulusCatalog, CANONICAL_WORD_LIST};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Half positive, half negative.
    Emotional,
    Neutral,
    /// Thirds, with the remainder going to neutral.
    Mixed,
}

impl Condition {
    pub fn parse(s: &str) -> PlResult<Self> {
        Self::from_str(s.trim()).map_err(|_| PsyLabError::InvalidCondition(s.to_string()))
    }

    /// Requested words per category for a list of `count` words.
    ///
    /// Mixed lists give `count % 3` extra words to neutral, never to the
    /// emotional categories.
    pub fn quotas(self, count: usize) -> Vec<(Category, usize)> {
        match self {
            Condition::Neutral => vec![(Category::Neutral, count)],
            Condition::Emotional => {
                let half = count / 2;
                vec![
                    (Category::Positive, half),
                    (Category::Negative, count - half),
                ]
            }
            Condition::Mixed => {
                let n = count / 3;
                let r = count % 3;
                vec![
                    (Category::Positive, n),
                    (Category::Negative, n),
                    (Category::Neutral, n + r),
                ]
            }
        }
    }
}

/// Samples and orders the stimulus list for one recall session.
pub struct WordListBuilder<'a> {
    catalog: &'a StimulusCatalog,
    rng: Rng,
}

impl<'a> WordListBuilder<'a> {
    pub fn new(catalog: &'a StimulusCatalog, seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        Self { catalog, rng }
    }

    pub fn build(&mut self, condition: Condition, count: usize) -> PlResult<Vec<PresentedWord>> {
        if count == 0 {
            return Err(PsyLabError::Validation(
                "word list size must be greater than 0".to_string(),
            ));
        }

        let mut stimuli = Vec::with_capacity(count);
        for (category, requested) in condition.quotas(count) {
            stimuli.extend(self.sample(category, requested));
        }

        self.rng.shuffle(&mut stimuli);
        debug!(
            "Built {} list: {} of {} requested words",
            condition,
            stimuli.len(),
            count
        );
        Ok(assign_order(stimuli))
    }

    /// The canonical 15-word list. With `randomize == false` the order is fixed,
    /// so independent calls produce identical sequences.
    pub fn fixed_list(&mut self, randomize: bool) -> PlResult<Vec<PresentedWord>> {
        let mut stimuli = CANONICAL_WORD_LIST
            .iter()
            .map(|word| {
                self.catalog.find(word).cloned().ok_or_else(|| {
                    PsyLabError::Validation(format!("canonical word '{}' not in catalog", word))
                })
            })
            .collect::<PlResult<Vec<_>>>()?;

        if randomize {
            self.rng.shuffle(&mut stimuli);
        }
        Ok(assign_order(stimuli))
    }

    fn sample(&mut self, category: Category, requested: usize) -> Vec<Stimulus> {
        let catalog = self.catalog;
        let mut pool: Vec<&Stimulus> = catalog.category(category).collect();
        if requested > pool.len() {
            debug!(
                "Capping {} sample at {} (requested {})",
                category,
                pool.len(),
                requested
            );
        }
        self.rng.shuffle(&mut pool);
        pool.into_iter().take(requested).cloned().collect()
    }
}

fn assign_order(stimuli: Vec<Stimulus>) -> Vec<PresentedWord> {
    stimuli
        .into_iter()
        .enumerate()
        .map(|(i, stimulus)| PresentedWord {
            stimulus,
            presentation_order: i + 1,
        })
        .collect()
}
