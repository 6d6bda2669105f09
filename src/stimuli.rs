use crate::error::{PlResult, PsyLabError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub const RATING_MIN: f32 = 1.0;
pub const RATING_MAX: f32 = 9.0;

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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

/// One value per word category, indexable by [`Category`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTally<T> {
    pub positive: T,
    pub negative: T,
    pub neutral: T,
}

impl<T> CategoryTally<T> {
    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> CategoryTally<U> {
        CategoryTally {
            positive: f(Category::Positive, &self.positive),
            negative: f(Category::Negative, &self.negative),
            neutral: f(Category::Neutral, &self.neutral),
        }
    }
}

impl<T> Index<Category> for CategoryTally<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        match category {
            Category::Positive => &self.positive,
            Category::Negative => &self.negative,
            Category::Neutral => &self.neutral,
        }
    }
}

impl<T> IndexMut<Category> for CategoryTally<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Positive => &mut self.positive,
            Category::Negative => &mut self.negative,
            Category::Neutral => &mut self.neutral,
        }
    }
}

/// A normed word stimulus. Ratings are on the 1-9 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    pub word: String,
    pub valence: f32,
    pub arousal: f32,
    pub concreteness: f32,
    pub category: Category,
}

impl Stimulus {
    pub fn new(
        word: &str,
        valence: f32,
        arousal: f32,
        concreteness: f32,
        category: Category,
    ) -> PlResult<Self> {
        let stimulus = Self {
            word: word.trim().to_string(),
            valence,
            arousal,
            concreteness,
            category,
        };
        stimulus.validate()?;
        Ok(stimulus)
    }

    /// Checks for a non-empty word and ratings inside the 1-9 scale.
    pub fn validate(&self) -> PlResult<()> {
        if self.word.trim().is_empty() {
            return Err(PsyLabError::Validation(
                "stimulus word must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("valence", self.valence),
            ("arousal", self.arousal),
            ("concreteness", self.concreteness),
        ] {
            if !(RATING_MIN..=RATING_MAX).contains(&value) {
                return Err(PsyLabError::Validation(format!(
                    "{} of '{}' is {}, outside [{}, {}]",
                    name, self.word, value, RATING_MIN, RATING_MAX
                )));
            }
        }
        Ok(())
    }
}

// (word, valence, arousal, concreteness), Korean affective word norms.
type Norm = (&'static str, f32, f32, f32);

const POSITIVE_NORMS: [Norm; 20] = [
    ("기쁨", 8.24, 5.82, 2.87),
    ("사랑", 8.17, 4.54, 2.97),
    ("우정", 8.03, 3.41, 2.85),
    ("행운", 7.74, 3.83, 2.61),
    ("희망", 7.28, 5.33, 2.45),
    ("성공", 7.51, 5.42, 2.94),
    ("평화", 7.86, 2.52, 2.89),
    ("감사", 7.96, 3.36, 3.13),
    ("자유", 7.82, 3.85, 2.76),
    ("축하", 7.73, 4.58, 3.76),
    ("승리", 7.55, 6.83, 3.73),
    ("건강", 7.08, 3.13, 3.66),
    ("휴식", 7.80, 2.01, 3.38),
    ("친구", 7.88, 3.24, 6.08),
    ("선물", 7.23, 5.30, 7.04),
    ("여행", 7.66, 6.10, 5.03),
    ("보석", 6.73, 4.42, 7.91),
    ("노래", 7.32, 4.21, 6.08),
    ("낭만", 7.40, 4.16, 2.34),
    ("매력", 7.50, 5.28, 2.66),
];

const NEGATIVE_NORMS: [Norm; 20] = [
    ("고통", 2.42, 6.83, 3.42),
    ("슬픔", 2.81, 5.46, 4.18),
    ("분노", 2.84, 6.61, 3.25),
    ("공포", 2.84, 7.19, 2.98),
    ("불안", 2.87, 6.48, 2.73),
    ("절망", 2.11, 6.21, 2.73),
    ("증오", 1.72, 7.12, 2.92),
    ("후회", 2.93, 5.23, 2.87),
    ("실패", 2.76, 6.67, 2.67),
    ("이별", 2.58, 6.23, 3.73),
    ("가난", 2.91, 5.87, 3.35),
    ("전쟁", 2.24, 7.43, 5.90),
    ("폭력", 2.24, 7.24, 4.78),
    ("죽음", 2.36, 5.13, 4.72),
    ("상처", 2.85, 6.02, 6.15),
    ("위험", 2.97, 6.76, 3.33),
    ("걱정", 3.36, 5.63, 2.86),
    ("외로움", 3.41, 4.46, 2.62),
    ("긴장", 4.10, 6.96, 3.07),
    ("피해", 2.66, 6.21, 3.77),
];

const NEUTRAL_NORMS: [Norm; 20] = [
    ("책상", 5.55, 3.80, 8.61),
    ("의자", 5.46, 3.55, 8.30),
    ("창문", 5.45, 4.09, 8.50),
    ("시계", 5.62, 3.87, 8.53),
    ("거울", 5.45, 4.09, 8.50),
    ("우산", 5.10, 3.70, 8.66),
    ("신문", 5.69, 3.95, 8.55),
    ("바위", 5.22, 3.78, 8.60),
    ("단추", 5.19, 3.93, 8.53),
    ("열쇠", 5.74, 4.00, 8.59),
    ("그릇", 5.41, 3.85, 8.42),
    ("모자", 5.51, 4.18, 8.55),
    ("가구", 5.17, 3.85, 8.18),
    ("건물", 5.30, 3.88, 8.27),
    ("도구", 5.56, 4.38, 7.28),
    ("글자", 5.29, 3.58, 7.43),
    ("탁자", 4.96, 3.91, 8.51),
    ("볼펜", 5.15, 4.01, 8.69),
    ("냉장고", 5.43, 4.89, 8.71),
    ("전화선", 5.68, 4.04, 8.55),
];

/// Encoding and recall passes both reference this order, so it must never change.
pub const CANONICAL_WORD_LIST: [&str; 15] = [
    "기쁨", "고통", "책상", "사랑", "슬픔", "의자", "희망", "분노", "창문", "평화", "공포", "시계",
    "선물", "불안", "우산",
];

fn norms_for(category: Category) -> &'static [Norm] {
    match category {
        Category::Positive => &POSITIVE_NORMS,
        Category::Negative => &NEGATIVE_NORMS,
        Category::Neutral => &NEUTRAL_NORMS,
    }
}

/// Read-only word table the list builder samples from.
#[derive(Debug, Clone)]
pub struct StimulusCatalog {
    stimuli: Vec<Stimulus>,
}

impl Default for StimulusCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl StimulusCatalog {
    /// The curated 60-word catalog, 20 per category.
    pub fn standard() -> Self {
        let stimuli = Category::iter()
            .flat_map(|category| {
                norms_for(category)
                    .iter()
                    .map(move |&(word, valence, arousal, concreteness)| Stimulus {
                        word: word.to_string(),
                        valence,
                        arousal,
                        concreteness,
                        category,
                    })
            })
            .collect();
        Self { stimuli }
    }

    pub fn from_stimuli(stimuli: Vec<Stimulus>) -> PlResult<Self> {
        let mut seen = HashSet::new();
        for s in &stimuli {
            s.validate()?;
            if !seen.insert(s.word.as_str()) {
                return Err(PsyLabError::Validation(format!(
                    "duplicate catalog word '{}'",
                    s.word
                )));
            }
        }
        Ok(Self { stimuli })
    }

    pub fn len(&self) -> usize {
        self.stimuli.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stimuli.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stimulus> {
        self.stimuli.iter()
    }

    pub fn category(&self, category: Category) -> impl Iterator<Item = &Stimulus> {
        self.stimuli.iter().filter(move |s| s.category == category)
    }

    pub fn category_size(&self, category: Category) -> usize {
        self.category(category).count()
    }

    pub fn find(&self, word: &str) -> Option<&Stimulus> {
        self.stimuli.iter().find(|s| s.word == word)
    }
}
