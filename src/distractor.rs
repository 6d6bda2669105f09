use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// Arithmetic filler shown between encoding and recall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub prompt: String,
    pub answer: i64,
}

impl MathProblem {
    /// Two-digit plus/minus problem. Subtractions are ordered so the answer is
    /// never negative.
    pub fn generate(rng: &mut Rng) -> Self {
        let mut a: i64 = rng.i64(10..=99);
        let mut b: i64 = rng.i64(1..=50);

        if rng.bool() {
            Self {
                prompt: format!("{} + {} = ?", a, b),
                answer: a + b,
            }
        } else {
            if a < b {
                std::mem::swap(&mut a, &mut b);
            }
            Self {
                prompt: format!("{} - {} = ?", a, b),
                answer: a - b,
            }
        }
    }

    pub fn check(&self, response: i64) -> bool {
        response == self.answer
    }
}
