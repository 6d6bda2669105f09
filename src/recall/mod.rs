pub mod builder;
pub mod scorer;
pub mod types;

pub use self::builder::{Condition, WordListBuilder};
pub use self::scorer::{score, RecallScores, SerialPosition, SerialPositionCounts};
pub use self::types::{PresentedWord, RecallResponse};
