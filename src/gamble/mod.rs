pub mod deck;
pub mod scheduler;
pub mod scorer;
pub mod types;

pub use self::deck::{Deck, DeckTally, BLOCK_LEN, CYCLE_LEN};
pub use self::scheduler::{DeckScheduler, Draw, DrawMode};
pub use self::scorer::{score, GambleScores};
pub use self::types::Trial;
