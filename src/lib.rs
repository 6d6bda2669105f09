pub mod api;
pub mod config;
pub mod distractor;
pub mod error;
pub mod events;
pub mod export;
pub mod gamble;
pub mod recall;
pub mod session;
pub mod stimuli;
pub mod util;
// cmd and reports are binary modules, reached only through main.rs.
