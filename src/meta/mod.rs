//! Meta progression that persists between runs: gold, magic stones,
//! upgrade levels and the run history.

pub mod history;
pub mod logic;
pub mod types;

pub use history::*;
pub use logic::*;
pub use types::*;
