//! Static definition tables: characters, enemies, skills, synergies,
//! evolutions and the XP curve.
//!
//! Every table is a `static` array built at compile time. Lookups return
//! `Option` so callers decide what a missing entry means.

pub mod characters;
pub mod elements;
pub mod enemies;
pub mod evolutions;
pub mod skills;
pub mod synergies;
pub mod xp_table;

pub use characters::*;
pub use elements::*;
pub use enemies::*;
pub use evolutions::*;
pub use skills::*;
pub use synergies::*;
pub use xp_table::*;
