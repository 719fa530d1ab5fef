//! Run timing and enemy spawning.

pub mod clock;
pub mod spawner;

pub use clock::*;
pub use spawner::*;
