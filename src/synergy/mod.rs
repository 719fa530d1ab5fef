//! Elemental synergy evaluation.

pub mod logic;

pub use logic::*;
