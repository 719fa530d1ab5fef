//! In-run progression: XP orbs and levels, card offers and run rewards.

pub mod ledger;
pub mod offers;
pub mod orbs;
pub mod rewards;

pub use ledger::*;
pub use offers::*;
pub use orbs::*;
pub use rewards::*;
