//! Divers and the policies that drive them.
//!
//! A `Diver` only holds state and answers questions through its `Policy`.
//! Applying moves and actions is the rules engine's job.

pub mod diver;
pub mod policy;

pub use diver::{CarriedTiles, Direction, Diver};
pub use policy::{Adventurous, Balanced, Cautious, DecisionPolicy, Policy, TileAction};
