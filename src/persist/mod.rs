//! Saving and resuming games.
//!
//! `SavedGame` mirrors the engine's state field for field and is encoded
//! with `bincode` for storage or `serde_json` for inspection. Restoring
//! validates the record before handing back a `Game`, and a restored game
//! rolls the same dice as the original from that point on.

pub mod record;

pub use record::{restore, save, SavedGame, SAVE_VERSION};
