//! Treasure tiles, spaces and the path that holds them.

pub mod tile;
pub mod space;
pub mod path;

pub use tile::{total_value, DepthLevel, Tile};
pub use space::{Space, TileStack};
pub use path::Board;
