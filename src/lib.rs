pub mod camera;
pub mod cell;
pub mod color;
pub mod config;
pub mod events;
pub mod grid;
pub mod neighborhood;
pub mod point;
pub mod sim;

/// A signed board coordinate. Pointer mapping can land off the board, including left of or above
/// it.
pub type BoardOffset = i64;
