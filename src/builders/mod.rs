//! Structural element builders

mod area;
mod frame;

pub use area::{build_floor, build_walls, AreaElement};
pub use frame::{build_columns, FrameElement};
