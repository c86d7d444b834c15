#[macro_use]
mod macros;

pub mod clock;
pub mod geometry;
pub mod scene;
pub mod units;

pub use geometry::GeometryError;
pub use scene::{Inputs, Scene, Viewport};
