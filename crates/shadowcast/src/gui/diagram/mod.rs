pub mod model;
pub mod view;

pub use model::{Point, Rect, SceneLayout, State};
pub use view::{draw, render_png};

pub const CANVAS_HEIGHT: f64 = 384.0;
pub const SNAPSHOT_WIDTH: i32 = 720;
pub const SNAPSHOT_HEIGHT: i32 = CANVAS_HEIGHT as i32;

pub const SUN_ORBIT_RADIUS: f64 = 192.0; // vertical reach above the canvas centre
pub const SUN_RADIUS: f64 = 18.0;
pub const SUN_RAY_COUNT: usize = 8;
pub const SUN_RAY_LENGTH: f64 = 9.0;
pub const SUN_GLOW_RADIUS: f64 = 32.0;

pub const GROUND_WIDTH_FACTOR: f64 = 0.9; // of the canvas width
pub const GROUND_THICKNESS: f64 = 4.0;
pub const OBJECT_OFFSET_FACTOR: f64 = 0.1; // of the ground width
pub const SHADOW_THICKNESS: f64 = 24.0;
pub const BEAM_WIDTH: f64 = 1.0;

// Person glyph, in its own 30x80 unit box
pub const GLYPH_WIDTH: f64 = 30.0;
pub const GLYPH_HEIGHT: f64 = 80.0;
pub const GLYPH_HEAD_RADIUS: f64 = 7.5;
pub const GLYPH_BODY_WIDTH: f64 = 20.0;
pub const GLYPH_BODY_HEIGHT: f64 = 62.0;

pub const SHADOW_ALPHA: f64 = 0.8;
pub const BEAM_ALPHA: f64 = 0.5;
pub const GLOW_ALPHA: f64 = 0.25;
