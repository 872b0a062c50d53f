//! Rendering boundary
//!
//! States describe frames through the `Canvas` trait; rasterizing text,
//! blitting and scaling to the window are done by whatever implements it.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;

use crate::assets::Sprite;

pub type Color = [u8; 3];

/// Drawable target, supplied by the host
pub trait Canvas {
    /// Called once before a frame's draw calls
    fn begin_frame(&mut self) {}

    /// Clear the whole playfield
    fn fill(&mut self, color: Color);

    /// Draw a sprite with its unrotated top-left at `top_left`.
    ///
    /// A non-zero `rotation` (degrees, counter-clockwise) turns it about its center.
    fn sprite(&mut self, sprite: &Sprite, top_left: Vec2, rotation: f32, flip_y: bool);

    /// Draw `text` centered on `center`
    fn text(&mut self, text: &str, color: Color, center: Vec2);

    /// Filled rectangle
    fn rect(&mut self, top_left: Vec2, size: Vec2, color: Color);
}
