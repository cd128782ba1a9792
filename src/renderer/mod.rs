//! Rendering
//!
//! The simulation draws through the [`Surface`] trait using a handful of
//! primitive calls in screen pixels (origin top-left, y down).
//! [`VertexSurface`] turns those calls into triangles and, on the web build,
//! [`RenderState`] uploads them to WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use pipeline::RenderState;
pub use shapes::VertexSurface;
pub use vertex::Vertex;

/// Straight RGBA in 0..1
pub type Color = [f32; 4];

/// Images the presentation layer can blit. Asset loading lives outside the
/// simulation; a surface is free to draw these however it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Pursuer,
    Backdrop,
}

/// Canvas-like draw target
pub trait Surface {
    /// Wipe the frame
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    /// Outline with the stroke drawn inside the rectangle
    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, line_width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw an image stretched into the given rectangle
    fn blit(&mut self, sprite: SpriteId, pos: Vec2, size: Vec2, alpha: f32);
}
