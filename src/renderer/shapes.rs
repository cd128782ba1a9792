//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors, with_alpha};
use super::{Color, SpriteId, Surface};

/// Triangles per circle fan
pub const CIRCLE_SEGMENTS: usize = 16;

/// A [`Surface`] that records every draw call as a triangle list
#[derive(Debug, Clone)]
pub struct VertexSurface {
    vertices: Vec<Vertex>,
    clear_color: Color,
}

impl Default for VertexSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSurface {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(1024),
            clear_color: colors::SKY,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Two triangles covering an axis-aligned rectangle
    fn push_quad(&mut self, pos: Vec2, size: Vec2, color: Color) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let (x0, y0) = (pos.x, pos.y);
        let (x1, y1) = (pos.x + size.x, pos.y + size.y);

        self.vertices.push(Vertex::new(x0, y0, color));
        self.vertices.push(Vertex::new(x1, y0, color));
        self.vertices.push(Vertex::new(x0, y1, color));

        self.vertices.push(Vertex::new(x0, y1, color));
        self.vertices.push(Vertex::new(x1, y0, color));
        self.vertices.push(Vertex::new(x1, y1, color));
    }
}

fn sprite_color(sprite: SpriteId) -> Color {
    match sprite {
        SpriteId::Player => colors::PLAYER,
        SpriteId::Pursuer => colors::PURSUER,
        SpriteId::Backdrop => colors::BACKDROP,
    }
}

impl Surface for VertexSurface {
    fn clear(&mut self, color: Color) {
        self.vertices.clear();
        self.clear_color = color;
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.push_quad(pos, size, color);
    }

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2, line_width: f32, color: Color) {
        let w = line_width.min(size.x / 2.0).min(size.y / 2.0);
        if w <= 0.0 {
            return;
        }
        // Top, bottom, then the two sides between them
        self.push_quad(pos, Vec2::new(size.x, w), color);
        self.push_quad(Vec2::new(pos.x, pos.y + size.y - w), Vec2::new(size.x, w), color);
        self.push_quad(
            Vec2::new(pos.x, pos.y + w),
            Vec2::new(w, size.y - 2.0 * w),
            color,
        );
        self.push_quad(
            Vec2::new(pos.x + size.x - w, pos.y + w),
            Vec2::new(w, size.y - 2.0 * w),
            color,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        for i in 0..CIRCLE_SEGMENTS {
            let a0 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            let a1 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            let p0 = center + Vec2::new(a0.cos(), a0.sin()) * radius;
            let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;

            self.vertices.push(Vertex::new(center.x, center.y, color));
            self.vertices.push(Vertex::new(p0.x, p0.y, color));
            self.vertices.push(Vertex::new(p1.x, p1.y, color));
        }
    }

    fn blit(&mut self, sprite: SpriteId, pos: Vec2, size: Vec2, alpha: f32) {
        self.push_quad(pos, size, with_alpha(sprite_color(sprite), alpha));
    }
}
