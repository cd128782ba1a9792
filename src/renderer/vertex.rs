//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::Color;

/// 2D vertex with position (screen pixels until uploaded) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY: Color = [0.09, 0.11, 0.2, 1.0];
    pub const PLAYER: Color = [0.9, 0.15, 0.15, 1.0];
    pub const PURSUER: Color = [0.35, 0.6, 0.3, 1.0];
    pub const BACKDROP: Color = [0.85, 0.88, 0.95, 0.6];
    pub const COLLIDER: Color = [1.0, 0.9, 0.1, 1.0];
    pub const FADING_PARTICLE: Color = [1.0, 0.95, 0.8, 1.0];
    pub const GLOW_PARTICLE: Color = [0.55, 0.8, 1.0, 1.0];
}

/// Copy of `color` with its alpha scaled
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}
