//! Decorative entities: fading particles, glow particles and drifting clouds
//!
//! None of these collide with anything. Each family lives in its own capped
//! [`AmbientPool`] that creates, advances and prunes its members.

use glam::Vec2;
use rand::Rng;

use super::state::Viewport;
use crate::consts::*;
use crate::renderer::vertex::{colors, with_alpha};
use crate::renderer::{SpriteId, Surface};

/// Behaviour shared by pooled decorative entities
pub trait Ambient {
    /// Count one frame of life. Entities without a lifespan ignore it.
    fn age(&mut self) {}
    /// Move one frame
    fn advance(&mut self, speed_multiplier: f32);
    /// Ready to be pruned
    fn is_spent(&self) -> bool;
    fn draw(&self, surface: &mut dyn Surface);
}

/// Radial particle that fades in over the first half of its life and out over the second
#[derive(Debug, Clone, PartialEq)]
pub struct FadingParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub age: u32,
    pub life_span: u32,
    pub opacity: f32,
}

impl FadingParticle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, life_span: u32) -> Self {
        Self {
            pos,
            vel,
            radius,
            age: 0,
            life_span: life_span.max(1),
            opacity: 0.0,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, field: &Viewport) -> Self {
        let pos = Vec2::new(
            rng.random_range(0.0..field.width()),
            rng.random_range(0.0..field.height()),
        );
        let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
        let speed: f32 = rng.random_range(0.05..0.3);
        Self::new(
            pos,
            Vec2::new(angle.cos(), angle.sin()) * speed,
            rng.random_range(FADING_RADIUS_MIN..FADING_RADIUS_MAX),
            rng.random_range(FADING_LIFESPAN_MIN..=FADING_LIFESPAN_MAX),
        )
    }

    /// Opacity change per frame
    fn ramp_step(&self) -> f32 {
        1.0 / (self.life_span as f32 / 2.0)
    }
}

impl Ambient for FadingParticle {
    fn age(&mut self) {
        let half = self.life_span as f32 / 2.0;
        if (self.age as f32) < half {
            self.opacity = (self.opacity + self.ramp_step()).min(1.0);
        } else {
            self.opacity = (self.opacity - self.ramp_step()).max(0.0);
        }
        self.age += 1;
    }

    fn advance(&mut self, _speed_multiplier: f32) {
        self.pos += self.vel;
    }

    fn is_spent(&self) -> bool {
        self.age >= self.life_span
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(
            self.pos,
            self.radius,
            with_alpha(colors::FADING_PARTICLE, self.opacity),
        );
    }
}

/// Soft particle drifting up and left at constant opacity
#[derive(Debug, Clone, PartialEq)]
pub struct GlowParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub age: u32,
    pub life_span: u32,
}

impl GlowParticle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, life_span: u32) -> Self {
        Self {
            pos,
            vel,
            radius,
            age: 0,
            life_span: life_span.max(1),
        }
    }

    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, field: &Viewport) -> Self {
        let pos = Vec2::new(
            rng.random_range(0.0..field.width()),
            rng.random_range(0.0..field.height()),
        );
        let vel = Vec2::new(rng.random_range(-0.6..-0.1), rng.random_range(-0.3..0.0));
        Self::new(
            pos,
            vel,
            rng.random_range(GLOW_RADIUS_MIN..GLOW_RADIUS_MAX),
            rng.random_range(GLOW_LIFESPAN_MIN..=GLOW_LIFESPAN_MAX),
        )
    }
}

impl Ambient for GlowParticle {
    fn age(&mut self) {
        self.age += 1;
    }

    fn advance(&mut self, _speed_multiplier: f32) {
        self.pos += self.vel;
    }

    fn is_spent(&self) -> bool {
        self.age >= self.life_span
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(
            self.pos,
            self.radius,
            with_alpha(colors::GLOW_PARTICLE, GLOW_ALPHA),
        );
    }
}

/// A cloud drifting left across the upper half of the field
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Backdrop {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(BACKDROP_BASE_VEL_X, 0.0),
            size,
        }
    }

    /// Cloud entering at the right edge somewhere in the upper half
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, field: &Viewport) -> Self {
        let width = rng.random_range(BACKDROP_WIDTH_MIN..BACKDROP_WIDTH_MAX);
        let size = Vec2::new(width, width * 0.45);
        let max_y = (field.height() / 2.0 - size.y).max(0.0);
        let y = if max_y > 0.0 {
            rng.random_range(0.0..max_y)
        } else {
            0.0
        };
        Self::new(Vec2::new(field.width(), y), size)
    }
}

impl Ambient for Backdrop {
    fn advance(&mut self, speed_multiplier: f32) {
        self.pos.x += self.vel.x * speed_multiplier;
    }

    /// Fully left of the field
    fn is_spent(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(SpriteId::Backdrop, self.pos, self.size, 1.0);
    }
}

/// A capped collection of one ambient family
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientPool<T> {
    items: Vec<T>,
    cap: usize,
}

impl<T: Ambient> AmbientPool<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Add one member built by `make` if the pool has room
    pub fn create_if_below_cap(&mut self, make: impl FnOnce() -> T) -> bool {
        if self.items.len() >= self.cap {
            return false;
        }
        self.items.push(make());
        true
    }

    pub fn age_all(&mut self) {
        for item in &mut self.items {
            item.age();
        }
    }

    pub fn advance_all(&mut self, speed_multiplier: f32) {
        for item in &mut self.items {
            item.advance(speed_multiplier);
        }
    }

    /// Drop every spent member, keeping the rest in order. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_spent());
        before - self.items.len()
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for item in &self.items {
            item.draw(surface);
        }
    }
}
