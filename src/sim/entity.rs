//! Player and pursuer entities
//!
//! Both share a [`Body`]: a box in screen pixels (origin top-left, y down)
//! with a per-frame velocity. Vertical velocity is measured upward, so
//! integrating it subtracts from `pos.y`.

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;
use crate::renderer::vertex::colors;
use crate::renderer::{Color, SpriteId, Surface};

/// Position, velocity and bounding box shared by every collidable entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Outline the collision box when drawing
    pub show_collider: bool,
    pub collider_color: Option<Color>,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel,
            size,
            show_collider: false,
            collider_color: None,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Show or hide the collision outline
    pub fn toggle_collider(&mut self, show: bool, color: Option<Color>) {
        self.show_collider = show;
        self.collider_color = color;
    }

    fn draw(&self, surface: &mut dyn Surface, sprite: SpriteId) {
        surface.blit(sprite, self.pos, self.size, 1.0);
        if self.show_collider {
            let color = self.collider_color.unwrap_or(colors::COLLIDER);
            surface.stroke_rect(self.pos, self.size, 1.0, color);
        }
    }
}

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub grounded: bool,
    /// Bottom of the play field; the player's feet never pass it
    floor: f32,
}

impl Player {
    /// Player standing at `x` on a field `floor` pixels tall, still settling
    pub fn new(x: f32, floor: f32) -> Self {
        let size = Vec2::splat(ACTOR_SIZE);
        Self {
            body: Body::new(
                Vec2::new(x, floor - size.y),
                Vec2::new(0.0, PLAYER_START_VEL_Y),
                size,
            ),
            grounded: false,
            floor,
        }
    }

    /// Y coordinate of the player's top edge when standing on the ground
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.floor - self.body.size.y
    }

    /// Integrate one frame of vertical motion
    ///
    /// Moves by the current velocity, then accelerates downward by `weight`
    /// while airborne. Reaching the ground line clamps the position, zeroes
    /// the velocity and marks the player grounded.
    pub fn apply_gravity(&mut self, weight: f32) {
        self.body.pos.y -= self.body.vel.y;

        if !self.grounded {
            self.body.vel.y -= weight;
        }

        if self.body.bottom() >= self.floor {
            self.body.pos.y = self.ground_y();
            self.body.vel.y = 0.0;
            self.grounded = true;
        }
    }

    /// Leave the ground. Ignored while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.body.vel.y = JUMP_IMPULSE;
        self.grounded = false;
        true
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.body.draw(surface, SpriteId::Player);
    }
}

/// A zombie walking left at a speed scaled by the run's difficulty
#[derive(Debug, Clone, PartialEq)]
pub struct Pursuer {
    pub body: Body,
}

impl Pursuer {
    /// Pursuer entering from the right edge of a `width`×`floor` field, on the ground
    pub fn at_right_edge(width: f32, floor: f32) -> Self {
        Self::new(Vec2::new(width, floor - ACTOR_SIZE))
    }

    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(
                pos,
                Vec2::new(PURSUER_BASE_VEL_X, 0.0),
                Vec2::splat(ACTOR_SIZE),
            ),
        }
    }

    /// Walk one frame. A non-finite multiplier counts as 1.
    pub fn advance(&mut self, speed_multiplier: f32) {
        let multiplier = if speed_multiplier.is_finite() {
            speed_multiplier
        } else {
            1.0
        };
        self.body.pos.x += self.body.vel.x * multiplier;
    }

    /// Right edge has passed the left edge of the field
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.body.right() < 0.0
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.body.draw(surface, SpriteId::Pursuer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexSurface;
    use proptest::prelude::*;

    fn grounded_player() -> Player {
        let mut player = Player::new(PLAYER_START_X, 600.0);
        player.apply_gravity(GRAVITY_WEIGHT);
        player
    }

    #[test]
    fn test_player_settles_on_first_frame() {
        let mut player = Player::new(50.0, 600.0);
        assert_eq!(player.body.pos, Vec2::new(50.0, 570.0));
        assert!(!player.grounded);

        player.apply_gravity(GRAVITY_WEIGHT);
        assert!(player.grounded);
        assert_eq!(player.body.vel.y, 0.0);
        assert_eq!(player.body.pos.y, 570.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut player = grounded_player();
        assert!(player.jump());
        assert_eq!(player.body.vel.y, JUMP_IMPULSE);
        assert!(!player.grounded);

        // Second press while airborne changes nothing
        let before = player.clone();
        assert!(!player.jump());
        assert_eq!(player, before);

        player.apply_gravity(GRAVITY_WEIGHT);
        let before = player.clone();
        assert!(!player.jump());
        assert_eq!(player, before);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut player = grounded_player();
        player.jump();

        let mut frames = 0;
        while !player.grounded {
            player.apply_gravity(GRAVITY_WEIGHT);
            assert!(player.body.bottom() <= 600.0);
            frames += 1;
            assert!(frames < 200, "never landed");
        }
        assert_eq!(player.body.pos.y, player.ground_y());
        assert_eq!(player.body.vel.y, 0.0);
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let mut player = grounded_player();
        for _ in 0..100 {
            player.apply_gravity(GRAVITY_WEIGHT);
            assert!(player.grounded);
            assert_eq!(player.body.vel.y, 0.0);
            assert_eq!(player.body.pos.y, 570.0);
        }
    }

    #[test]
    fn test_pursuer_walks_left_and_leaves() {
        let mut pursuer = Pursuer::at_right_edge(100.0, 600.0);
        assert_eq!(pursuer.body.pos, Vec2::new(100.0, 570.0));

        pursuer.advance(1.0);
        assert_eq!(pursuer.body.pos.x, 98.0);
        pursuer.advance(1.5);
        assert_eq!(pursuer.body.pos.x, 95.0);
        pursuer.advance(f32::NAN);
        assert_eq!(pursuer.body.pos.x, 93.0);
        assert_eq!(pursuer.body.pos.y, 570.0);

        pursuer.body.pos.x = -30.0;
        assert!(!pursuer.is_offscreen());
        pursuer.advance(1.0);
        assert!(pursuer.is_offscreen());
    }

    #[test]
    fn test_collider_outline_drawn_when_enabled() {
        let mut player = grounded_player();
        let mut surface = VertexSurface::new();
        player.draw(&mut surface);
        assert_eq!(surface.vertices().len(), 6);

        player.body.toggle_collider(true, Some([0.0, 1.0, 0.0, 1.0]));
        let mut surface = VertexSurface::new();
        player.draw(&mut surface);
        assert_eq!(surface.vertices().len(), 6 + 24);
        assert_eq!(surface.vertices()[6].color, [0.0, 1.0, 0.0, 1.0]);
    }

    proptest! {
        #[test]
        fn prop_airborne_velocity_drops_by_weight(frames in 1usize..60) {
            let mut player = grounded_player();
            player.jump();
            for _ in 0..frames {
                let before = player.body.vel.y;
                player.apply_gravity(GRAVITY_WEIGHT);
                if player.grounded {
                    prop_assert_eq!(player.body.vel.y, 0.0);
                    break;
                }
                prop_assert!((before - player.body.vel.y - GRAVITY_WEIGHT).abs() < 1e-4);
            }
        }

        #[test]
        fn prop_never_below_ground(height in 60.0f32..2000.0, jumps in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut player = Player::new(PLAYER_START_X, height);
            for jump in jumps {
                if jump {
                    player.jump();
                }
                player.apply_gravity(GRAVITY_WEIGHT);
                prop_assert!(player.body.bottom() <= height + 1e-3);
            }
        }
    }
}
