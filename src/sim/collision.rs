//! Collision detection
//!
//! Everything that can hurt the player is an axis-aligned box, so the whole
//! resolver is an inclusive AABB overlap test. Touching edges count as a hit.

use glam::Vec2;

use super::entity::{Body, Pursuer};

/// Axis-aligned bounding box in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Inclusive overlap: boxes that share an edge intersect
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

/// Does the player's box intersect any live pursuer?
///
/// Any single overlap is enough; with several simultaneous hits the outcome
/// is the same whichever is found first.
///
/// The frame update repeats this test inline, pursuer by pursuer, because each
/// check has to land before that pursuer's move. This is the whole-field form
/// for callers holding a settled state.
pub fn check_collision(player: &Body, pursuers: &[Pursuer]) -> bool {
    let player_box = player.aabb();
    pursuers.iter().any(|p| player_box.overlaps(&p.body.aabb()))
}
