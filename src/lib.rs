//! Bob's Run - a side-scrolling survival runner
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, spawning, collisions, run state)
//! - `controller`: Run state machine and frame driver used by the presentation layer
//! - `renderer`: Draw-call surface plus the WebGPU pipeline that presents it
//! - `settings`: Player preferences (debug colliders, ambient effects)

pub mod controller;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use controller::{FrameStatus, RunController};
pub use error::ConfigError;
pub use settings::Settings;

/// Game configuration constants
///
/// Motion is expressed per frame, timers in milliseconds.
pub mod consts {
    /// Nominal display refresh used by headless drivers
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Player and pursuer bounding box (square)
    pub const ACTOR_SIZE: f32 = 30.0;
    /// Player spawn column
    pub const PLAYER_START_X: f32 = 50.0;
    /// Player starts slightly falling so it settles onto the ground line
    pub const PLAYER_START_VEL_Y: f32 = -2.0;
    /// Downward acceleration per frame while airborne
    pub const GRAVITY_WEIGHT: f32 = 0.4;
    /// Upward velocity applied by a jump
    pub const JUMP_IMPULSE: f32 = 12.0;

    /// Pursuer horizontal velocity at multiplier 1
    pub const PURSUER_BASE_VEL_X: f32 = -2.0;
    /// Pursuer spawn interval range (ms), re-rolled after every spawn
    pub const PURSUER_SPAWN_MIN_MS: u64 = 500;
    pub const PURSUER_SPAWN_MAX_MS: u64 = 2800;

    /// Score increments once per interval while running
    pub const SCORE_INTERVAL_MS: u64 = 500;
    /// Speed multiplier escalates every time the score reaches a multiple of this
    pub const ESCALATION_EVERY: u64 = 10;
    pub const ESCALATION_STEP: f32 = 0.05;

    /// Ghost mode: taps on the score display to arm it, and how long it lasts
    pub const GHOST_TAP_COUNT: u32 = 5;
    pub const GHOST_DURATION_MS: u64 = 6000;

    /// Fading radial particles
    pub const FADING_PARTICLE_CAP: usize = 40;
    pub const FADING_LIFESPAN_MIN: u32 = 60;
    pub const FADING_LIFESPAN_MAX: u32 = 180;
    pub const FADING_RADIUS_MIN: f32 = 1.0;
    pub const FADING_RADIUS_MAX: f32 = 3.0;

    /// Drifting glow particles
    pub const GLOW_PARTICLE_CAP: usize = 25;
    pub const GLOW_LIFESPAN_MIN: u32 = 120;
    pub const GLOW_LIFESPAN_MAX: u32 = 300;
    pub const GLOW_RADIUS_MIN: f32 = 2.0;
    pub const GLOW_RADIUS_MAX: f32 = 5.0;
    pub const GLOW_ALPHA: f32 = 0.35;

    /// Drifting backdrops (clouds)
    pub const BACKDROP_CAP: usize = 6;
    pub const BACKDROP_BASE_VEL_X: f32 = -0.5;
    pub const BACKDROP_WIDTH_MIN: f32 = 80.0;
    pub const BACKDROP_WIDTH_MAX: f32 = 180.0;
    pub const BACKDROP_SPAWN_MIN_MS: u64 = 3000;
    pub const BACKDROP_SPAWN_MAX_MS: u64 = 6500;

    /// Maximum timer callbacks dispatched in one frame (prevents catch-up storms
    /// after the page was hidden)
    pub const MAX_TIMER_FIRES_PER_FRAME: u32 = 32;
}
