//! Frame-stepped simulation
//!
//! All gameplay logic lives here:
//! - Motion is per frame, timers are in milliseconds supplied by the driver
//! - Seeded RNG only, so a run replays exactly from its seed
//! - No platform dependencies; drawing goes through [`crate::renderer::Surface`]

pub mod ambient;
pub mod collision;
pub mod entity;
pub mod schedule;
pub mod score;
pub mod state;
pub mod tick;

pub use ambient::{Ambient, AmbientPool, Backdrop, FadingParticle, GlowParticle};
pub use collision::{Aabb, check_collision};
pub use entity::{Body, Player, Pursuer};
pub use schedule::{Fired, Scheduler, TimerHandle, TimerPurpose};
pub use score::ScoreClock;
pub use state::{GhostMode, RunEvent, RunPhase, RunState, SpawnRequest, Viewport};
pub use tick::{FrameInput, fire_due_timers, on_timer, tick};
