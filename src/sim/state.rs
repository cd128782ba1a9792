//! Run state and core simulation types
//!
//! Everything a run owns lives in one [`RunState`]. Restarting a run means
//! building a fresh one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ambient::{AmbientPool, Backdrop, FadingParticle, GlowParticle};
use super::entity::{Player, Pursuer};
use super::schedule::{Scheduler, TimerHandle, TimerPurpose};
use super::score::ScoreClock;
use crate::consts::*;
use crate::error::ConfigError;

/// Size of the play field in screen pixels, fixed for the length of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    /// The player was caught. Terminal until restart.
    Ended,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Started { seed: u64 },
    Ended { score: u64 },
    SpeedUp { multiplier: f32 },
    GhostModeStarted,
    GhostModeEnded,
}

/// Spawns requested by timers, committed during the next frame update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRequest {
    Pursuer,
    Backdrop,
}

/// Collision bypass armed by tapping the score display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GhostMode {
    pub active: bool,
    /// Taps counted toward the next activation
    pub taps: u32,
    /// Pending one-shot expiry
    pub expiry: Option<TimerHandle>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Seed the run's RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub phase: RunPhase,
    pub score: u64,
    /// Scales pursuer and backdrop speed; only ever grows during a run
    pub speed_multiplier: f32,
    pub score_clock: ScoreClock,
    /// Frames simulated so far
    pub frame: u64,
    /// Last time supplied by the frame driver
    pub clock_ms: u64,
    pub player: Player,
    /// Live pursuers, oldest first
    pub pursuers: Vec<Pursuer>,
    pub fading: AmbientPool<FadingParticle>,
    pub glow: AmbientPool<GlowParticle>,
    pub backdrops: AmbientPool<Backdrop>,
    pub ghost: GhostMode,
    pub scheduler: Scheduler,
    pub pending_spawns: Vec<SpawnRequest>,
    pub events: Vec<RunEvent>,
}

impl RunState {
    /// Start a run at `now_ms`: player on the ground line, one pursuer at the
    /// right edge, and every recurring timer armed
    pub fn new(viewport: Viewport, seed: u64, now_ms: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            phase: RunPhase::Running,
            score: 0,
            speed_multiplier: 1.0,
            score_clock: ScoreClock::new(),
            frame: 0,
            clock_ms: now_ms,
            player: Player::new(PLAYER_START_X, viewport.height()),
            pursuers: Vec::new(),
            fading: AmbientPool::new(FADING_PARTICLE_CAP),
            glow: AmbientPool::new(GLOW_PARTICLE_CAP),
            backdrops: AmbientPool::new(BACKDROP_CAP),
            ghost: GhostMode::default(),
            scheduler: Scheduler::new(),
            pending_spawns: Vec::new(),
            events: vec![RunEvent::Started { seed }],
        };

        state.spawn_pursuer();
        state.start_timers();

        state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Add a pursuer at the right edge, on the ground
    pub fn spawn_pursuer(&mut self) {
        self.pursuers.push(Pursuer::at_right_edge(
            self.viewport.width(),
            self.viewport.height(),
        ));
    }

    /// Add a cloud if there is room for one
    pub fn spawn_backdrop(&mut self) -> bool {
        let Self {
            rng,
            viewport,
            backdrops,
            ..
        } = self;
        backdrops.create_if_below_cap(|| Backdrop::spawn(rng, viewport))
    }

    fn start_timers(&mut self) {
        let now = self.clock_ms;
        self.scheduler
            .schedule_at(TimerPurpose::ScoreTick, now + SCORE_INTERVAL_MS);
        self.schedule_pursuer_spawn(now);
        self.schedule_backdrop_spawn(now);
    }

    /// Arm the next pursuer spawn with a freshly rolled delay
    pub fn schedule_pursuer_spawn(&mut self, from_ms: u64) -> TimerHandle {
        let delay = self
            .rng
            .random_range(PURSUER_SPAWN_MIN_MS..=PURSUER_SPAWN_MAX_MS);
        self.scheduler
            .schedule_at(TimerPurpose::PursuerSpawn, from_ms + delay)
    }

    /// Arm the next backdrop spawn with a freshly rolled delay
    pub fn schedule_backdrop_spawn(&mut self, from_ms: u64) -> TimerHandle {
        let delay = self
            .rng
            .random_range(BACKDROP_SPAWN_MIN_MS..=BACKDROP_SPAWN_MAX_MS);
        self.scheduler
            .schedule_at(TimerPurpose::BackdropSpawn, from_ms + delay)
    }

    /// Running -> Ended. Cancels every timer and drops queued spawns.
    pub fn end_run(&mut self) {
        if !self.is_running() {
            return;
        }
        self.phase = RunPhase::Ended;
        self.scheduler.cancel_all();
        self.pending_spawns.clear();
        self.ghost.expiry = None;
        self.events.push(RunEvent::Ended { score: self.score });
        log::info!(
            "Run over at frame {} with score {} (speed x{:.2})",
            self.frame,
            self.score,
            self.speed_multiplier
        );
    }

    /// Count one tap on the score display; enough taps turn on ghost mode
    pub fn register_score_tap(&mut self) {
        self.ghost.taps += 1;
        if self.ghost.taps < GHOST_TAP_COUNT {
            return;
        }
        self.ghost.taps = 0;
        // Re-arming while already a ghost restarts the countdown
        let handle = self
            .scheduler
            .schedule_at(TimerPurpose::GhostExpiry, self.clock_ms + GHOST_DURATION_MS);
        self.ghost.expiry = Some(handle);
        if !self.ghost.active {
            self.ghost.active = true;
            self.events.push(RunEvent::GhostModeStarted);
            log::info!("Ghost mode on for {}ms", GHOST_DURATION_MS);
        }
    }

    pub fn end_ghost_mode(&mut self) {
        self.ghost.expiry = None;
        if self.ghost.active {
            self.ghost.active = false;
            self.events.push(RunEvent::GhostModeEnded);
            log::info!("Ghost mode off");
        }
    }
}
