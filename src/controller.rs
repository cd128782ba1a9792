//! Run state machine and frame driver
//!
//! The presentation layer owns the display-refresh loop and calls
//! [`RunController::frame`] once per refresh. The controller dispatches due
//! timers, advances the simulation one frame and draws it. It reports
//! [`FrameStatus::Halted`] once the run has ended so the driver stops
//! rescheduling itself until a restart.

use crate::error::ConfigError;
use crate::renderer::Surface;
use crate::renderer::vertex::colors;
use crate::settings::Settings;
use crate::sim::{FrameInput, RunEvent, RunPhase, RunState, Viewport, fire_due_timers, tick};

/// Whether the frame driver should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Halted,
}

pub struct RunController {
    state: RunState,
    settings: Settings,
    /// Applied at the next restart; a run keeps its field size
    pending_viewport: Option<Viewport>,
}

impl RunController {
    /// Start a run on a `width`×`height` field at `now_ms`
    pub fn new(
        width: f32,
        height: f32,
        settings: Settings,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        let viewport = Viewport::new(width, height)?;
        Ok(Self::with_viewport(viewport, settings, now_ms))
    }

    pub fn with_viewport(viewport: Viewport, settings: Settings, now_ms: u64) -> Self {
        let seed = settings.run_seed(now_ms);
        log::info!(
            "Run started on {}x{} field (seed {})",
            viewport.width(),
            viewport.height(),
            seed
        );
        Self {
            state: RunState::new(viewport, seed, now_ms),
            settings,
            pending_viewport: None,
        }
    }

    /// Run one display-refresh tick: due timers, one simulation frame, then draw
    ///
    /// A frame requested after the run ended changes nothing and draws nothing.
    pub fn frame(
        &mut self,
        now_ms: u64,
        input: &FrameInput,
        surface: &mut dyn Surface,
    ) -> FrameStatus {
        if !self.state.is_running() {
            log::debug!("Ignoring frame at {}ms after run end", now_ms);
            return FrameStatus::Halted;
        }

        fire_due_timers(&mut self.state, now_ms);
        tick(&mut self.state, input, &self.settings);
        self.render(surface);

        if self.state.is_running() {
            FrameStatus::Continue
        } else {
            FrameStatus::Halted
        }
    }

    /// Draw the current state back to front
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(colors::SKY);
        self.state.backdrops.draw(surface);
        self.state.glow.draw(surface);
        self.state.fading.draw(surface);
        for pursuer in &self.state.pursuers {
            pursuer.draw(surface);
        }
        self.state.player.draw(surface);
    }

    /// Throw the current run away and start a fresh one at `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        // Outstanding handles from the old run go stale with it
        self.state.scheduler.cancel_all();

        let viewport = self
            .pending_viewport
            .take()
            .unwrap_or(self.state.viewport);
        let seed = self.settings.run_seed(now_ms);
        log::info!(
            "Restarting (previous score {}, seed {})",
            self.state.score,
            seed
        );
        self.state = RunState::new(viewport, seed, now_ms);
    }

    /// Use a new field size from the next restart on
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let viewport = Viewport::new(width, height)?;
        log::debug!("Field resized to {}x{}, applied on restart", width, height);
        self.pending_viewport = Some(viewport);
        Ok(())
    }

    /// Events since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.state.speed_multiplier
    }

    pub fn is_ghost(&self) -> bool {
        self.state.ghost.active
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Direct access for drivers and tests that stage a scenario
    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }
}
