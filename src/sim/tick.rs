//! Per-frame simulation step and timer dispatch
//!
//! A frame is: dispatch due timers, then [`tick`]. Timers only queue spawns
//! and bump the score; entity collections change inside `tick` alone.

use super::ambient::{FadingParticle, GlowParticle};
use super::schedule::{Fired, TimerPurpose};
use super::state::{RunEvent, RunState, SpawnRequest};
use crate::consts::*;
use crate::settings::Settings;

/// Input gathered since the previous frame (edge-triggered, consumed by one frame)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Space bar or touch start
    pub jump: bool,
    /// Taps on the score display
    pub score_taps: u32,
}

impl FrameInput {
    /// Key that makes the player jump
    pub const JUMP_KEY: &'static str = " ";

    /// Record a keydown. Auto-repeat from a held key is not a new press, so
    /// holding the jump key jumps once. Returns whether the key is the jump key.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        if key != Self::JUMP_KEY {
            return false;
        }
        if !repeat {
            self.jump = true;
        }
        true
    }
}

/// Advance the run clock to `now_ms` and dispatch every timer that came due.
/// Returns how many timers fired.
pub fn fire_due_timers(state: &mut RunState, now_ms: u64) -> u32 {
    state.clock_ms = state.clock_ms.max(now_ms);

    let mut fired = 0;
    while fired < MAX_TIMER_FIRES_PER_FRAME {
        let Some(timer) = state.scheduler.pop_due(state.clock_ms) else {
            break;
        };
        on_timer(state, timer);
        fired += 1;
    }
    fired
}

/// Handle one timer callback
///
/// Callbacks from a previous run, or arriving after the run ended, are
/// dropped without rescheduling.
pub fn on_timer(state: &mut RunState, fired: Fired) {
    let purpose = fired.handle.purpose;
    if state.scheduler.is_stale(fired.handle) {
        log::debug!("Ignoring stale {:?} timer", purpose);
        return;
    }
    if !state.is_running() {
        log::debug!("Ignoring {:?} timer after run end", purpose);
        return;
    }

    match purpose {
        TimerPurpose::ScoreTick => {
            if let Some(multiplier) = state
                .score_clock
                .tick(&mut state.score, &mut state.speed_multiplier)
            {
                log::info!("Score {} - speed x{:.2}", state.score, multiplier);
                state.events.push(RunEvent::SpeedUp { multiplier });
            }
            state
                .scheduler
                .schedule_at(TimerPurpose::ScoreTick, fired.due_ms + SCORE_INTERVAL_MS);
        }
        TimerPurpose::PursuerSpawn => {
            state.pending_spawns.push(SpawnRequest::Pursuer);
            state.schedule_pursuer_spawn(fired.due_ms);
        }
        TimerPurpose::BackdropSpawn => {
            state.pending_spawns.push(SpawnRequest::Backdrop);
            state.schedule_backdrop_spawn(fired.due_ms);
        }
        TimerPurpose::GhostExpiry => {
            if state.ghost.expiry == Some(fired.handle) {
                state.end_ghost_mode();
            }
        }
    }
}

/// Advance the run by one frame
///
/// Order: gravity, collider debug state, pursuers (collision check against
/// start-of-frame positions, then move, then prune), queued spawns, ambient
/// particles (create, age, prune), backdrop pruning, ambient motion, input.
/// Does nothing once the run has ended.
pub fn tick(state: &mut RunState, input: &FrameInput, settings: &Settings) {
    if !state.is_running() {
        return;
    }
    state.frame += 1;

    state.player.apply_gravity(GRAVITY_WEIGHT);

    state
        .player
        .body
        .toggle_collider(settings.show_colliders, settings.collider_color);

    update_pursuers(state);
    if !state.is_running() {
        return;
    }

    commit_spawns(state, settings);

    if settings.ambient_particles {
        let RunState {
            rng,
            viewport,
            fading,
            glow,
            ..
        } = state;
        fading.create_if_below_cap(|| FadingParticle::spawn(rng, viewport));
        glow.create_if_below_cap(|| GlowParticle::spawn(rng, viewport));
    }
    state.fading.age_all();
    state.glow.age_all();
    state.fading.prune();
    state.glow.prune();

    let gone = state.backdrops.prune();
    if gone > 0 {
        log::trace!("Pruned {} backdrops", gone);
    }

    let multiplier = state.speed_multiplier;
    state.fading.advance_all(multiplier);
    state.glow.advance_all(multiplier);
    state.backdrops.advance_all(multiplier);

    if input.jump {
        state.player.jump();
    }
    if settings.allow_ghost_mode {
        for _ in 0..input.score_taps {
            state.register_score_tap();
        }
    }
}

/// Collision-check, move and prune every pursuer in one pass
///
/// The first overlap ends the run and leaves the remaining pursuers untouched
/// for this frame. Removal keeps the survivors in order and never skips one.
fn update_pursuers(state: &mut RunState) {
    let RunState {
        player,
        pursuers,
        ghost,
        speed_multiplier,
        ..
    } = state;

    let player_box = player.body.aabb();
    let multiplier = *speed_multiplier;
    let ghost = ghost.active;
    let mut caught = false;
    let before = pursuers.len();

    pursuers.retain_mut(|pursuer| {
        if caught {
            return true;
        }
        if !ghost && player_box.overlaps(&pursuer.body.aabb()) {
            caught = true;
            return true;
        }
        pursuer.advance(multiplier);
        !pursuer.is_offscreen()
    });

    let gone = before - pursuers.len();
    if gone > 0 {
        log::trace!("Pruned {} pursuers", gone);
    }

    if caught {
        state.end_run();
    }
}

/// Apply spawns queued by timers since the last frame
fn commit_spawns(state: &mut RunState, settings: &Settings) {
    for request in std::mem::take(&mut state.pending_spawns) {
        match request {
            SpawnRequest::Pursuer => state.spawn_pursuer(),
            SpawnRequest::Backdrop => {
                if settings.backdrops {
                    state.spawn_backdrop();
                }
            }
        }
    }
}
