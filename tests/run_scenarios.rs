//! Whole-run scenarios driven through the controller at 60 fps

use bobs_run::consts::*;
use bobs_run::renderer::VertexSurface;
use bobs_run::sim::{FrameInput, Pursuer, RunEvent, RunPhase, TimerPurpose, check_collision};
use bobs_run::{FrameStatus, RunController, Settings};
use glam::Vec2;

fn settings(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        ..Default::default()
    }
}

/// Wall clock of frame `n` at 60 fps, in whole milliseconds
fn ms(frame: u64) -> u64 {
    frame * 1000 / 60
}

/// Run until the controller halts or `frames` have passed. Returns the halting frame.
fn run_frames(run: &mut RunController, start: u64, frames: u64) -> Option<u64> {
    let mut surface = VertexSurface::new();
    for frame in start..start + frames {
        if run.frame(ms(frame), &FrameInput::default(), &mut surface) == FrameStatus::Halted {
            return Some(frame);
        }
    }
    None
}

#[test]
fn test_lone_pursuer_catches_idle_player() {
    let mut run = RunController::new(800.0, 600.0, settings(1), 0).unwrap();
    assert_eq!(run.state().player.body.pos, Vec2::new(50.0, 570.0));
    assert_eq!(run.state().pursuers[0].body.pos, Vec2::new(800.0, 570.0));

    let caught = run_frames(&mut run, 1, 375).expect("player should be caught");
    assert!((355..=375).contains(&caught), "caught at frame {}", caught);
    assert_eq!(run.phase(), RunPhase::Ended);

    // The opening pursuer is the one touching the player
    let first = &run.state().pursuers[0];
    assert!((50.0..=80.0).contains(&first.body.pos.x));
    assert!(check_collision(&run.state().player.body, &run.state().pursuers));
}

#[test]
fn test_nothing_moves_after_the_run_ends() {
    let mut run = RunController::new(800.0, 600.0, settings(2), 0).unwrap();
    let caught = run_frames(&mut run, 1, 600).expect("player should be caught");

    let score = run.score();
    let multiplier = run.speed_multiplier();
    let pursuers: Vec<Vec2> = run.state().pursuers.iter().map(|p| p.body.pos).collect();
    let backdrops = run.state().backdrops.len();
    assert_eq!(run.state().scheduler.pending(), 0);

    // Stray frames long after the end, well past every timer interval
    let mut surface = VertexSurface::new();
    for frame in caught + 1..caught + 2000 {
        let input = FrameInput {
            jump: true,
            score_taps: 1,
        };
        assert_eq!(run.frame(ms(frame), &input, &mut surface), FrameStatus::Halted);
    }

    assert_eq!(run.score(), score);
    assert_eq!(run.speed_multiplier(), multiplier);
    let after: Vec<Vec2> = run.state().pursuers.iter().map(|p| p.body.pos).collect();
    assert_eq!(after, pursuers);
    assert_eq!(run.state().backdrops.len(), backdrops);
    assert_eq!(run.state().scheduler.pending(), 0);
    assert!(!run.is_ghost());
}

#[test]
fn test_score_ticks_every_half_second() {
    let mut run = RunController::new(800.0, 600.0, settings(3), 0).unwrap();

    assert_eq!(run_frames(&mut run, 1, 29), None);
    assert_eq!(run.score(), 0);

    // Frame 30 lands on 500ms
    assert_eq!(run_frames(&mut run, 30, 1), None);
    assert_eq!(run.score(), 1);

    assert_eq!(run_frames(&mut run, 31, 150), None);
    assert_eq!(ms(180), 3000);
    assert_eq!(run.score(), 6);
}

#[test]
fn test_pursuers_keep_arriving() {
    let mut run = RunController::new(800.0, 600.0, settings(4), 0).unwrap();
    let due = run
        .state()
        .scheduler
        .due_at(TimerPurpose::PursuerSpawn)
        .unwrap();
    assert!((PURSUER_SPAWN_MIN_MS..=PURSUER_SPAWN_MAX_MS).contains(&due));

    // Up to the frame before the timer is due, only the opening pursuer exists
    let mut frame = 1;
    while ms(frame) < due {
        run_frames(&mut run, frame, 1);
        assert_eq!(run.state().pursuers.len(), 1);
        frame += 1;
    }

    run_frames(&mut run, frame, 1);
    assert_eq!(run.state().pursuers.len(), 2);
    assert_eq!(run.state().pursuers[1].body.pos.x, 800.0);
}

#[test]
fn test_restart_after_game_over() {
    let mut run = RunController::new(800.0, 600.0, settings(5), 0).unwrap();
    let caught = run_frames(&mut run, 1, 600).expect("player should be caught");
    let events = run.drain_events();
    assert!(events.contains(&RunEvent::Ended { score: run.score() }));

    let now = ms(caught + 10);
    run.restart(now);
    assert_eq!(run.phase(), RunPhase::Running);
    assert_eq!(run.score(), 0);
    assert_eq!(run.speed_multiplier(), 1.0);
    assert_eq!(run.state().pursuers.len(), 1);
    assert!(run.state().backdrops.is_empty());
    assert_eq!(run.drain_events(), vec![RunEvent::Started { seed: 5 }]);

    // The new run scores on its own clock
    let mut surface = VertexSurface::new();
    assert_eq!(
        run.frame(now + SCORE_INTERVAL_MS, &FrameInput::default(), &mut surface),
        FrameStatus::Continue
    );
    assert_eq!(run.score(), 1);
}

#[test]
fn test_ghost_mode_walks_through_then_expires() {
    let mut run = RunController::new(800.0, 600.0, settings(6), 0).unwrap();
    let mut surface = VertexSurface::new();

    let taps = FrameInput {
        score_taps: GHOST_TAP_COUNT,
        ..Default::default()
    };
    run.frame(ms(1), &taps, &mut surface);
    assert!(run.is_ghost());
    let expiry = run
        .state()
        .scheduler
        .due_at(TimerPurpose::GhostExpiry)
        .unwrap();
    assert_eq!(expiry, ms(1) + GHOST_DURATION_MS);

    // Pursuers pass straight through while the ghost lasts
    run.state_mut()
        .pursuers
        .push(Pursuer::new(Vec2::new(60.0, 570.0)));
    let mut frame = 2;
    while ms(frame) < expiry {
        let status = run.frame(ms(frame), &FrameInput::default(), &mut surface);
        assert_eq!(status, FrameStatus::Continue);
        assert!(run.is_ghost());
        frame += 1;
    }

    run.state_mut().pursuers.clear();
    run.frame(expiry, &FrameInput::default(), &mut surface);
    assert!(!run.is_ghost());
    assert_eq!(run.phase(), RunPhase::Running);

    run.state_mut()
        .pursuers
        .push(Pursuer::new(Vec2::new(60.0, 570.0)));
    let status = run.frame(expiry + 16, &FrameInput::default(), &mut surface);
    assert_eq!(status, FrameStatus::Halted);

    let events = run.drain_events();
    assert!(events.contains(&RunEvent::GhostModeStarted));
    assert!(events.contains(&RunEvent::GhostModeEnded));
}

#[test]
fn test_speed_escalates_on_schedule() {
    let mut run = RunController::new(800.0, 600.0, settings(7), 0).unwrap();
    let mut surface = VertexSurface::new();
    let jump = FrameInput {
        jump: true,
        ..Default::default()
    };

    // Keep the field clear so the run survives past the first milestone
    for frame in 1..=ms_to_frame(5000) {
        run.state_mut().pursuers.clear();
        run.frame(ms(frame), &jump, &mut surface);
    }
    assert_eq!(run.score(), 10);
    assert!((run.speed_multiplier() - (1.0 + ESCALATION_STEP)).abs() < 1e-6);

    let speedups = run
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, RunEvent::SpeedUp { .. }))
        .count();
    assert_eq!(speedups, 1);
}

fn ms_to_frame(ms: u64) -> u64 {
    ms * 60 / 1000
}

#[test]
fn test_same_seed_same_run() {
    let mut a = RunController::new(800.0, 600.0, settings(99), 0).unwrap();
    let mut b = RunController::new(800.0, 600.0, settings(99), 0).unwrap();
    let end_a = run_frames(&mut a, 1, 1200);
    let end_b = run_frames(&mut b, 1, 1200);

    assert_eq!(end_a, end_b);
    assert_eq!(a.score(), b.score());
    let xs = |run: &RunController| -> Vec<f32> {
        run.state().pursuers.iter().map(|p| p.body.pos.x).collect()
    };
    assert_eq!(xs(&a), xs(&b));
}
