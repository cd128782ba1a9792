//! Cancellable timers keyed by purpose
//!
//! Timers are due at an absolute millisecond time supplied by the frame
//! driver and are dispatched between frames, never during one. Each purpose
//! has at most one live timer; scheduling a purpose again replaces it.
//! `cancel_all` bumps the generation so handles from a torn-down run go stale.

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    PursuerSpawn,
    BackdropSpawn,
    ScoreTick,
    GhostExpiry,
}

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    generation: u32,
    pub purpose: TimerPurpose,
}

/// A timer whose due time has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    /// When it was due (reschedule from here to avoid drift)
    pub due_ms: u64,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
    generation: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `purpose` to fire at `at_ms`, replacing any live timer for it
    pub fn schedule_at(&mut self, purpose: TimerPurpose, at_ms: u64) -> TimerHandle {
        self.cancel_purpose(purpose);

        let handle = TimerHandle {
            id: self.next_id,
            generation: self.generation,
            purpose,
        };
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            due_ms: at_ms,
        });
        log::trace!("Scheduled {:?} at {}ms", purpose, at_ms);
        handle
    }

    fn cancel_purpose(&mut self, purpose: TimerPurpose) {
        self.timers.retain(|t| t.handle.purpose != purpose);
    }

    /// Cancel everything and invalidate every outstanding handle
    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("Cancelling {} pending timers", self.timers.len());
        }
        self.timers.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Was this handle issued before the last `cancel_all`?
    pub fn is_stale(&self, handle: TimerHandle) -> bool {
        handle.generation != self.generation
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn due_at(&self, purpose: TimerPurpose) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.handle.purpose == purpose)
            .map(|t| t.due_ms)
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    /// Ties go to the one scheduled first.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle.id))
            .map(|(i, _)| i)?;

        let timer = self.timers.swap_remove(index);
        Some(Fired {
            handle: timer.handle,
            due_ms: timer.due_ms,
        })
    }
}
