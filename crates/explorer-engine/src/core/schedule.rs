use crate::core::time::IntervalTimer;

/// The three independent cadences of the piloting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleKind {
    /// Display-refresh driven; draws the latest state.
    Render,
    /// Fixed period; integrates ship motion.
    Physics,
    /// Fixed period; drains and regenerates energy.
    Energy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(pub u32);

/// Host timer facility.
///
/// The browser bridge implements this with `requestAnimationFrame` and
/// `setInterval`; [`HeadlessScheduler`] implements it with a virtual clock.
/// Whatever the implementation, a cancelled schedule must never fire again.
pub trait Scheduler {
    /// Start a recurring schedule. `period_ms` is `None` for the
    /// display-synced render schedule.
    fn start(&mut self, kind: ScheduleKind, period_ms: Option<f64>) -> ScheduleHandle;

    /// Stop a schedule. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: ScheduleHandle);

    /// Number of schedules currently armed.
    fn active_count(&self) -> usize;
}

/// A callback the headless clock decided is due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub kind: ScheduleKind,
    /// Virtual timestamp of the callback, in milliseconds.
    pub at_ms: f64,
}

struct Entry {
    handle: ScheduleHandle,
    kind: ScheduleKind,
    timer: IntervalTimer,
}

/// Deterministic scheduler driven by explicit elapsed time.
///
/// Time advances in 1 ms slices so callbacks of different schedules come out
/// in chronological order; ties go to the schedule started first.
pub struct HeadlessScheduler {
    frame_interval_ms: f64,
    max_ticks: u32,
    entries: Vec<Entry>,
    next_handle: u32,
    now_ms: f64,
}

impl HeadlessScheduler {
    pub fn new(frame_interval_ms: f64, max_ticks: u32) -> Self {
        Self {
            frame_interval_ms,
            max_ticks,
            entries: Vec::new(),
            next_handle: 1,
            now_ms: 0.0,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn is_active(&self, kind: ScheduleKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Move the virtual clock forward and return every callback that came due.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<Fired> {
        let mut fired = Vec::new();
        let mut remaining = elapsed_ms.max(0.0);
        while remaining > 0.0 {
            let slice = remaining.min(1.0);
            remaining -= slice;
            self.now_ms += slice;
            for entry in &mut self.entries {
                for _ in 0..entry.timer.accumulate(slice) {
                    fired.push(Fired {
                        kind: entry.kind,
                        at_ms: self.now_ms,
                    });
                }
            }
        }
        fired
    }
}

impl Scheduler for HeadlessScheduler {
    fn start(&mut self, kind: ScheduleKind, period_ms: Option<f64>) -> ScheduleHandle {
        let handle = ScheduleHandle(self.next_handle);
        self.next_handle += 1;
        let period = period_ms.unwrap_or(self.frame_interval_ms);
        self.entries.push(Entry {
            handle,
            kind,
            timer: IntervalTimer::new(period, self.max_ticks),
        });
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    fn active_count(&self) -> usize {
        self.entries.len()
    }
}
