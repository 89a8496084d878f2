use std::collections::HashMap;

use explorer_engine::{ScheduleHandle, ScheduleKind, Scheduler};
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Interval;

enum Armed {
    Frame(AnimationFrame),
    Interval(Interval),
}

/// Browser timers behind the engine's [`Scheduler`] seam.
///
/// Display-synced schedules use `requestAnimationFrame` and are re-requested
/// after every frame; fixed-period schedules use `setInterval`. Dropping a
/// gloo handle cancels the underlying browser timer.
#[derive(Default)]
pub struct BrowserScheduler {
    armed: HashMap<u32, Armed>,
    /// Frame handle whose callback is currently running. Dropped one frame later.
    spent: Option<AnimationFrame>,
    next_handle: u32,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame for a display-synced schedule that just fired.
    /// Does nothing if the schedule was cancelled meanwhile.
    pub fn rearm_frame(&mut self, handle: ScheduleHandle) {
        if let Some(Armed::Frame(frame)) = self.armed.get_mut(&handle.0) {
            let fired = std::mem::replace(frame, request_frame(handle));
            self.spent = Some(fired);
        }
    }
}

fn request_frame(handle: ScheduleHandle) -> AnimationFrame {
    request_animation_frame(move |ts| crate::on_frame(handle, ts))
}

impl Scheduler for BrowserScheduler {
    fn start(&mut self, kind: ScheduleKind, period_ms: Option<f64>) -> ScheduleHandle {
        self.next_handle += 1;
        let handle = ScheduleHandle(self.next_handle);
        let armed = match period_ms {
            None => Armed::Frame(request_frame(handle)),
            Some(ms) => {
                let millis = ms.round().max(1.0) as u32;
                Armed::Interval(Interval::new(millis, move || crate::on_interval(kind)))
            }
        };
        self.armed.insert(handle.0, armed);
        log::debug!("schedule {:?} started as #{}", kind, handle.0);
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        if self.armed.remove(&handle.0).is_some() {
            log::debug!("schedule #{} cancelled", handle.0);
        }
    }

    fn active_count(&self) -> usize {
        self.armed.len()
    }
}
