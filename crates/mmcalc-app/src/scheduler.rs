//! Virtual-clock scheduler for tests and headless replay

use std::collections::HashMap;

use mmcalc_core::prelude::*;
use mmcalc_core::TimerId;

use crate::ports::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTimer {
    due_ms: u64,
    /// `Some` for intervals
    period_ms: Option<u64>,
}

/// Timers driven by explicit calls to [`ManualScheduler::pop_due`]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    timers: HashMap<TimerId, ScheduledTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn is_active(&self, timer: TimerId) -> bool {
        self.timers.contains_key(&timer)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Fire the earliest timer due at or before `until`
    ///
    /// The clock moves to the timer's due time. Intervals are re-armed,
    /// timeouts are dropped. Ties fire in timer id order.
    pub fn pop_due(&mut self, until: u64) -> Option<TimerId> {
        let (&timer, &scheduled) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= until)
            .min_by_key(|(id, t)| (t.due_ms, **id))?;

        self.now_ms = self.now_ms.max(scheduled.due_ms);
        match scheduled.period_ms {
            Some(period) => {
                if let Some(t) = self.timers.get_mut(&timer) {
                    t.due_ms = scheduled.due_ms + period;
                }
            }
            None => {
                self.timers.remove(&timer);
            }
        }

        trace!("{} fired at {}ms", timer, self.now_ms);
        Some(timer)
    }
}

impl Scheduler for ManualScheduler {
    fn start_interval(&mut self, timer: TimerId, period_ms: u64) -> Result<()> {
        if period_ms == 0 {
            return Err(Error::config("interval period must be greater than zero"));
        }
        self.timers.insert(
            timer,
            ScheduledTimer {
                due_ms: self.now_ms + period_ms,
                period_ms: Some(period_ms),
            },
        );
        Ok(())
    }

    fn start_timeout(&mut self, timer: TimerId, delay_ms: u64) -> Result<()> {
        self.timers.insert(
            timer,
            ScheduledTimer {
                due_ms: self.now_ms + delay_ms,
                period_ms: None,
            },
        );
        Ok(())
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}
