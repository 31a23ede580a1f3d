//! One-second tick source with at most one live schedule.
//!
//! Every phase change goes through [`Ticker::sync`], which cancels the
//! current schedule before creating the next one. Each tick is stamped with
//! the phase it was scheduled for so the state machine can drop stragglers.

use crate::timer::Phase;
use gloo_timers::callback::Interval;
use log::debug;

/// Creates repeating timers. Dropping the returned handle cancels it.
pub trait TickScheduler {
    type Handle;

    fn every(&self, period_ms: u32, on_tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Browser `setInterval` via gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalScheduler;

impl TickScheduler for IntervalScheduler {
    type Handle = Interval;

    fn every(&self, period_ms: u32, on_tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, on_tick)
    }
}

pub struct Ticker<S: TickScheduler> {
    scheduler: S,
    period_ms: u32,
    active: Option<(Phase, S::Handle)>,
    generation: u64,
}

impl<S: TickScheduler> Ticker<S> {
    pub fn new(scheduler: S, period_ms: u32) -> Self {
        Self {
            scheduler,
            period_ms,
            active: None,
            generation: 0,
        }
    }

    /// Match the schedule to `phase`: cancel whatever is running, then start
    /// a fresh interval if the phase consumes ticks.
    pub fn sync<F>(&mut self, phase: Phase, on_tick: F)
    where
        F: Fn(Phase) + 'static,
    {
        self.stop();
        if !phase.is_ticking() {
            return;
        }

        self.generation += 1;
        debug!("Tick schedule #{} started for {:?}", self.generation, phase);
        let handle = self
            .scheduler
            .every(self.period_ms, Box::new(move || on_tick(phase)));
        self.active = Some((phase, handle));
    }

    /// Cancel the running schedule, if any.
    pub fn stop(&mut self) {
        if let Some((phase, handle)) = self.active.take() {
            drop(handle);
            debug!("Tick schedule #{} for {:?} cancelled", self.generation, phase);
        }
    }

    pub fn active_phase(&self) -> Option<Phase> {
        self.active.as_ref().map(|(phase, _)| *phase)
    }

    /// Number of schedules created so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<S: TickScheduler> Drop for Ticker<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
