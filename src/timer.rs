//! Session timer state machine.
//!
//! Transitions are a pure function, [`Session::apply`], from the current
//! state and an [`Action`] to the next state. Yew drives it through
//! [`Reducible`]; tests call `apply` directly.
//!
//! A phase whose counter is already zero is left by an explicit
//! [`Action::Advance`] evaluation rather than by waiting for another tick,
//! so a zero-second countdown still passes through `Counting` once.

use crate::catalog::{SessionCatalog, SessionRecord};
use crate::config::MAX_PREP_SECS;
use crate::selector::{reselect, select_initial, Level};
use log::{debug, info};
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Counting,
    Playing,
    Finished,
}

impl Phase {
    /// Phases that consume one-second ticks.
    pub fn is_ticking(self) -> bool {
        matches!(self, Phase::Counting | Phase::Playing)
    }
}

/// Inputs to the state machine: the four user intents, the tick, the
/// zero-counter evaluation and the arrival of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CatalogLoaded(Rc<SessionCatalog>),
    ChangeLevel(Level),
    AdjustPrep(i32),
    Start,
    /// A tick scheduled while the machine was in the given phase.
    Tick(Phase),
    Advance,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimerState {
    pub phase: Phase,
    pub prep_secs: u32,
    pub countdown_remaining: u32,
    pub active_remaining: u32,
    pub selected_level: Level,
    pub active_record: Option<SessionRecord>,
}

impl TimerState {
    pub fn new(prep_secs: u32) -> Self {
        Self {
            prep_secs,
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Start is only possible from `Idle` with a session bound.
    pub fn can_start(&self) -> bool {
        self.is_idle() && self.active_record.is_some()
    }

    /// Length of the active phase for the bound session, 0 when none.
    pub fn duration_secs(&self) -> u32 {
        self.active_record
            .as_ref()
            .map(|record| record.duration_secs)
            .unwrap_or(0)
    }

    /// Fraction of the active phase still remaining, in `[0, 1]`.
    ///
    /// A zero-length session counts as already complete.
    pub fn progress(&self) -> f64 {
        let duration = self.duration_secs();
        if duration == 0 {
            return 0.0;
        }
        (self.active_remaining as f64 / duration as f64).clamp(0.0, 1.0)
    }

    /// Whether the current phase's counter has run out and the next
    /// evaluation must move on.
    pub fn needs_advance(&self) -> bool {
        match self.phase {
            Phase::Counting => self.countdown_remaining == 0,
            Phase::Playing => self.active_remaining == 0,
            Phase::Idle | Phase::Finished => false,
        }
    }

    fn enter(&mut self, phase: Phase) {
        debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn advance(&mut self) {
        match self.phase {
            Phase::Counting if self.countdown_remaining == 0 => {
                self.active_remaining = self.duration_secs();
                self.enter(Phase::Playing);
            }
            Phase::Playing if self.active_remaining == 0 => {
                self.enter(Phase::Finished);
                info!("Session completed");
            }
            _ => {}
        }
    }

    fn tick(&mut self, scheduled_for: Phase) {
        if scheduled_for != self.phase {
            debug!(
                "Ignoring tick scheduled for {:?} while {:?}",
                scheduled_for, self.phase
            );
            return;
        }

        match self.phase {
            Phase::Counting if self.countdown_remaining > 0 => self.countdown_remaining -= 1,
            Phase::Playing if self.active_remaining > 0 => self.active_remaining -= 1,
            Phase::Counting | Phase::Playing => self.advance(),
            Phase::Idle | Phase::Finished => {}
        }
    }
}

/// Catalog plus the timer that runs one of its sessions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub catalog: Rc<SessionCatalog>,
    /// Set once the catalog request has settled, even when it came back empty.
    pub loaded: bool,
    pub timer: TimerState,
}

impl Session {
    pub fn new(prep_secs: u32) -> Self {
        Self {
            catalog: Rc::new(SessionCatalog::new()),
            loaded: false,
            timer: TimerState::new(prep_secs),
        }
    }

    /// Compute the state that follows `action`. Actions that are not valid
    /// in the current phase leave the state unchanged.
    pub fn apply(&self, action: Action) -> Session {
        let mut next = self.clone();
        next.step(action);
        next
    }

    fn step(&mut self, action: Action) {
        let timer = &mut self.timer;

        match action {
            Action::CatalogLoaded(catalog) => {
                if !timer.is_idle() {
                    return;
                }
                timer.active_record = select_initial(&catalog, timer.selected_level).cloned();
                if let Some(record) = &timer.active_record {
                    debug!("Initial session '{}' ({})", record.title, record.level);
                }
                self.catalog = catalog;
                self.loaded = true;
            }
            Action::ChangeLevel(level) => {
                if !timer.is_idle() {
                    return;
                }
                timer.selected_level = level;
                timer.active_record =
                    reselect(&self.catalog, level, timer.active_record.as_ref()).cloned();
            }
            Action::AdjustPrep(delta) => {
                if !timer.is_idle() {
                    return;
                }
                let prep = (timer.prep_secs as i64 + delta as i64).clamp(0, MAX_PREP_SECS as i64);
                timer.prep_secs = prep as u32;
            }
            Action::Start => {
                if !timer.can_start() {
                    return;
                }
                timer.countdown_remaining = timer.prep_secs;
                timer.enter(Phase::Counting);
            }
            Action::Tick(scheduled_for) => timer.tick(scheduled_for),
            Action::Advance => timer.advance(),
            Action::Reset => {
                if timer.phase != Phase::Finished {
                    return;
                }
                timer.prep_secs = 0;
                timer.countdown_remaining = 0;
                timer.active_remaining = 0;
                timer.enter(Phase::Idle);
            }
        }
    }
}

impl Reducible for Session {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
