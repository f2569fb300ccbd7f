//! The driving schedule loop.
//!
//! Once per tick the loop advances the virtual clock, evaluates every
//! pending activity through the trigger tracker, and dispatches
//! notifications. User interaction goes through the [`Console`] trait so
//! the engine itself owns no terminal state. Notifications are modal by
//! design: the loop blocks on the yes/no answer before continuing.

use std::io;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::activity::ActivityStore;
use crate::clock::VirtualClock;
use crate::error::{QueryError, Result};
use crate::time::TimeOfDay;
use crate::trigger::{NotificationClass, TriggerTracker};
use crate::window;

/// Every user-visible status line the engine can emit.
///
/// The console collaborator owns the rendering; the engine only states
/// what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An activity's window just started.
    ActivityStarting { name: String },
    /// Exactly `minutes_left` minutes remain in the window.
    ActivityEndingSoon { name: String, minutes_left: u32 },
    /// A queried time falls inside the activity's window.
    ActivityNow { name: String },
    MarkedDone { name: String },
    AlreadyDone { name: String },
    NothingScheduled,
    /// An out-of-band line that parsed as neither `now` nor `HH:MM`.
    InvalidQuery { line: String },
}

/// Terminal-side collaborator: rendering, modal confirmation, and
/// non-blocking line input.
pub trait Console {
    fn notify(&mut self, notice: &Notice);

    /// Modal yes/no prompt for the named activity. Blocks until the user
    /// answers exactly "yes" or "no" (whitespace-trimmed); re-prompting on
    /// anything else is the implementation's job.
    fn confirm(&mut self, name: &str) -> io::Result<bool>;

    /// Poll for out-of-band input without blocking. At most one complete
    /// line per call, without its trailing newline.
    fn poll_line(&mut self) -> io::Result<Option<String>>;

    /// Cosmetic screen reset after an interaction.
    fn clear(&mut self);
}

/// An out-of-band status request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Now,
    At(TimeOfDay),
}

impl Query {
    /// Accepts the literal `now` or a strict `HH:MM` time; anything else
    /// is an error the caller reports once and discards.
    pub fn parse(line: &str) -> Result<Self, QueryError> {
        if line == "now" {
            return Ok(Query::Now);
        }
        line.parse().map(Query::At)
    }
}

/// Schedule loop configuration.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Real-time sleep between evaluation passes.
    pub tick: Duration,
    /// Minutes of remaining window that trigger the reminder.
    pub due_soon_threshold: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            due_soon_threshold: window::DUE_SOON_THRESHOLD_MIN,
        }
    }
}

/// Drives the clock, the store, and the tracker once per tick.
pub struct ScheduleLoop<'a, C: Console> {
    clock: VirtualClock,
    store: ActivityStore,
    tracker: TriggerTracker,
    console: &'a mut C,
    config: LoopConfig,
}

impl<'a, C: Console> ScheduleLoop<'a, C> {
    pub fn new(
        clock: VirtualClock,
        store: ActivityStore,
        console: &'a mut C,
        config: LoopConfig,
    ) -> Self {
        Self {
            clock,
            store,
            tracker: TriggerTracker::new(),
            console,
            config,
        }
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    /// Run until the virtual day rolls over. Fixed tick cadence; a slow
    /// pass simply delays the next one, there is no catch-up.
    pub fn run(&mut self) -> Result<()> {
        info!(activities = self.store.len(), "schedule loop started");
        loop {
            self.clock.advance();
            if self.clock.day_rolled_over() {
                break;
            }
            let t = self.clock.time_of_day();
            self.step(t)?;
            thread::sleep(self.config.tick);
        }
        info!("virtual day complete");
        Ok(())
    }

    /// One evaluation pass at virtual time `t`: edge checks for every
    /// pending activity, then one poll of the out-of-band input.
    pub fn step(&mut self, t: TimeOfDay) -> Result<()> {
        let minute_key = t.minute_of_day();

        for index in 0..self.store.len() {
            let (starting, name) = match self.store.get(index) {
                Some(a) if !a.done => (window::starts_at(a, t), a.name.clone()),
                _ => continue,
            };
            if self
                .tracker
                .check(index, NotificationClass::Start, starting, minute_key)
            {
                debug!(activity = %name, time = %t, "start edge");
                self.console.notify(&Notice::ActivityStarting { name: name.clone() });
                self.confirm_and_mark(index, &name)?;
            }

            // The confirmation above may have marked the activity done.
            let soon = match self.store.get(index) {
                Some(a) if !a.done => window::ending_soon(a, t, self.config.due_soon_threshold),
                _ => continue,
            };
            if self
                .tracker
                .check(index, NotificationClass::EndingSoon, soon, minute_key)
            {
                debug!(activity = %name, time = %t, "ending-soon edge");
                self.console.notify(&Notice::ActivityEndingSoon {
                    name: name.clone(),
                    minutes_left: self.config.due_soon_threshold,
                });
                self.confirm_and_mark(index, &name)?;
            }
        }

        if let Some(line) = self.console.poll_line()? {
            self.handle_query(&line, t)?;
        }
        Ok(())
    }

    /// Modal confirmation; "yes" marks the activity done.
    fn confirm_and_mark(&mut self, index: usize, name: &str) -> Result<()> {
        if self.console.confirm(name)? && self.store.mark_done(index)? {
            info!(activity = name, "marked done");
            self.console.notify(&Notice::MarkedDone {
                name: name.to_string(),
            });
        }
        self.console.clear();
        Ok(())
    }

    /// Status query for a supplied time. Level-triggered by design: it
    /// re-evaluates window membership for every activity, done or not,
    /// and bypasses the trigger tracker entirely.
    fn handle_query(&mut self, line: &str, current: TimeOfDay) -> Result<()> {
        let target = match Query::parse(line) {
            Ok(Query::Now) => current,
            Ok(Query::At(t)) => t,
            Err(_) => {
                self.console.notify(&Notice::InvalidQuery {
                    line: line.to_string(),
                });
                return Ok(());
            }
        };
        debug!(time = %target, "status query");

        let mut any_scheduled = false;
        for index in 0..self.store.len() {
            let (done, name) = match self.store.get(index) {
                Some(a) if window::contains(a, target) => (a.done, a.name.clone()),
                _ => continue,
            };
            any_scheduled = true;
            if done {
                self.console.notify(&Notice::AlreadyDone { name });
            } else {
                self.console.notify(&Notice::ActivityNow { name: name.clone() });
                self.confirm_and_mark(index, &name)?;
            }
        }
        if !any_scheduled {
            self.console.notify(&Notice::NothingScheduled);
        }
        self.console.clear();
        Ok(())
    }
}
