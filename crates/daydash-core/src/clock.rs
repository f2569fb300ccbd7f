//! Accelerated virtual clock.
//!
//! A background ticker thread multiplies real elapsed time by the speed
//! factor and adds it to a shared atomic accumulator. The schedule loop
//! drains the accumulator into a monotonically non-decreasing offset from
//! the wall-clock anchor, so a full day can be simulated in minutes.
//!
//! Real elapsed time is measured with [`Instant`], a monotonic source, so
//! system clock adjustments cannot drag the virtual clock backwards.

use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use crate::error::ClockError;
use crate::time::TimeOfDay;

/// Bounds for the acceleration factor.
pub const SPEED_MIN: u8 = 1;
pub const SPEED_MAX: u8 = 30;

/// How many times faster than real time the virtual clock runs.
///
/// Fixed for the process lifetime once obtained from the startup prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedFactor(u8);

impl SpeedFactor {
    pub fn new(value: u8) -> Result<Self, ClockError> {
        if !(SPEED_MIN..=SPEED_MAX).contains(&value) {
            return Err(ClockError::InvalidSpeed {
                input: value.to_string(),
                min: SPEED_MIN,
                max: SPEED_MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl FromStr for SpeedFactor {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, ClockError> {
        let invalid = || ClockError::InvalidSpeed {
            input: s.to_string(),
            min: SPEED_MIN,
            max: SPEED_MAX,
        };
        let value: u8 = s.trim().parse().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

/// Handle to the shared virtual-elapsed accumulator, in microseconds.
///
/// Single writer (the ticker thread), single reader (the clock). A read
/// may lag the writer by one tick; sub-tick staleness is immaterial at
/// minute granularity, and the atomic rules out torn values.
#[derive(Debug, Clone, Default)]
pub struct SharedElapsed(Arc<AtomicU64>);

impl SharedElapsed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add virtual microseconds. Writer side.
    pub fn add_micros(&self, micros: u64) {
        self.0.fetch_add(micros, Ordering::Relaxed);
    }

    /// Take everything accumulated since the last drain. Reader side.
    fn drain_micros(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

/// The background ticking unit.
///
/// Adds `speed x real elapsed` to the shared accumulator on a fixed
/// interval. There is no cancellation: the thread runs until process
/// exit, and dropping the handle detaches it.
#[derive(Debug)]
pub struct Ticker {
    _handle: thread::JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(
        shared: SharedElapsed,
        speed: SpeedFactor,
        interval: Duration,
    ) -> io::Result<Ticker> {
        let handle = thread::Builder::new()
            .name("daydash-ticker".to_string())
            .spawn(move || {
                let mut last = Instant::now();
                loop {
                    thread::sleep(interval);
                    let now = Instant::now();
                    let real = now.duration_since(last);
                    last = now;
                    shared.add_micros(speed.get() as u64 * real.as_micros() as u64);
                }
            })?;
        Ok(Ticker { _handle: handle })
    }
}

/// Wall-clock-equivalent virtual time.
///
/// `now()` is the wall clock at startup plus all drained virtual time,
/// truncated to whole seconds for minute/hour comparisons.
#[derive(Debug)]
pub struct VirtualClock {
    anchor: NaiveDateTime,
    offset_micros: u64,
    shared: SharedElapsed,
}

impl VirtualClock {
    /// Anchor the clock at the given wall-clock instant.
    pub fn new(anchor: NaiveDateTime, shared: SharedElapsed) -> Self {
        Self {
            anchor,
            offset_micros: 0,
            shared,
        }
    }

    /// Fold newly accumulated virtual time into the offset. Called once
    /// per scheduling tick; the offset only ever grows, so `now()` is
    /// monotonically non-decreasing.
    pub fn advance(&mut self) {
        self.offset_micros += self.shared.drain_micros();
    }

    /// Current virtual timestamp, truncated to whole seconds.
    pub fn now(&self) -> NaiveDateTime {
        self.anchor + chrono::Duration::seconds((self.offset_micros / 1_000_000) as i64)
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.now().time().into()
    }

    /// True once the virtual clock has left the anchor's calendar day,
    /// i.e. the local hour has reached 24.
    pub fn day_rolled_over(&self) -> bool {
        self.now().date() > self.anchor.date()
    }
}
