//! Activities and the in-memory day store.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::time::TimeOfDay;

/// A named, time-boxed entry in the daily plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Set exactly once by user confirmation; never reset within a run.
    #[serde(default)]
    pub done: bool,
}

impl Activity {
    /// Create an activity, validating that the name is non-empty and the
    /// window start precedes its end within the same day.
    pub fn new(
        name: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Result<Self, ScheduleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScheduleError::EmptyName);
        }
        if start >= end {
            return Err(ScheduleError::InvalidWindow { name, start, end });
        }
        Ok(Self {
            name,
            start,
            end,
            done: false,
        })
    }

    /// Scheduled duration in minutes.
    pub fn duration_min(&self) -> u32 {
        self.end.minute_of_day() - self.start.minute_of_day()
    }
}

/// The fixed collection of the day's activities and their done status.
///
/// Built once at startup, mutated only by the confirmation flow, and
/// discarded at process exit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityStore {
    activities: Vec<Activity>,
}

impl ActivityStore {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    /// The stock day plan the program ships with.
    pub fn default_day() -> Self {
        let entry = |name: &str, sh, sm, eh, em| Activity {
            name: name.to_string(),
            start: TimeOfDay::at(sh, sm),
            end: TimeOfDay::at(eh, em),
            done: false,
        };
        Self {
            activities: vec![
                entry("Breakfast", 8, 50, 9, 30),
                entry("Morning walk", 9, 0, 10, 15),
                entry("House cleaning", 10, 20, 10, 55),
                entry("Lunch", 11, 0, 12, 0),
                entry("Afternoon nap", 13, 45, 15, 0),
                entry("Grocery shopping", 15, 20, 15, 45),
                entry("Cooking", 16, 15, 17, 30),
                entry("Dinner", 17, 45, 18, 30),
                entry("Evening reading", 19, 0, 21, 30),
                entry("Get medicine", 21, 30, 21, 45),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    /// Indexes and activities not yet marked done.
    pub fn pending(&self) -> impl Iterator<Item = (usize, &Activity)> {
        self.activities
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.done)
    }

    /// Mark an activity done. Returns `true` on the first marking and
    /// `false` if it was already done; the flag is never cleared.
    pub fn mark_done(&mut self, index: usize) -> Result<bool, ScheduleError> {
        let len = self.len();
        let activity = self
            .activities
            .get_mut(index)
            .ok_or(ScheduleError::OutOfBounds { index, len })?;
        if activity.done {
            return Ok(false);
        }
        activity.done = true;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    #[test]
    fn new_validates_window_order() {
        assert!(Activity::new("Lunch", t(11, 0), t(12, 0)).is_ok());
        assert!(Activity::new("Lunch", t(12, 0), t(11, 0)).is_err());
        assert!(Activity::new("Lunch", t(11, 0), t(11, 0)).is_err());
    }

    #[test]
    fn new_rejects_empty_name() {
        assert!(matches!(
            Activity::new("  ", t(11, 0), t(12, 0)),
            Err(ScheduleError::EmptyName)
        ));
    }

    #[test]
    fn default_day_has_ten_activities() {
        let store = ActivityStore::default_day();
        assert_eq!(store.len(), 10);
        assert!(store.iter().all(|a| !a.done && a.start < a.end));
    }

    #[test]
    fn mark_done_is_one_shot() {
        let mut store = ActivityStore::default_day();
        assert!(store.mark_done(3).unwrap());
        assert!(!store.mark_done(3).unwrap());
        assert!(store.get(3).unwrap().done);
    }

    #[test]
    fn mark_done_out_of_bounds_is_an_error() {
        let mut store = ActivityStore::default_day();
        assert!(matches!(
            store.mark_done(99),
            Err(ScheduleError::OutOfBounds { index: 99, len: 10 })
        ));
    }

    #[test]
    fn pending_skips_done_entries() {
        let mut store = ActivityStore::default_day();
        store.mark_done(0).unwrap();
        assert_eq!(store.pending().count(), 9);
        assert!(store.pending().all(|(i, _)| i != 0));
    }

    #[test]
    fn activity_serialization() {
        let a = Activity::new("Lunch", t(11, 0), t(12, 0)).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let decoded: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.name, "Lunch");
        assert_eq!(decoded.start, t(11, 0));
    }
}
