//! Edge detection for once-per-minute notifications.

use std::collections::HashMap;

/// The notification kinds an activity can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationClass {
    /// The activity window just started.
    Start,
    /// The window is within the reminder threshold of its end.
    EndingSoon,
}

/// Converts level-triggered window predicates into notification edges.
///
/// One entry per (activity index, class) pair holds the minute key of the
/// last fired notification. An entry equal to the current key blocks
/// re-firing; any other value means the minute changed and the pair is
/// armed again. The map replaces fixed-width bit flags, so there is no
/// ceiling on the activity count.
#[derive(Debug, Default)]
pub struct TriggerTracker {
    last_fired: HashMap<(usize, NotificationClass), u32>,
}

impl TriggerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a predicate transition produces an edge.
    ///
    /// Returns `true` exactly once per (index, class, minute_key) with a
    /// true predicate, and `false` on every later call with the same key
    /// regardless of the predicate. A false predicate never consumes the
    /// edge: a later call within the same minute may still fire.
    pub fn check(
        &mut self,
        index: usize,
        class: NotificationClass,
        predicate: bool,
        minute_key: u32,
    ) -> bool {
        let key = (index, class);
        if self.last_fired.get(&key) == Some(&minute_key) {
            return false;
        }
        if predicate {
            self.last_fired.insert(key, minute_key);
            true
        } else {
            false
        }
    }
}
