//! Pure predicates over activity windows.
//!
//! All checks operate on minute-of-day keys. A window is the half-open
//! interval `[start, end)` within a single day.

use crate::activity::Activity;
use crate::time::TimeOfDay;

/// Minutes of remaining window that count as "ending soon".
pub const DUE_SOON_THRESHOLD_MIN: u32 = 10;

/// True iff `t` falls inside the activity's window.
pub fn contains(activity: &Activity, t: TimeOfDay) -> bool {
    let m = t.minute_of_day();
    activity.start.minute_of_day() <= m && m < activity.end.minute_of_day()
}

/// Start-notification predicate: `t` is exactly the start minute.
pub fn starts_at(activity: &Activity, t: TimeOfDay) -> bool {
    activity.start == t
}

/// True while inside the window with exactly `threshold` minutes left.
///
/// Exact equality, not `<=`: the predicate holds for a single minute per
/// occurrence, so a tick cadence that skips a minute skips the reminder.
pub fn ending_soon(activity: &Activity, t: TimeOfDay, threshold: u32) -> bool {
    contains(activity, t) && activity.end.minute_of_day() - t.minute_of_day() == threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn activity(sh: u8, sm: u8, eh: u8, em: u8) -> Activity {
        Activity::new(
            "Lunch",
            TimeOfDay::new(sh, sm).unwrap(),
            TimeOfDay::new(eh, em).unwrap(),
        )
        .unwrap()
    }

    fn t(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    #[test]
    fn window_is_half_open() {
        let lunch = activity(11, 0, 12, 0);
        assert!(contains(&lunch, t(11, 0)));
        assert!(contains(&lunch, t(11, 59)));
        assert!(!contains(&lunch, t(10, 59)));
        assert!(!contains(&lunch, t(12, 0)));
    }

    #[test]
    fn contains_handles_shared_hour() {
        let errand = activity(10, 20, 10, 55);
        assert!(contains(&errand, t(10, 20)));
        assert!(contains(&errand, t(10, 54)));
        assert!(!contains(&errand, t(10, 55)));
        assert!(!contains(&errand, t(10, 19)));
    }

    #[test]
    fn starts_at_exact_minute_only() {
        let lunch = activity(11, 0, 12, 0);
        assert!(starts_at(&lunch, t(11, 0)));
        assert!(!starts_at(&lunch, t(11, 1)));
        assert!(!starts_at(&lunch, t(10, 59)));
    }

    #[test]
    fn ending_soon_fires_on_single_minute() {
        let lunch = activity(11, 0, 12, 0);
        assert!(ending_soon(&lunch, t(11, 50), DUE_SOON_THRESHOLD_MIN));
        assert!(!ending_soon(&lunch, t(11, 49), DUE_SOON_THRESHOLD_MIN));
        assert!(!ending_soon(&lunch, t(11, 51), DUE_SOON_THRESHOLD_MIN));
    }

    #[test]
    fn ending_soon_across_hour_boundary() {
        // 09:00-10:05: ten minutes left at 09:55, in the previous hour.
        let walk = activity(9, 0, 10, 5);
        assert!(ending_soon(&walk, t(9, 55), DUE_SOON_THRESHOLD_MIN));
        assert!(!ending_soon(&walk, t(9, 54), DUE_SOON_THRESHOLD_MIN));
    }

    #[test]
    fn ending_soon_requires_window_membership() {
        // Threshold larger than the window never matches before the start.
        let errand = activity(15, 20, 15, 45);
        assert!(!ending_soon(&errand, t(15, 10), 35));
        assert!(ending_soon(&errand, t(15, 35), DUE_SOON_THRESHOLD_MIN));
    }

    proptest! {
        #[test]
        fn interior_minutes_are_contained(
            start in 0u32..1380,
            len in 2u32..120,
            offset in 1u32..120,
        ) {
            let end = (start + len).min(1439);
            prop_assume!(start + 1 < end);
            let a = activity(
                (start / 60) as u8, (start % 60) as u8,
                (end / 60) as u8, (end % 60) as u8,
            );
            let probe = start + 1 + offset % (end - start - 1);
            prop_assert!(contains(&a, t((probe / 60) as u8, (probe % 60) as u8)));
            // End minute is excluded; start minute is included.
            prop_assert!(!contains(&a, t((end / 60) as u8, (end % 60) as u8)));
            prop_assert!(contains(&a, t((start / 60) as u8, (start % 60) as u8)));
        }

        #[test]
        fn ending_soon_holds_for_exactly_one_minute(
            start in 0u32..1380,
            len in 11u32..120,
        ) {
            let end = (start + len).min(1439);
            prop_assume!(end > start + DUE_SOON_THRESHOLD_MIN);
            let a = activity(
                (start / 60) as u8, (start % 60) as u8,
                (end / 60) as u8, (end % 60) as u8,
            );
            let hits = (0..1440u32)
                .filter(|m| ending_soon(&a, t((m / 60) as u8, (m % 60) as u8), DUE_SOON_THRESHOLD_MIN))
                .count();
            prop_assert_eq!(hits, 1);
        }
    }
}
