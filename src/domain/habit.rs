//! Habit Check-in Rules
//!
//! Pure streak arithmetic for daily habit check-ins. Dates are calendar
//! days in the user's local timezone, derived from a UTC instant plus an
//! offset in minutes (positive = west of UTC, negative = east).

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Streak lengths that earn an achievement announcement.
pub const ACHIEVEMENT_MILESTONES: [u32; 5] = [7, 14, 30, 60, 100];

/// The current calendar date in the user's local timezone.
pub fn local_date(now_utc: DateTime<Utc>, tz_offset_minutes: i32) -> NaiveDate {
    (now_utc - Duration::minutes(i64::from(tz_offset_minutes))).date_naive()
}

/// Streak value after checking in on `today`.
///
/// First check-in ever starts at 1. A repeat on the same day keeps the
/// streak. A check-in exactly one day after the last extends it; any
/// longer gap resets to 1.
pub fn next_streak(last_checkin: Option<NaiveDate>, current_streak: u32, today: NaiveDate) -> u32 {
    match last_checkin {
        None => 1,
        Some(last) if last == today => current_streak,
        Some(last) => {
            if (today - last).num_days() == 1 {
                current_streak + 1
            } else {
                1
            }
        }
    }
}

/// Whether a streak value lands on an achievement milestone.
pub fn is_milestone(streak: u32) -> bool {
    ACHIEVEMENT_MILESTONES.contains(&streak)
}
