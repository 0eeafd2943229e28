use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{WorkoutRecord, WorkoutStats};

/// Totals, averages, trailing-week count and streak as of `now`.
pub fn calculate_stats(records: &[WorkoutRecord], now: NaiveDateTime) -> WorkoutStats {
    let total_workouts = records.len() as u32;
    let total_swings: u64 = records.iter().map(|r| r.kettlebell_swings as u64).sum();
    let total_get_ups: u64 = records.iter().map(|r| r.turkish_get_ups as u64).sum();

    // Trailing window, not calendar-week aligned
    let week_ago = now - Duration::days(7);
    let this_week_workouts = records
        .iter()
        .filter(|r| r.date.and_time(NaiveTime::MIN) >= week_ago)
        .count() as u32;

    WorkoutStats {
        total_workouts,
        total_swings,
        total_get_ups,
        avg_swings: rounded_mean(total_swings, total_workouts),
        avg_get_ups: rounded_mean(total_get_ups, total_workouts),
        this_week_workouts,
        streak: calculate_streak(records, now.date()),
    }
}

fn rounded_mean(total: u64, count: u32) -> u64 {
    if count == 0 {
        0
    } else {
        (total as f64 / count as f64).round() as u64
    }
}

/// Walks back from `today` over records sorted newest first. A record
/// extends the streak when it is at most `streak + 1` days behind the
/// cursor; the cursor then steps back one day. Same-date duplicates each
/// count.
pub fn calculate_streak(records: &[WorkoutRecord], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    dates.sort_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    let mut cursor = today;

    for date in dates {
        let diff_days = (cursor - date).num_days();
        if diff_days <= streak as i64 + 1 {
            streak += 1;
            cursor = cursor.pred_opt().unwrap_or(cursor);
        } else {
            break;
        }
    }

    streak
}
