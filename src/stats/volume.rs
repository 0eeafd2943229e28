use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::models::{Volume, WorkoutRating, WorkoutRecord, YearStats};

pub fn swing_volume(record: &WorkoutRecord) -> f64 {
    record.kettlebell_swings as f64 * record.swing_weight_kg
}

/// Dual-weight model: reps at weight 1 plus reps at the optional weight 2.
pub fn get_up_volume(record: &WorkoutRecord) -> f64 {
    let first = record.getup_reps_1 as f64 * record.getup_weight_1_kg;
    let second = record.getup_reps_2 as f64 * record.getup_weight_2_kg.unwrap_or(0.0);
    first + second
}

pub fn workout_volume(record: &WorkoutRecord) -> Volume {
    let swing = swing_volume(record);
    let get_up = get_up_volume(record);
    Volume {
        swing,
        get_up,
        total: swing + get_up,
    }
}

pub fn year_stats(records: &[WorkoutRecord], year: i32) -> YearStats {
    let in_year: Vec<&WorkoutRecord> = records.iter().filter(|r| r.date.year() == year).collect();
    let days: BTreeSet<NaiveDate> = in_year.iter().map(|r| r.date).collect();

    YearStats {
        year,
        total_days: days.len() as u32,
        total_swings: in_year.iter().map(|r| r.kettlebell_swings as u64).sum(),
        total_get_ups: in_year.iter().map(|r| r.turkish_get_ups as u64).sum(),
        swing_volume: in_year.iter().map(|r| swing_volume(r)).sum(),
        get_up_volume: in_year.iter().map(|r| get_up_volume(r)).sum(),
    }
}

/// Distinct years, newest first. With no records the current year is the
/// only choice.
pub fn available_years(records: &[WorkoutRecord], today: NaiveDate) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|r| r.date.year()).collect();
    if years.is_empty() {
        return vec![today.year()];
    }
    years.into_iter().rev().collect()
}

pub fn rate_workout(swings: u32, get_ups: u32) -> WorkoutRating {
    let swing_pct = swings as f64 / 100.0 * 100.0;
    let get_up_pct = get_ups as f64 / 10.0 * 100.0;
    let average = (swing_pct + get_up_pct) / 2.0;

    if average >= 100.0 {
        WorkoutRating::Perfect
    } else if average >= 80.0 {
        WorkoutRating::Strong
    } else if average >= 60.0 {
        WorkoutRating::Good
    } else if average >= 40.0 {
        WorkoutRating::Progress
    } else {
        WorkoutRating::Start
    }
}
