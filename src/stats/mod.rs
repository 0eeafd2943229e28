//! Derived statistics. Every function here is a pure view over the fetched
//! record list; none of them touch the network or the preferences.

pub mod aggregate;
pub mod heatmap;
pub mod progression;
pub mod volume;

pub use aggregate::calculate_stats;
pub use heatmap::{build_heatmap, calendar_weeks};
pub use progression::{build_series, ChartScale};
pub use volume::{available_years, rate_workout, workout_volume, year_stats};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::models::WorkoutRecord;

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Swings on a 16kg bell, get-ups all at weight 1 (16kg).
    pub fn record(id: i64, date: NaiveDate, swings: u32, get_ups: u32) -> WorkoutRecord {
        WorkoutRecord {
            id,
            date,
            kettlebell_swings: swings,
            turkish_get_ups: get_ups,
            swing_weight_kg: 16.0,
            swing_style: Default::default(),
            swing_workout_type: Default::default(),
            getup_weight_1_kg: 16.0,
            getup_reps_1: get_ups,
            getup_weight_2_kg: None,
            getup_reps_2: 0,
            getup_workout_type: Default::default(),
        }
    }
}
