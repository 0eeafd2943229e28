use chrono::NaiveDate;

use crate::models::workout::{
    GetupWorkoutType, NewWorkout, SwingStyle, SwingWorkoutType, DEFAULT_WEIGHT_KG,
};

/// Raw text of the log form, as typed. Converting it never fails; bad input
/// falls back to the documented defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub date: String,
    pub kettlebell_swings: String,
    pub swing_weight_kg: String,
    pub swing_style: SwingStyle,
    pub swing_workout_type: SwingWorkoutType,
    pub getup_weight_1_kg: String,
    pub getup_reps_1: String,
    pub getup_weight_2_kg: String,
    pub getup_reps_2: String,
    pub getup_workout_type: GetupWorkoutType,
}

impl WorkoutForm {
    /// Blank form dated `today`, both weights on the 16kg bell.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            kettlebell_swings: String::new(),
            swing_weight_kg: "16".to_string(),
            swing_style: SwingStyle::default(),
            swing_workout_type: SwingWorkoutType::default(),
            getup_weight_1_kg: "16".to_string(),
            getup_reps_1: String::new(),
            getup_weight_2_kg: String::new(),
            getup_reps_2: String::new(),
            getup_workout_type: GetupWorkoutType::default(),
        }
    }

    /// Get-up total is always the sum of both rep fields.
    pub fn total_get_ups(&self) -> u32 {
        parse_count(&self.getup_reps_1) + parse_count(&self.getup_reps_2)
    }

    pub fn to_new_workout(&self, today: NaiveDate) -> NewWorkout {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").unwrap_or_else(|_| {
            log::warn!("Unparseable date '{}', using {}", self.date, today);
            today
        });

        NewWorkout {
            date,
            kettlebell_swings: parse_count(&self.kettlebell_swings),
            turkish_get_ups: self.total_get_ups(),
            swing_weight_kg: parse_weight(&self.swing_weight_kg),
            swing_style: self.swing_style,
            swing_workout_type: self.swing_workout_type,
            getup_weight_1_kg: parse_weight(&self.getup_weight_1_kg),
            getup_reps_1: parse_count(&self.getup_reps_1),
            getup_weight_2_kg: parse_optional_weight(&self.getup_weight_2_kg),
            getup_reps_2: parse_count(&self.getup_reps_2),
            getup_workout_type: self.getup_workout_type,
        }
    }
}

/// Integer prefix of the text, like a lenient number input. Negative or
/// non-numeric input is 0.
pub fn parse_count(s: &str) -> u32 {
    let s = s.trim();
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Positive weight in kilograms, 16 otherwise.
pub fn parse_weight(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => w,
        _ => DEFAULT_WEIGHT_KG,
    }
}

/// Empty text means no second bell.
pub fn parse_optional_weight(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => Some(w),
        _ => None,
    }
}
