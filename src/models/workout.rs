use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::utils::units::{format_weight, DisplayUnit};

pub const DEFAULT_WEIGHT_KG: f64 = 16.0;

fn default_weight() -> f64 {
    DEFAULT_WEIGHT_KG
}

/// Older rows carry `null` where newer ones carry a number.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_WEIGHT_KG))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwingStyle {
    #[default]
    #[serde(rename = "2-handed")]
    TwoHanded,
    #[serde(rename = "1-handed")]
    OneHanded,
}

impl SwingStyle {
    pub fn all() -> Vec<SwingStyle> {
        vec![SwingStyle::TwoHanded, SwingStyle::OneHanded]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwingStyle::TwoHanded => "2-handed",
            SwingStyle::OneHanded => "1-handed",
        }
    }
}

impl std::fmt::Display for SwingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwingStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2-handed" | "2" | "two" | "two-handed" => Ok(SwingStyle::TwoHanded),
            "1-handed" | "1" | "one" | "one-handed" => Ok(SwingStyle::OneHanded),
            _ => Err(anyhow::anyhow!("Unknown swing style: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwingWorkoutType {
    #[default]
    Standard,
    #[serde(rename = "EMOM")]
    Emom,
    Ladders,
    Clusters,
    Descending,
    Pyramid,
}

impl SwingWorkoutType {
    pub fn all() -> Vec<SwingWorkoutType> {
        vec![
            SwingWorkoutType::Standard,
            SwingWorkoutType::Emom,
            SwingWorkoutType::Ladders,
            SwingWorkoutType::Clusters,
            SwingWorkoutType::Descending,
            SwingWorkoutType::Pyramid,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwingWorkoutType::Standard => "Standard",
            SwingWorkoutType::Emom => "EMOM",
            SwingWorkoutType::Ladders => "Ladders",
            SwingWorkoutType::Clusters => "Clusters",
            SwingWorkoutType::Descending => "Descending",
            SwingWorkoutType::Pyramid => "Pyramid",
        }
    }
}

impl std::fmt::Display for SwingWorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwingWorkoutType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown swing workout type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GetupWorkoutType {
    #[default]
    Standard,
    #[serde(rename = "EMOM")]
    Emom,
    Complex,
    #[serde(rename = "Heavy Single")]
    HeavySingle,
    Alternating,
}

impl GetupWorkoutType {
    pub fn all() -> Vec<GetupWorkoutType> {
        vec![
            GetupWorkoutType::Standard,
            GetupWorkoutType::Emom,
            GetupWorkoutType::Complex,
            GetupWorkoutType::HeavySingle,
            GetupWorkoutType::Alternating,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GetupWorkoutType::Standard => "Standard",
            GetupWorkoutType::Emom => "EMOM",
            GetupWorkoutType::Complex => "Complex",
            GetupWorkoutType::HeavySingle => "Heavy Single",
            GetupWorkoutType::Alternating => "Alternating",
        }
    }
}

impl std::fmt::Display for GetupWorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GetupWorkoutType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        Self::all()
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| anyhow::anyhow!("Unknown get-up workout type: {}", s))
    }
}

/// A workout as returned by the backend. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kettlebell_swings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub turkish_get_ups: u32,
    #[serde(default = "default_weight", deserialize_with = "null_as_default_weight")]
    pub swing_weight_kg: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub swing_style: SwingStyle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub swing_workout_type: SwingWorkoutType,
    #[serde(default = "default_weight", deserialize_with = "null_as_default_weight")]
    pub getup_weight_1_kg: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub getup_reps_1: u32,
    #[serde(default)]
    pub getup_weight_2_kg: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub getup_reps_2: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub getup_workout_type: GetupWorkoutType,
}

impl WorkoutRecord {
    /// Second get-up weight, only when reps were actually done with it.
    pub fn second_getup(&self) -> Option<(u32, f64)> {
        match self.getup_weight_2_kg {
            Some(w) if self.getup_reps_2 > 0 => Some((self.getup_reps_2, w)),
            _ => None,
        }
    }

    /// "10 get-ups @ 16kg", or the per-bell split when two bells were used.
    pub fn getup_summary(&self, unit: DisplayUnit) -> String {
        match self.second_getup() {
            Some((reps2, weight2)) => format!(
                "{} get-ups: {} @ {} + {} @ {}",
                self.turkish_get_ups,
                self.getup_reps_1,
                format_weight(self.getup_weight_1_kg, unit),
                reps2,
                format_weight(weight2, unit)
            ),
            None => format!(
                "{} get-ups @ {}",
                self.turkish_get_ups,
                format_weight(self.getup_weight_1_kg, unit)
            ),
        }
    }
}

/// Create payload for `POST /workouts/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub kettlebell_swings: u32,
    pub turkish_get_ups: u32,
    pub swing_weight_kg: f64,
    pub swing_style: SwingStyle,
    pub swing_workout_type: SwingWorkoutType,
    pub getup_weight_1_kg: f64,
    pub getup_reps_1: u32,
    pub getup_weight_2_kg: Option<f64>,
    pub getup_reps_2: u32,
    pub getup_workout_type: GetupWorkoutType,
}
