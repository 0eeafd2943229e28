use chrono::NaiveDate;

use crate::models::workout::SwingStyle;
use crate::utils::units::{format_weight, DisplayUnit};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStats {
    pub total_workouts: u32,
    pub total_swings: u64,
    pub total_get_ups: u64,
    pub avg_swings: u64,
    pub avg_get_ups: u64,
    pub this_week_workouts: u32,
    pub streak: u32,
}

/// Cosmetic streak badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTier {
    Starting,
    Target,
    Strong,
    Lightning,
    Fire,
}

impl StreakTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            s if s >= 30 => StreakTier::Fire,
            s if s >= 14 => StreakTier::Lightning,
            s if s >= 7 => StreakTier::Strong,
            s if s >= 3 => StreakTier::Target,
            _ => StreakTier::Starting,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StreakTier::Fire => "🔥",
            StreakTier::Lightning => "⚡",
            StreakTier::Strong => "💪",
            StreakTier::Target => "🎯",
            StreakTier::Starting => "🌟",
        }
    }

    pub fn headline(streak: u32) -> String {
        if streak == 1 {
            "Great start!".to_string()
        } else {
            format!("{} day streak!", streak)
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StreakTier::Fire => "You're on fire! Keep it up!",
            StreakTier::Lightning => "Two weeks strong! Amazing consistency!",
            StreakTier::Strong => "One week down! Building a great habit!",
            StreakTier::Target | StreakTier::Starting => "Keep the momentum going!",
        }
    }
}

/// Training load of one workout, in kilograms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Volume {
    pub swing: f64,
    pub get_up: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearStats {
    pub year: i32,
    pub total_days: u32,
    pub total_swings: u64,
    pub total_get_ups: u64,
    pub swing_volume: f64,
    pub get_up_volume: f64,
}

/// Session rating against the 100 swings / 10 get-ups standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutRating {
    Start,
    Progress,
    Good,
    Strong,
    Perfect,
}

impl WorkoutRating {
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutRating::Perfect => "Perfect!",
            WorkoutRating::Strong => "Strong",
            WorkoutRating::Good => "Good",
            WorkoutRating::Progress => "Progress",
            WorkoutRating::Start => "Start",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutRating::Perfect => "🔥",
            WorkoutRating::Strong => "💪",
            WorkoutRating::Good => "👍",
            WorkoutRating::Progress => "🎯",
            WorkoutRating::Start => "🌱",
        }
    }
}

/// One workout folded into a heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellDetail {
    pub swings: u32,
    pub get_ups: u32,
    pub swing_weight_kg: f64,
    pub getup_weight_kg: f64,
    pub swing_style: SwingStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    /// 1..=4
    pub intensity: u8,
    pub workouts: u32,
    pub swings: u32,
    pub get_ups: u32,
    pub details: Vec<CellDetail>,
}

impl HeatmapCell {
    pub fn tooltip(&self, unit: DisplayUnit) -> String {
        let header = crate::utils::format::format_long_date(self.date);
        match self.details.as_slice() {
            [only] => format!(
                "{}\n{} {} swings @ {}\n{} get-ups @ {}",
                header,
                only.swings,
                only.swing_style,
                format_weight(only.swing_weight_kg, unit),
                only.get_ups,
                format_weight(only.getup_weight_kg, unit),
            ),
            _ => format!(
                "{}\n{} workouts - {} total swings, {} total get-ups",
                header, self.workouts, self.swings, self.get_ups
            ),
        }
    }
}

/// One charted session; weights already in the display unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub index: usize,
    pub date: NaiveDate,
    pub swing_weight: f64,
    pub getup_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartMetrics {
    pub swing_weight: bool,
    pub getup_weight: bool,
}

impl Default for ChartMetrics {
    fn default() -> Self {
        Self {
            swing_weight: true,
            getup_weight: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_tiers() {
        assert_eq!(StreakTier::for_streak(0), StreakTier::Starting);
        assert_eq!(StreakTier::for_streak(3), StreakTier::Target);
        assert_eq!(StreakTier::for_streak(7), StreakTier::Strong);
        assert_eq!(StreakTier::for_streak(14), StreakTier::Lightning);
        assert_eq!(StreakTier::for_streak(30), StreakTier::Fire);
        assert_eq!(StreakTier::headline(1), "Great start!");
        assert_eq!(StreakTier::headline(9), "9 day streak!");
    }

    #[test]
    fn tooltip_single_and_merged() {
        let detail = CellDetail {
            swings: 100,
            get_ups: 10,
            swing_weight_kg: 24.0,
            getup_weight_kg: 16.0,
            swing_style: SwingStyle::OneHanded,
        };
        let mut cell = HeatmapCell {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            intensity: 2,
            workouts: 1,
            swings: 100,
            get_ups: 10,
            details: vec![detail.clone()],
        };
        assert_eq!(
            cell.tooltip(DisplayUnit::Imperial),
            "Tuesday, March 5, 2024\n100 1-handed swings @ 53lbs\n10 get-ups @ 35lbs"
        );

        cell.workouts = 2;
        cell.swings = 200;
        cell.get_ups = 20;
        cell.details.push(detail);
        assert_eq!(
            cell.tooltip(DisplayUnit::Metric),
            "Tuesday, March 5, 2024\n2 workouts - 200 total swings, 20 total get-ups"
        );
    }
}
