use crate::models::{ChartMetrics, ProgressPoint, WorkoutRecord};
use crate::utils::units::DisplayUnit;

/// Reps-weighted average of the two get-up bells, or weight 1 alone.
pub fn effective_getup_weight_kg(record: &WorkoutRecord) -> f64 {
    if let Some((reps_2, weight_2)) = record.second_getup() {
        let total_reps = record.getup_reps_1 + reps_2;
        if total_reps > 0 {
            let total = total_reps as f64;
            return (record.getup_reps_1 as f64 / total) * record.getup_weight_1_kg
                + (reps_2 as f64 / total) * weight_2;
        }
    }
    record.getup_weight_1_kg
}

/// Sessions oldest first, weights in the display unit.
pub fn build_series(records: &[WorkoutRecord], unit: DisplayUnit) -> Vec<ProgressPoint> {
    let mut sorted: Vec<&WorkoutRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, r)| ProgressPoint {
            index,
            date: r.date,
            swing_weight: unit.convert(r.swing_weight_kg),
            getup_weight: unit.convert(effective_getup_weight_kg(r)).round(),
        })
        .collect()
}

/// Padded y-axis range over the visible metrics. The x-axis is the session
/// index, so spacing is equal per workout regardless of elapsed days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub min: f64,
    pub max: f64,
}

impl ChartScale {
    pub fn for_series(points: &[ProgressPoint], metrics: ChartMetrics) -> Option<Self> {
        let visible: Vec<f64> = points
            .iter()
            .flat_map(|p| {
                let swing = metrics.swing_weight.then_some(p.swing_weight);
                let getup = metrics.getup_weight.then_some(p.getup_weight);
                swing.into_iter().chain(getup)
            })
            .collect();

        if visible.is_empty() {
            return None;
        }

        let min = visible.iter().copied().fold(f64::INFINITY, f64::min);
        let max = visible.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            min: min * 0.9,
            max: max * 1.1,
        })
    }

    /// Fraction 0..=1 along the x-axis for the `index`-th of `len` points.
    pub fn x_fraction(index: usize, len: usize) -> f64 {
        index as f64 / (len.saturating_sub(1).max(1)) as f64
    }

    /// Fraction 0..=1 up the y-axis.
    pub fn y_fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.5;
        }
        (value - self.min) / span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::{day, record};

    #[test]
    fn blended_getup_weight() {
        let mut r = record(1, day(2024, 1, 1), 100, 10);
        r.getup_reps_1 = 5;
        r.getup_weight_1_kg = 16.0;
        r.getup_reps_2 = 5;
        r.getup_weight_2_kg = Some(24.0);
        assert_eq!(effective_getup_weight_kg(&r), 20.0);
    }

    #[test]
    fn single_bell_uses_weight_one() {
        let mut r = record(1, day(2024, 1, 1), 100, 10);
        r.getup_weight_1_kg = 24.0;
        r.getup_weight_2_kg = Some(32.0);
        r.getup_reps_2 = 0;
        assert_eq!(effective_getup_weight_kg(&r), 24.0);
    }

    #[test]
    fn series_is_chronological_and_converted() {
        let mut later = record(1, day(2024, 2, 1), 100, 10);
        later.swing_weight_kg = 24.0;
        let earlier = record(2, day(2024, 1, 1), 100, 10);

        let series = build_series(&[later, earlier], DisplayUnit::Imperial);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, day(2024, 1, 1));
        assert_eq!(series[0].index, 0);
        assert_eq!(series[0].swing_weight, 35.0);
        assert_eq!(series[1].swing_weight, 53.0);
        assert_eq!(series[1].getup_weight, 35.0);
    }

    #[test]
    fn getup_display_is_rounded() {
        let mut r = record(1, day(2024, 1, 1), 0, 3);
        r.getup_reps_1 = 2;
        r.getup_weight_1_kg = 16.0;
        r.getup_reps_2 = 1;
        r.getup_weight_2_kg = Some(24.0);
        // 18.67kg
        let series = build_series(&[r], DisplayUnit::Metric);
        assert_eq!(series[0].getup_weight, 19.0);
    }

    #[test]
    fn scale_pads_visible_metrics() {
        let mut heavy = record(1, day(2024, 1, 2), 100, 10);
        heavy.swing_weight_kg = 32.0;
        let series = build_series(&[record(2, day(2024, 1, 1), 100, 10), heavy], DisplayUnit::Metric);

        let both = ChartScale::for_series(&series, ChartMetrics::default()).unwrap();
        assert!((both.min - 16.0 * 0.9).abs() < 1e-9);
        assert!((both.max - 32.0 * 1.1).abs() < 1e-9);

        let getup_only = ChartMetrics {
            swing_weight: false,
            getup_weight: true,
        };
        let scale = ChartScale::for_series(&series, getup_only).unwrap();
        assert!((scale.max - 16.0 * 1.1).abs() < 1e-9);

        let none = ChartMetrics {
            swing_weight: false,
            getup_weight: false,
        };
        assert_eq!(ChartScale::for_series(&series, none), None);
        assert_eq!(ChartScale::for_series(&[], ChartMetrics::default()), None);
    }

    #[test]
    fn x_positions_are_evenly_spaced() {
        assert_eq!(ChartScale::x_fraction(0, 1), 0.0);
        assert_eq!(ChartScale::x_fraction(0, 5), 0.0);
        assert_eq!(ChartScale::x_fraction(2, 5), 0.5);
        assert_eq!(ChartScale::x_fraction(4, 5), 1.0);
    }
}
