use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{CellDetail, HeatmapCell, WorkoutRecord};

/// Daily targets that count as a "standard" session.
pub const STANDARD_SWINGS: f64 = 100.0;
pub const STANDARD_GET_UPS: f64 = 10.0;

/// Ordinal 1..=4 from the day's load relative to the standard session.
pub fn intensity(swings: u32, get_ups: u32) -> u8 {
    let swing_ratio = swings as f64 / STANDARD_SWINGS;
    let get_up_ratio = get_ups as f64 / STANDARD_GET_UPS;
    let avg_ratio = (swing_ratio + get_up_ratio) / 2.0;

    if avg_ratio >= 1.5 {
        4
    } else if avg_ratio >= 1.2 {
        3
    } else if avg_ratio >= 0.8 {
        2
    } else {
        1
    }
}

/// One cell per training date in `year`. Several workouts on a date are
/// merged; days without a workout are absent.
pub fn build_heatmap(records: &[WorkoutRecord], year: i32) -> BTreeMap<NaiveDate, HeatmapCell> {
    let mut cells: BTreeMap<NaiveDate, HeatmapCell> = BTreeMap::new();

    for r in records.iter().filter(|r| r.date.year() == year) {
        let cell = cells.entry(r.date).or_insert_with(|| HeatmapCell {
            date: r.date,
            intensity: 1,
            workouts: 0,
            swings: 0,
            get_ups: 0,
            details: Vec::new(),
        });
        cell.workouts += 1;
        cell.swings += r.kettlebell_swings;
        cell.get_ups += r.turkish_get_ups;
        cell.details.push(CellDetail {
            swings: r.kettlebell_swings,
            get_ups: r.turkish_get_ups,
            swing_weight_kg: r.swing_weight_kg,
            getup_weight_kg: r.getup_weight_1_kg,
            swing_style: r.swing_style,
        });
    }

    for cell in cells.values_mut() {
        cell.intensity = intensity(cell.swings, cell.get_ups);
    }

    cells
}

/// Calendar columns for `year`: one entry per week, Sunday first. Days
/// outside the year are `None`.
pub fn calendar_weeks(year: i32) -> Vec<[Option<NaiveDate>; 7]> {
    let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week: [Option<NaiveDate>; 7] = [None; 7];
    let mut day = first;
    loop {
        let slot = day.weekday().num_days_from_sunday() as usize;
        week[slot] = Some(day);
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
        if day == last {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::{day, record};

    #[test]
    fn bucket_thresholds() {
        assert_eq!(intensity(0, 0), 1);
        assert_eq!(intensity(50, 5), 1);
        assert_eq!(intensity(80, 8), 2);
        assert_eq!(intensity(100, 10), 2);
        assert_eq!(intensity(120, 12), 3);
        assert_eq!(intensity(150, 15), 4);
        assert_eq!(intensity(300, 0), 4);
    }

    #[test]
    fn intensity_never_drops_as_load_grows() {
        for get_ups in [0u32, 5, 10, 20] {
            let mut last = 0;
            for swings in (0..=400).step_by(10) {
                let bucket = intensity(swings, get_ups);
                assert!(bucket >= last, "{} swings / {} get-ups dropped", swings, get_ups);
                last = bucket;
            }
        }
        for swings in [0u32, 100, 200] {
            let mut last = 0;
            for get_ups in 0..=40 {
                let bucket = intensity(swings, get_ups);
                assert!(bucket >= last);
                last = bucket;
            }
        }
    }

    #[test]
    fn same_date_entries_merge() {
        let records = vec![
            record(1, day(2024, 4, 1), 100, 10),
            record(2, day(2024, 4, 1), 60, 6),
            record(3, day(2024, 4, 2), 40, 2),
        ];
        let cells = build_heatmap(&records, 2024);
        assert_eq!(cells.len(), 2);

        let merged = &cells[&day(2024, 4, 1)];
        assert_eq!(merged.workouts, 2);
        assert_eq!(merged.swings, 160);
        assert_eq!(merged.get_ups, 16);
        assert_eq!(merged.details.len(), 2);
        assert_eq!(merged.intensity, 4);

        assert_eq!(cells[&day(2024, 4, 2)].intensity, 1);
        assert!(!cells.contains_key(&day(2024, 4, 3)));
    }

    #[test]
    fn calendar_covers_the_year() {
        let weeks = calendar_weeks(2024);
        let days: usize = weeks.iter().map(|w| w.iter().flatten().count()).sum();
        assert_eq!(days, 366);
        // 2024-01-01 was a Monday
        assert_eq!(weeks[0][0], None);
        assert_eq!(weeks[0][1], Some(day(2024, 1, 1)));
        assert_eq!(weeks.last().unwrap()[2], Some(day(2024, 12, 31)));
        assert_eq!(weeks.len(), 53);
    }

    #[test]
    fn scoped_to_selected_year() {
        let records = vec![
            record(1, day(2023, 12, 31), 100, 10),
            record(2, day(2024, 1, 1), 100, 10),
        ];
        let cells = build_heatmap(&records, 2023);
        assert_eq!(cells.keys().copied().collect::<Vec<_>>(), vec![day(2023, 12, 31)]);
        assert!(build_heatmap(&records, 2022).is_empty());
    }
}
