use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::cli::args::LogArgs;
use crate::config::{AppConfig, Preferences};
use crate::models::{
    ChartMetrics, GetupWorkoutType, StreakTier, SwingWorkoutType, WorkoutForm, WorkoutRecord,
};
use crate::stats::{
    available_years, build_heatmap, build_series, calculate_stats, calendar_weeks, rate_workout,
    workout_volume, year_stats, ChartScale,
};
use crate::store::{page_count, RecordStore};
use crate::tui::theme::ThemeName;
use crate::utils::format::{format_card_date, format_short_date, progress_bar};
use crate::utils::units::{format_volume, format_weight, lbs_to_kg, weight_options, DisplayUnit};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const ACCENT: &str = "\x1b[38;2;192;132;252m";

/// Heatmap shades: empty, then intensity 1..=4.
const HEAT: [&str; 5] = [
    "\x1b[38;2;48;48;56m",
    "\x1b[38;2;70;110;80m",
    "\x1b[38;2;90;150;100m",
    "\x1b[38;2;110;200;130m",
    "\x1b[38;2;34;197;94m",
];

// ─── Log ─────────────────────────────────────────────────────────────────────

pub async fn handle_log(store: &mut RecordStore, prefs: &Preferences, args: LogArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let form = form_from_args(args, today);
    let workout = form.to_new_workout(today);
    let unit = prefs.unit();

    if !store.create(&workout).await {
        println_colored!(RED, "  ✗ Workout was not saved (see log output)");
        return Ok(());
    }

    let rating = rate_workout(workout.kettlebell_swings, workout.turkish_get_ups);
    println_colored!(
        GREEN,
        "  ✓ Logged {}: {} swings @ {}, {} get-ups  {} {}",
        format_card_date(workout.date),
        workout.kettlebell_swings,
        format_weight(workout.swing_weight_kg, unit),
        workout.turkish_get_ups,
        rating.icon(),
        rating.label()
    );
    Ok(())
}

fn form_from_args(args: LogArgs, today: NaiveDate) -> WorkoutForm {
    let mut form = WorkoutForm::new(today);
    if let Some(date) = args.date {
        form.date = date;
    }
    form.kettlebell_swings = args.swings;
    form.swing_weight_kg = weight_arg_kg(args.swing_weight);
    form.swing_style = parse_or_default(&args.swing_style);
    form.swing_workout_type = parse_or_default::<SwingWorkoutType>(&args.swing_type);
    form.getup_reps_1 = args.getups;
    form.getup_weight_1_kg = weight_arg_kg(args.getup_weight);
    form.getup_reps_2 = args.getups2;
    form.getup_weight_2_kg = weight_arg_kg(args.getup_weight2);
    form.getup_workout_type = parse_or_default::<GetupWorkoutType>(&args.getup_type);
    form
}

/// Weights are stored in kilograms; "35lbs" is converted to the nearest kg.
fn weight_arg_kg(arg: String) -> String {
    let lower = arg.trim().to_lowercase();
    match lower.strip_suffix("lbs").or_else(|| lower.strip_suffix("lb")) {
        Some(lbs) => match lbs.trim().parse::<f64>() {
            Ok(lbs) => lbs_to_kg(lbs).to_string(),
            Err(_) => arg,
        },
        None => lower.trim_end_matches("kg").trim().to_string(),
    }
}

fn parse_or_default<T>(s: &str) -> T
where
    T: FromStr<Err = anyhow::Error> + Default,
{
    T::from_str(s).unwrap_or_else(|e| {
        log::warn!("{}, using default", e);
        T::default()
    })
}

// ─── List ────────────────────────────────────────────────────────────────────

pub fn handle_list(store: &RecordStore, prefs: &Preferences, page: usize) -> Result<()> {
    let unit = prefs.unit();
    let pages = page_count(store.records().len());
    let page = page.clamp(1, pages);

    println!();
    println_colored!(ACCENT, "  Workout History  (page {}/{})", page, pages);
    println!();

    let records = store.history_page(page - 1);
    if records.is_empty() {
        println_colored!(DIM, "  No workouts yet. Log one with `sinister log`.");
        println!();
        return Ok(());
    }

    for record in records {
        print_card(record, unit);
    }
    Ok(())
}

fn print_card(record: &WorkoutRecord, unit: DisplayUnit) {
    let rating = rate_workout(record.kettlebell_swings, record.turkish_get_ups);
    let volume = workout_volume(record);

    print_colored!(BOLD, "  {}", format_card_date(record.date));
    println_colored!(DIM, "  #{}  {} {}", record.id, rating.icon(), rating.label());
    println!(
        "    {} {} swings @ {}  ({})",
        record.kettlebell_swings,
        record.swing_style,
        format_weight(record.swing_weight_kg, unit),
        record.swing_workout_type
    );
    println!(
        "    {}  ({})",
        record.getup_summary(unit),
        record.getup_workout_type
    );
    println_colored!(
        DIM,
        "    Volume: {} swing + {} get-up = {} {}",
        format_volume(volume.swing, unit),
        format_volume(volume.get_up, unit),
        format_volume(volume.total, unit),
        unit.suffix()
    );
    println!();
}

// ─── Delete ──────────────────────────────────────────────────────────────────

pub async fn handle_delete(store: &mut RecordStore, id: i64, yes: bool) -> Result<()> {
    let Some(record) = store.find(id) else {
        println_colored!(AMBER, "  No workout with id {}", id);
        return Ok(());
    };

    if !yes {
        let answer = prompt(&format!(
            "  Delete the workout from {}? [y/N] ",
            format_card_date(record.date)
        ))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println_colored!(DIM, "  Cancelled");
            return Ok(());
        }
    }

    if store.delete(id).await {
        println_colored!(GREEN, "  ✓ Deleted workout #{}", id);
    } else {
        println_colored!(RED, "  ✗ Workout #{} was not deleted (see log output)", id);
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(store: &RecordStore) -> Result<()> {
    let stats = calculate_stats(store.records(), Local::now().naive_local());

    println!();
    println_colored!(ACCENT, "  Statistics");
    println!();
    println_colored!(BOLD, "  Total workouts:  {}", stats.total_workouts);
    println!("  Total swings:    {}", stats.total_swings);
    println!("  Total get-ups:   {}", stats.total_get_ups);
    println!("  Avg swings:      {}", stats.avg_swings);
    println!("  Avg get-ups:     {}", stats.avg_get_ups);
    println!(
        "  This week:       {}  {}",
        stats.this_week_workouts,
        progress_bar(stats.this_week_workouts.min(7), 7, 7)
    );

    if stats.streak > 0 {
        let tier = StreakTier::for_streak(stats.streak);
        println!();
        println_colored!(
            AMBER,
            "  {} {}  {}",
            tier.icon(),
            StreakTier::headline(stats.streak),
            tier.message()
        );
    } else {
        println!();
        println_colored!(DIM, "  No current streak. Train today to start one.");
    }
    println!();
    Ok(())
}

// ─── Heatmap ─────────────────────────────────────────────────────────────────

pub fn handle_heatmap(store: &RecordStore, prefs: &Preferences, year: Option<i32>) -> Result<()> {
    let unit = prefs.unit();
    let today = Local::now().date_naive();
    let years = available_years(store.records(), today);
    let year = year.unwrap_or_else(|| years.first().copied().unwrap_or(today.year()));

    let cells = build_heatmap(store.records(), year);
    let totals = year_stats(store.records(), year);

    println!();
    println_colored!(ACCENT, "  {} Training Consistency", year);
    println!();
    println!(
        "  {} days  ·  {} swings  ·  {} get-ups",
        totals.total_days, totals.total_swings, totals.total_get_ups
    );
    println_colored!(
        DIM,
        "  Volume: {} {} swings, {} {} get-ups",
        format_volume(totals.swing_volume, unit),
        unit.suffix(),
        format_volume(totals.get_up_volume, unit),
        unit.suffix()
    );
    println!();

    let weeks = calendar_weeks(year);
    print!("      ");
    let mut last_month = 0;
    for week in &weeks {
        let month = week.iter().flatten().next().map(|d| d.month()).unwrap_or(0);
        if month != last_month {
            let label = week
                .iter()
                .flatten()
                .next()
                .map(|d| d.format("%b").to_string())
                .unwrap_or_default();
            print!("{}", &label[..1.min(label.len())]);
            last_month = month;
        } else {
            print!(" ");
        }
    }
    println!();

    for (row, name) in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].iter().enumerate() {
        print!("  {} ", if row % 2 == 1 { name } else { "   " });
        for week in &weeks {
            match week[row] {
                Some(day) => {
                    let level = cells.get(&day).map(|c| c.intensity as usize).unwrap_or(0);
                    print_colored!(HEAT[level.min(4)], "■");
                }
                None => print!(" "),
            }
        }
        println!();
    }

    println!();
    print!("  Less ");
    for shade in HEAT {
        print_colored!(shade, "■");
    }
    println!(" More");

    if years.len() > 1 {
        let listed: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        println_colored!(DIM, "  Years: {}", listed.join(", "));
    }
    println!();
    Ok(())
}

// ─── Progress ────────────────────────────────────────────────────────────────

pub fn handle_progress(store: &RecordStore, prefs: &Preferences, metrics: ChartMetrics) -> Result<()> {
    let unit = prefs.unit();
    let points = build_series(store.records(), unit);

    println!();
    println_colored!(ACCENT, "  Weight Progression ({})", unit.suffix());
    println!();

    let Some(scale) = ChartScale::for_series(&points, metrics) else {
        println_colored!(DIM, "  Nothing to chart yet.");
        println!();
        return Ok(());
    };

    const BAR: usize = 24;
    for point in &points {
        print!("  {:<7}", format_short_date(point.date));
        if metrics.swing_weight {
            let filled = (scale.y_fraction(point.swing_weight) * BAR as f64).round() as usize;
            print_colored!(GREEN, " S {:>4} {:<24}", point.swing_weight, "▇".repeat(filled));
        }
        if metrics.getup_weight {
            let filled = (scale.y_fraction(point.getup_weight) * BAR as f64).round() as usize;
            print_colored!(AMBER, " G {:>4} {:<24}", point.getup_weight, "▇".repeat(filled));
        }
        println!();
    }

    println!();
    println_colored!(DIM, "  Scale {:.0}-{:.0} {}", scale.min, scale.max, unit.suffix());
    println!();
    Ok(())
}

// ─── Preferences ─────────────────────────────────────────────────────────────

pub fn handle_units(prefs: &mut Preferences, unit: Option<String>) -> Result<()> {
    if let Some(unit) = unit {
        prefs.set_unit(DisplayUnit::from_str(&unit)?)?;
        println_colored!(GREEN, "  ✓ Weights now shown in {}", prefs.unit().suffix());
    } else {
        println!("  Weights are shown in {}", prefs.unit().suffix());
    }
    let bells: Vec<String> = weight_options(prefs.unit()).into_iter().map(|o| o.label).collect();
    println_colored!(DIM, "  Bells: {}", bells.join(" "));
    Ok(())
}

pub fn handle_theme(prefs: &mut Preferences, name: Option<String>) -> Result<()> {
    match name.as_deref() {
        None => {
            for theme in ThemeName::all() {
                if theme == prefs.theme() {
                    println_colored!(ACCENT, "  ● {:<8} {}", theme.as_str(), theme.display_name());
                } else {
                    println_colored!(DIM, "  ○ {:<8} {}", theme.as_str(), theme.display_name());
                }
            }
        }
        Some(name) => {
            let theme = if name.eq_ignore_ascii_case("next") {
                prefs.theme().next()
            } else {
                ThemeName::from_str(name)?
            };
            prefs.set_theme(theme)?;
            println_colored!(GREEN, "  ✓ Theme set to {}", theme.display_name());
        }
    }
    Ok(())
}

pub fn handle_history(prefs: &mut Preferences, visibility: Option<String>) -> Result<()> {
    let visible = match visibility.as_deref().map(str::to_lowercase).as_deref() {
        None => {
            let state = if prefs.history_visible() { "shown" } else { "hidden" };
            println!("  History panel is {}", state);
            return Ok(());
        }
        Some("show" | "on") => true,
        Some("hide" | "off") => false,
        Some(other) => anyhow::bail!("Unknown value '{}'. Use: show, hide", other),
    };
    prefs.set_history_visible(visible)?;
    println_colored!(
        GREEN,
        "  ✓ History panel {}",
        if visible { "shown" } else { "hidden" }
    );
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(
    config: &mut AppConfig,
    set_url: Option<String>,
    override_url: Option<&str>,
) -> Result<()> {
    if let Some(url) = set_url {
        let url = url.trim().trim_end_matches('/').to_string();
        config.api.base_url = (!url.is_empty()).then_some(url);
        config.save()?;
        println_colored!(GREEN, "  ✓ Saved {}", AppConfig::config_path()?.display());
    }

    println!();
    println_colored!(ACCENT, "  Configuration");
    println!();
    println!("  Config file:   {}", AppConfig::config_path()?.display());
    println!("  Preferences:   {}", AppConfig::preferences_path()?.display());
    println_colored!(BOLD, "  Backend:       {}", config.api.resolve_base_url(override_url));
    if override_url.is_some() {
        println_colored!(DIM, "                 (from --api-url / SINISTER_API_URL)");
    }
    println!();
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SwingStyle;
    use crate::stats::fixtures::day;

    #[test]
    fn log_args_become_a_form() {
        let today = day(2024, 6, 1);
        let args = LogArgs {
            date: Some("2024-05-31".to_string()),
            swings: "100".to_string(),
            swing_weight: "53lbs".to_string(),
            swing_style: "1-handed".to_string(),
            swing_type: "emom".to_string(),
            getups: "6".to_string(),
            getup_weight: "20kg".to_string(),
            getups2: "4".to_string(),
            getup_weight2: "24".to_string(),
            getup_type: "bogus".to_string(),
        };
        let new = form_from_args(args, today).to_new_workout(today);
        assert_eq!(new.date, day(2024, 5, 31));
        assert_eq!(new.swing_style, SwingStyle::OneHanded);
        assert_eq!(new.swing_workout_type, SwingWorkoutType::Emom);
        assert_eq!(new.getup_workout_type, GetupWorkoutType::Standard);
        assert_eq!(new.turkish_get_ups, 10);
        assert_eq!(new.getup_weight_2_kg, Some(24.0));
        assert_eq!(new.swing_weight_kg, 24.0);
        assert_eq!(new.getup_weight_1_kg, 20.0);
    }

    #[test]
    fn weight_args_accept_units() {
        assert_eq!(weight_arg_kg("35lbs".to_string()), "16");
        assert_eq!(weight_arg_kg("71 lb".to_string()), "32");
        assert_eq!(weight_arg_kg("24kg".to_string()), "24");
        assert_eq!(weight_arg_kg("".to_string()), "");
        assert_eq!(weight_arg_kg("heavylbs".to_string()), "heavylbs");
    }
}
