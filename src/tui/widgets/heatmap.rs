use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::WorkoutRecord;
use crate::stats::{build_heatmap, calendar_weeks, year_stats};
use crate::tui::theme::{self, Palette};
use crate::utils::format::format_long_date;
use crate::utils::units::{format_volume, DisplayUnit};

pub struct HeatmapView<'a> {
    pub records: &'a [WorkoutRecord],
    pub year: i32,
    pub cursor: NaiveDate,
    pub unit: DisplayUnit,
    pub focused: bool,
}

const WEEKDAYS: [&str; 7] = ["   ", "Mon", "   ", "Wed", "   ", "Fri", "   "];

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, view: &HeatmapView) {
    let cells = build_heatmap(view.records, view.year);
    let totals = year_stats(view.records, view.year);
    let weeks = calendar_weeks(view.year);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("  {} days", totals.total_days), palette.bold()),
        Span::styled(
            format!(
                "  ·  {} swings  ·  {} get-ups  ·  {} / {} {}",
                totals.total_swings,
                totals.total_get_ups,
                format_volume(totals.swing_volume, view.unit),
                format_volume(totals.get_up_volume, view.unit),
                view.unit.suffix()
            ),
            palette.dim(),
        ),
    ])];

    let mut months = String::from("      ");
    let mut last_month = 0;
    for week in &weeks {
        match week.iter().flatten().next() {
            Some(first) if first.month() != last_month => {
                last_month = first.month();
                let label = first.format("%b").to_string();
                months.push_str(&label[..1]);
            }
            _ => months.push(' '),
        }
    }
    lines.push(Line::from(Span::styled(months, palette.dim())));

    for (row, name) in WEEKDAYS.iter().enumerate() {
        let mut spans = vec![Span::styled(format!("  {} ", name), palette.dim())];
        for week in &weeks {
            let span = match week[row] {
                Some(day) if day == view.cursor && view.focused => {
                    Span::styled("◆", palette.accent().add_modifier(Modifier::BOLD))
                }
                Some(day) => {
                    let level = cells.get(&day).map(|c| c.intensity);
                    Span::styled("■", theme::heat(level))
                }
                None => Span::raw(" "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let tooltip = match cells.get(&view.cursor) {
        Some(cell) => cell.tooltip(view.unit),
        None => format!("{}\nNo workout", format_long_date(view.cursor)),
    };
    for text in tooltip.lines() {
        lines.push(Line::from(Span::styled(format!("  {}", text), palette.dim())));
    }

    let title = format!(" {} Training Consistency  [ older · ] newer ", view.year);
    let paragraph = Paragraph::new(lines).block(palette.panel(&title, view.focused));
    frame.render_widget(paragraph, area);
}
