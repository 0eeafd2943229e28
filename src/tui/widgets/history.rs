use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::models::WorkoutRecord;
use crate::stats::{rate_workout, workout_volume};
use crate::tui::theme::Palette;
use crate::utils::format::{fit_width, format_card_date};
use crate::utils::units::{format_volume, format_weight, DisplayUnit};

pub struct HistoryView<'a> {
    pub records: Vec<&'a WorkoutRecord>,
    /// zero-based
    pub page: usize,
    pub pages: usize,
    pub selected: usize,
    pub unit: DisplayUnit,
    pub focused: bool,
}

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, view: &HistoryView) {
    let title = format!(" History  {}/{} ", view.page + 1, view.pages);
    let block = palette.panel(&title, view.focused);
    let width = area.width.saturating_sub(4) as usize;

    if view.records.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
            "  No workouts yet. Press [n] to log one.",
            palette.dim(),
        )))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let is_selected = view.focused && i == view.selected;
            let rating = rate_workout(record.kettlebell_swings, record.turkish_get_ups);
            let volume = workout_volume(record);

            let date_style = if is_selected {
                palette.accent().add_modifier(Modifier::BOLD)
            } else {
                palette.bold()
            };
            let marker = if is_selected { "▸ " } else { "  " };

            let swings = format!(
                "    {} {} swings @ {} · {}",
                record.kettlebell_swings,
                record.swing_style,
                format_weight(record.swing_weight_kg, view.unit),
                record.swing_workout_type
            );
            let getups = format!(
                "    {} · {}",
                record.getup_summary(view.unit),
                record.getup_workout_type
            );
            let load = format!(
                "    Volume {} {}",
                format_volume(volume.total, view.unit),
                view.unit.suffix()
            );

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, palette.accent()),
                    Span::styled(format_card_date(record.date), date_style),
                    Span::styled(format!("  {} {}", rating.icon(), rating.label()), palette.dim()),
                ]),
                Line::from(Span::styled(fit_width(&swings, width), palette.base())),
                Line::from(Span::styled(fit_width(&getups, width), palette.base())),
                Line::from(Span::styled(fit_width(&load, width), palette.dim())),
                Line::from(""),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
