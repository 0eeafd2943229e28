use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::models::{ChartMetrics, WorkoutRecord};
use crate::stats::{build_series, ChartScale};
use crate::tui::theme::{self, Palette};
use crate::utils::format::format_short_date;
use crate::utils::units::DisplayUnit;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    records: &[WorkoutRecord],
    unit: DisplayUnit,
    metrics: ChartMetrics,
    focused: bool,
) {
    let title = format!(
        " Weight Progression ({})  [s] swing {}  [g] get-up {} ",
        unit.suffix(),
        if metrics.swing_weight { "●" } else { "○" },
        if metrics.getup_weight { "●" } else { "○" },
    );
    let block = palette.panel(&title, focused);

    let points = build_series(records, unit);
    let Some(scale) = ChartScale::for_series(&points, metrics) else {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("  Nothing to chart yet.", palette.dim())),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let len = points.len();
    let swing: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (ChartScale::x_fraction(p.index, len), p.swing_weight))
        .collect();
    let getup: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (ChartScale::x_fraction(p.index, len), p.getup_weight))
        .collect();

    let mut datasets = Vec::new();
    if metrics.swing_weight {
        datasets.push(
            Dataset::default()
                .name("Swing")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme::green())
                .data(&swing),
        );
    }
    if metrics.getup_weight {
        datasets.push(
            Dataset::default()
                .name("Get-up")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme::amber())
                .data(&getup),
        );
    }

    let first = points.first().map(|p| format_short_date(p.date)).unwrap_or_default();
    let last = points.last().map(|p| format_short_date(p.date)).unwrap_or_default();
    let axis_style = Style::default().fg(palette.text_dim);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 1.0])
                .labels([Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([scale.min, scale.max])
                .labels([
                    Span::raw(format!("{:.0}", scale.min)),
                    Span::raw(format!("{:.0}", scale.max)),
                ]),
        );

    frame.render_widget(chart, area);
}
