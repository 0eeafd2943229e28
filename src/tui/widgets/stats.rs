use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::{StreakTier, WorkoutStats};
use crate::tui::theme::{self, Palette};

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, stats: &WorkoutStats) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    let cards = [
        (" Workouts ", stats.total_workouts.to_string(), format!("{} swings", stats.total_swings)),
        (" Avg Swings ", stats.avg_swings.to_string(), "per session".to_string()),
        (" Avg Get-ups ", stats.avg_get_ups.to_string(), format!("{} total", stats.total_get_ups)),
        (" This Week ", stats.this_week_workouts.to_string(), "last 7 days".to_string()),
    ];

    for (i, (title, value, caption)) in cards.iter().enumerate() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", value),
                palette.accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!("  {}", caption), palette.dim())),
        ];
        frame.render_widget(Paragraph::new(text).block(palette.panel(title, false)), cols[i]);
    }

    render_streak(frame, cols[4], palette, stats.streak);
}

fn render_streak(frame: &mut Frame, area: Rect, palette: &Palette, streak: u32) {
    let text = if streak == 0 {
        vec![
            Line::from(""),
            Line::from(Span::styled("  0 days", palette.dim())),
            Line::from(Span::styled("  Train today", palette.dim())),
        ]
    } else {
        let tier = StreakTier::for_streak(streak);
        vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {} ", tier.icon()), palette.base()),
                Span::styled(
                    StreakTier::headline(streak),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(format!("  {}", tier.message()), palette.dim())),
        ]
    };

    frame.render_widget(
        Paragraph::new(text).block(palette.panel(" Streak ", streak > 0)),
        area,
    );
}
