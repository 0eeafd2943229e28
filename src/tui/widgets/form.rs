use ratatui::{
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::form::parse_optional_weight;
use crate::tui::app::centered;
use crate::tui::form::{FormField, FormState};
use crate::tui::theme::{self, Palette};
use crate::utils::units::{format_weight, DisplayUnit};

/// Log-workout popup. Weight fields show the unit's label while the form
/// keeps the kilogram value.
pub fn render(frame: &mut Frame, palette: &Palette, state: &FormState, unit: DisplayUnit, syncing: bool) {
    let popup_area = centered(frame.area(), 56, 19);
    frame.render_widget(Clear, popup_area);

    let form = &state.form;
    let mut text = vec![Line::from("")];

    for field in FormField::all() {
        let focused = field == state.field;
        let value = match field {
            FormField::Date => form.date.clone(),
            FormField::Swings => form.kettlebell_swings.clone(),
            FormField::SwingWeight => weight_label(&form.swing_weight_kg, unit),
            FormField::SwingStyle => form.swing_style.to_string(),
            FormField::SwingType => form.swing_workout_type.to_string(),
            FormField::GetupReps1 => form.getup_reps_1.clone(),
            FormField::GetupWeight1 => weight_label(&form.getup_weight_1_kg, unit),
            FormField::GetupReps2 => form.getup_reps_2.clone(),
            FormField::GetupWeight2 => weight_label(&form.getup_weight_2_kg, unit),
            FormField::GetupType => form.getup_workout_type.to_string(),
        };

        let label_style = if focused {
            palette.accent().add_modifier(Modifier::BOLD)
        } else {
            palette.dim()
        };
        let mut spans = vec![Span::styled(format!("  {:<18}", field.label()), label_style)];
        if field.is_choice() {
            let arrows = if focused { palette.accent() } else { palette.dim() };
            spans.push(Span::styled("◂ ", arrows));
            spans.push(Span::styled(value, palette.bold()));
            spans.push(Span::styled(" ▸", arrows));
        } else {
            spans.push(Span::styled(value, palette.bold()));
            if focused {
                spans.push(Span::styled("█", theme::amber()));
            }
        }
        text.push(Line::from(spans));
    }

    text.push(Line::from(""));
    text.push(Line::from(vec![
        Span::styled(format!("  {:<18}", "Total get-ups"), palette.dim()),
        Span::styled(form.total_get_ups().to_string(), palette.accent()),
    ]));
    text.push(Line::from(""));
    let footer = if syncing {
        Span::styled("  ⟳ Syncing…", theme::amber())
    } else {
        Span::styled(
            "  [Tab] next · [←→] choose · [Enter] save · [Esc] cancel",
            palette.dim(),
        )
    };
    text.push(Line::from(footer));

    let block = Block::default()
        .title(Span::styled(" Log Workout ", palette.accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.accent())
        .style(palette.surface());

    frame.render_widget(Paragraph::new(text).block(block), popup_area);
}

fn weight_label(kg: &str, unit: DisplayUnit) -> String {
    match parse_optional_weight(kg) {
        Some(kg) => format_weight(kg, unit),
        None => "none".to_string(),
    }
}
