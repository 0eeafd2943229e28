use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::theme::Palette;
use crate::utils::format::format_long_date;

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, app: &App) {
    let line = Line::from(vec![
        Span::styled("Simple & Sinister", palette.accent().add_modifier(Modifier::BOLD)),
        Span::styled("  ·  ", palette.dim()),
        Span::styled(format_long_date(app.today), palette.dim()),
        Span::styled("  ·  ", palette.dim()),
        Span::styled(app.prefs.theme().display_name(), palette.dim()),
        Span::styled("  ·  ", palette.dim()),
        Span::styled(app.unit().suffix(), palette.accent()),
        Span::styled("  ·  ", palette.dim()),
        Span::styled(app.store.client().base_url(), palette.dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.accent())
        .style(palette.base());

    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
