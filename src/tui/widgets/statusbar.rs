use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme::{self, Palette};

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, syncing: bool) {
    let hints = [
        ("[n]", " log  "),
        ("[Tab]", " panel  "),
        ("[u]", " units  "),
        ("[t]", " theme  "),
        ("[h]", " history  "),
        ("[r]", " refresh  "),
        ("[?]", " help  "),
        ("[q]", " quit"),
    ];

    let mut spans = Vec::new();
    if syncing {
        spans.push(Span::styled("⟳ Syncing…  ", theme::amber()));
    }
    for (key, label) in hints {
        spans.push(Span::styled(key, palette.accent()));
        spans.push(Span::styled(label, palette.dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .style(palette.base());
    frame.render_widget(paragraph, area);
}
