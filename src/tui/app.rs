use anyhow::Result;
use chrono::{Datelike, Duration, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    DefaultTerminal, Frame,
};

use crate::config::Preferences;
use crate::models::{ChartMetrics, NewWorkout};
use crate::stats::{available_years, calculate_stats};
use crate::store::{page_count, RecordStore};
use crate::tui::events::{Event, EventHandler};
use crate::tui::form::{FormOutcome, FormState};
use crate::tui::theme::Palette;
use crate::tui::widgets::{form, header, heatmap, history, progress, stats, statusbar};
use crate::utils::format::format_card_date;
use crate::utils::units::DisplayUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Heatmap,
    Progress,
    History,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    LogForm,
    ConfirmDelete(i64),
}

/// Network work queued by a key press, run by the loop after the next draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    Create(NewWorkout),
    Delete(i64),
}

pub struct App {
    pub store: RecordStore,
    pub prefs: Preferences,
    pub today: NaiveDate,
    pub focus: Panel,
    pub input_mode: InputMode,
    pub form: FormState,
    pub show_help: bool,
    pub should_quit: bool,
    pub pending: Option<Action>,

    pub heatmap_year: i32,
    pub heatmap_cursor: NaiveDate,
    pub chart_metrics: ChartMetrics,
    pub history_page: usize,
    pub history_selected: usize,
}

impl App {
    /// Starts with a refresh queued so the first frame shows the sync state.
    pub fn new(store: RecordStore, prefs: Preferences, today: NaiveDate) -> Self {
        App {
            store,
            prefs,
            today,
            focus: Panel::Heatmap,
            input_mode: InputMode::Normal,
            form: FormState::new(today),
            show_help: false,
            should_quit: false,
            pending: Some(Action::Refresh),
            heatmap_year: today.year(),
            heatmap_cursor: today,
            chart_metrics: ChartMetrics::default(),
            history_page: 0,
            history_selected: 0,
        }
    }

    pub fn unit(&self) -> DisplayUnit {
        self.prefs.unit()
    }

    pub fn palette(&self) -> Palette {
        self.prefs.theme().palette()
    }

    pub fn is_syncing(&self) -> bool {
        self.pending.is_some() || self.store.is_busy()
    }

    /// Picks up the date change when the dashboard is left open overnight.
    pub fn tick(&mut self) {
        self.today = Local::now().date_naive();
    }

    /// Await one queued network action and fold its outcome into view state.
    pub async fn perform(&mut self, action: Action) {
        match action {
            Action::Refresh => {
                self.store.refresh().await;
            }
            Action::Create(workout) => {
                if self.store.create(&workout).await {
                    self.form = FormState::new(self.today);
                }
            }
            Action::Delete(id) => {
                self.store.delete(id).await;
            }
        }
        self.clamp_history();
    }

    fn queue(&mut self, action: Action) {
        if self.is_syncing() {
            log::warn!("Ignoring {:?} while another request is in flight", action);
            return;
        }
        self.pending = Some(action);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode.clone() {
            InputMode::LogForm => self.handle_form_key(key),
            InputMode::ConfirmDelete(id) => {
                if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    self.queue(Action::Delete(id));
                }
                self.input_mode = InputMode::Normal;
            }
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match self.form.handle_key(key) {
            FormOutcome::Editing => {}
            FormOutcome::Cancel => self.input_mode = InputMode::Normal,
            FormOutcome::Submit => {
                if self.is_syncing() {
                    return;
                }
                let workout = self.form.form.to_new_workout(self.today);
                self.queue(Action::Create(workout));
                self.input_mode = InputMode::Normal;
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('n') => self.input_mode = InputMode::LogForm,
            KeyCode::Char('r') => self.queue(Action::Refresh),
            KeyCode::Char('u') => {
                let unit = match self.unit() {
                    DisplayUnit::Metric => DisplayUnit::Imperial,
                    DisplayUnit::Imperial => DisplayUnit::Metric,
                };
                if let Err(e) = self.prefs.set_unit(unit) {
                    log::error!("Saving unit preference: {:#}", e);
                }
            }
            KeyCode::Char('t') => {
                let theme = self.prefs.theme().next();
                if let Err(e) = self.prefs.set_theme(theme) {
                    log::error!("Saving theme preference: {:#}", e);
                }
            }
            KeyCode::Char('h') => {
                let visible = !self.prefs.history_visible();
                if let Err(e) = self.prefs.set_history_visible(visible) {
                    log::error!("Saving history preference: {:#}", e);
                }
                if !visible && self.focus == Panel::History {
                    self.focus = Panel::Heatmap;
                }
            }
            KeyCode::Tab => self.focus = self.next_panel(),
            _ => match self.focus {
                Panel::Heatmap => self.handle_heatmap_key(key),
                Panel::Progress => self.handle_progress_key(key),
                Panel::History => self.handle_history_key(key),
            },
        }
    }

    fn next_panel(&self) -> Panel {
        match self.focus {
            Panel::Heatmap => Panel::Progress,
            Panel::Progress if self.prefs.history_visible() => Panel::History,
            Panel::Progress | Panel::History => Panel::Heatmap,
        }
    }

    fn handle_heatmap_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.move_cursor(-7),
            KeyCode::Right => self.move_cursor(7),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('[') => self.step_year(true),
            KeyCode::Char(']') => self.step_year(false),
            _ => {}
        }
    }

    fn handle_progress_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') => self.chart_metrics.swing_weight = !self.chart_metrics.swing_weight,
            KeyCode::Char('g') => self.chart_metrics.getup_weight = !self.chart_metrics.getup_weight,
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.history_selected = self.history_selected.saturating_sub(1),
            KeyCode::Down => self.history_selected += 1,
            KeyCode::Left => {
                self.history_page = self.history_page.saturating_sub(1);
                self.history_selected = 0;
            }
            KeyCode::Right => {
                self.history_page += 1;
                self.history_selected = 0;
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.is_syncing() {
                    return;
                }
                if let Some(id) = self.selected_record_id() {
                    self.input_mode = InputMode::ConfirmDelete(id);
                }
            }
            _ => {}
        }
        self.clamp_history();
    }

    fn clamp_history(&mut self) {
        let pages = page_count(self.store.records().len());
        self.history_page = self.history_page.min(pages - 1);
        let on_page = self.store.history_page(self.history_page).len();
        self.history_selected = self.history_selected.min(on_page.saturating_sub(1));
    }

    pub fn selected_record_id(&self) -> Option<i64> {
        self.store
            .history_page(self.history_page)
            .get(self.history_selected)
            .map(|r| r.id)
    }

    fn move_cursor(&mut self, days: i64) {
        let moved = self.heatmap_cursor + Duration::days(days);
        if moved.year() == self.heatmap_year {
            self.heatmap_cursor = moved;
        }
    }

    /// `older` walks down the list of years with workouts.
    fn step_year(&mut self, older: bool) {
        let years = available_years(self.store.records(), self.today);
        let idx = years.iter().position(|y| *y == self.heatmap_year);
        let next = match idx {
            Some(i) if older => years.get(i + 1),
            Some(i) => i.checked_sub(1).and_then(|j| years.get(j)),
            None => years.first(),
        };
        if let Some(&year) = next {
            self.heatmap_year = year;
            self.heatmap_cursor = default_cursor(year, self.today);
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let palette = self.palette();
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base()), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(6), // stat cards
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer[0], &palette, self);
        let summary = calculate_stats(self.store.records(), Local::now().naive_local());
        stats::render(frame, outer[1], &palette, &summary);
        statusbar::render(frame, outer[3], &palette, self.is_syncing());

        let body = outer[2];
        let (left, right) = if self.prefs.history_visible() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(body);
            (cols[0], Some(cols[1]))
        } else {
            (body, None)
        };

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(14), Constraint::Min(8)])
            .split(left);

        heatmap::render(
            frame,
            left_chunks[0],
            &palette,
            &heatmap::HeatmapView {
                records: self.store.records(),
                year: self.heatmap_year,
                cursor: self.heatmap_cursor,
                unit: self.unit(),
                focused: self.focus == Panel::Heatmap,
            },
        );
        progress::render(
            frame,
            left_chunks[1],
            &palette,
            self.store.records(),
            self.unit(),
            self.chart_metrics,
            self.focus == Panel::Progress,
        );

        if let Some(right) = right {
            history::render(
                frame,
                right,
                &palette,
                &history::HistoryView {
                    records: self.store.history_page(self.history_page),
                    page: self.history_page,
                    pages: page_count(self.store.records().len()),
                    selected: self.history_selected,
                    unit: self.unit(),
                    focused: self.focus == Panel::History,
                },
            );
        }

        match &self.input_mode {
            InputMode::LogForm => form::render(frame, &palette, &self.form, self.unit(), self.is_syncing()),
            InputMode::ConfirmDelete(id) => self.draw_confirm(frame, &palette, *id),
            InputMode::Normal => {}
        }

        if self.show_help {
            self.draw_help_overlay(frame, &palette);
        }
    }

    fn draw_confirm(&self, frame: &mut Frame, palette: &Palette, id: i64) {
        let area = frame.area();
        let popup_area = centered(area, 44, 5);
        frame.render_widget(Clear, popup_area);

        let what = self
            .store
            .find(id)
            .map(|r| format_card_date(r.date))
            .unwrap_or_else(|| format!("#{}", id));

        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Delete the workout from ", palette.dim()),
                Span::styled(what, palette.bold()),
                Span::styled("?", palette.dim()),
            ]),
            Line::from(Span::styled("  [y] delete  ·  [any key] cancel", palette.dim())),
        ];

        let block = Block::default()
            .title(Span::styled(" Delete Workout ", crate::tui::theme::red()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(crate::tui::theme::red())
            .style(palette.surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame, palette: &Palette) {
        let area = frame.area();
        let popup_area = centered(area, 52, 18);
        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[n]", "Log a workout"),
            ("[Tab]", "Switch panel"),
            ("[← → ↑ ↓]", "Move day / select workout / page"),
            ("[ [ ] ]", "Older / newer year"),
            ("[s] [g]", "Toggle swing / get-up series"),
            ("[d]", "Delete selected workout"),
            ("[u]", "Toggle kg / lbs"),
            ("[t]", "Next colour theme"),
            ("[h]", "Show / hide history"),
            ("[r]", "Refresh from backend"),
            ("[?]", "Toggle help"),
            ("[q] / Esc", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                palette.accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, what) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<12}", key), palette.accent()),
                Span::styled(what, palette.dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", palette.accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.accent())
            .style(palette.surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal, events: &mut EventHandler) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if let Some(action) = self.pending.take() {
                self.perform(action).await;
                continue;
            }

            match events.next().await {
                Some(Event::Key(key)) => {
                    self.handle_key(key);
                    if self.should_quit {
                        break;
                    }
                }
                Some(Event::Tick) => self.tick(),
                None => break,
            }
        }
        Ok(())
    }
}

/// Today when browsing the current year, otherwise the year's last day.
fn default_cursor(year: i32, today: NaiveDate) -> NaiveDate {
    if year == today.year() {
        today
    } else {
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today)
    }
}

pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run the dashboard until the user quits.
pub async fn run(store: RecordStore, prefs: Preferences) -> Result<()> {
    let mut app = App::new(store, prefs, Local::now().date_naive());

    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(1000);
    let result = app.event_loop(&mut terminal, &mut events).await;
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WorkoutClient;
    use crate::stats::fixtures::{day, record};
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: &TempDir) -> App {
        let records = (1..=7)
            .map(|i| record(i, day(2024, 3, i as u32), 100, 10))
            .collect();
        let store = RecordStore::with_records(WorkoutClient::new("http://127.0.0.1:9"), records);
        let prefs = Preferences::load(&dir.path().join("preferences.json")).unwrap();
        let mut app = App::new(store, prefs, day(2024, 3, 10));
        app.pending = None;
        app
    }

    #[test]
    fn submit_queues_a_coerced_create() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.handle_key(key('n'));
        assert_eq!(app.input_mode, InputMode::LogForm);
        for c in "100".chars() {
            app.handle_key(key(c));
        }
        app.handle_key(code(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Normal);
        match &app.pending {
            Some(Action::Create(w)) => {
                assert_eq!(w.kettlebell_swings, 100);
                assert_eq!(w.swing_weight_kg, 16.0);
                assert_eq!(w.date, day(2024, 3, 10));
            }
            other => panic!("expected a create, got {:?}", other),
        }
    }

    #[test]
    fn submit_is_ignored_while_syncing() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.pending = Some(Action::Refresh);

        app.handle_key(key('n'));
        app.handle_key(code(KeyCode::Enter));
        assert_eq!(app.pending, Some(Action::Refresh));
        assert_eq!(app.input_mode, InputMode::LogForm);
    }

    #[test]
    fn delete_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.focus = Panel::History;

        app.handle_key(code(KeyCode::Down));
        app.handle_key(key('d'));
        assert_eq!(app.input_mode, InputMode::ConfirmDelete(6));
        app.handle_key(key('x'));
        assert_eq!(app.pending, None);

        app.handle_key(key('d'));
        app.handle_key(key('y'));
        assert_eq!(app.pending, Some(Action::Delete(6)));
    }

    #[test]
    fn history_paging_is_clamped() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.focus = Panel::History;

        for _ in 0..5 {
            app.handle_key(code(KeyCode::Right));
        }
        assert_eq!(app.history_page, 1);
        for _ in 0..5 {
            app.handle_key(code(KeyCode::Down));
        }
        assert_eq!(app.history_selected, 1);
        assert_eq!(app.selected_record_id(), Some(1));
    }

    #[test]
    fn preference_keys_write_through() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.handle_key(key('u'));
        app.handle_key(key('t'));
        app.handle_key(key('h'));

        let reloaded = Preferences::load(&dir.path().join("preferences.json")).unwrap();
        assert_eq!(reloaded.unit(), DisplayUnit::Imperial);
        assert_eq!(reloaded.theme(), crate::tui::theme::ThemeName::Ocean);
        assert!(!reloaded.history_visible());
    }

    #[test]
    fn chart_metrics_toggle_in_progress_panel() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key(code(KeyCode::Tab));
        assert_eq!(app.focus, Panel::Progress);
        app.handle_key(key('g'));
        assert!(app.chart_metrics.swing_weight);
        assert!(!app.chart_metrics.getup_weight);
    }

    #[test]
    fn cursor_stays_inside_the_year() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.heatmap_cursor = day(2024, 1, 3);
        app.handle_key(code(KeyCode::Left));
        assert_eq!(app.heatmap_cursor, day(2024, 1, 3));
        app.handle_key(code(KeyCode::Down));
        assert_eq!(app.heatmap_cursor, day(2024, 1, 4));
    }

    #[test]
    fn centered_popup_fits_small_terminals() {
        let r = centered(Rect::new(0, 0, 30, 10), 44, 5);
        assert_eq!(r.width, 30);
        assert_eq!(r.y, 2);
    }
}
