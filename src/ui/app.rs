//! Main TUI application state and logic

use crate::config::{DEFAULT_SIZE, MAX_DELAY_MS, MAX_ELEMENTS};
use crate::engine::{Controller, SortError};
use crate::sequence::{Arrangement, EventLog, Extent};
use crate::sorts::Algorithm;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Longest the event loop blocks waiting for input
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Delay change for `+` and `-`
const DELAY_STEP_MS: u64 = 50;

/// Which value an open prompt collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Size,
    Delay,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            PromptKind::Size => "Set Size",
            PromptKind::Delay => "Set Delay",
        }
    }

    fn max_digits(self) -> usize {
        match self {
            PromptKind::Size => 3,
            PromptKind::Delay => 4,
        }
    }
}

/// An open input prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// Screen regions of each pane
struct PaneAreas {
    bars: Rect,
    info: Rect,
    changes: Rect,
    status: Rect,
}

impl PaneAreas {
    /// Bars on the left, info over changes on the right, status bar at the bottom
    fn split(size: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(super::panes::INFO_PANE_HEIGHT),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        PaneAreas {
            bars: columns[0],
            info: right_rows[0],
            changes: right_rows[1],
            status: main_chunks[1],
        }
    }
}

/// Extent of the bars pane in a terminal of `columns` x `rows`
pub fn initial_extent(columns: u16, rows: u16) -> Extent {
    super::panes::bars_extent(PaneAreas::split(Rect::new(0, 0, columns, rows)).bars)
}

/// The main application state
pub struct App {
    /// Owns the sequence and the active sort
    pub controller: Controller,

    /// Presenter changes, shared with the sequence
    pub changes: EventLog,

    /// Algorithm started by space or step when no sort is active
    pub selected: Algorithm,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a failure
    pub is_error: bool,

    /// Input prompt, when one is open
    pub prompt: Option<Prompt>,

    /// Lines scrolled back in the change log
    pub changes_scroll: usize,

    /// Extent the sequence was last laid out in
    bars_extent: Option<Extent>,
}

impl App {
    /// Create a new app around a controller whose sequence reports to `changes`
    pub fn new(controller: Controller, changes: EventLog, selected: Algorithm) -> Self {
        App {
            controller,
            changes,
            selected,
            should_quit: false,
            status_message: format!("{} selected. Press space to run", selected.name()),
            is_error: false,
            prompt: None,
            changes_scroll: 0,
            bars_extent: None,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick(Instant::now());

            // Wake in time for the next due step, but keep handling input
            let timeout = self
                .controller
                .time_until_due(Instant::now())
                .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key);
                    }
                    // The next render lays the bars out for the new size
                    Event::Resize(..) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Advance the running sort if its delay has passed
    pub fn tick(&mut self, now: Instant) {
        match self.controller.advance_due(now) {
            Ok(Some(_)) if self.controller.algorithm().is_none() => self.report_finished(),
            Ok(_) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let areas = PaneAreas::split(size);

        self.sync_layout(areas.bars);

        let title = match self.controller.algorithm() {
            Some(algorithm) => format!(" {} ", algorithm.name()),
            None => format!(" {} elements ", self.controller.count()),
        };
        super::panes::render_bars_pane(frame, areas.bars, self.controller.sequence(), &title);

        super::panes::render_info_pane(frame, areas.info, &self.controller, self.selected);

        super::panes::render_changes_pane(
            frame,
            areas.changes,
            &self.changes,
            &mut self.changes_scroll,
        );

        let stats = self.controller.stats();
        let active = self.controller.algorithm().is_some();
        super::panes::render_status_bar(
            frame,
            areas.status,
            &super::panes::StatusRenderData {
                message: &self.status_message,
                steps: stats.steps,
                is_error: self.is_error,
                is_running: active && !self.controller.is_paused(),
                is_active: active,
                is_finished: !active && stats.completed,
                is_prompting: self.prompt.is_some(),
            },
        );

        if let Some(prompt) = &self.prompt {
            let hint = match prompt.kind {
                PromptKind::Size => format!(
                    "Elements (2-{}, blank for {})",
                    MAX_ELEMENTS, DEFAULT_SIZE
                ),
                PromptKind::Delay => format!(
                    "Delay in ms (0-{}, blank keeps {})",
                    MAX_DELAY_MS,
                    self.controller.delay()
                ),
            };
            super::panes::render_prompt(frame, size, prompt.kind.title(), &hint, &prompt.input);
        }
    }

    /// Lay the sequence out again when the bars pane changes size
    fn sync_layout(&mut self, area: Rect) {
        let extent = super::panes::bars_extent(area);
        if self.bars_extent == Some(extent) {
            return;
        }
        // The sequence keeps the new extent even when relayout fails
        self.bars_extent = Some(extent);
        if let Err(e) = self.controller.relayout(extent) {
            self.set_error(format!("Window too small: {}", e));
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                self.selected = Algorithm::ALL[index];
                self.controller.select_algorithm(self.selected);
                self.set_status(format!(
                    "{} ready ({}). Press space to run",
                    self.selected.name(),
                    self.controller.order().as_str()
                ));
            }
            KeyCode::Char(' ') => self.toggle_run(),
            KeyCode::Right | KeyCode::Char('n') => self.step(),
            KeyCode::Enter => self.finish(),
            KeyCode::Char('k') => {
                if let Some(algorithm) = self.controller.algorithm() {
                    self.controller.kill();
                    self.set_status(format!("{} killed", algorithm.name()));
                } else {
                    self.set_error(SortError::NoActiveSort.to_string());
                }
            }
            KeyCode::Char('r') => self.regenerate(Arrangement::Random),
            KeyCode::Char('a') => self.regenerate(Arrangement::Ascending),
            KeyCode::Char('d') => self.regenerate(Arrangement::Descending),
            KeyCode::Char('o') => {
                let order = self.controller.order().flipped();
                self.controller.set_order(order);
                self.set_status(format!("Next sort runs {}", order.as_str()));
            }
            KeyCode::Char('s') => self.open_prompt(PromptKind::Size),
            KeyCode::Char('t') => self.open_prompt(PromptKind::Delay),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.controller
                    .set_delay(self.controller.delay().saturating_add(DELAY_STEP_MS));
                self.set_status(format!("Delay {} ms", self.controller.delay()));
            }
            KeyCode::Char('-') => {
                self.controller
                    .set_delay(self.controller.delay().saturating_sub(DELAY_STEP_MS));
                self.set_status(format!("Delay {} ms", self.controller.delay()));
            }
            KeyCode::Up => {
                self.changes_scroll = self.changes_scroll.saturating_add(1);
            }
            KeyCode::Down => {
                self.changes_scroll = self.changes_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if prompt.input.len() < prompt.kind.max_digits() {
                    prompt.input.push(c);
                }
            }
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Enter => {
                let kind = prompt.kind;
                let input = prompt.input.clone();
                self.submit_prompt(kind, &input);
            }
            KeyCode::Esc => {
                let kind = prompt.kind;
                self.prompt = None;
                self.cancel_prompt(kind);
            }
            _ => {}
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        self.controller.pause();
        self.prompt = Some(Prompt {
            kind,
            input: String::new(),
        });
        self.set_status("Enter a value, Esc to cancel");
    }

    fn submit_prompt(&mut self, kind: PromptKind, input: &str) {
        match kind {
            PromptKind::Size => {
                let size = if input.is_empty() {
                    DEFAULT_SIZE
                } else {
                    input.parse().unwrap_or(0)
                };
                match self.controller.build(size, self.controller.arrangement()) {
                    Ok(()) => {
                        self.prompt = None;
                        self.set_status(format!("Built {} elements", size));
                    }
                    // Keep the prompt open for another try
                    Err(e) => {
                        if let Some(prompt) = self.prompt.as_mut() {
                            prompt.input.clear();
                        }
                        self.set_error(e.to_string());
                    }
                }
            }
            PromptKind::Delay => {
                self.prompt = None;
                match input.parse::<u64>() {
                    Ok(millis) => {
                        self.controller.set_delay(millis);
                        self.set_status(format!("Delay {} ms", self.controller.delay()));
                    }
                    Err(_) => self.cancel_prompt(kind),
                }
            }
        }
    }

    /// A cancelled size prompt falls back to the default size; a cancelled
    /// delay prompt keeps the delay
    fn cancel_prompt(&mut self, kind: PromptKind) {
        match kind {
            PromptKind::Size => match self.controller.build(DEFAULT_SIZE, self.controller.arrangement()) {
                Ok(()) => self.set_status(format!("Built {} elements", DEFAULT_SIZE)),
                Err(e) => {
                    warn!("Default size does not fit: {}", e);
                    self.set_error(e.to_string());
                }
            },
            PromptKind::Delay => {
                self.set_status(format!("Delay unchanged at {} ms", self.controller.delay()));
            }
        }
    }

    /// Start the selected sort, or pause/resume the active one
    fn toggle_run(&mut self) {
        if self.controller.algorithm().is_none() {
            self.controller.select_algorithm(self.selected);
        }
        match self.controller.toggle_pause() {
            Ok(true) => self.set_status("Paused"),
            Ok(false) => self.set_status(format!(
                "Running {} every {} ms",
                self.selected.name(),
                self.controller.delay()
            )),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn step(&mut self) {
        if self.controller.algorithm().is_none() {
            self.controller.select_algorithm(self.selected);
        }
        self.controller.pause();
        match self.controller.single_step() {
            Ok(_) if self.controller.algorithm().is_none() => self.report_finished(),
            Ok(step) => self.set_status(step.describe()),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn finish(&mut self) {
        match self.controller.finish() {
            Ok(steps) => {
                self.report_finished();
                self.status_message.push_str(&format!(" ({} at once)", steps));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn regenerate(&mut self, arrangement: Arrangement) {
        match self.controller.regenerate(arrangement) {
            Ok(()) => self.set_status(format!(
                "New {} sequence of {}",
                arrangement.as_str(),
                self.controller.count()
            )),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn report_finished(&mut self) {
        let stats = self.controller.stats();
        let name = stats.algorithm.unwrap_or(self.selected).name();
        let message = format!(
            "{} finished in {} steps: {} comparisons, {} swaps",
            name, stats.steps, stats.comparisons, stats.swaps
        );
        self.set_status(message);
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.is_error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let changes = EventLog::new(64);
        let settings = Settings {
            size: 8,
            seed: Some(3),
            ..Settings::default()
        };
        let controller =
            Controller::new(&settings, Extent::new(80, 40), Box::new(changes.clone())).unwrap();
        App::new(controller, changes, Algorithm::Bubble)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_number_key_selects_paused() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.selected, Algorithm::Quick);
        assert_eq!(app.controller.algorithm(), Some(Algorithm::Quick));
        assert!(app.controller.is_paused());
    }

    #[test]
    fn test_step_starts_selected_sort() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.controller.stats().steps, 1);
        assert!(app.controller.is_paused());
        assert!(!app.is_error);
    }

    #[test]
    fn test_enter_finishes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Enter);
        assert!(app.controller.algorithm().is_none());
        assert!(app.controller.stats().completed);
        assert!(app.controller.sequence().keys().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_enter_without_sort_reports_error() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.is_error);
    }

    #[test]
    fn test_size_prompt() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        for c in "1234".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // Digits beyond three are ignored
        assert_eq!(app.prompt.as_ref().map(|p| p.input.as_str()), Some("123"));

        // Out of range keeps the prompt open
        press(&mut app, KeyCode::Enter);
        assert!(app.is_error);
        assert!(app.prompt.is_some());
        assert_eq!(app.controller.count(), 8);

        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Enter);
        assert!(app.prompt.is_none());
        assert_eq!(app.controller.count(), 40);
    }

    #[test]
    fn test_blank_size_uses_default() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.count(), DEFAULT_SIZE);
    }

    #[test]
    fn test_cancelled_delay_prompt_keeps_delay() {
        let mut app = app();
        let before = app.controller.delay();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Esc);
        assert!(app.prompt.is_none());
        assert_eq!(app.controller.delay(), before);

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.delay(), 75);
    }

    #[test]
    fn test_initial_extent_fits_bars_pane() {
        let extent = initial_extent(100, 30);
        // 72 columns less two borders; 29 rows less two borders, in eighths
        assert_eq!(extent, Extent::new(70, 27 * 8));
    }

    #[test]
    fn test_shrunk_window_rejects_wide_builds() {
        let changes = EventLog::new(64);
        let settings = Settings {
            size: 100,
            seed: Some(4),
            ..Settings::default()
        };
        let controller =
            Controller::new(&settings, Extent::new(140, 40), Box::new(changes.clone())).unwrap();
        let mut app = App::new(controller, changes, Algorithm::Bubble);

        app.sync_layout(Rect::new(0, 0, 42, 20));
        assert!(app.is_error);
        assert_eq!(app.controller.sequence().extent().width, 40);

        assert!(matches!(
            app.controller.build(60, Arrangement::Ascending),
            Err(SortError::InvalidSize { requested: 60, .. })
        ));
        app.controller.build(40, Arrangement::Ascending).unwrap();
        assert!(app
            .controller
            .sequence()
            .elements()
            .iter()
            .all(|e| e.position + e.width <= 40));
    }

    #[test]
    fn test_tick_runs_sort() {
        let mut app = app();
        app.controller.set_delay(0);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.controller.is_paused());

        let now = Instant::now();
        for _ in 0..10_000 {
            if app.controller.algorithm().is_none() {
                break;
            }
            app.tick(now);
        }
        assert!(app.controller.stats().completed);
        assert!(app.status_message.contains("finished"));
    }
}
