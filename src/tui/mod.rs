//! Ratatui-based terminal UI.
//!
//! A net browser: pick a bucket, pick a terminal and one of its polarity
//! markers, and every marker on the same net is highlighted, the way hovering
//! a marker works in the annotated drawing.

use std::collections::HashSet;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline::{LoadedInput, RunOutput, load_input, run_assign_with_input};
use crate::domain::{AssignConfig, InputSource};
use crate::error::AppError;
use crate::nets::{Marker, Polarity};

/// Start the TUI.
pub fn run(source: InputSource, config: AssignConfig) -> Result<(), AppError> {
    // Load before touching the terminal so input errors print normally.
    let mut app = App::new(source, config)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    source: InputSource,
    config: AssignConfig,
    run: RunOutput,
    selected_bucket: usize,
    selected_terminal: usize,
    polarity: Polarity,
    status: String,
}

impl App {
    fn new(source: InputSource, config: AssignConfig) -> Result<Self, AppError> {
        let input = load_input(&source)?;
        let run = run_assign_with_input(input, &config);
        let status = format!("{} buckets loaded.", run.buckets.len());
        Ok(Self {
            source,
            config,
            run,
            selected_bucket: 0,
            selected_terminal: 0,
            polarity: Polarity::High,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_terminal = self.selected_terminal.saturating_sub(1);
            }
            KeyCode::Down => {
                let n = self.bucket_len();
                if self.selected_terminal + 1 < n {
                    self.selected_terminal += 1;
                }
            }
            KeyCode::Left => {
                if self.selected_bucket > 0 {
                    self.selected_bucket -= 1;
                    self.selected_terminal = 0;
                }
            }
            KeyCode::Right => {
                if self.selected_bucket + 1 < self.run.buckets.len() {
                    self.selected_bucket += 1;
                    self.selected_terminal = 0;
                }
            }
            KeyCode::Tab => {
                self.polarity = self.polarity.flip();
            }
            KeyCode::Char('s') => {
                self.config.strategy = self.config.strategy.next();
                self.reassign(self.run.input.clone());
                self.status = format!("strategy: {}", self.config.strategy.display_name());
            }
            KeyCode::Char('r') => self.reseed(),
            _ => {}
        }
        false
    }

    fn reseed(&mut self) {
        let InputSource::Sample(sample) = &mut self.source else {
            self.status = "Reseed only applies to sample input.".to_string();
            return;
        };
        sample.seed = sample.seed.wrapping_add(1);
        let seed = sample.seed;
        match load_input(&self.source) {
            Ok(input) => {
                self.reassign(input);
                self.selected_bucket = 0;
                self.selected_terminal = 0;
                self.status = format!("seed: {seed}");
            }
            Err(err) => self.status = format!("Reseed failed: {err}"),
        }
    }

    fn reassign(&mut self, input: LoadedInput) {
        self.run = run_assign_with_input(input, &self.config);
        self.selected_bucket = self.selected_bucket.min(self.run.buckets.len().saturating_sub(1));
        self.selected_terminal = self.selected_terminal.min(self.bucket_len().saturating_sub(1));
    }

    fn bucket_len(&self) -> usize {
        self.run
            .buckets
            .get(self.selected_bucket)
            .map(|b| b.terminals.len())
            .unwrap_or(0)
    }

    /// The marker currently "hovered".
    fn hovered(&self) -> Option<&Marker> {
        let bucket = self.run.buckets.get(self.selected_bucket)?;
        let terminal = bucket.terminals.get(self.selected_terminal)?;
        self.run.overlay.marker(terminal, self.polarity)
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let run = &self.run;
        let lines = vec![
            Line::from(vec![
                Span::styled("pins", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" - {}", self.source.describe())),
            ]),
            Line::from(Span::styled(
                format!(
                    "strategy: {} | terminals: {} | buckets: {} | failed: {}{}",
                    self.config.strategy.display_name(),
                    run.input.terminals.len(),
                    run.buckets.len(),
                    run.assignments.failures().count(),
                    self.config
                        .pin_override
                        .map(|p| format!(" | pins fixed at {p}"))
                        .unwrap_or_default(),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(area);

        self.draw_buckets(frame, chunks[0]);
        self.draw_terminals(frame, chunks[1]);
        self.draw_net(frame, chunks[2]);
    }

    fn draw_buckets(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .run
            .buckets
            .iter()
            .map(|b| match self.run.assignments.get(&b.id) {
                Some(a) => ListItem::new(format!("{}  n={} pins={}", b.id, b.terminals.len(), a.pin_count)),
                None => ListItem::new(format!("{}  n={} FAILED", b.id, b.terminals.len()))
                    .style(Style::default().fg(Color::Red)),
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Buckets").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_bucket));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_terminals(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Terminals").borders(Borders::ALL);
        let Some(bucket) = self.run.buckets.get(self.selected_bucket) else {
            frame.render_widget(Paragraph::new("No terminals.").block(block), area);
            return;
        };
        let Some(assignment) = self.run.assignments.get(&bucket.id) else {
            let reason = self
                .run
                .assignments
                .failures()
                .find(|f| f.group_id == bucket.id)
                .map(|f| f.error.to_string())
                .unwrap_or_else(|| "not assigned".to_string());
            let msg = Paragraph::new(reason)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let lit: HashSet<(&str, Polarity)> = self
            .hovered()
            .map(|m| {
                self.run
                    .overlay
                    .net_of(m)
                    .into_iter()
                    .map(|n| (n.terminal.as_str(), n.polarity))
                    .collect()
            })
            .unwrap_or_default();

        let net_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let items: Vec<ListItem> = bucket
            .terminals
            .iter()
            .zip(&assignment.pairs)
            .map(|(terminal, pair)| {
                let style_for = |polarity| {
                    if lit.contains(&(terminal.as_str(), polarity)) {
                        net_style
                    } else {
                        Style::default().fg(Color::DarkGray)
                    }
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{terminal:<10} ")),
                    Span::styled(format!("+{:<3}", pair.high), style_for(Polarity::High)),
                    Span::raw(" "),
                    Span::styled(format!("-{}", pair.low), style_for(Polarity::Low)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_terminal));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_net(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(hovered) = self.hovered() else {
            let block = Block::default().title("Net").borders(Borders::ALL);
            frame.render_widget(Paragraph::new("-").block(block), area);
            return;
        };

        let net = self.run.overlay.net_of(hovered);
        let title = format!("Net {} ({} markers)", hovered.net_key(), net.len());
        let items: Vec<ListItem> = net
            .iter()
            .map(|m| {
                let text = format!("{}{} {}", m.polarity.sign(), m.pin, m.terminal);
                if m.terminal == hovered.terminal && m.polarity == hovered.polarity {
                    ListItem::new(text).style(Style::default().fg(Color::Cyan))
                } else {
                    ListItem::new(text)
                }
            })
            .collect();

        let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ terminal  ←/→ bucket  Tab +/-  s strategy  r reseed  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(format!("{} {}", self.polarity.sign(), self.status), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SampleConfig, Strategy};

    fn app() -> App {
        App::new(InputSource::Sample(SampleConfig::default()), AssignConfig::default()).unwrap()
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut app = app();
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Up);
        assert_eq!((app.selected_bucket, app.selected_terminal), (0, 0));

        for _ in 0..500 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected_terminal, app.bucket_len() - 1);

        for _ in 0..50 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.selected_bucket, app.run.buckets.len() - 1);
        assert_eq!(app.selected_terminal, 0);
    }

    #[test]
    fn hovered_marker_follows_polarity() {
        let mut app = app();
        let high = app.hovered().unwrap().clone();
        assert_eq!(high.polarity, Polarity::High);
        app.handle_key(KeyCode::Tab);
        let low = app.hovered().unwrap();
        assert_eq!(low.polarity, Polarity::Low);
        assert_eq!(low.terminal, high.terminal);
        assert!(app.run.overlay.net_of(low).iter().any(|m| m.terminal == high.terminal));
    }

    #[test]
    fn strategy_and_reseed_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.config.strategy, Strategy::Lattice);
        assert!(app.run.assignments.assigned().all(|a| a.strategy == Strategy::Lattice));

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.status, "seed: 43");
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
