use crate::InputStations;
use crate::board::PredictionsApi;
use crate::view::log_buffer::LogBuffer;
use crate::view::{DisplayEntry, ResultDisplay, hex_to_rgb, pad};
use async_trait::async_trait;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use derive_builder::Builder;
use std::io::{Stdout, stdout};
use tui::layout::{Alignment, Constraint, Direction, Layout};
use tui::style::{Color as TuiColor, Modifier, Style};
use tui::text::{Span, Spans, Text};
use tui::widgets::{Block, Borders, Paragraph};
use tui::{Terminal, backend::CrosstermBackend};
use wmata::Context;

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct TuiDisplay<D: PredictionsApi> {
    api_client: D,
    stations: InputStations,
    ctx: Context,
    log_buffer: LogBuffer,
}

/// Runs `restore` when dropped, so the terminal is handed back on every exit
/// path, including early `?` returns.
struct RestoreOnDrop<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);
}

#[async_trait]
impl<D: PredictionsApi + Sync> ResultDisplay for TuiDisplay<D> {
    async fn display(&self) -> anyhow::Result<()> {
        let resp = self.api_client.get_boards(&self.ctx, &self.stations).await?;

        let display_lines = crate::view::build_display_lines(&resp);

        let spans = Self::create_spans(display_lines);

        // Setup terminal
        enable_raw_mode()?;
        let _restore = RestoreOnDrop {
            restore: restore_terminal,
        };
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.render(&spans, &mut terminal)?;

        // q or Esc quits
        loop {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {}
                },
                Event::Resize(_, _) => {
                    self.render(&spans, &mut terminal)?;
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl<D: PredictionsApi> TuiDisplay<D> {
    fn render(
        &self,
        spans: &[Spans<'static>],
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), anyhow::Error> {
        let logs: Vec<Spans> = self
            .log_buffer
            .lines()
            .into_iter()
            .map(|l| Spans::from(Span::raw(l)))
            .collect();

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(logs.len() as u16 + 2)])
                .split(f.size());

            let paragraph = Paragraph::new(Text::from(spans.to_vec()))
                .block(Block::default().borders(Borders::ALL).title("Next Trains"))
                .alignment(Alignment::Left);
            f.render_widget(paragraph, chunks[0]);

            let log = Paragraph::new(Text::from(logs))
                .block(Block::default().borders(Borders::ALL).title("Log"));
            f.render_widget(log, chunks[1]);
        })?;
        Ok(())
    }

    fn create_spans(display_lines: Vec<(String, Vec<DisplayEntry>)>) -> Vec<Spans<'static>> {
        let mut spans: Vec<Spans> = Vec::new();

        let now = Local::now();
        spans.push(Spans::from(Span::styled(
            format!("Current time: {}", now.format("%H:%M:%S")),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        spans.push(Spans::from(Span::raw("")));

        for (name, entries) in display_lines {
            spans.push(Spans::from(Span::styled(
                format!("Station: {}", name),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED),
            )));

            for e in entries {
                let (r, g, b) = hex_to_rgb(e.hex);
                let tui_color = TuiColor::Rgb(r, g, b);

                // line code on a coloured background, the rest as raw text
                let span_vec = vec![
                    Span::styled(
                        format!(" {:<3}", e.line),
                        Style::default().bg(tui_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        " | {} | {:>2} cars | {:>5}",
                        pad(&e.destination, 25),
                        e.cars,
                        e.arrival
                    )),
                ];

                spans.push(Spans::from(span_vec));
            }
            spans.push(Spans::from(Span::raw("")));
        }
        spans
    }
}
