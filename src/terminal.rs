//! Terminal frontend: crossterm-backed canvas and event source
//!
//! Each world cell renders as a two-column colored block so the grid comes
//! out roughly square. Mouse and key events are translated back into
//! viewport pixel coordinates before the run loops see them.

use crate::runtime::backend::{Canvas, EventSource, InputEvent, Rect};
use crate::Rgba;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::Duration;

/// Terminal columns used per world cell.
const CELL_WIDTH: u16 = 2;

/// Raw mode, alternate screen, and mouse capture held for the session and
/// restored on drop, even when a loop bails out early.
pub struct TerminalSession;

impl TerminalSession {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
        .context("failed to enter alternate screen")?;

        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

/// Off-screen cell buffer flushed to the terminal on `present`.
pub struct TerminalCanvas {
    cell_size: u32,
    rows: usize,
    columns: usize,
    cells: Vec<Option<Rgba>>,
    bg: Rgba,
    grid: Option<Rgba>,
    color: Rgba,
    texts: Vec<(u16, u16, Rgba, String)>,
}

impl TerminalCanvas {
    pub fn new(cell_size: u32, rows: usize, columns: usize) -> Self {
        Self {
            cell_size: cell_size.max(1),
            rows,
            columns,
            cells: vec![None; rows * columns],
            bg: [0, 0, 0, 255],
            grid: None,
            color: [255, 255, 255, 255],
            texts: Vec::new(),
        }
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }

        let row = y as usize / self.cell_size as usize;
        let column = x as usize / self.cell_size as usize;
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }
}

fn term_color(color: Rgba) -> Color {
    Color::Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
    }
}

impl Canvas for TerminalCanvas {
    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn clear(&mut self) {
        self.bg = self.color;
        self.cells.fill(None);
        self.grid = None;
        self.texts.clear();
    }

    fn fill_rect(&mut self, rect: Rect) {
        if let Some(index) = self.cell_index(rect.x, rect.y) {
            self.cells[index] = Some(self.color);
        }
    }

    fn draw_grid(&mut self, _cell_size: u32) {
        self.grid = Some(self.color);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let column = (x.max(0) as u32 / self.cell_size) as u16 * CELL_WIDTH;
        let row = (y.max(0) as u32 / self.cell_size) as u16;
        self.texts.push((column, row, self.color, text.to_string()));
    }

    fn present(&mut self) -> Result<()> {
        let mut out = io::stdout();

        queue!(out, SetBackgroundColor(term_color(self.bg)))?;

        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;

            for column in 0..self.columns {
                match self.cells[row * self.columns + column] {
                    Some(color) => {
                        queue!(out, SetForegroundColor(term_color(color)), Print("██"))?;
                    }
                    None => match self.grid {
                        Some(color) => {
                            queue!(out, SetForegroundColor(term_color(color)), Print("· "))?;
                        }
                        None => queue!(out, Print("  "))?,
                    },
                }
            }
        }

        for (column, row, color, text) in &self.texts {
            queue!(
                out,
                cursor::MoveTo(*column, *row),
                SetForegroundColor(term_color(*color)),
                Print(text)
            )?;
        }

        queue!(out, ResetColor)?;
        out.flush().context("failed to flush frame")?;
        Ok(())
    }
}

/// Non-blocking crossterm event pump.
pub struct TerminalEvents {
    cell_size: u32,
}

impl TerminalEvents {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
        }
    }
}

impl EventSource for TerminalEvents {
    fn poll(&mut self) -> Result<Option<InputEvent>> {
        if !event::poll(Duration::from_millis(1)).context("failed to poll terminal events")? {
            return Ok(None);
        }

        let event = event::read().context("failed to read terminal event")?;
        Ok(translate(&event, self.cell_size))
    }
}

/// Map a raw terminal event onto the loop's input vocabulary.
fn translate(event: &Event, cell_size: u32) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            KeyCode::Char(c @ '1'..='9') => Some(InputEvent::Digit(c as u8 - b'0')),
            _ => None,
        },
        Event::Mouse(mouse) => {
            let (x, y) = pixel_position(mouse.column, mouse.row, cell_size);
            match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(InputEvent::MouseMove { x, y })
                }
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::MouseDown { x, y }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Invert the two-columns-per-cell rendering back into pixel coordinates.
fn pixel_position(column: u16, row: u16, cell_size: u32) -> (i32, i32) {
    let x = u32::from(column / CELL_WIDTH) * cell_size;
    let y = u32::from(row) * cell_size;
    (x as i32, y as i32)
}
