use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crate::config::{BLACK, TITLE, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::game::Input;
use crate::render::{Canvas, Color, Rect};
use crate::snake::Direction::*;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use log::debug;

/// Crossterm-backed presentation: scales the logical viewport onto the
/// terminal, one cell standing in for a block of pixels.
pub struct TermManager {
    stdout: Stdout,
    screen: Screen,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(TermManager { stdout: stdout(), screen: Screen::new(cols, rows) })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, SetTitle(TITLE), cursor::Hide)?;
        terminal::enable_raw_mode()
    }

    /// Safe to call after a partial `setup`. Leaves the alternate screen even
    /// when raw mode could not be switched off.
    pub fn restore(&mut self) -> io::Result<()> {
        let raw = terminal::disable_raw_mode();
        execute!(self.stdout, style::ResetColor, cursor::Show, LeaveAlternateScreen)?;
        raw
    }

    /// Drains every pending event without blocking
    pub fn poll_inputs(&mut self) -> io::Result<Vec<Input>> {
        let mut inputs = vec![];

        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(ev) => inputs.extend(input_from_key(&ev)),
                Event::Resize(cols, rows) => {
                    debug!("Terminal resized to {}x{}", cols, rows);
                    self.screen = Screen::new(cols, rows);
                    queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
                },
                _ => {}
            }
        }

        Ok(inputs)
    }

    /// Writes the cells that changed since the last frame
    pub fn present(&mut self) -> io::Result<()> {
        let mut colors: Option<(Color, Color)> = None;

        for (col, row, cell) in self.screen.take_changes() {
            if colors != Some((cell.fg, cell.bg)) {
                queue!(self.stdout,
                       style::SetForegroundColor(term_color(cell.fg)),
                       style::SetBackgroundColor(term_color(cell.bg)))?;
                colors = Some((cell.fg, cell.bg));
            }
            queue!(self.stdout, cursor::MoveTo(col, row), style::Print(cell.ch))?;
        }

        self.stdout.flush()
    }
}

impl Canvas for TermManager {
    fn clear(&mut self, color: Color) {
        self.screen.clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.screen.fill_rect(rect, color);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.screen.draw_text(text, x, y, color);
    }
}

/// Maps a key press to what it means in the game. Ctrl+C plays the part of
/// closing the window.
pub fn input_from_key(ev: &KeyEvent) -> Option<Input> {
    // Auto-repeat from a held key is not a new press
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Close),
        KeyCode::Esc => Some(Input::TogglePause),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Input::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Input::Restart),
        KeyCode::Up => Some(Input::Steer(Up)),
        KeyCode::Down => Some(Input::Steer(Down)),
        KeyCode::Left => Some(Input::Steer(Left)),
        KeyCode::Right => Some(Input::Steer(Right)),
        _ => None,
    }
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}

///////////////////////////////////////////////////////////////////////////////

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

const BLANK: Cell = Cell { ch: ' ', fg: BLACK, bg: BLACK };

/// Frame buffer in terminal cells, plus a copy of what is currently on the
/// terminal so only the difference gets written.
pub struct Screen {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    shown: Option<Vec<Cell>>, // None until the first frame is out
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Screen { cols, rows, cells: vec![BLANK; cols as usize * rows as usize], shown: None }
    }

    pub fn cell(&self, col: u16, row: u16) -> Cell {
        self.cells[self.index(col, row)]
    }

    pub fn clear(&mut self, color: Color) {
        let blank = Cell { ch: ' ', fg: color, bg: color };
        self.cells.iter_mut().for_each(|c| *c = blank);
    }

    /// Paints every cell the rectangle touches. Pixels outside the viewport
    /// are clipped.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.w <= 0 || rect.h <= 0 || self.cols == 0 || self.rows == 0 {
            return;
        }

        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.w).min(VIEWPORT_WIDTH);
        let y1 = (rect.y + rect.h).min(VIEWPORT_HEIGHT);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let (first_col, last_col) = (self.col_of(x0), self.col_of(x1 - 1));
        let (first_row, last_row) = (self.row_of(y0), self.row_of(y1 - 1));

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let i = self.index(col, row);
                self.cells[i] = Cell { ch: ' ', fg: color, bg: color };
            }
        }
    }

    /// Prints `text` from the cell holding pixel (x, y), keeping the
    /// background that is already there.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        if y < 0 || y >= VIEWPORT_HEIGHT || self.cols == 0 || self.rows == 0 {
            return;
        }

        let row = self.row_of(y);
        let start = (x as i64 * self.cols as i64).div_euclid(VIEWPORT_WIDTH as i64);

        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if col < 0 {
                continue;
            }
            if col >= self.cols as i64 {
                break;
            }
            let idx = self.index(col as u16, row);
            self.cells[idx].ch = ch;
            self.cells[idx].fg = color;
        }
    }

    /// Cells that differ from the last frame, which then counts as shown
    pub fn take_changes(&mut self) -> Vec<(u16, u16, Cell)> {
        let changes = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (col, row)))
            .filter_map(|(col, row)| {
                let i = self.index(col, row);
                let cell = self.cells[i];
                match &self.shown {
                    Some(shown) if shown[i] == cell => None,
                    _ => Some((col, row, cell)),
                }
            })
            .collect();

        self.shown = Some(self.cells.clone());
        changes
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, col: u16, row: u16) -> usize {
        self.cols as usize * row as usize + col as usize
    }

    // Only called with pixels inside the viewport
    fn col_of(&self, x: i32) -> u16 {
        (x as i64 * self.cols as i64 / VIEWPORT_WIDTH as i64) as u16
    }

    fn row_of(&self, y: i32) -> u16 {
        (y as i64 * self.rows as i64 / VIEWPORT_HEIGHT as i64) as u16
    }
}
