use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, ErrorKind};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::game::{Frame, GameOverReason, Renderer};
use crate::grid::{Cell, Direction::{*, self}, Grid};

type TermInt = u16;
type Coords = (TermInt, TermInt);

// Each cell is two columns wide so the grid looks square
const CELL_WIDTH: TermInt = 2;
// The score line sits above the grid
const GRID_TOP: TermInt = 1;

const BLOCK: &str = "██";
const EMPTY: &str = "  ";
const APPLE: &str = "()";
const DEAD_SEGMENT: &str = "XX";

const WALL_COLOR: Color = Color::DarkGrey;
const HEAD_COLOR: Color = Color::Green;
const BODY_COLORS: [Color; 2] = [Color::Yellow, Color::Blue];
const APPLE_COLOR: Color = Color::Red;

pub struct TermRenderer {
    width: TermInt,
    height: TermInt,
    grid: Grid,
    stdout: Stdout,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermRenderer {
    pub fn new(grid: Grid) -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermRenderer { width, height, grid, stdout: stdout(), current_msg: None })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    // u32, since a large grid overflows terminal coordinates
    pub fn required_size(grid: &Grid) -> (u32, u32) {
        (grid.width() as u32 * CELL_WIDTH as u32, grid.height() as u32 + GRID_TOP as u32)
    }

    pub fn fits(&self) -> bool {
        fits_in(&self.grid, (self.width, self.height))
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn poll_key(&self, timeout: Duration) -> crossterm::Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    pub fn read_key_events_queue(&self) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let (grid_w, grid_h) = Self::required_size(&self.grid);
        let (grid_w, grid_h) = (grid_w.min(self.width as u32) as TermInt, grid_h.min(self.height as u32) as TermInt);
        let center = (grid_w / 2, GRID_TOP + grid_h.saturating_sub(GRID_TOP) / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    // The grid underneath comes back with the next frame
    pub fn hide_message(&mut self) -> crossterm::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        let blank = " ".repeat(msg.width as usize);
        for y_diff in 0..msg.height {
            queue!(self.stdout, cursor::MoveTo(msg.top_left.0, msg.top_left.1 + y_diff), style::Print(&blank))?;
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        self.current_msg = None;
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_cell(&mut self, cell: Cell, glyph: &str, color: Color) -> crossterm::Result<()> {
        let pos = (cell.col * CELL_WIDTH, cell.row + GRID_TOP);
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::SetForegroundColor(color), style::Print(glyph))
    }
}

impl Renderer for TermRenderer {
    type Error = ErrorKind;

    fn draw(&mut self, frame: &Frame<'_>) -> crossterm::Result<()> {
        let score_line = format!("Score: {}", frame.score);
        let (grid_w, _) = Self::required_size(&frame.grid);
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            style::ResetColor,
            style::Print(format!("{line: <width$}", line = score_line, width = grid_w as usize))
        )?;

        for row in 0..frame.grid.height() {
            for col in 0..frame.grid.width() {
                let cell = Cell::new(col, row);
                let (glyph, color) = if frame.grid.is_wall(cell) {
                    (BLOCK, WALL_COLOR)
                } else if cell == frame.apple_position {
                    (APPLE, APPLE_COLOR)
                } else {
                    (EMPTY, Color::Reset)
                };
                self.print_cell(cell, glyph, color)?;
            }
        }

        let crashed = matches!(frame.game_over, Some(GameOverReason::Collision(_)));
        let head = head_glyph(frame.snake_heading);

        for (i, cell) in frame.snake_body.iter().enumerate() {
            let (glyph, color) = match i {
                0 => (head.as_str(), HEAD_COLOR),
                _ => (BLOCK, BODY_COLORS[(i - 1) % 2]),
            };
            let glyph = if crashed { DEAD_SEGMENT } else { glyph };
            self.print_cell(*cell, glyph, color)?;
        }

        queue!(self.stdout, style::ResetColor)?;

        if frame.alive {
            return self.flush();
        }

        let banner = match frame.game_over {
            Some(GameOverReason::BoardFull) => "You won!",
            _ => "Game Over",
        };

        self.show_message(&[
            banner,
            &*format!("Score: {}", frame.score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])
    }
}

fn fits_in(grid: &Grid, term_size: Coords) -> bool {
    let (w, h) = TermRenderer::required_size(grid);
    w <= term_size.0 as u32 && h <= term_size.1 as u32
}

fn head_glyph(heading: Direction) -> String {
    let ch = match heading {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    };
    ch.to_string().repeat(CELL_WIDTH as usize)
}
