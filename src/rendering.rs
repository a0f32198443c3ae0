use std::io::{self, Write};

use crossterm::{cursor::MoveTo, execute};
use log::info;
use rand::Rng;

use crate::entities::{Entity, EntityKind};
use crate::state::{Cooldown, GameState};

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|r| r.iter().collect()).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

// --- OutputTarget: the real terminal or a ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Nothing to hide or show headless
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

/// Character used for an entity on screen.
pub fn glyph(entity: &Entity, cooldown: Cooldown) -> char {
    match entity.kind {
        EntityKind::Asteroid => match entity.variant {
            0 => '@',
            1 => 'O',
            _ => 'o',
        },
        EntityKind::Resource => '$',
        EntityKind::Rocket => match cooldown {
            Cooldown::Normal => 'A',
            Cooldown::Penalized { .. } => '*',
        },
    }
}

// --- GameGrid: the playfield squeezed onto terminal cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    /// Maps a world point to a cell. World y grows upwards, rows grow downwards.
    /// Points in the wrap margin fall outside the grid and are skipped.
    pub fn project(&self, x: f64, y: f64, world_width: f64, world_height: f64) -> Option<(u16, u16)> {
        if self.width == 0 || self.height == 0 || x < 0.0 || y < 0.0 || x > world_width || y > world_height {
            return None;
        }
        let col = (x / world_width * self.width as f64).floor() as u16;
        let row = ((world_height - y) / world_height * self.height as f64).floor() as u16;
        Some((col.min(self.width - 1), row.min(self.height - 1)))
    }

    pub fn plot(&mut self, entity: &Entity, c: char, world_width: f64, world_height: f64) {
        let center = entity.center();
        if let Some((col, row)) = self.project(center.x, center.y, world_width, world_height) {
            self.set_char(col, row, c);
        }
    }

    /// Draws asteroids, then resources, then the rocket on top.
    pub fn draw_state<R: Rng>(&mut self, state: &GameState<R>) {
        let (w, h) = (state.width(), state.height());
        for asteroid in state.asteroids() {
            self.plot(asteroid, glyph(asteroid, state.cooldown()), w, h);
        }
        for resource in state.resources() {
            self.plot(resource, glyph(resource, state.cooldown()), w, h);
        }
        self.plot(state.rocket(), glyph(state.rocket(), state.cooldown()), w, h);
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}
