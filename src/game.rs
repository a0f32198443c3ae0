use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind},
};
use log::{error, info};
use rand::Rng;

use crate::input::InputAdapter;
use crate::rendering::{GameGrid, OutputTarget};
use crate::state::{Cooldown, GameState};
use crate::terminal_io::KeyboardHandle;

/// Fixed-rate driver: polls the terminal, ticks the state once per frame, draws.
pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    keyboard: Option<KeyboardHandle>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        keyboard: Option<KeyboardHandle>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            keyboard,
            debug_mode_active,
            max_frames,
        }
    }

    /// Plays until the clock runs out, `q` is pressed, or the frame cap is hit.
    /// Returns the final score.
    pub fn run<R: Rng>(&mut self, state: &mut GameState<R>, input: &mut InputAdapter) -> io::Result<u32> {
        if !self.debug_mode_active {
            self.show_title_screen()?;
        }

        let time_step = state.config().time_step;
        let frame_budget = Duration::from_secs_f64(time_step.max(0.0));
        let mut running = true;
        let mut frame_count: u64 = 0;
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);

        while running && !state.is_finished() && self.max_frames.is_none_or(|max| frame_count < max) {
            let frame_start = Instant::now();

            self.handle_input(&mut running)?;
            if (game_grid.width, game_grid.height) != (self.terminal_width, self.terminal_height) {
                game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
            }

            let report = state.tick(time_step, input);
            if report.crashes > 0 {
                info!("Frame {}: {} crash(es), {:.1}s left", frame_count, report.crashes, state.timer());
            }

            game_grid.clear();
            game_grid.draw_state(state);
            self.render(&game_grid, state.score(), state.timer(), state.cooldown())?;

            frame_count += 1;

            if !self.debug_mode_active {
                if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }

        info!("Game loop ended after {} frames. Score: {}", frame_count, state.score());
        if !self.debug_mode_active {
            self.show_game_over_screen(state.score())?;
        }
        Ok(state.score())
    }

    fn handle_input(&mut self, running: &mut bool) -> io::Result<()> {
        if self.debug_mode_active {
            return Ok(());
        }

        while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            let event = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
            match event {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => match key_event.code {
                    KeyCode::Char('q') => {
                        info!("Quit key 'q' pressed.");
                        *running = false;
                    }
                    code => {
                        if let Some(keyboard) = &self.keyboard {
                            keyboard.press(code);
                        }
                    }
                },
                Event::Resize(new_width, new_height) => {
                    self.terminal_width = new_width;
                    self.terminal_height = new_height;
                    info!("Terminal resized to {}x{}", new_width, new_height);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self, game_grid: &GameGrid, score: u32, timer: f64, cooldown: Cooldown) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target)?;

        self.stdout_target.execute_move_to(MoveTo(0, 0))?;
        write!(self.stdout_target, "Score: {}  Time: {:.1}", score, timer.max(0.0))?;
        if let Cooldown::Penalized { remaining } = cooldown {
            write!(self.stdout_target, "  CRASHED! back in {:.1}s", remaining)?;
        }

        let controls_text = ["Controls:", "  Arrows : Steer", "  q      : Quit"];
        let controls_start_y = self.terminal_height.saturating_sub(controls_text.len() as u16);
        for (i, line) in controls_text.iter().enumerate() {
            self.stdout_target.execute_move_to(MoveTo(0, controls_start_y.saturating_add(i as u16)))?;
            write!(self.stdout_target, "{}", line)?;
        }

        self.stdout_target.flush()?;
        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
                sb.print_to_log();
            }
        }
        Ok(())
    }

    fn write_centered(&mut self, y: u16, text: &str) -> io::Result<()> {
        let x = (self.terminal_width / 2).saturating_sub(text.len() as u16 / 2);
        self.stdout_target.execute_move_to(MoveTo(x, y))?;
        write!(self.stdout_target, "{}", text)
    }

    fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_art = [
            r"ROCKET HARVEST",
            r"",
            r"Collect the $ before the clock runs out.",
            r"Hitting a rock or the edge costs time.",
        ];

        let title_start_y = (self.terminal_height / 2).saturating_sub(title_art.len() as u16 / 2);
        for (i, line) in title_art.iter().enumerate() {
            self.write_centered(title_start_y + i as u16, line)?;
        }
        self.write_centered(self.terminal_height.saturating_sub(5), "Press any key to start...")?;
        self.stdout_target.flush()?;
        info!("Title screen displayed. Waiting for key press.");

        self.wait_for_key()?;

        GameGrid::new(self.terminal_width, self.terminal_height).clear_screen_manual(&mut self.stdout_target)?;
        self.stdout_target.flush()?;
        Ok(())
    }

    fn show_game_over_screen(&mut self, score: u32) -> io::Result<()> {
        GameGrid::new(self.terminal_width, self.terminal_height).clear_screen_manual(&mut self.stdout_target)?;

        let mid = self.terminal_height / 2;
        self.write_centered(mid.saturating_sub(2), "TIME UP!")?;
        self.write_centered(mid, &format!("Resources collected: {}", score))?;
        self.write_centered(mid + 2, "Press any key to exit...")?;
        self.stdout_target.flush()?;

        self.wait_for_key()
    }
}
