use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::Config;
use crate::game::{Phase, Renderer, Scheduler, SnakeGame};
use crate::input::{self, Command};
use crate::term::TermRenderer;
use crate::timer::Timer;

// How long to wait for input while no tick is pending (paused)
const IDLE_POLL_MS: u64 = 250;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    PlayAgain,
    Quit,
}

pub struct SnakeApp {
    config: Config,
    seed: Option<u64>,
    games_played: u64,
    paused: bool,
    term: TermRenderer,
}

impl SnakeApp {
    pub fn new(config: Config, seed: Option<u64>) -> Result<Self> {
        let grid = config.validate().context("invalid game configuration")?;
        let term = TermRenderer::new(grid).context("could not read the terminal size")?;

        if !term.fits() {
            let (need_w, need_h) = TermRenderer::required_size(&grid);
            let (w, h) = term.get_terminal_size();
            bail!("the terminal is {}x{} but a {}x{} grid needs {}x{}", w, h, grid.width(), grid.height(), need_w, need_h);
        }

        Ok(SnakeApp { config, seed, games_played: 0, paused: false, term })
    }

    pub fn run(&mut self) -> Result<()> {
        in_terminal(
            self,
            |app| app.term.setup().context("could not set up the terminal"),
            |app| app.session(),
            |app| app.term.restore().context("could not restore the terminal"),
        )
    }

    ///////////////////////////////////////////////////////////////////////////

    fn session(&mut self) -> Result<()> {
        if self.show_intro()? == Flow::Quit {
            return Ok(());
        }

        while self.play()? == Flow::PlayAgain {}

        Ok(())
    }

    fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.clear()?;
        self.term.show_message(lines)?;

        if input::is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::PlayAgain)
    }

    fn play(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.paused = false;

        let mut game = SnakeGame::new(&self.config, self.next_rng())?;
        let mut timer = Timer::new();
        game.start(&mut self.term, &mut timer)?;

        while game.phase() == Phase::Running {
            let now = Instant::now();

            if timer.take_due(now) {
                game.tick(&mut self.term, &mut timer)?;
                continue;
            }

            let wait = timer.remaining(now).unwrap_or(Duration::from_millis(IDLE_POLL_MS));
            let key_ev = match self.term.poll_key(wait)? {
                Some(ev) => ev,
                None => continue,
            };

            match input::route(&key_ev) {
                Command::Quit => return Ok(Flow::Quit),
                Command::TogglePause => self.toggle_pause(&mut game, &mut timer)?,
                Command::Turn(_) if !self.paused => input::on_direction_key(&mut game, key_ev.code),
                _ => {}
            }
        }

        self.games_played += 1;
        info!(score = game.state().score, games = self.games_played, "game finished");

        // Drop keys pressed in the last moments of the game
        self.term.read_key_events_queue()?;

        // Quit if the user CTRL+C's after the game
        if input::is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        Ok(Flow::PlayAgain)
    }

    fn toggle_pause(&mut self, game: &mut SnakeGame<StdRng>, timer: &mut Timer) -> Result<()> {
        if !self.paused {
            timer.cancel();
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            if self.term.has_message() {
                self.term.hide_message()?;
            }
            self.term.draw(&game.frame())?;
            timer.schedule(game.state().tick_interval);
        }

        self.paused = !self.paused;
        Ok(())
    }

    fn next_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.games_played)),
            None => StdRng::from_entropy(),
        }
    }
}

// `restore` runs even if `setup` failed half way, and the first error wins
fn in_terminal<T>(
    target: &mut T,
    setup: impl FnOnce(&mut T) -> Result<()>,
    body: impl FnOnce(&mut T) -> Result<()>,
    restore: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let res = setup(target).and_then(|()| body(target));
    let restored = restore(target);
    res.and(restored)
}
