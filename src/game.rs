use std::cmp::max;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::apple::Apple;
use crate::collision::Collision;
use crate::config::Config;
use crate::error::{ConfigError, GameError};
use crate::grid::{Cell, Direction, Grid};
use crate::snake::{MoveOutcome, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    Collision(Collision),
    // Nowhere left for the apple
    BoardFull,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub tick_interval: Duration,
    pub alive: bool,
}

#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub grid: Grid,
    pub score: u32,
    // Head first
    pub snake_body: &'a [Cell],
    pub snake_heading: Direction,
    pub apple_position: Cell,
    pub alive: bool,
    pub game_over: Option<GameOverReason>,
}

pub trait Renderer {
    type Error;

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

// Delays count from the call, not from the previous deadline
pub trait Scheduler {
    fn schedule(&mut self, after: Duration);
    fn cancel(&mut self);
}

pub struct SnakeGame<R> {
    grid: Grid,
    snake: Snake,
    apple: Apple,
    state: GameState,
    phase: Phase,
    game_over: Option<GameOverReason>,
    tick_decrement: Duration,
    min_tick_interval: Duration,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(config: &Config, rng: R) -> Result<Self, ConfigError> {
        let grid = config.validate()?;
        let snake = Snake::new(config.initial_snake_body.clone(), config.initial_heading)?;

        Ok(SnakeGame {
            grid,
            snake,
            apple: Apple::new(config.initial_apple_position),
            state: GameState {
                score: 0,
                tick_interval: config.initial_tick_interval(),
                alive: true,
            },
            phase: Phase::Running,
            game_over: None,
            tick_decrement: Duration::from_millis(config.tick_decrement_ms),
            min_tick_interval: Duration::from_millis(config.min_tick_interval_ms),
            rng,
        })
    }

    pub fn start<D: Renderer, S: Scheduler>(&mut self, renderer: &mut D, scheduler: &mut S) -> Result<(), D::Error> {
        info!(width = self.grid.width(), height = self.grid.height(), "game started");
        renderer.draw(&self.frame())?;

        if self.phase == Phase::Running {
            scheduler.schedule(self.state.tick_interval);
        }

        Ok(())
    }

    pub fn tick<D: Renderer, S: Scheduler>(&mut self, renderer: &mut D, scheduler: &mut S) -> Result<Phase, D::Error> {
        // A finished game never moves, draws or schedules again
        if self.phase == Phase::GameOver {
            return Ok(Phase::GameOver);
        }

        let outcome = self.snake.move_step(&self.grid, self.apple.position());
        trace!(?outcome, head = %self.snake.head(), "tick");

        match outcome {
            MoveOutcome::Collided(collision) => self.finish(GameOverReason::Collision(collision), scheduler),
            MoveOutcome::AteApple => self.eat_apple(scheduler),
            MoveOutcome::Continued => {},
        }

        renderer.draw(&self.frame())?;

        if self.phase == Phase::Running {
            scheduler.schedule(self.state.tick_interval);
        }

        Ok(self.phase)
    }

    pub fn request_heading(&mut self, heading: Direction) {
        if self.phase == Phase::Running {
            self.snake.request_heading(heading);
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            grid: self.grid,
            score: self.state.score,
            snake_body: self.snake.body(),
            snake_heading: self.snake.heading(),
            apple_position: self.apple.position(),
            alive: self.state.alive,
            game_over: self.game_over,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    ///////////////////////////////////////////////////////////////////////////

    fn eat_apple<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.state.score += 1;
        self.state.tick_interval = max(
            self.state.tick_interval.saturating_sub(self.tick_decrement),
            self.min_tick_interval,
        );
        debug!(score = self.state.score, interval_ms = self.state.tick_interval.as_millis() as u64, "apple eaten");

        match self.apple.relocate(&self.grid, self.snake.body(), &mut self.rng) {
            Ok(cell) => debug!(apple = %cell, "apple relocated"),
            Err(GameError::NoSpaceForApple) => self.finish(GameOverReason::BoardFull, scheduler),
        }
    }

    fn finish<S: Scheduler>(&mut self, reason: GameOverReason, scheduler: &mut S) {
        scheduler.cancel();
        self.phase = Phase::GameOver;
        self.state.alive = false;
        self.game_over = Some(reason);
        info!(score = self.state.score, ?reason, "game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::convert::Infallible;

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        last_alive: Option<bool>,
    }

    impl Renderer for CountingRenderer {
        type Error = Infallible;

        fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Infallible> {
            self.frames += 1;
            self.last_alive = Some(frame.alive);
            Ok(())
        }
    }

    #[derive(Default)]
    struct StepScheduler {
        next: Option<Duration>,
        cancelled: bool,
    }

    impl Scheduler for StepScheduler {
        fn schedule(&mut self, after: Duration) {
            self.next = Some(after);
        }

        fn cancel(&mut self) {
            self.next = None;
            self.cancelled = true;
        }
    }

    fn game(config: &Config) -> SnakeGame<StdRng> {
        SnakeGame::new(config, StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn test_start_draws_and_schedules() {
        let mut game = game(&Config::default());
        let mut renderer = CountingRenderer::default();
        let mut scheduler = StepScheduler::default();

        game.start(&mut renderer, &mut scheduler).unwrap();
        assert_eq!(renderer.frames, 1);
        assert_eq!(scheduler.next, Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_plain_tick() {
        let mut game = game(&Config::default());
        let mut renderer = CountingRenderer::default();
        let mut scheduler = StepScheduler::default();

        assert_eq!(game.tick(&mut renderer, &mut scheduler), Ok(Phase::Running));
        assert_eq!(game.snake().head(), Cell::new(8, 5));
        assert_eq!(game.state().score, 0);
        assert_eq!(renderer.frames, 1);
        assert_eq!(scheduler.next, Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_eating_speeds_up_to_floor() {
        let config = Config {
            initial_tick_interval_ms: 40,
            tick_decrement_ms: 15,
            min_tick_interval_ms: 20,
            initial_apple_position: Cell::new(8, 5),
            ..Default::default()
        };
        let mut game = game(&config);
        let mut renderer = CountingRenderer::default();
        let mut scheduler = StepScheduler::default();

        game.tick(&mut renderer, &mut scheduler).unwrap();
        assert_eq!(game.state().score, 1);
        assert_eq!(game.state().tick_interval, Duration::from_millis(25));
        assert_eq!(scheduler.next, Some(Duration::from_millis(25)));
        assert!(!game.snake().body().contains(&game.apple().position()));

        // Keep feeding it until the interval bottoms out
        for _ in 0..3 {
            let target = game.snake().head().neighbor(game.snake().heading()).unwrap();
            game.apple = Apple::new(target);
            game.tick(&mut renderer, &mut scheduler).unwrap();
        }
        assert_eq!(game.state().score, 4);
        assert_eq!(game.state().tick_interval, Duration::from_millis(20));
    }

    #[test]
    fn test_collision_ends_game() {
        let config = Config {
            grid_width_px: 100,
            grid_height_px: 100,
            initial_snake_body: vec![Cell::new(1, 5), Cell::new(2, 5), Cell::new(3, 5)],
            initial_heading: Direction::Left,
            initial_apple_position: Cell::new(5, 2),
            ..Default::default()
        };
        let mut game = game(&config);
        let mut renderer = CountingRenderer::default();
        let mut scheduler = StepScheduler::default();

        assert_eq!(game.tick(&mut renderer, &mut scheduler), Ok(Phase::GameOver));
        assert!(scheduler.cancelled);
        assert_eq!(scheduler.next, None);
        assert_eq!(renderer.last_alive, Some(false));
        assert_eq!(game.game_over_reason(), Some(GameOverReason::Collision(Collision::Wall)));

        assert_eq!(game.tick(&mut renderer, &mut scheduler), Ok(Phase::GameOver));
        assert_eq!(renderer.frames, 1);
        assert_eq!(scheduler.next, None);
    }

    #[test]
    fn test_heading_requests_ignored_after_game_over() {
        let config = Config {
            grid_width_px: 100,
            grid_height_px: 100,
            initial_snake_body: vec![Cell::new(1, 5), Cell::new(2, 5)],
            initial_heading: Direction::Left,
            initial_apple_position: Cell::new(5, 2),
            ..Default::default()
        };
        let mut game = game(&config);
        game.tick(&mut CountingRenderer::default(), &mut StepScheduler::default()).unwrap();

        game.request_heading(Direction::Up);
        assert_eq!(game.snake().pending_heading(), Direction::Left);
    }
}
