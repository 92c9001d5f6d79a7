use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

use crate::game::SnakeGame;
use crate::grid::Direction::{*, self};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
    Ignore,
}

pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Up),
        KeyCode::Down => Some(Down),
        KeyCode::Left => Some(Left),
        KeyCode::Right => Some(Right),
        _ => None,
    }
}

pub fn on_direction_key<R: Rng>(game: &mut SnakeGame<R>, code: KeyCode) {
    if let Some(dir) = direction_for(code) {
        game.request_heading(dir);
    }
}

pub fn route(ev: &KeyEvent) -> Command {
    if is_ctrl_c(ev) {
        return Command::Quit;
    }

    match ev.code {
        KeyCode::Esc => Command::TogglePause,
        code => direction_for(code).map_or(Command::Ignore, Command::Turn),
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
