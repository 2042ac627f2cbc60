use crate::entity::Direction;
use crate::frame::Frame;
use crate::game::GameState;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Direction(Direction),
    Quit,
}

/// Non-blocking source of player input.
pub trait InputProvider {
    /// Return the most recent input since the last poll, if any.
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

/// Trait that abstracts the display backend.
pub trait Renderer {
    /// Initialize the display
    fn init(&mut self) -> io::Result<()>;

    /// Draw one frame, status line included
    fn render(&mut self, frame: &Frame) -> io::Result<()>;

    /// Tell the player the game ended, either by collision or a full board
    fn show_game_over(&mut self, frame: &Frame, state: GameState) -> io::Result<()>;

    /// Clean up and restore display state
    fn cleanup(&mut self) -> io::Result<()>;
}

/// Blocking yes/no question asked after a game ends.
pub trait RestartPrompt {
    fn ask_restart(&mut self) -> io::Result<bool>;
}
