pub mod cli_renderer;
pub mod config;
pub mod entity;
pub mod error;
pub mod frame;
pub mod game;
pub mod renderer;
pub mod session;

pub use cli_renderer::CliRenderer;
pub use config::GameConfig;
pub use entity::{Direction, Position, Snake};
pub use error::{Error, Result};
pub use frame::{Frame, Glyph};
pub use game::{Game, GameState, TickOutcome};
pub use renderer::{Input, InputProvider, Renderer, RestartPrompt};
pub use session::{Session, SessionSummary};
