use crate::config::GameConfig;
use crate::error::Result;
use crate::frame::Frame;
use crate::game::Game;
use crate::renderer::{Input, InputProvider, Renderer, RestartPrompt};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub games_played: u32,
    pub best_score: u32,
    /// The player quit mid-game instead of declining a restart
    pub quit: bool,
}

/// Drives games back to back until the player stops.
///
/// Each iteration polls input, ticks the engine, renders and then waits for
/// the engine's current tick delay. Waiting goes through `sleep` so callers
/// decide how time passes.
pub struct Session {
    game: Game,
    summary: SessionSummary,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            game: Game::with_config(config)?,
            summary: SessionSummary::default(),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run<T, S>(&mut self, io: &mut T, sleep: S) -> Result<SessionSummary>
    where
        T: Renderer + InputProvider + RestartPrompt,
        S: FnMut(Duration),
    {
        io.init()?;
        let result = self.play_all(io, sleep);
        let cleanup = io.cleanup();

        // A play error is reported ahead of a cleanup error
        let summary = result?;
        cleanup?;
        Ok(summary)
    }

    fn play_all<T, S>(&mut self, io: &mut T, mut sleep: S) -> Result<SessionSummary>
    where
        T: Renderer + InputProvider + RestartPrompt,
        S: FnMut(Duration),
    {
        loop {
            self.summary.games_played += 1;
            info!(game = self.summary.games_played, "starting game");

            let quit = self.play_one(io, &mut sleep)?;
            self.summary.best_score = self.summary.best_score.max(self.game.score);

            if quit {
                info!(score = self.game.score, "player quit");
                self.summary.quit = true;
                return Ok(self.summary);
            }

            io.show_game_over(&Frame::capture(&self.game), self.game.state)?;
            if !io.ask_restart()? {
                return Ok(self.summary);
            }

            info!("restarting");
            self.game.reset();
        }
    }

    /// Play until the game ends. Returns true if the player asked to quit.
    fn play_one<T, S>(&mut self, io: &mut T, sleep: &mut S) -> Result<bool>
    where
        T: Renderer + InputProvider,
        S: FnMut(Duration),
    {
        while self.game.is_running() {
            match io.poll_input()? {
                Some(Input::Quit) => return Ok(true),
                Some(Input::Direction(direction)) => self.game.set_direction(direction),
                None => {}
            }

            self.game.tick();
            io.render(&Frame::capture(&self.game))?;

            if self.game.is_running() {
                sleep(self.game.tick_delay());
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Direction, Position};
    use crate::frame::Glyph;
    use crate::game::GameState;
    use std::collections::VecDeque;
    use std::io;

    #[derive(Default)]
    struct Scripted {
        inputs: VecDeque<Input>,
        restarts: VecDeque<bool>,
        frames: Vec<Frame>,
        endings: Vec<GameState>,
        prompts: usize,
        inits: usize,
        cleanups: usize,
        broken_render: bool,
        broken_cleanup: bool,
    }

    impl Renderer for Scripted {
        fn init(&mut self) -> io::Result<()> {
            self.inits += 1;
            Ok(())
        }

        fn render(&mut self, frame: &Frame) -> io::Result<()> {
            if self.broken_render {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "render failed"));
            }
            self.frames.push(frame.clone());
            Ok(())
        }

        fn show_game_over(&mut self, _frame: &Frame, state: GameState) -> io::Result<()> {
            self.endings.push(state);
            Ok(())
        }

        fn cleanup(&mut self) -> io::Result<()> {
            self.cleanups += 1;
            if self.broken_cleanup {
                return Err(io::Error::new(io::ErrorKind::Other, "cleanup failed"));
            }
            Ok(())
        }
    }

    impl InputProvider for Scripted {
        fn poll_input(&mut self) -> io::Result<Option<Input>> {
            Ok(self.inputs.pop_front())
        }
    }

    impl RestartPrompt for Scripted {
        fn ask_restart(&mut self) -> io::Result<bool> {
            self.prompts += 1;
            Ok(self.restarts.pop_front().unwrap_or(false))
        }
    }

    fn session() -> Session {
        Session::new(GameConfig {
            seed: Some(17),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_runs_until_wall_then_stops() {
        let mut session = session();
        let mut io = Scripted::default();
        let mut delays = Vec::new();

        let summary = session.run(&mut io, |d| delays.push(d)).unwrap();

        // From x=10 the snake reaches x=18 in 8 moves, the 9th hits the wall
        assert_eq!(io.frames.len(), 9);
        assert_eq!(delays.len(), 8);
        assert!(delays.iter().all(|d| *d == Duration::from_millis(500)));
        assert_eq!(io.endings, vec![GameState::GameOver]);
        assert_eq!(io.prompts, 1);
        assert_eq!((io.inits, io.cleanups), (1, 1));
        assert_eq!(summary.games_played, 1);
        assert!(!summary.quit);
    }

    #[test]
    fn test_restart_plays_another_game() {
        let mut session = session();
        let mut io = Scripted {
            restarts: VecDeque::from([true, false]),
            ..Default::default()
        };

        let summary = session.run(&mut io, |_| {}).unwrap();

        assert_eq!(summary.games_played, 2);
        assert_eq!(io.prompts, 2);
        assert_eq!(io.endings.len(), 2);
        assert_eq!(session.game().state, GameState::GameOver);
    }

    #[test]
    fn test_quit_skips_restart_prompt() {
        let mut session = session();
        let mut io = Scripted {
            inputs: VecDeque::from([Input::Quit]),
            ..Default::default()
        };

        let summary = session.run(&mut io, |_| {}).unwrap();

        assert!(summary.quit);
        assert_eq!(io.prompts, 0);
        assert!(io.frames.is_empty());
        assert_eq!(io.cleanups, 1);
    }

    #[test]
    fn test_input_steers_before_tick() {
        let mut session = session();
        let mut io = Scripted {
            inputs: VecDeque::from([Input::Direction(Direction::Up)]),
            ..Default::default()
        };

        session.run(&mut io, |_| {}).unwrap();

        // Four moves up from (10,5), then the fifth tick hits the top wall
        assert_eq!(io.frames.len(), 5);
        assert_eq!(io.frames[0].glyph_at(10, 4), Glyph::Snake);
        assert_eq!(session.game().snake.head(), Position::new(10, 1));
    }

    #[test]
    fn test_play_error_wins_over_cleanup_error() {
        let mut session = session();
        let mut io = Scripted {
            broken_render: true,
            broken_cleanup: true,
            ..Default::default()
        };

        let err = session.run(&mut io, |_| {}).unwrap_err();

        assert!(err.to_string().contains("render failed"), "got: {}", err);
        assert_eq!(io.cleanups, 1);
    }

    #[test]
    fn test_cleanup_error_reported_after_clean_play() {
        let mut session = session();
        let mut io = Scripted {
            broken_cleanup: true,
            ..Default::default()
        };

        let err = session.run(&mut io, |_| {}).unwrap_err();
        assert!(err.to_string().contains("cleanup failed"), "got: {}", err);
    }
}
