use crate::config::GameConfig;
use crate::entity::{Direction, Position, Snake};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
    /// The snake fills the whole interior and no food can be placed
    Won,
}

/// What a single tick did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Grew,
    GameOver,
    BoardFull,
}

pub struct Game {
    pub width: i32,
    pub height: i32,
    pub snake: Snake,
    pub food: Option<Position>,
    pub direction: Direction,
    pub state: GameState,
    pub score: u32,
    pub level: u32,
    pub speed_ms: u64,
    config: GameConfig,
    rng: StdRng,
}

impl Game {
    /// New game on a `width` x `height` board with default tuning.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_config(GameConfig::new(width, height))
    }

    pub fn with_config(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::fresh(config, rng))
    }

    fn fresh(config: GameConfig, rng: StdRng) -> Self {
        let (width, height) = (config.width, config.height);

        let mut game = Self {
            width,
            height,
            snake: Snake::new(Position::new(width / 2, height / 2)),
            food: None,
            direction: Direction::Right,
            state: GameState::Running,
            score: 0,
            level: 1,
            speed_ms: config.initial_speed_ms,
            config,
            rng,
        };

        game.food = game.place_food();
        if game.food.is_none() {
            game.state = GameState::Won;
        }

        game
    }

    /// Start over with the same configuration. The RNG keeps running so a
    /// seeded session still gets a different board each game.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        let rng = self.rng.clone();
        *self = Self::fresh(config, rng);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Border cells are the outermost ring of the board.
    pub fn is_border(&self, pos: Position) -> bool {
        pos.x <= 0 || pos.y <= 0 || pos.x >= self.width - 1 || pos.y >= self.height - 1
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if !self.is_running() {
            return;
        }
        // A reversal would run the head straight into the neck
        if direction == self.direction.opposite() {
            return;
        }
        self.direction = direction;
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            GameState::Running => {}
            GameState::GameOver => return TickOutcome::GameOver,
            GameState::Won => return TickOutcome::BoardFull,
        }

        let next_head = self.snake.head().moved(self.direction);

        // The tail still counts: occupancy is checked before the body moves
        if self.is_border(next_head) || self.snake.contains(next_head) {
            self.state = GameState::GameOver;
            info!(score = self.score, level = self.level, "game over");
            return TickOutcome::GameOver;
        }

        if self.food != Some(next_head) {
            self.snake.advance(next_head);
            return TickOutcome::Continue;
        }

        self.snake.grow(next_head);
        self.score += self.config.points_per_food;
        self.check_level_up();

        self.food = self.place_food();
        if self.food.is_none() {
            self.state = GameState::Won;
            info!(score = self.score, length = self.snake.len(), "board full");
            return TickOutcome::BoardFull;
        }

        TickOutcome::Grew
    }

    fn check_level_up(&mut self) {
        while self.score >= self.level * self.config.points_per_level {
            self.level += 1;
            self.speed_ms = self
                .speed_ms
                .saturating_sub(self.config.speed_step_ms)
                .max(self.config.min_speed_ms);
            debug!(level = self.level, speed_ms = self.speed_ms, "level up");
        }
    }

    fn interior_area(&self) -> usize {
        (self.width - 2).max(0) as usize * (self.height - 2).max(0) as usize
    }

    /// Pick a free interior cell, or `None` when the snake covers them all.
    fn place_food(&mut self) -> Option<Position> {
        let area = self.interior_area();
        if self.snake.len() >= area {
            return None;
        }

        // Rejection sampling is cheap while the board is mostly empty
        let max_attempts = area * 4;
        for _ in 0..max_attempts {
            let candidate = Position::new(
                self.rng.gen_range(1..self.width - 1),
                self.rng.gen_range(1..self.height - 1),
            );
            if !self.snake.contains(candidate) {
                debug!(x = candidate.x, y = candidate.y, "food placed");
                return Some(candidate);
            }
        }

        let free: Vec<Position> = (1..self.height - 1)
            .flat_map(|y| (1..self.width - 1).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.snake.contains(*pos))
            .collect();
        let food = free.choose(&mut self.rng).copied();
        debug!(?food, free = free.len(), "food placed after exhausting samples");
        food
    }
}
