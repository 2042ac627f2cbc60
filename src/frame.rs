use crate::entity::Position;
use crate::game::Game;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Border,
    Food,
    Snake,
}

impl Glyph {
    pub fn as_char(self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Border => '#',
            Glyph::Food => 'F',
            Glyph::Snake => 'o',
        }
    }
}

/// Read-only picture of a game at one moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
    pub score: u32,
    pub level: u32,
    cells: Vec<Vec<Glyph>>,
}

impl Frame {
    pub fn capture(game: &Game) -> Self {
        let mut cells = vec![vec![Glyph::Empty; game.width as usize]; game.height as usize];

        for y in 0..game.height {
            for x in 0..game.width {
                if game.is_border(Position::new(x, y)) {
                    cells[y as usize][x as usize] = Glyph::Border;
                }
            }
        }

        for pos in game.snake.segments() {
            cells[pos.y as usize][pos.x as usize] = Glyph::Snake;
        }

        if let Some(food) = game.food {
            cells[food.y as usize][food.x as usize] = Glyph::Food;
        }

        Self {
            width: game.width,
            height: game.height,
            score: game.score,
            level: game.level,
            cells,
        }
    }

    pub fn glyph_at(&self, x: i32, y: i32) -> Glyph {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Glyph::Border;
        }
        self.cells[y as usize][x as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .iter()
            .map(|row| row.iter().map(|glyph| glyph.as_char()).collect::<String>())
    }

    pub fn status_line(&self) -> String {
        format!("Score: {}  Level: {}", self.score, self.level)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        write!(f, "{}", self.status_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entity::Snake;

    fn small_game() -> Game {
        let mut game = Game::with_config(GameConfig {
            seed: Some(5),
            ..GameConfig::new(6, 4)
        })
        .unwrap();
        game.snake = Snake::new(Position::new(2, 1));
        game.snake.grow(Position::new(3, 1));
        game.food = Some(Position::new(4, 2));
        game.score = 10;
        game
    }

    #[test]
    fn test_frame_layout() {
        let frame = Frame::capture(&small_game());

        let rows: Vec<String> = frame.rows().collect();
        assert_eq!(rows, vec!["######", "# oo #", "#   F#", "######"]);
        assert_eq!(frame.status_line(), "Score: 10  Level: 1");
    }

    #[test]
    fn test_display_appends_status() {
        let frame = Frame::capture(&small_game());
        assert_eq!(
            frame.to_string(),
            "######\n# oo #\n#   F#\n######\nScore: 10  Level: 1"
        );
    }

    #[test]
    fn test_glyph_lookup() {
        let frame = Frame::capture(&small_game());
        assert_eq!(frame.glyph_at(0, 0), Glyph::Border);
        assert_eq!(frame.glyph_at(3, 1), Glyph::Snake);
        assert_eq!(frame.glyph_at(4, 2), Glyph::Food);
        assert_eq!(frame.glyph_at(1, 2), Glyph::Empty);
        assert_eq!(frame.glyph_at(-1, 2), Glyph::Border);
    }

    #[test]
    fn test_capture_does_not_touch_game() {
        let game = small_game();
        let before: Vec<Position> = game.snake.segments().collect();
        let _ = Frame::capture(&game);
        assert_eq!(game.snake.segments().collect::<Vec<_>>(), before);
        assert_eq!(game.food, Some(Position::new(4, 2)));
    }
}
