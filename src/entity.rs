use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved(&self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Position::new(self.x, self.y - 1),
            Direction::Down => Position::new(self.x, self.y + 1),
            Direction::Left => Position::new(self.x - 1, self.y),
            Direction::Right => Position::new(self.x + 1, self.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Snake body, head first.
///
/// `occupied` mirrors `body` so collision checks don't scan the segment list.
/// Both always hold the same cells and the body is never empty.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    occupied: HashSet<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
            occupied: HashSet::from([head]),
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.occupied.contains(&pos)
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Step onto `new_head`, dropping the tail.
    pub fn advance(&mut self, new_head: Position) {
        self.grow(new_head);
        if let Some(old_tail) = self.body.pop_back() {
            self.occupied.remove(&old_tail);
        }
    }

    /// Step onto `new_head`, keeping the tail.
    pub fn grow(&mut self, new_head: Position) {
        self.body.push_front(new_head);
        self.occupied.insert(new_head);
    }
}
