use std::collections::{HashSet, VecDeque};

use super::action::Direction;
use super::error::{GameError, GameResult};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Fixed-size playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> GameResult<Self> {
        if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
            return Err(GameError::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}

/// The snake in the game
///
/// The body is never empty and holds no duplicate cells. The head sits at
/// the front, the tail at the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    ///
    /// Segments trail behind the head, opposite to `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);

        for _ in 1..length {
            segment = segment.moved_in_direction(back);
            body.push_back(segment);
        }

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    ///
    /// Rejects an empty body and any repeated cell.
    pub fn from_cells<I>(cells: I, direction: Direction) -> GameResult<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = cells.into_iter().collect();
        if body.is_empty() {
            return Err(GameError::EmptySnake);
        }

        let mut seen = HashSet::with_capacity(body.len());
        if let Some(repeated) = body.iter().find(|cell| !seen.insert(**cell)) {
            return Err(GameError::InvalidSnake(*repeated));
        }
        Ok(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Current direction of movement
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Body cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Check if a position is occupied by any segment
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Resolve the direction to apply on the next tick
    ///
    /// No input, or input reversing the snake onto its neck, keeps the
    /// current direction.
    pub fn propose_move(&self, input: Option<Direction>) -> Direction {
        match input {
            Some(direction) if !direction.is_opposite(self.direction) => direction,
            _ => self.direction,
        }
    }

    /// Check if moving the head onto `pos` would hit the body
    ///
    /// The tail is excluded: it vacates its cell on the same tick. A single
    /// segment snake can never hit itself.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body
            .iter()
            .take(self.body.len() - 1)
            .any(|segment| *segment == pos)
    }

    /// Move one cell towards `direction`, keeping the tail if `should_grow`
    pub fn advance(&mut self, direction: Direction, should_grow: bool) -> Position {
        let new_head = self.head().moved_in_direction(direction);
        self.body.push_front(new_head);
        self.direction = direction;

        if !should_grow {
            self.body.pop_back();
        }
        new_head
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true: a snake always has a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
