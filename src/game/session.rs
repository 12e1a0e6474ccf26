use std::collections::HashSet;

use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    difficulty::Difficulty,
    error::{GameError, GameResult},
    food,
    state::{Grid, Position, Snake},
};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved one cell, length unchanged
    Continued,
    /// Ate the food and grew; carries the freshly spawned food cell
    AteFood(Position),
    /// The move was fatal; nothing was mutated
    Collided(CollisionType),
}

/// Read-only view of a session handed to renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: Grid,
    /// Snake cells, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub ticks: u32,
    pub difficulty: Difficulty,
    pub paused: bool,
    pub over: bool,
}

impl SessionSnapshot {
    pub fn head(&self) -> Position {
        self.snake[0]
    }
}

/// One playthrough: snake, food, score and pacing
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    snake: Snake,
    food: Position,
    score: u32,
    ticks: u32,
    difficulty: Difficulty,
    paused: bool,
    over: bool,
    rng: StdRng,
}

impl GameSession {
    /// Start a fresh session seeded from OS entropy
    pub fn start(config: &GameConfig, difficulty: Difficulty) -> GameResult<Self> {
        Self::start_with_rng(config, difficulty, StdRng::from_entropy())
    }

    /// Start a fresh session with an explicit random source
    ///
    /// The snake starts at the grid center heading right; any extra
    /// segments trail to the left, clipped to the grid.
    pub fn start_with_rng(
        config: &GameConfig,
        difficulty: Difficulty,
        rng: StdRng,
    ) -> GameResult<Self> {
        config.validate()?;
        let grid = config.grid()?;
        let center = grid.center();
        let length = config.initial_snake_length.min(center.x as usize + 1);
        let snake = Snake::new(center, Direction::Right, length);

        Self::with_state(grid, snake, None, difficulty, rng)
    }

    /// Build a session around an existing snake
    ///
    /// Every snake cell must lie on `grid`. Given food must lie on the grid
    /// and off the snake; `None` spawns it.
    pub fn with_state(
        grid: Grid,
        snake: Snake,
        food: Option<Position>,
        difficulty: Difficulty,
        mut rng: StdRng,
    ) -> GameResult<Self> {
        if let Some(outside) = snake.cells().find(|cell| !grid.contains(*cell)) {
            return Err(GameError::InvalidSnake(outside));
        }

        let food = match food {
            Some(food) if !grid.contains(food) || snake.contains(food) => {
                return Err(GameError::InvalidFood(food));
            }
            Some(food) => food,
            None => {
                let occupied: HashSet<Position> = snake.cells().collect();
                food::spawn(&grid, &occupied, &mut rng)?
            }
        };

        debug!(
            "session started: {}x{} grid, {} difficulty, food at {:?}",
            grid.width(),
            grid.height(),
            difficulty,
            food
        );

        Ok(Self {
            grid,
            snake,
            food,
            score: 0,
            ticks: 0,
            difficulty,
            paused: false,
            over: false,
            rng,
        })
    }

    /// Execute one tick
    ///
    /// A collision leaves the snake exactly as it was and ends the session.
    /// Eating the food grows the snake, bumps the score and respawns food.
    pub fn advance(&mut self, action: Action) -> GameResult<TickOutcome> {
        if self.over {
            return Err(GameError::SessionOver);
        }
        if self.paused {
            return Err(GameError::SessionPaused);
        }

        let direction = self.snake.propose_move(action.direction());
        let new_head = self.snake.head().moved_in_direction(direction);

        if let Some(collision) = self.check_collision(new_head) {
            self.over = true;
            debug!("collision ({collision:?}) at {new_head:?} after {} ticks", self.ticks);
            return Ok(TickOutcome::Collided(collision));
        }

        let ate_food = new_head == self.food;
        self.snake.advance(direction, ate_food);
        self.ticks += 1;

        if !ate_food {
            trace!("tick {}: head at {new_head:?}", self.ticks);
            return Ok(TickOutcome::Continued);
        }

        self.score += 1;
        let occupied: HashSet<Position> = self.snake.cells().collect();
        match food::spawn(&self.grid, &occupied, &mut self.rng) {
            Ok(food) => {
                self.food = food;
                debug!("ate food, score {}, next food at {food:?}", self.score);
                Ok(TickOutcome::AteFood(food))
            }
            Err(err) => {
                self.over = true;
                Err(err)
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.grid.contains(pos) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True once a tick collided or food could not be placed
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid,
            snake: self.snake.cells().collect(),
            food: self.food,
            score: self.score,
            ticks: self.ticks,
            difficulty: self.difficulty,
            paused: self.paused,
            over: self.over,
        }
    }
}
