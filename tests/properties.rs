//! Property tests for the tick rules

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_session::game::{
    Action, CollisionType, Difficulty, Direction, GameSession, Grid, Position, Snake, TickOutcome,
    food,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Continue), direction().prop_map(Action::Move)]
}

fn session_at(grid: Grid, cells: Vec<Position>, direction: Direction, seed: u64) -> GameSession {
    let snake = Snake::from_cells(cells, direction).unwrap();
    GameSession::with_state(
        grid,
        snake,
        None,
        Difficulty::Easy,
        StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn moving_off_any_edge_collides(
        width in 2usize..16,
        height in 2usize..16,
        along in 0usize..16,
        direction in direction(),
    ) {
        let grid = Grid::new(width, height).unwrap();
        let (x, y) = match direction {
            Direction::Up => (along % width, 0),
            Direction::Down => (along % width, height - 1),
            Direction::Left => (0, along % height),
            Direction::Right => (width - 1, along % height),
        };
        let head = Position::new(x as i32, y as i32);

        let mut session = session_at(grid, vec![head], direction, 0);
        let outcome = session.advance(Action::Continue).unwrap();

        prop_assert_eq!(outcome, TickOutcome::Collided(CollisionType::Wall));
        prop_assert_eq!(session.snake().cells().collect::<Vec<_>>(), vec![head]);
        prop_assert!(session.is_over());
    }

    #[test]
    fn reversal_is_always_ignored(current in direction()) {
        let snake = Snake::new(Position::new(5, 5), current, 3);
        prop_assert_eq!(snake.propose_move(Some(current.opposite())), current);
        prop_assert_eq!(snake.propose_move(None), current);
    }

    #[test]
    fn food_never_lands_on_occupied_cells(
        width in 1usize..8,
        height in 1usize..8,
        mask in prop::collection::vec(any::<bool>(), 64),
        seed in any::<u64>(),
    ) {
        let grid = Grid::new(width, height).unwrap();
        let occupied: HashSet<Position> = grid
            .cells()
            .zip(mask)
            .filter(|(_, taken)| *taken)
            .map(|(cell, _)| cell)
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);

        match food::spawn(&grid, &occupied, &mut rng) {
            Ok(cell) => {
                prop_assert!(grid.contains(cell));
                prop_assert!(!occupied.contains(&cell));
            }
            Err(_) => prop_assert_eq!(occupied.len(), grid.area()),
        }
    }

    #[test]
    fn random_play_keeps_invariants(
        actions in prop::collection::vec(action(), 1..200),
        seed in any::<u64>(),
    ) {
        let grid = Grid::new(8, 8).unwrap();
        let mut session = session_at(grid, vec![grid.center()], Direction::Right, seed);

        for action in actions {
            let before_len = session.snake().len();
            let before_cells: Vec<Position> = session.snake().cells().collect();
            let before_score = session.score();

            let Ok(outcome) = session.advance(action) else {
                break;
            };

            match outcome {
                TickOutcome::AteFood(food) => {
                    prop_assert_eq!(session.snake().len(), before_len + 1);
                    prop_assert_eq!(session.score(), before_score + 1);
                    prop_assert!(!session.snake().contains(food));
                }
                TickOutcome::Continued => {
                    prop_assert_eq!(session.snake().len(), before_len);
                    prop_assert_eq!(session.score(), before_score);
                }
                TickOutcome::Collided(_) => {
                    prop_assert_eq!(session.snake().cells().collect::<Vec<_>>(), before_cells);
                    prop_assert_eq!(session.score(), before_score);
                    break;
                }
            }

            let cells: Vec<Position> = session.snake().cells().collect();
            let unique: HashSet<Position> = cells.iter().copied().collect();
            prop_assert_eq!(unique.len(), cells.len());
            prop_assert!(cells.iter().all(|cell| grid.contains(*cell)));
            prop_assert!(!session.snake().contains(session.food()));
        }
    }
}

#[test]
fn entering_the_vacated_tail_continues() {
    // Square loop heading up; turning right lands on the tail.
    let grid = Grid::new(6, 6).unwrap();
    let cells = vec![
        Position::new(1, 1),
        Position::new(1, 2),
        Position::new(2, 2),
        Position::new(2, 1),
    ];
    let mut session = session_at(grid, cells, Direction::Up, 9);

    let outcome = session.advance(Action::Move(Direction::Right)).unwrap();

    assert_eq!(outcome, TickOutcome::Continued);
    assert_eq!(session.snake().head(), Position::new(2, 1));
    assert_eq!(session.snake().len(), 4);
}

#[test]
fn scenario_eat_on_first_tick() {
    let grid = Grid::new(10, 10).unwrap();
    let snake = Snake::from_cells([Position::new(5, 5)], Direction::Right).unwrap();
    let mut session = GameSession::with_state(
        grid,
        snake,
        Some(Position::new(6, 5)),
        Difficulty::Medium,
        StdRng::seed_from_u64(11),
    )
    .unwrap();

    let outcome = session.advance(Action::Continue).unwrap();

    let TickOutcome::AteFood(food) = outcome else {
        panic!("expected food, got {outcome:?}");
    };
    assert_eq!(
        session.snake().cells().collect::<Vec<_>>(),
        vec![Position::new(6, 5), Position::new(5, 5)]
    );
    assert_eq!(session.score(), 1);
    assert!(food != Position::new(6, 5) && food != Position::new(5, 5));
}
