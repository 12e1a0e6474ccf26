use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::error::{GameError, GameResult};
use super::state::{Grid, Position};

/// Rejection draws before switching to an explicit scan of free cells
const MAX_RANDOM_DRAWS: usize = 64;

/// Pick a uniformly random cell of `grid` that is not in `occupied`
///
/// Fails with [`GameError::FoodPlacementExhausted`] when every cell is taken
/// instead of retrying forever.
pub fn spawn<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &HashSet<Position>,
    rng: &mut R,
) -> GameResult<Position> {
    let exhausted = GameError::FoodPlacementExhausted {
        width: grid.width(),
        height: grid.height(),
    };

    let taken = occupied.iter().filter(|cell| grid.contains(**cell)).count();
    if taken >= grid.area() {
        return Err(exhausted);
    }

    for _ in 0..MAX_RANDOM_DRAWS {
        let x = rng.gen_range(0..grid.width()) as i32;
        let y = rng.gen_range(0..grid.height()) as i32;
        let pos = Position::new(x, y);

        if !occupied.contains(&pos) {
            return Ok(pos);
        }
    }

    // Crowded grid: draw among what is left.
    grid.cells()
        .filter(|cell| !occupied.contains(cell))
        .choose(rng)
        .ok_or(exhausted)
}
