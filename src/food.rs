use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell the snake does not occupy.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Self {
        Self::new(spawn_position(rng, bounds, snake))
    }
}

/// Samples uniformly random cells until one is free of the snake.
///
/// Terminates as long as the snake leaves at least one cell free, which the
/// snake's capacity guarantees.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Position {
    debug_assert!(
        snake.len() < bounds.total_cells(),
        "spawn_position: no free cells on the board ({}×{})",
        bounds.width,
        bounds.height,
    );

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };

        if !snake.occupies(candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;

    use super::spawn_position;
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
            ],
            47,
        );
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let food_position = spawn_position(&mut rng, bounds, &snake);
            assert!(!snake.occupies(food_position));
            assert!(food_position.is_within_bounds(bounds));
        }
    }

    #[test]
    fn last_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 1, y: 1 },
            ],
            3,
        );

        let food_position = spawn_position(
            &mut rng,
            GridSize {
                width: 2,
                height: 2,
            },
            &snake,
        );

        assert_eq!(food_position, Position { x: 0, y: 1 });
    }

    #[test]
    fn same_seed_gives_same_placement() {
        let snake = Snake::horizontal(Position { x: 7, y: 10 }, 5, 599);
        let bounds = GridSize {
            width: 30,
            height: 20,
        };

        let first = spawn_position(&mut StdRng::seed_from_u64(99), bounds, &snake);
        let second = spawn_position(&mut StdRng::seed_from_u64(99), bounds, &snake);

        assert_eq!(first, second);
    }
}
