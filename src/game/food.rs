use super::snake::Snake;
use crate::consts;
use crate::grid::Grid;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

/// Choose a cell of `grid` not occupied by `snake` for the next food.
///
/// Cells are sampled uniformly at random until a free one turns up.  If the
/// snake is crowding the grid enough that sampling keeps missing, a free cell
/// is chosen directly instead.  Returns `None` only if the snake fills the
/// whole grid.
pub(crate) fn place<R: Rng>(grid: Grid, snake: &Snake, rng: &mut R) -> Option<Position> {
    if snake.len() >= grid.cell_count() {
        return None;
    }
    for _ in 0..consts::FOOD_SAMPLE_ATTEMPTS {
        let pos = Position::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
    grid.positions()
        .filter(|&p| !snake.occupies(p))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A snake filling every cell of `grid` except those in `free`
    fn crowding_snake(grid: Grid, free: &[Position]) -> Snake {
        let mut cells = grid.positions().filter(|p| !free.contains(p));
        let head = cells.next().unwrap();
        Snake {
            head,
            body: cells.collect::<VecDeque<_>>(),
            direction: Some(Direction::Right),
            pending: None,
        }
    }

    #[test]
    fn never_on_snake() {
        let grid = Grid::new(8, 6).unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = crowding_snake(
            grid,
            &[
                Position::new(0, 0),
                Position::new(7, 5),
                Position::new(3, 2),
                Position::new(4, 2),
                Position::new(0, 5),
                Position::new(7, 0),
                Position::new(2, 2),
                Position::new(1, 4),
            ],
        );
        for _ in 0..200 {
            let pos = place(grid, &snake, &mut rng).unwrap();
            assert!(grid.contains(pos));
            assert!(!snake.occupies(pos));
        }
    }

    #[test]
    fn single_free_cell() {
        let grid = Grid::new(10, 10).unwrap();
        let free = Position::new(6, 3);
        let snake = crowding_snake(grid, &[free]);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(place(grid, &snake, &mut rng), Some(free));
    }

    #[test]
    fn full_grid() {
        let grid = Grid::new(4, 3).unwrap();
        let snake = crowding_snake(grid, &[]);
        assert_eq!(snake.len(), grid.cell_count());
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(place(grid, &snake, &mut rng), None);
    }

    #[test]
    fn reaches_every_free_cell() {
        let grid = Grid::new(3, 3).unwrap();
        let snake = Snake::new(grid.center());
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.extend(place(grid, &snake, &mut rng));
        }
        assert_eq!(seen.len(), 8);
        assert!(!seen.contains(&grid.center()));
    }
}
