use crate::grid::Grid;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that step would leave `grid`
    pub(crate) fn advance(self, pos: Position, grid: Grid) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = y.checked_add(1)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = x.checked_add(1)?,
        }
        let next = Position { x, y };
        grid.contains(next).then_some(next)
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
