use super::direction::Direction;
use crate::grid::Grid;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// A snake on the grid, along with the direction it is heading
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the rest of the snake, from the cell just behind the
    /// head to the tip of the tail
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake last moved, or `None` if it has not
    /// started moving yet
    pub(super) direction: Option<Direction>,

    /// The direction requested for the next move
    pub(super) pending: Option<Direction>,
}

impl Snake {
    /// Create a new snake of length 1 at `head` that is not moving
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            direction: None,
            pending: None,
        }
    }

    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Return the direction in which the snake is currently moving
    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Return the number of cells the snake occupies
    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over the snake's cells, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Request that the snake move in `direction` on its next advance.
    /// Returns `false` and leaves the request unchanged if `direction` is the
    /// reverse of the direction the snake last moved in.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_some_and(|d| d.reverse() == direction) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Move the snake one cell within `grid`, eating `food` if the new head
    /// lands on it.  Returns `None` without moving if the snake has no
    /// direction yet.
    ///
    /// On [`TickResult::Collided`] the snake's cells are left as they were.
    pub(crate) fn advance(&mut self, grid: Grid, food: Option<Position>) -> Option<TickResult> {
        let direction = self.pending.take().or(self.direction)?;
        self.direction = Some(direction);
        let Some(next) = direction.advance(self.head, grid) else {
            return Some(TickResult::Collided);
        };
        // The tail hasn't moved out of the way yet, so it counts.
        if self.occupies(next) {
            return Some(TickResult::Collided);
        }
        self.body.push_front(self.head);
        self.head = next;
        if food == Some(next) {
            Some(TickResult::AteFood)
        } else {
            let _ = self.body.pop_back();
            Some(TickResult::Continue)
        }
    }
}

/// Outcome of moving the snake one cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickResult {
    /// The snake moved and kept its length
    Continue,

    /// The snake moved onto the food and grew by one cell
    AteFood,

    /// The snake hit a wall or itself and could not move
    Collided,
}
