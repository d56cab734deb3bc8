mod direction;
mod food;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::snake::{Snake, TickResult};
use crate::consts;
use crate::grid::Grid;
use crate::util::center_rect;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::collections::HashMap;

/// One play-through: the snake, the food, and the score, on a fixed grid
#[derive(Clone, Debug)]
pub(crate) struct Session<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    score: u32,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(grid: Grid, rng: R) -> Session<R> {
        let mut session = Session {
            rng,
            grid,
            snake: Snake::new(grid.center()),
            food: None,
            score: 0,
        };
        session.place_food();
        session
    }

    /// Put a fresh, motionless snake in the center of the grid, zero the
    /// score, and place new food
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.score = 0;
        self.place_food();
    }

    /// Advance the game by one tick.  Returns `None` if the snake hasn't
    /// started moving.
    ///
    /// Eating the food adds to the score and places new food; the caller is
    /// responsible for acting on [`TickResult::Collided`].
    pub(crate) fn tick(&mut self) -> Option<TickResult> {
        let result = self.snake.advance(self.grid, self.food)?;
        if result == TickResult::AteFood {
            self.score = self.score.saturating_add(consts::FOOD_REWARD);
            self.place_food();
            tracing::debug!(
                score = self.score,
                length = self.snake.len(),
                food = ?self.food,
                "Snake ate food"
            );
        }
        Some(result)
    }

    fn place_food(&mut self) {
        self.food = food::place(self.grid, &self.snake, &mut self.rng);
    }
}

impl<R> Session<R> {
    /// Ask the snake to move in `direction` on the next tick.  Returns
    /// `false` if the request was refused for reversing the snake.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        self.snake.turn(direction)
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }
}

impl<R> Widget for &Session<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, board_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(format!(" Score: {}", self.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);

        // Two grid rows share each terminal row.
        let block_size = Size {
            width: self.grid.width().saturating_add(2),
            height: self.grid.height().div_ceil(2).saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = HalfBlockCanvas::default();
        for pos in self.snake.cells() {
            canvas.fill(pos, consts::SNAKE_COLOR);
        }
        if let Some(pos) = self.food {
            canvas.fill(pos, consts::FOOD_COLOR);
        }
        canvas.render(block_area.inner(Margin::new(1, 1)), buf);

        Line::from_iter([Span::raw(" Menu: "), Span::styled("Esc", consts::KEY_STYLE)])
            .render(hint_area, buf);
    }
}

/// Grid cells to draw, keyed by the terminal cell they fall in.  The first
/// element of each value is the upper grid cell, the second the lower.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct HalfBlockCanvas(HashMap<Position, [Option<Color>; 2]>);

impl HalfBlockCanvas {
    fn fill(&mut self, pos: Position, color: Color) {
        let halves = self.0.entry(Position::new(pos.x, pos.y / 2)).or_default();
        halves[usize::from(pos.y % 2)] = Some(color);
    }
}

impl Widget for HalfBlockCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (pos, halves) in self.0 {
            let (symbol, fg, bg) = match halves {
                [None, None] => continue,
                [Some(upper), None] => (consts::UPPER_HALF_SYMBOL, upper, Color::Reset),
                [None, Some(lower)] => (consts::LOWER_HALF_SYMBOL, lower, Color::Reset),
                [Some(upper), Some(lower)] if upper == lower => {
                    (consts::FULL_BLOCK_SYMBOL, upper, Color::Reset)
                }
                [Some(upper), Some(lower)] => (consts::UPPER_HALF_SYMBOL, upper, lower),
            };
            let Some(x) = area.x.checked_add(pos.x).filter(|&x| x < area.right()) else {
                continue;
            };
            let Some(y) = area.y.checked_add(pos.y).filter(|&y| y < area.bottom()) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(symbol).set_fg(fg).set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Style;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_session(width: u16, height: u16) -> Session<ChaCha12Rng> {
        Session::new(
            Grid::new(width, height).unwrap(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    #[test]
    fn new_session_state() {
        let session = new_session(32, 24);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().head(), Position::new(16, 12));
        assert_eq!(session.snake().len(), 1);
        assert_eq!(session.snake().direction(), None);
        let food = session.food.unwrap();
        assert!(session.grid.contains(food));
        assert_ne!(food, Position::new(16, 12));
    }

    #[test]
    fn tick_before_start_is_noop() {
        let mut session = new_session(32, 24);
        let food = session.food;
        assert_eq!(session.tick(), None);
        assert_eq!(session.snake().head(), Position::new(16, 12));
        assert_eq!(session.food, food);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn move_then_eat() {
        let mut session = new_session(32, 24);
        session.food = Some(Position::new(0, 0));
        assert!(session.steer(Direction::Right));
        assert_eq!(session.tick(), Some(TickResult::Continue));
        assert_eq!(session.snake().head(), Position::new(17, 12));
        assert_eq!(session.snake().len(), 1);
        assert_eq!(session.score(), 0);

        session.food = Some(Position::new(18, 12));
        assert_eq!(session.tick(), Some(TickResult::AteFood));
        assert_eq!(session.snake().len(), 2);
        assert_eq!(session.score(), 10);
        let food = session.food.unwrap();
        assert!(!session.snake().occupies(food));
    }

    #[test]
    fn score_counts_every_food() {
        let mut session = new_session(32, 24);
        assert!(session.steer(Direction::Up));
        for i in 1..=5u16 {
            session.food = Some(Position::new(16, 12 - i));
            assert_eq!(session.tick(), Some(TickResult::AteFood));
        }
        assert_eq!(session.score(), 50);
        assert_eq!(session.snake().len(), 6);
    }

    #[test]
    fn collide_with_wall() {
        let mut session = new_session(32, 24);
        session.food = Some(Position::new(0, 0));
        assert!(session.steer(Direction::Left));
        for _ in 0..16 {
            assert_eq!(session.tick(), Some(TickResult::Continue));
        }
        assert_eq!(session.snake().head(), Position::new(0, 12));
        assert_eq!(session.tick(), Some(TickResult::Collided));
        assert_eq!(session.snake().head(), Position::new(0, 12));
    }

    #[test]
    fn reset() {
        let mut session = new_session(32, 24);
        session.score = 120;
        session.snake = Snake {
            head: Position::new(3, 3),
            body: VecDeque::from([Position::new(3, 4), Position::new(3, 5)]),
            direction: Some(Direction::Up),
            pending: None,
        };
        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake(), &Snake::new(Position::new(16, 12)));
        let food = session.food.unwrap();
        assert_ne!(food, Position::new(16, 12));
    }

    #[test]
    fn fill_the_board() {
        let mut session = new_session(2, 1);
        assert_eq!(session.snake().head(), Position::new(1, 0));
        assert_eq!(session.food, Some(Position::new(0, 0)));
        assert!(session.steer(Direction::Left));
        assert_eq!(session.tick(), Some(TickResult::AteFood));
        assert_eq!(session.food, None);
        assert_eq!(session.score(), 10);
        assert_eq!(session.tick(), Some(TickResult::Collided));
    }

    #[test]
    fn render() {
        let mut session = new_session(6, 4);
        session.snake = Snake {
            head: Position::new(2, 1),
            body: VecDeque::from([Position::new(1, 1), Position::new(1, 2)]),
            direction: Some(Direction::Right),
            pending: None,
        };
        session.food = Some(Position::new(4, 3));
        let area = Rect::new(0, 0, 10, 6);
        let mut buffer = Buffer::empty(area);
        (&session).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 0",
            " ┌──────┐ ",
            " │ ▄▄   │ ",
            " │ ▀  ▄ │ ",
            " └──────┘ ",
            " Menu: Esc",
        ]);
        expected.set_style(Rect::new(0, 0, 10, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(3, 2, 2, 1), Style::new().fg(consts::SNAKE_COLOR));
        expected.set_style(Rect::new(3, 3, 1, 1), Style::new().fg(consts::SNAKE_COLOR));
        expected.set_style(Rect::new(6, 3, 1, 1), Style::new().fg(consts::FOOD_COLOR));
        expected.set_style(Rect::new(7, 5, 3, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_shared_cells() {
        let mut canvas = HalfBlockCanvas::default();
        canvas.fill(Position::new(0, 0), Color::Green);
        canvas.fill(Position::new(0, 1), Color::Green);
        canvas.fill(Position::new(1, 0), Color::Green);
        canvas.fill(Position::new(1, 1), Color::Red);
        canvas.fill(Position::new(2, 3), Color::Red);
        let area = Rect::new(0, 0, 3, 2);
        let mut buffer = Buffer::empty(area);
        canvas.render(area, &mut buffer);
        let mut expected = Buffer::with_lines(["█▀ ", "  ▄"]);
        expected.set_style(Rect::new(0, 0, 1, 1), Style::new().fg(Color::Green));
        expected.set_style(
            Rect::new(1, 0, 1, 1),
            Style::new().fg(Color::Green).bg(Color::Red),
        );
        expected.set_style(Rect::new(2, 1, 1, 1), Style::new().fg(Color::Red));
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
