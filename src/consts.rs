//! Assorted constants & hard-coded configuration
use crate::grid::Resolution;
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Number of pixels along each side of a grid cell.  The grid's dimensions
/// are the resolution divided by this, rounded down.
pub(crate) const CELL_SIZE: u32 = 20;

/// Resolution used when none is given on the command line or in the
/// configuration file
pub(crate) const DEFAULT_RESOLUTION: Resolution = Resolution {
    width: 640,
    height: 480,
};

/// Points awarded for each food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// How many times the food placer samples a random cell before falling back
/// to choosing among the free cells directly
pub(crate) const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Name of the directory under the platform config & data directories in
/// which the program keeps its files
pub(crate) const APP_DIR_NAME: &str = "gridsnake";

/// File name of the score list within the data directory
pub(crate) const SCORES_FILE_NAME: &str = "scores.txt";

/// Color of the snake's cells
pub(crate) const SNAKE_COLOR: Color = Color::Green;

/// Color of the food cell
pub(crate) const FOOD_COLOR: Color = Color::Red;

/// Glyph for a terminal cell whose upper grid cell is filled
pub(crate) const UPPER_HALF_SYMBOL: char = '▀';

/// Glyph for a terminal cell whose lower grid cell is filled
pub(crate) const LOWER_HALF_SYMBOL: char = '▄';

/// Glyph for a terminal cell whose two grid cells are both filled with the
/// same color
pub(crate) const FULL_BLOCK_SYMBOL: char = '█';

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the title of the menu & leaderboard screens
pub(crate) const TITLE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
