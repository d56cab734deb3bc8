use ratatui::layout::{Position, Positions, Rect, Size};
use serde::Deserialize;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// A screen resolution in pixels, written `WIDTHxHEIGHT` (e.g., `800x600`)
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "String")]
pub(crate) struct Resolution {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Resolution, ResolutionError> {
        let Some((width, height)) = s.split_once('x') else {
            return Err(ResolutionError::NoSeparator);
        };
        let width = width
            .parse::<u32>()
            .map_err(|source| ResolutionError::Width { source })?;
        let height = height
            .parse::<u32>()
            .map_err(|source| ResolutionError::Height { source })?;
        Ok(Resolution { width, height })
    }
}

impl TryFrom<String> for Resolution {
    type Error = ResolutionError;

    fn try_from(s: String) -> Result<Resolution, ResolutionError> {
        s.parse()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ResolutionError {
    #[error("resolution must be of the form WIDTHxHEIGHT")]
    NoSeparator,
    #[error("invalid resolution width")]
    Width { source: ParseIntError },
    #[error("invalid resolution height")]
    Height { source: ParseIntError },
}

/// The playing field: a rectangle of cells with its top-left corner at the
/// origin.  Built once at startup and never modified.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub(crate) fn new(width: u16, height: u16) -> Result<Grid, GridError> {
        if width == 0 || height == 0 {
            Err(GridError::Empty { width, height })
        } else {
            Ok(Grid { width, height })
        }
    }

    /// Derive the grid for a screen of the given resolution whose cells are
    /// `cell_size` pixels square.  Partial cells at the right & bottom edges
    /// are dropped.
    pub(crate) fn from_resolution(resolution: Resolution, cell_size: u32) -> Result<Grid, GridError> {
        let width = resolution.width.checked_div(cell_size).unwrap_or_default();
        let height = resolution.height.checked_div(cell_size).unwrap_or_default();
        let too_large = || GridError::TooLarge { resolution };
        Grid::new(
            u16::try_from(width).map_err(|_| too_large())?,
            u16::try_from(height).map_err(|_| too_large())?,
        )
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Total number of cells in the grid
    pub(crate) fn cell_count(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Does `pos` lie within `[0, width) × [0, height)`?
    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The cell at which a fresh snake is placed
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("grid would be empty ({width}x{height} cells); resolution is too small")]
    Empty { width: u16, height: u16 },
    #[error("resolution {resolution} is too large")]
    TooLarge { resolution: Resolution },
}
